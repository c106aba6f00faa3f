use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Job categories a report can offer. Each variant exposes a subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobCategory {
    Nurses,
    MedicalOffice,
    Radiologist,
}

impl JobCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Nurses, Self::MedicalOffice, Self::Radiologist]
    }

    /// Key used by the JSON datasets.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Nurses => "nurses",
            Self::MedicalOffice => "medicalOffice",
            Self::Radiologist => "radiologist",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Nurses => "看護師",
            Self::MedicalOffice => "医療事務",
            Self::Radiologist => "放射線技師",
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for JobCategory {
    type Err = UnknownKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|category| category.key() == value.trim())
            .ok_or_else(|| UnknownKey::Category(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmploymentType {
    FullTime,
    PartTime,
}

impl EmploymentType {
    pub const fn ordered() -> [Self; 2] {
        [Self::FullTime, Self::PartTime]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::FullTime => "fullTime",
            Self::PartTime => "partTime",
        }
    }

    /// Label shown on the facet selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "正社員",
            Self::PartTime => "パート・アルバイト",
        }
    }

    /// Label used inside headings such as 給与統計（看護師・パート）.
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::FullTime => "正社員",
            Self::PartTime => "パート",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EmploymentType {
    type Err = UnknownKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|employment| employment.key() == value.trim())
            .ok_or_else(|| UnknownKey::Employment(value.to_string()))
    }
}

/// Whether a report lets the reader pick the employment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmploymentFacet {
    Free,
    Fixed(EmploymentType),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownKey {
    #[error("unknown job category key '{0}'")]
    Category(String),
    #[error("unknown employment type key '{0}'")]
    Employment(String),
}

/// Listing identifiers are numeric in the stock datasets but some exports use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Number(u64),
    Text(String),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Number(id) => write!(f, "{id}"),
            JobId::Text(id) => f.write_str(id),
        }
    }
}

/// One listing. Which compensation field is populated follows from the bucket it sits in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: JobId,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub job_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub work_hours: String,
    #[serde(default)]
    pub holiday: String,
    #[serde(
        default,
        deserialize_with = "optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary: Option<f64>,
    #[serde(
        default,
        deserialize_with = "optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub hourly_wage: Option<f64>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// Precomputed figures for one bucket. Ordering between the three is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    #[serde(default = "not_a_number", deserialize_with = "amount")]
    pub average: f64,
    #[serde(default = "not_a_number", deserialize_with = "amount")]
    pub max: f64,
    #[serde(default = "not_a_number", deserialize_with = "amount")]
    pub min: f64,
}

/// Amounts are not validated. Numeric strings are read as numbers and anything else
/// becomes NaN, which the formatters still render.
fn amount_from(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => text.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn not_a_number() -> f64 {
    f64::NAN
}

fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| amount_from(&value))
}

fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok((!value.is_null()).then(|| amount_from(&value)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Average,
    Max,
    Min,
}

impl StatKind {
    /// Display order for the statistics panel and chart.
    pub const fn ordered() -> [Self; 3] {
        [Self::Average, Self::Max, Self::Min]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Average => "平均",
            Self::Max => "最高",
            Self::Min => "最低",
        }
    }

    pub fn pick(self, stats: &StatSummary) -> f64 {
        match self {
            Self::Average => stats.average,
            Self::Max => stats.max,
            Self::Min => stats.min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_keys_round_trip_through_from_str() {
        for category in JobCategory::ordered() {
            assert_eq!(category.key().parse::<JobCategory>(), Ok(category));
        }
        assert_eq!(
            "dentist".parse::<JobCategory>(),
            Err(UnknownKey::Category("dentist".to_string()))
        );
    }

    #[test]
    fn employment_keys_match_dataset_spelling() {
        assert_eq!(" partTime ".parse::<EmploymentType>(), Ok(EmploymentType::PartTime));
        assert!("full_time".parse::<EmploymentType>().is_err());
        let json = serde_json::to_string(&EmploymentType::FullTime).expect("serializes");
        assert_eq!(json, "\"fullTime\"");
    }

    #[test]
    fn record_accepts_string_ids_and_missing_compensation() {
        let record: JobRecord = serde_json::from_str(
            r#"{"id":"a-7","name":"Clinic","type":"外来","benefits":["交通費","交通費"]}"#,
        )
        .expect("record parses");
        assert_eq!(record.id, JobId::Text("a-7".to_string()));
        assert_eq!(record.job_type, "外来");
        assert!(record.salary.is_none() && record.hourly_wage.is_none());
        assert_eq!(record.benefits, vec!["交通費", "交通費"]);
    }

    #[test]
    fn malformed_amounts_become_nan_instead_of_failing() {
        let record: JobRecord =
            serde_json::from_str(r#"{"id":1,"salary":"要相談","hourlyWage":"1500"}"#)
                .expect("record parses");
        assert!(record.salary.is_some_and(f64::is_nan));
        assert_eq!(record.hourly_wage, Some(1500.0));

        let stats: StatSummary =
            serde_json::from_str(r#"{"average":"N/A","min":1000}"#)
                .expect("statistics parse");
        assert!(stats.average.is_nan() && stats.max.is_nan());
        assert_eq!(stats.min, 1000.0);
    }

    #[test]
    fn explicit_null_compensation_is_absent() {
        let record: JobRecord =
            serde_json::from_str(r#"{"id":2,"salary":null}"#).expect("record parses");
        assert_eq!(record.salary, None);
    }

    #[test]
    fn stat_kinds_pick_their_field() {
        let stats = StatSummary {
            average: 2.0,
            max: 3.0,
            min: 1.0,
        };
        let picked: Vec<f64> = StatKind::ordered()
            .into_iter()
            .map(|kind| kind.pick(&stats))
            .collect();
        assert_eq!(picked, vec![2.0, 3.0, 1.0]);
    }
}

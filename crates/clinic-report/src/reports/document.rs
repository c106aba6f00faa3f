use super::domain::{EmploymentFacet, EmploymentType, JobCategory, JobRecord, StatSummary};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Failure to obtain or parse a report dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read report asset {asset}: {source}")]
    Io {
        asset: String,
        #[source]
        source: std::io::Error,
    },
    #[error("report asset is not a valid job document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("report asset {0} is outside the asset directory")]
    InvalidAsset(String),
}

/// A dataset as published for one report variant.
///
/// Only the keys of [`JobCategory`] are decoded. Any other top-level entry, such as
/// metadata or a category this build does not know, is skipped, and a category the file
/// lacks shows up as `None` on lookup.
#[derive(Debug, Clone)]
pub enum JobDocument {
    /// `{ category: { fullTime: [...], partTime: [...] }, statistics: {...} }`
    ByEmployment(Dataset<EmploymentBuckets<Vec<JobRecord>>, EmploymentBuckets<StatSummary>>),
    /// `{ category: [...], statistics: { category: {...} } }` where every listing has
    /// the same employment type.
    Collapsed {
        employment: EmploymentType,
        dataset: Dataset<Vec<JobRecord>, StatSummary>,
    },
}

#[derive(Debug, Clone)]
pub struct Dataset<J, S> {
    categories: HashMap<JobCategory, J>,
    statistics: HashMap<JobCategory, S>,
}

/// Values split by employment type. Keys other than `fullTime`/`partTime` are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentBuckets<T> {
    full_time: Option<T>,
    part_time: Option<T>,
}

impl<T> EmploymentBuckets<T> {
    pub fn get(&self, employment: EmploymentType) -> Option<&T> {
        match employment {
            EmploymentType::FullTime => self.full_time.as_ref(),
            EmploymentType::PartTime => self.part_time.as_ref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    statistics: HashMap<String, Value>,
    #[serde(flatten)]
    entries: HashMap<String, Value>,
}

impl JobDocument {
    pub fn from_slice(bytes: &[u8], facet: EmploymentFacet) -> Result<Self, LoadError> {
        Self::from_raw(serde_json::from_slice(bytes)?, facet)
    }

    pub fn from_reader<R: Read>(reader: R, facet: EmploymentFacet) -> Result<Self, LoadError> {
        Self::from_raw(serde_json::from_reader(reader)?, facet)
    }

    pub fn from_path<P: AsRef<Path>>(path: P, facet: EmploymentFacet) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            asset: path.display().to_string(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file), facet)
    }

    fn from_raw(raw: RawDocument, facet: EmploymentFacet) -> Result<Self, LoadError> {
        let document = match facet {
            EmploymentFacet::Free => Self::ByEmployment(Dataset::decode(raw)?),
            EmploymentFacet::Fixed(employment) => Self::Collapsed {
                employment,
                dataset: Dataset::decode(raw)?,
            },
        };
        Ok(document)
    }

    pub fn facet(&self) -> EmploymentFacet {
        match self {
            Self::ByEmployment(_) => EmploymentFacet::Free,
            Self::Collapsed { employment, .. } => EmploymentFacet::Fixed(*employment),
        }
    }

    /// Categories present in the file, in the canonical category order.
    pub fn categories(&self) -> Vec<JobCategory> {
        JobCategory::ordered()
            .into_iter()
            .filter(|category| match self {
                Self::ByEmployment(dataset) => dataset.categories.contains_key(category),
                Self::Collapsed { dataset, .. } => dataset.categories.contains_key(category),
            })
            .collect()
    }
}

impl<J: DeserializeOwned, S: DeserializeOwned> Dataset<J, S> {
    fn decode(mut raw: RawDocument) -> Result<Self, serde_json::Error> {
        let mut categories = HashMap::new();
        let mut statistics = HashMap::new();
        for category in JobCategory::ordered() {
            if let Some(value) = raw.entries.remove(category.key()) {
                categories.insert(category, serde_json::from_value(value)?);
            }
            if let Some(value) = raw.statistics.remove(category.key()) {
                statistics.insert(category, serde_json::from_value(value)?);
            }
        }
        Ok(Self {
            categories,
            statistics,
        })
    }
}

impl Dataset<EmploymentBuckets<Vec<JobRecord>>, EmploymentBuckets<StatSummary>> {
    pub fn jobs(&self, category: JobCategory, employment: EmploymentType) -> Option<&[JobRecord]> {
        self.categories
            .get(&category)
            .and_then(|buckets| buckets.get(employment))
            .map(Vec::as_slice)
    }

    pub fn statistics(
        &self,
        category: JobCategory,
        employment: EmploymentType,
    ) -> Option<&StatSummary> {
        self.statistics
            .get(&category)
            .and_then(|buckets| buckets.get(employment))
    }
}

impl Dataset<Vec<JobRecord>, StatSummary> {
    pub fn jobs(&self, category: JobCategory) -> Option<&[JobRecord]> {
        self.categories.get(&category).map(Vec::as_slice)
    }

    pub fn statistics(&self, category: JobCategory) -> Option<&StatSummary> {
        self.statistics.get(&category)
    }
}

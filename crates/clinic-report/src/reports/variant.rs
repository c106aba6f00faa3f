use super::domain::{EmploymentFacet, EmploymentType, JobCategory};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The published report editions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportVariant {
    Asagaya,
    Machida,
}

impl ReportVariant {
    pub const fn ordered() -> [Self; 2] {
        [Self::Asagaya, Self::Machida]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Asagaya => "asagaya",
            Self::Machida => "machida",
        }
    }

    /// Navigation label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asagaya => "阿佐ヶ谷版",
            Self::Machida => "町田版",
        }
    }

    pub fn config(self) -> ReportConfig {
        match self {
            Self::Asagaya => ReportConfig::asagaya(),
            Self::Machida => ReportConfig::machida(),
        }
    }
}

impl fmt::Display for ReportVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ReportVariant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|variant| variant.slug() == wanted)
            .ok_or_else(|| format!("unknown report variant '{value}'"))
    }
}

/// Glyph and unit markers used when rendering amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyStyle {
    pub glyph: &'static str,
    pub ten_thousand: &'static str,
    pub per_month: &'static str,
    pub per_hour: &'static str,
}

impl CurrencyStyle {
    pub const fn yen() -> Self {
        Self {
            glyph: "¥",
            ten_thousand: "万",
            per_month: "/月",
            per_hour: "/時間",
        }
    }
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        Self::yen()
    }
}

/// Everything that differs between report editions.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub variant: ReportVariant,
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub area: &'static str,
    pub surveyed_on: NaiveDate,
    pub categories: Vec<JobCategory>,
    pub employment: EmploymentFacet,
    /// Path of the dataset relative to the asset root.
    pub asset: &'static str,
    pub currency: CurrencyStyle,
    pub footer: Vec<&'static str>,
}

impl ReportConfig {
    pub fn builder(variant: ReportVariant, asset: &'static str) -> ReportConfigBuilder {
        ReportConfigBuilder::new(variant, asset)
    }

    pub fn asagaya() -> Self {
        Self::builder(ReportVariant::Asagaya, "clinic_job_data.json")
            .title("阿佐ヶ谷周辺クリニック医療職求人比較レポート")
            .area("阿佐ヶ谷周辺エリア")
            .surveyed_on(survey_month())
            .categories([
                JobCategory::Nurses,
                JobCategory::MedicalOffice,
                JobCategory::Radiologist,
            ])
            .footer_note("このレポートは株式会社HOAPがリサーチ・作成したものです。")
            .footer_note("無断転用及び無断複製を厳禁します。")
            .build()
    }

    pub fn machida() -> Self {
        Self::builder(ReportVariant::Machida, "machida_extended_jobs.json")
            .title("多摩地域 パート時給比較レポート")
            .subtitle("看護師・医療事務のパート時給を徹底比較")
            .area("町田・相模大野・八王子・立川・日野エリア | パート・アルバイト限定")
            .surveyed_on(survey_month())
            .categories([JobCategory::Nurses, JobCategory::MedicalOffice])
            .fixed_employment(EmploymentType::PartTime)
            .footer_note(
                "このレポートは2026年1月に町田・相模大野エリアの医療職パート求人情報を調査した結果です。",
            )
            .footer_note("情報は変動する可能性があります。最新情報は各施設にお問い合わせください。")
            .build()
    }

    pub fn offers(&self, category: JobCategory) -> bool {
        self.categories.contains(&category)
    }

    pub fn default_category(&self) -> JobCategory {
        if self.offers(JobCategory::Nurses) {
            JobCategory::Nurses
        } else {
            self.categories
                .first()
                .copied()
                .unwrap_or(JobCategory::Nurses)
        }
    }

    /// Employment type a fresh selection starts from; `None` when the facet is fixed.
    pub fn default_employment(&self) -> Option<EmploymentType> {
        match self.employment {
            EmploymentFacet::Free => Some(EmploymentType::FullTime),
            EmploymentFacet::Fixed(_) => None,
        }
    }

    pub fn survey_label(&self) -> String {
        format!("{}調査 | {}", self.surveyed_on.format("%Y年%-m月"), self.area)
    }
}

fn survey_month() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Incremental construction of a [`ReportConfig`] for editions beyond the stock two.
#[derive(Debug, Clone)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    fn new(variant: ReportVariant, asset: &'static str) -> Self {
        Self {
            config: ReportConfig {
                variant,
                title: "",
                subtitle: None,
                area: "",
                surveyed_on: survey_month(),
                categories: JobCategory::ordered().to_vec(),
                employment: EmploymentFacet::Free,
                asset,
                currency: CurrencyStyle::yen(),
                footer: Vec::new(),
            },
        }
    }

    pub fn title(mut self, title: &'static str) -> Self {
        self.config.title = title;
        self
    }

    pub fn subtitle(mut self, subtitle: &'static str) -> Self {
        self.config.subtitle = Some(subtitle);
        self
    }

    pub fn area(mut self, area: &'static str) -> Self {
        self.config.area = area;
        self
    }

    pub fn surveyed_on(mut self, date: NaiveDate) -> Self {
        self.config.surveyed_on = date;
        self
    }

    /// Replaces the category list. Duplicates are dropped, first occurrence wins.
    pub fn categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = JobCategory>,
    {
        let mut unique = Vec::new();
        for category in categories {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }
        self.config.categories = unique;
        self
    }

    pub fn fixed_employment(mut self, employment: EmploymentType) -> Self {
        self.config.employment = EmploymentFacet::Fixed(employment);
        self
    }

    /// Appends one line to the footer.
    pub fn footer_note(mut self, line: &'static str) -> Self {
        self.config.footer.push(line);
        self
    }

    pub fn build(self) -> ReportConfig {
        self.config
    }
}

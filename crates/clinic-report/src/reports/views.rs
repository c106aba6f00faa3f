use super::domain::{EmploymentType, JobCategory, JobId, StatKind};
use super::format::CompensationMode;
use super::selection::Selection;
use super::variant::ReportVariant;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryOption {
    pub key: JobCategory,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmploymentOption {
    pub key: EmploymentType,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatFigureView {
    pub kind: StatKind,
    pub label: &'static str,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsPanel {
    pub heading: String,
    pub mode: CompensationMode,
    pub figures: Vec<StatFigureView>,
    /// Same three points as `figures`, in the same order, for the bar chart.
    pub chart: Vec<StatFigureView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobCardView {
    pub id: JobId,
    pub name: String,
    pub job_type: String,
    pub pay_label: &'static str,
    pub compensation: String,
    pub location: String,
    pub work_hours: String,
    pub holiday: String,
    pub benefits: Vec<String>,
    /// `i/N` badge.
    pub position: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobListView {
    pub count: usize,
    pub count_label: String,
    pub cards: Vec<JobCardView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub variant: ReportVariant,
    pub label: &'static str,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    pub variant: ReportVariant,
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<&'static str>,
    pub survey_label: String,
    pub selection: Selection,
    pub category_options: Vec<CategoryOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employment_options: Vec<EmploymentOption>,
    pub statistics: StatisticsPanel,
    pub jobs: JobListView,
    pub navigation: Vec<NavLink>,
    /// Attribution and survey notes printed under the listings.
    pub footer: Vec<&'static str>,
}

/// What a report instance shows at any moment.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportPage {
    Loading { message: &'static str },
    Ready(Box<ReportView>),
}

impl ReportPage {
    pub const LOADING_MESSAGE: &'static str = "読み込み中...";

    pub const fn loading() -> Self {
        Self::Loading {
            message: Self::LOADING_MESSAGE,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

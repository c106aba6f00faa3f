use super::domain::{EmploymentFacet, EmploymentType, JobCategory, UnknownKey};
use super::variant::ReportConfig;
use serde::Serialize;
use tracing::{debug, warn};

/// The facets a reader has chosen. Passed by value into derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    pub category: JobCategory,
    /// `None` for editions whose employment type is fixed.
    pub employment: Option<EmploymentType>,
}

impl Selection {
    pub fn initial(config: &ReportConfig) -> Self {
        Self {
            category: config.default_category(),
            employment: config.default_employment(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error(transparent)]
    UnknownKey(#[from] UnknownKey),
    #[error("category {0} is not offered by this report")]
    CategoryNotOffered(JobCategory),
    #[error("employment type is fixed to {0} for this report")]
    EmploymentFixed(EmploymentType),
}

/// Mutable selection owned by one report instance.
///
/// Rejected changes leave the current selection untouched.
#[derive(Debug, Clone)]
pub struct SelectionState {
    categories: Vec<JobCategory>,
    facet: EmploymentFacet,
    current: Selection,
}

impl SelectionState {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            categories: config.categories.clone(),
            facet: config.employment,
            current: Selection::initial(config),
        }
    }

    pub fn current(&self) -> Selection {
        self.current
    }

    pub fn set_job_category(&mut self, category: JobCategory) -> Result<(), SelectionError> {
        if !self.categories.contains(&category) {
            warn!(%category, "rejected category outside the report's enumeration");
            return Err(SelectionError::CategoryNotOffered(category));
        }

        debug!(from = %self.current.category, to = %category, "job category selected");
        self.current.category = category;
        Ok(())
    }

    pub fn set_employment_type(&mut self, employment: EmploymentType) -> Result<(), SelectionError> {
        if let EmploymentFacet::Fixed(fixed) = self.facet {
            warn!(%employment, %fixed, "rejected employment change on fixed-facet report");
            return Err(SelectionError::EmploymentFixed(fixed));
        }

        debug!(to = %employment, "employment type selected");
        self.current.employment = Some(employment);
        Ok(())
    }

    pub fn select_category_key(&mut self, key: &str) -> Result<(), SelectionError> {
        let category = key.parse::<JobCategory>().map_err(|err| {
            warn!(key, "rejected unknown category key");
            SelectionError::from(err)
        })?;
        self.set_job_category(category)
    }

    pub fn select_employment_key(&mut self, key: &str) -> Result<(), SelectionError> {
        let employment = key.parse::<EmploymentType>().map_err(|err| {
            warn!(key, "rejected unknown employment key");
            SelectionError::from(err)
        })?;
        self.set_employment_type(employment)
    }
}

use super::document::JobDocument;
use super::domain::{EmploymentType, JobCategory, JobRecord, StatKind, StatSummary};
use super::format::CompensationMode;
use super::selection::Selection;
use serde::Serialize;

/// A selection that the loaded document cannot satisfy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("no job listings for {category}/{employment}")]
    MissingJobs {
        category: JobCategory,
        employment: &'static str,
    },
    #[error("no statistics for {category}/{employment}")]
    MissingStatistics {
        category: JobCategory,
        employment: &'static str,
    },
    #[error("document is split by employment type but no employment type was selected for {0}")]
    EmploymentRequired(JobCategory),
    #[error("document only carries {available} listings; {requested} is unavailable")]
    EmploymentUnavailable {
        requested: EmploymentType,
        available: EmploymentType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub kind: StatKind,
    pub label: &'static str,
    pub value: f64,
}

/// Everything the presentation layer needs for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedReport<'a> {
    pub selection: Selection,
    pub jobs: &'a [JobRecord],
    pub stats: StatSummary,
    pub is_full_time: bool,
    pub chart: [ChartPoint; 3],
}

impl DerivedReport<'_> {
    pub fn mode(&self) -> CompensationMode {
        CompensationMode::from_full_time(self.is_full_time)
    }
}

/// Resolves the bucket named by `selection`. Reads its inputs only.
pub fn derive(
    document: &JobDocument,
    selection: Selection,
) -> Result<DerivedReport<'_>, ReportError> {
    let category = selection.category;

    let (jobs, stats, is_full_time) = match document {
        JobDocument::ByEmployment(dataset) => {
            let employment = selection
                .employment
                .ok_or(ReportError::EmploymentRequired(category))?;
            let jobs = dataset
                .jobs(category, employment)
                .ok_or(ReportError::MissingJobs {
                    category,
                    employment: employment.key(),
                })?;
            let stats = dataset.statistics(category, employment).ok_or(
                ReportError::MissingStatistics {
                    category,
                    employment: employment.key(),
                },
            )?;
            (jobs, *stats, employment == EmploymentType::FullTime)
        }
        JobDocument::Collapsed {
            employment,
            dataset,
        } => {
            let available = *employment;
            if let Some(requested) = selection.employment.filter(|&e| e != available) {
                return Err(ReportError::EmploymentUnavailable {
                    requested,
                    available,
                });
            }
            let jobs = dataset.jobs(category).ok_or(ReportError::MissingJobs {
                category,
                employment: available.key(),
            })?;
            let stats = dataset
                .statistics(category)
                .ok_or(ReportError::MissingStatistics {
                    category,
                    employment: available.key(),
                })?;
            (jobs, *stats, available == EmploymentType::FullTime)
        }
    };

    Ok(DerivedReport {
        selection,
        jobs,
        stats,
        is_full_time,
        chart: chart_points(&stats),
    })
}

fn chart_points(stats: &StatSummary) -> [ChartPoint; 3] {
    StatKind::ordered().map(|kind| ChartPoint {
        kind,
        label: kind.label(),
        value: kind.pick(stats),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::domain::EmploymentFacet;

    fn nested() -> JobDocument {
        JobDocument::from_slice(
            br#"{
                "nurses": {
                    "fullTime": [{"id": 1, "salary": 300000, "benefits": ["social insurance"]}],
                    "partTime": []
                },
                "radiologist": {"fullTime": [], "partTime": []},
                "statistics": {
                    "nurses": {
                        "fullTime": {"min": 300000, "max": 300000, "average": 300000},
                        "partTime": {"average": 0, "max": 0, "min": 0}
                    }
                }
            }"#,
            EmploymentFacet::Free,
        )
        .expect("fixture parses")
    }

    fn collapsed() -> JobDocument {
        JobDocument::from_slice(
            br#"{
                "nurses": [{"id": 1, "hourlyWage": 1900}, {"id": 2, "hourlyWage": 1700}],
                "statistics": {"nurses": {"average": 1800, "max": 1900, "min": 1700}}
            }"#,
            EmploymentFacet::Fixed(EmploymentType::PartTime),
        )
        .expect("fixture parses")
    }

    #[test]
    fn resolves_jobs_and_statistics_from_the_same_bucket() {
        let document = nested();
        let derived = derive(
            &document,
            Selection {
                category: JobCategory::Nurses,
                employment: Some(EmploymentType::FullTime),
            },
        )
        .expect("bucket resolves");

        assert_eq!(derived.jobs.len(), 1);
        assert_eq!(derived.stats.average, 300_000.0);
        assert!(derived.is_full_time);
        assert_eq!(derived.mode(), CompensationMode::Monthly);
    }

    #[test]
    fn collapsed_full_time_document_uses_monthly_mode() {
        let document = JobDocument::from_slice(
            br#"{
                "radiologist": [{"id": 4, "salary": 340000}],
                "statistics": {"radiologist": {"average": 340000, "max": 340000, "min": 340000}}
            }"#,
            EmploymentFacet::Fixed(EmploymentType::FullTime),
        )
        .expect("fixture parses");
        let derived = derive(
            &document,
            Selection {
                category: JobCategory::Radiologist,
                employment: None,
            },
        )
        .expect("bucket resolves");

        assert!(derived.is_full_time);
        assert_eq!(derived.mode(), CompensationMode::Monthly);
    }

    #[test]
    fn chart_order_is_fixed_regardless_of_source_field_order() {
        let document = nested();
        let derived = derive(
            &document,
            Selection {
                category: JobCategory::Nurses,
                employment: Some(EmploymentType::FullTime),
            },
        )
        .expect("bucket resolves");

        let kinds: Vec<StatKind> = derived.chart.iter().map(|point| point.kind).collect();
        assert_eq!(kinds, vec![StatKind::Average, StatKind::Max, StatKind::Min]);
    }

    #[test]
    fn collapsed_document_is_never_full_time() {
        let document = collapsed();
        let derived = derive(
            &document,
            Selection {
                category: JobCategory::Nurses,
                employment: None,
            },
        )
        .expect("bucket resolves");

        assert!(!derived.is_full_time);
        assert_eq!(derived.jobs.len(), 2);
        assert_eq!(
            derived.chart.map(|point| point.value),
            [1800.0, 1900.0, 1700.0]
        );
    }

    #[test]
    fn missing_statistics_are_signalled_not_defaulted() {
        let document = nested();
        let err = derive(
            &document,
            Selection {
                category: JobCategory::Radiologist,
                employment: Some(EmploymentType::PartTime),
            },
        )
        .expect_err("statistics missing");

        assert_eq!(
            err,
            ReportError::MissingStatistics {
                category: JobCategory::Radiologist,
                employment: "partTime",
            }
        );
    }

    #[test]
    fn shape_mismatches_are_errors() {
        assert_eq!(
            derive(
                &nested(),
                Selection {
                    category: JobCategory::Nurses,
                    employment: None,
                },
            )
            .expect_err("employment required"),
            ReportError::EmploymentRequired(JobCategory::Nurses)
        );
        assert_eq!(
            derive(
                &collapsed(),
                Selection {
                    category: JobCategory::Nurses,
                    employment: Some(EmploymentType::FullTime),
                },
            )
            .expect_err("full-time unavailable"),
            ReportError::EmploymentUnavailable {
                requested: EmploymentType::FullTime,
                available: EmploymentType::PartTime,
            }
        );
        assert!(matches!(
            derive(
                &collapsed(),
                Selection {
                    category: JobCategory::MedicalOffice,
                    employment: None,
                },
            ),
            Err(ReportError::MissingJobs { .. })
        ));
    }
}

use super::derivation::DerivedReport;
use super::domain::{EmploymentFacet, EmploymentType};
use super::format::CompensationFormatter;
use super::variant::{ReportConfig, ReportVariant};
use super::views::{
    CategoryOption, EmploymentOption, JobCardView, JobListView, NavLink, ReportView,
    StatFigureView, StatisticsPanel,
};

impl DerivedReport<'_> {
    /// Renders the derived bucket into display values. Every amount goes through one
    /// formatter built from `is_full_time`.
    pub fn to_view(&self, config: &ReportConfig) -> ReportView {
        let formatter = CompensationFormatter::new(self.mode(), &config.currency);
        let selection = self.selection;

        let employment = match config.employment {
            EmploymentFacet::Free => selection.employment.unwrap_or(EmploymentType::FullTime),
            EmploymentFacet::Fixed(fixed) => fixed,
        };
        let (stats_prefix, pay_label) = match config.employment {
            EmploymentFacet::Fixed(EmploymentType::PartTime) => ("時給統計", "時給"),
            _ => ("給与統計", "給与"),
        };

        let figures: Vec<StatFigureView> = self
            .chart
            .iter()
            .map(|point| StatFigureView {
                kind: point.kind,
                label: point.label,
                value: point.value,
                display: formatter.figure(point.value),
            })
            .collect();

        let total = self.jobs.len();
        let cards = self
            .jobs
            .iter()
            .enumerate()
            .map(|(index, record)| JobCardView {
                id: record.id.clone(),
                name: record.name.clone(),
                job_type: record.job_type.clone(),
                pay_label,
                compensation: formatter.pay(record),
                location: record.location.clone(),
                work_hours: record.work_hours.clone(),
                holiday: record.holiday.clone(),
                benefits: record.benefits.clone(),
                position: format!("{}/{}", index + 1, total),
            })
            .collect();

        let category_options = config
            .categories
            .iter()
            .map(|&category| CategoryOption {
                key: category,
                label: category.label(),
                selected: category == selection.category,
            })
            .collect();

        let employment_options = match config.employment {
            EmploymentFacet::Free => EmploymentType::ordered()
                .into_iter()
                .map(|option| EmploymentOption {
                    key: option,
                    label: option.label(),
                    selected: option == employment,
                })
                .collect(),
            EmploymentFacet::Fixed(_) => Vec::new(),
        };

        let navigation = ReportVariant::ordered()
            .into_iter()
            .map(|variant| NavLink {
                variant,
                label: variant.label(),
                current: variant == config.variant,
            })
            .collect();

        ReportView {
            variant: config.variant,
            title: config.title,
            subtitle: config.subtitle,
            survey_label: config.survey_label(),
            selection,
            category_options,
            employment_options,
            statistics: StatisticsPanel {
                heading: format!(
                    "{}（{}・{}）",
                    stats_prefix,
                    selection.category.label(),
                    employment.short_label()
                ),
                mode: formatter.mode(),
                chart: figures.clone(),
                figures,
            },
            jobs: JobListView {
                count: total,
                count_label: format!("{total}件の求人"),
                cards,
            },
            navigation,
            footer: config.footer.clone(),
        }
    }
}

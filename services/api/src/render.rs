use crate::cli::ReportArgs;
use clinic_report::config::AppConfig;
use clinic_report::error::AppError;
use clinic_report::reports::views::ReportView;
use clinic_report::reports::{FsDocumentSource, ReportPage, ReportSession};
use clinic_report::telemetry::{self, LogSink};
use std::fmt::Write;

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        variant,
        category,
        employment,
        asset_dir,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(asset_dir) = asset_dir {
        config.assets.root = asset_dir;
    }
    telemetry::init(&config.telemetry, LogSink::Stderr)?;

    let source = FsDocumentSource::new(config.assets.root);
    let mut session = ReportSession::new(variant.config());
    session.load(&source).await;

    if let Some(key) = category.as_deref() {
        session.select_category_key(key)?;
    }
    if let Some(key) = employment.as_deref() {
        session.select_employment_key(key)?;
    }

    match session.page()? {
        ReportPage::Ready(view) => {
            print!("{}", render_report(&view));
            Ok(())
        }
        ReportPage::Loading { message } => {
            println!("{message}");
            Err(AppError::NotLoaded(variant))
        }
    }
}

pub(crate) fn render_report(view: &ReportView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, view);
    out
}

fn write_report(out: &mut String, view: &ReportView) -> std::fmt::Result {
    writeln!(out, "{}", view.title)?;
    if let Some(subtitle) = view.subtitle {
        writeln!(out, "{subtitle}")?;
    }
    writeln!(out, "{}", view.survey_label)?;

    let categories: Vec<String> = view
        .category_options
        .iter()
        .map(|option| marked(option.label, option.selected))
        .collect();
    writeln!(out, "\n職種: {}", categories.join(" "))?;

    if !view.employment_options.is_empty() {
        let employments: Vec<String> = view
            .employment_options
            .iter()
            .map(|option| marked(option.label, option.selected))
            .collect();
        writeln!(out, "雇用形態: {}", employments.join(" "))?;
    }

    writeln!(out, "\n{}", view.statistics.heading)?;
    for figure in &view.statistics.figures {
        writeln!(out, "- {}: {}", figure.label, figure.display)?;
    }

    writeln!(out, "\n求人詳細情報 ({})", view.jobs.count_label)?;
    for card in &view.jobs.cards {
        writeln!(out, "[{}] {} / {}", card.position, card.name, card.job_type)?;
        writeln!(out, "  {}: {}", card.pay_label, card.compensation)?;
        writeln!(out, "  勤務地: {}", card.location)?;
        writeln!(out, "  勤務時間: {}", card.work_hours)?;
        writeln!(out, "  休日: {}", card.holiday)?;
        if !card.benefits.is_empty() {
            writeln!(out, "  福利厚生: {}", card.benefits.join(", "))?;
        }
    }

    let others: Vec<&str> = view
        .navigation
        .iter()
        .filter(|link| !link.current)
        .map(|link| link.label)
        .collect();
    if !others.is_empty() {
        writeln!(out, "\n他のレポート: {}", others.join(" / "))?;
    }

    if !view.footer.is_empty() {
        writeln!(out)?;
        for line in &view.footer {
            writeln!(out, "{line}")?;
        }
    }

    Ok(())
}

fn marked(label: &str, selected: bool) -> String {
    if selected {
        format!("[{label}]")
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_report::reports::{JobDocument, ReportVariant};
    use std::sync::Arc;

    #[test]
    fn text_report_lists_statistics_and_cards() {
        let config = ReportVariant::Machida.config();
        let document = JobDocument::from_slice(
            r#"{
                "nurses": [{"id": 1, "name": "町田駅前クリニック", "type": "看護師（パート）",
                            "location": "町田市", "workHours": "9:00〜13:00", "holiday": "日曜",
                            "hourlyWage": 1900, "benefits": ["交通費支給"]}],
                "statistics": {"nurses": {"average": 1900, "max": 1900, "min": 1900}}
            }"#
            .as_bytes(),
            config.employment,
        )
        .expect("parses");
        let session = ReportSession::with_document(config, Arc::new(document));

        let ReportPage::Ready(view) = session.page().expect("renders") else {
            panic!("document present");
        };
        let text = render_report(&view);

        assert!(text.contains("時給統計（看護師・パート）"));
        assert!(text.contains("- 平均: ¥1900/時間"));
        assert!(text.contains("[1/1] 町田駅前クリニック / 看護師（パート）"));
        assert!(text.contains("福利厚生: 交通費支給"));
        assert!(text.contains("他のレポート: 阿佐ヶ谷版"));
        assert!(!text.contains("雇用形態"));
        assert!(text.ends_with("最新情報は各施設にお問い合わせください。\n"));
    }
}

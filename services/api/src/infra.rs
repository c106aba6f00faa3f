use clinic_report::error::AppError;
use clinic_report::reports::{
    load_document, FsDocumentSource, JobDocument, LoadError, LoadState, ReportVariant,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<ReportCatalog>,
    pub(crate) assets: Arc<FsDocumentSource>,
}

/// One dataset slot per report variant. Each slot is written once by its loader.
#[derive(Debug)]
pub(crate) struct ReportCatalog {
    slots: RwLock<HashMap<ReportVariant, LoadState>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SlotStatus {
    Loading,
    Ready,
    Failed,
}

impl Default for ReportCatalog {
    fn default() -> Self {
        let slots = ReportVariant::ordered()
            .into_iter()
            .map(|variant| (variant, LoadState::Pending))
            .collect();
        Self {
            slots: RwLock::new(slots),
        }
    }
}

impl ReportCatalog {
    pub(crate) fn store(&self, variant: ReportVariant, result: Result<JobDocument, LoadError>) {
        let state = match result {
            Ok(document) => LoadState::Ready(Arc::new(document)),
            Err(err) => LoadState::Failed(err.to_string()),
        };
        let mut guard = self.slots.write().expect("catalog lock poisoned");
        guard.insert(variant, state);
    }

    pub(crate) fn document(&self, variant: ReportVariant) -> Result<Arc<JobDocument>, AppError> {
        let guard = self.slots.read().expect("catalog lock poisoned");
        guard
            .get(&variant)
            .and_then(LoadState::document)
            .cloned()
            .ok_or(AppError::NotLoaded(variant))
    }

    pub(crate) fn status(&self, variant: ReportVariant) -> SlotStatus {
        let guard = self.slots.read().expect("catalog lock poisoned");
        match guard.get(&variant) {
            Some(LoadState::Ready(_)) => SlotStatus::Ready,
            Some(LoadState::Failed(_)) => SlotStatus::Failed,
            Some(LoadState::Pending) | None => SlotStatus::Loading,
        }
    }

    pub(crate) fn all_settled(&self) -> bool {
        let guard = self.slots.read().expect("catalog lock poisoned");
        guard.values().all(LoadState::is_settled)
    }
}

/// Starts one loader task per variant. `readiness` flips once every slot has settled.
pub(crate) fn spawn_dataset_loads(
    catalog: Arc<ReportCatalog>,
    source: Arc<FsDocumentSource>,
    readiness: Arc<AtomicBool>,
) {
    for variant in ReportVariant::ordered() {
        let catalog = catalog.clone();
        let source = source.clone();
        let readiness = readiness.clone();
        tokio::spawn(async move {
            let config = variant.config();
            let result = load_document(source.as_ref(), &config).await;
            catalog.store(variant, result);
            if catalog.all_settled() {
                readiness.store(true, Ordering::Release);
                info!("all report datasets settled");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_report::reports::domain::EmploymentFacet;

    #[test]
    fn slots_start_loading_and_settle_independently() {
        let catalog = ReportCatalog::default();
        assert_eq!(catalog.status(ReportVariant::Asagaya), SlotStatus::Loading);
        assert!(matches!(
            catalog.document(ReportVariant::Asagaya),
            Err(AppError::NotLoaded(ReportVariant::Asagaya))
        ));

        catalog.store(
            ReportVariant::Machida,
            Err(LoadError::InvalidAsset("..".to_string())),
        );
        assert_eq!(catalog.status(ReportVariant::Machida), SlotStatus::Failed);
        assert!(!catalog.all_settled());

        let document = JobDocument::from_slice(br#"{"statistics": {}}"#, EmploymentFacet::Free)
            .expect("empty document parses");
        catalog.store(ReportVariant::Asagaya, Ok(document));
        assert_eq!(catalog.status(ReportVariant::Asagaya), SlotStatus::Ready);
        assert!(catalog.all_settled());
    }
}

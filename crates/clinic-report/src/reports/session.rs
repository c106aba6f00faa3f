use super::derivation::{derive, ReportError};
use super::document::{JobDocument, LoadError};
use super::domain::{EmploymentType, JobCategory};
use super::selection::{Selection, SelectionError, SelectionState};
use super::source::{load_document, DocumentSource};
use super::variant::ReportConfig;
use super::views::ReportPage;
use std::sync::Arc;
use tracing::{debug, warn};

/// Dataset slot of one report instance.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready(Arc<JobDocument>),
    /// The fetch failed. Rendered exactly like `Pending`; kept for diagnostics.
    Failed(String),
}

impl LoadState {
    pub fn document(&self) -> Option<&Arc<JobDocument>> {
        match self {
            Self::Ready(document) => Some(document),
            Self::Pending | Self::Failed(_) => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Proof that a load was started by a particular session at a particular time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// One live report: its configuration, the reader's selection and the dataset once it
/// arrives.
#[derive(Debug)]
pub struct ReportSession {
    config: ReportConfig,
    selection: SelectionState,
    document: LoadState,
    generation: u64,
    disposed: bool,
}

impl ReportSession {
    pub fn new(config: ReportConfig) -> Self {
        let selection = SelectionState::new(&config);
        Self {
            config,
            selection,
            document: LoadState::Pending,
            generation: 0,
            disposed: false,
        }
    }

    /// Builds a session around an already loaded dataset.
    pub fn with_document(config: ReportConfig, document: Arc<JobDocument>) -> Self {
        let mut session = Self::new(config);
        session.document = LoadState::Ready(document);
        session
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn selection(&self) -> Selection {
        self.selection.current()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.document
    }

    /// Starts a load. Any ticket handed out earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Stores a finished load. Returns `false` when the result was dropped because the
    /// session was disposed or a newer load superseded it.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<JobDocument, LoadError>,
    ) -> bool {
        if self.disposed || ticket.generation != self.generation {
            warn!(
                variant = %self.config.variant,
                ticket = ticket.generation,
                current = self.generation,
                disposed = self.disposed,
                "discarding stale dataset result"
            );
            return false;
        }

        self.document = match result {
            Ok(document) => LoadState::Ready(Arc::new(document)),
            Err(err) => LoadState::Failed(err.to_string()),
        };
        true
    }

    /// Convenience wrapper running a single load to completion.
    pub async fn load<S: DocumentSource>(&mut self, source: &S) -> bool {
        let ticket = self.begin_load();
        let result = load_document(source, &self.config).await;
        self.complete_load(ticket, result)
    }

    /// Marks the session as gone; later load results are ignored.
    pub fn dispose(&mut self) {
        debug!(variant = %self.config.variant, "report session disposed");
        self.disposed = true;
    }

    pub fn set_job_category(&mut self, category: JobCategory) -> Result<(), SelectionError> {
        self.selection.set_job_category(category)
    }

    pub fn set_employment_type(&mut self, employment: EmploymentType) -> Result<(), SelectionError> {
        self.selection.set_employment_type(employment)
    }

    pub fn select_category_key(&mut self, key: &str) -> Result<(), SelectionError> {
        self.selection.select_category_key(key)
    }

    pub fn select_employment_key(&mut self, key: &str) -> Result<(), SelectionError> {
        self.selection.select_employment_key(key)
    }

    /// Current page. Loading until a dataset is present; a dataset that cannot serve the
    /// selection is an error for this render.
    pub fn page(&self) -> Result<ReportPage, ReportError> {
        let Some(document) = self.document.document() else {
            return Ok(ReportPage::loading());
        };

        let derived = derive(document, self.selection.current())?;
        Ok(ReportPage::Ready(Box::new(derived.to_view(&self.config))))
    }
}

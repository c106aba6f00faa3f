mod derivation;
pub mod document;
pub mod domain;
pub mod format;
mod page;
pub mod selection;
mod session;
mod source;
pub mod variant;
pub mod views;

pub use derivation::{derive, ChartPoint, DerivedReport, ReportError};
pub use document::{JobDocument, LoadError};
pub use selection::{Selection, SelectionError, SelectionState};
pub use session::{LoadState, LoadTicket, ReportSession};
pub use source::{load_document, DocumentSource, FsDocumentSource};
pub use variant::{ReportConfig, ReportConfigBuilder, ReportVariant};
pub use views::ReportPage;

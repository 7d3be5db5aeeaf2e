//! Staff and organizer flows on top of [`boothlog_client::StaffingApi`].
//!
//! - [`catalog`]: report actions available at a booth.
//! - [`submission`]: the report modal state machine.
//! - [`session`] and [`booth`]: check-in identity, booth page, booth switch
//!   and exit.
//! - [`dashboard`]: organizer aggregation of staff activity and reports.
//! - [`export`]: PDF rendering of dashboard projections.

pub mod booth;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod session;
pub mod submission;

pub use booth::BoothPage;
pub use dashboard::Dashboard;
pub use error::{FlowError, SwitchError};
pub use export::{ExportError, PdfTableRenderer, TableRenderer};
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
pub use submission::{ModalError, ModalState, ReportModal, SubmitContext};

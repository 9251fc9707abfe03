//! Client-side state of one report upload.

pub mod file;
pub mod language;
pub mod link;
pub mod state;

pub use file::ReportFile;
pub use language::OutputLanguage;
pub use link::DownloadLink;
pub use state::{SessionStatus, Submission, SubmitOutcome, UploadSession};

//! The remote conversion service, as seen by an upload session.

mod http;

pub use http::{HttpGateway, SUBMIT_PATH};

use crate::common::errors::SubmissionFailed;
use crate::session::{DownloadLink, OutputLanguage, ReportFile};

/// Performs the single request/response exchange for a submission.
///
/// Implementations own all transport framing. They must turn every problem
/// into [`SubmissionFailed`]; the session never sees anything richer.
#[async_trait::async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn submit(
        &self,
        file: &ReportFile,
        language: OutputLanguage,
    ) -> Result<DownloadLink, SubmissionFailed>;
}

//! Upload/submit/result state machine.
//!
//! `UploadSession` holds everything one report view knows: the picked file,
//! the table language, and where the last submission ended up. All
//! transitions are synchronous; the only suspension point is the gateway call
//! made from [`UploadSession::submit`], and while it runs the session sits in
//! `Submitting`, which refuses any further submission.

use crate::common::config::FailurePolicy;
use crate::common::errors::{InvalidLanguage, SubmissionFailed};
use crate::gateway::SubmissionGateway;
use crate::session::{DownloadLink, OutputLanguage, ReportFile};
use std::sync::Arc;
use uuid::Uuid;

/// Where the session is in its submission lifecycle.
///
/// The download link lives inside `Ready` so that a link can only exist
/// alongside a finished submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Submitting,
    Ready(DownloadLink),
    Failed,
}

impl SessionStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SessionStatus::Submitting)
    }
}

/// Result of a submit attempt as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing happened: no file, or a submission is already in flight.
    Rejected,
    Ready(DownloadLink),
    Failed,
}

/// Snapshot of what is being sent, taken when the `Submitting` gate closes.
///
/// Later language changes or file picks do not affect a submission that
/// already started.
#[derive(Debug, Clone)]
pub struct Submission {
    file: Arc<ReportFile>,
    language: OutputLanguage,
}

impl Submission {
    pub fn file(&self) -> &ReportFile {
        &self.file
    }

    pub fn language(&self) -> OutputLanguage {
        self.language
    }
}

#[derive(Debug)]
pub struct UploadSession {
    id: Uuid,
    selected_file: Option<Arc<ReportFile>>,
    output_language: OutputLanguage,
    status: SessionStatus,
    failure_policy: FailurePolicy,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadSession {
    /// Fresh session: `Idle`, `ENG`, nothing selected.
    pub fn new() -> Self {
        Self::with_policy(FailurePolicy::default())
    }

    pub fn with_policy(failure_policy: FailurePolicy) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, ?failure_policy, "Created upload session");

        Self {
            id,
            selected_file: None,
            output_language: OutputLanguage::default(),
            status: SessionStatus::Idle,
            failure_policy,
        }
    }

    //-- Accessors

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn selected_file(&self) -> Option<&ReportFile> {
        self.selected_file.as_deref()
    }

    pub fn output_language(&self) -> OutputLanguage {
        self.output_language
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    pub fn download_reference(&self) -> Option<&DownloadLink> {
        match &self.status {
            SessionStatus::Ready(link) => Some(link),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status.is_submitting()
    }

    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.is_submitting()
    }

    pub fn can_download(&self) -> bool {
        self.download_reference().is_some()
    }

    //-- User edits

    /// Replace the current selection. Status and any existing result are kept.
    pub fn select_file(&mut self, file: ReportFile) {
        if self.is_submitting() {
            tracing::warn!(
                session = %self.id,
                "File picked while a submission is in flight; it will not be part of it"
            );
        }
        tracing::debug!(session = %self.id, file = file.name(), "Selected report file");
        self.selected_file = Some(Arc::new(file));
    }

    pub fn set_output_language(&mut self, language: OutputLanguage) {
        if self.output_language != language {
            tracing::debug!(session = %self.id, %language, "Table language changed");
        }
        self.output_language = language;
    }

    /// Parse and apply a language code. Unknown codes leave the current value.
    pub fn set_output_language_str(&mut self, value: &str) -> Result<(), InvalidLanguage> {
        match value.parse::<OutputLanguage>() {
            Ok(language) => {
                self.set_output_language(language);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(session = %self.id, "Rejected table language: {}", err);
                Err(err)
            }
        }
    }

    //-- Submission lifecycle

    /// Close the `Submitting` gate and snapshot the request.
    ///
    /// Returns `None` without touching state when no file is selected or a
    /// submission is already running.
    pub fn begin_submission(&mut self) -> Option<Submission> {
        if self.is_submitting() {
            tracing::debug!(session = %self.id, "Submit ignored: already submitting");
            return None;
        }
        let Some(file) = self.selected_file.clone() else {
            tracing::debug!(session = %self.id, "Submit ignored: no file selected");
            return None;
        };

        tracing::info!(
            session = %self.id,
            file = file.name(),
            language = %self.output_language,
            "Submitting report"
        );

        // Dropping the previous Ready also drops its link.
        self.status = SessionStatus::Submitting;

        Some(Submission {
            file,
            language: self.output_language,
        })
    }

    /// Apply the gateway's answer to the submission started by
    /// [`begin_submission`](Self::begin_submission).
    pub fn finish_submission(
        &mut self,
        result: Result<DownloadLink, SubmissionFailed>,
    ) -> SubmitOutcome {
        if !self.is_submitting() {
            tracing::error!(
                session = %self.id,
                "Submission result arrived with no submission in flight; ignoring"
            );
            return SubmitOutcome::Rejected;
        }

        match result {
            Ok(link) => {
                tracing::info!(session = %self.id, %link, "Exploits table ready");
                self.selected_file = None;
                self.status = SessionStatus::Ready(link.clone());
                SubmitOutcome::Ready(link)
            }
            Err(err) => {
                tracing::warn!(session = %self.id, "{}", err);
                if self.failure_policy == FailurePolicy::Clear {
                    self.selected_file = None;
                }
                self.status = SessionStatus::Failed;
                SubmitOutcome::Failed
            }
        }
    }

    /// Run one full submission against `gateway`.
    ///
    /// The gateway is called at most once, and never when the session
    /// refuses to submit. Failures end in `Failed`; they are not returned as
    /// errors.
    pub async fn submit<G>(&mut self, gateway: &G) -> SubmitOutcome
    where
        G: SubmissionGateway + ?Sized,
    {
        let Some(submission) = self.begin_submission() else {
            return SubmitOutcome::Rejected;
        };

        let result = gateway
            .submit(submission.file(), submission.language())
            .await;

        self.finish_submission(result)
    }
}

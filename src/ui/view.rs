//! One mounted report view: its session, its indicator, and what it allows.

use crate::common::config::AppConfig;
use crate::common::errors::InvalidLanguage;
use crate::gateway::SubmissionGateway;
use crate::indicator::IndicatorTask;
use crate::session::{ReportFile, SubmitOutcome, UploadSession};
use crate::ui::labels::{Labels, UiLanguage};
use tokio::sync::watch;

/// Which controls a renderer should enable right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub upload_enabled: bool,
    pub submit_enabled: bool,
    pub download_enabled: bool,
    /// Submit control shows its busy label.
    pub processing: bool,
}

impl Controls {
    pub fn for_session(session: &UploadSession) -> Self {
        let submitting = session.is_submitting();
        Self {
            upload_enabled: !submitting,
            submit_enabled: session.can_submit(),
            download_enabled: !submitting && session.can_download(),
            processing: submitting,
        }
    }
}

/// Owns the session and indicator for the lifetime of a view.
pub struct ReportView {
    session: UploadSession,
    indicator: IndicatorTask,
    ui_language: UiLanguage,
}

impl ReportView {
    /// Create a fresh session and start the indicator.
    pub fn mount(config: &AppConfig) -> Self {
        let mut session = UploadSession::with_policy(config.failure_policy);
        session.set_output_language(config.default_table_language);

        tracing::debug!(session = %session.id(), "Mounted report view");

        Self {
            session,
            indicator: IndicatorTask::start(config.indicator_period()),
            ui_language: config.ui_language,
        }
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    /// Direct access for front ends that drive `begin_submission` /
    /// `finish_submission` from their own event loop.
    pub fn session_mut(&mut self) -> &mut UploadSession {
        &mut self.session
    }

    pub fn controls(&self) -> Controls {
        Controls::for_session(&self.session)
    }

    pub fn labels(&self) -> &'static Labels {
        Labels::for_language(self.ui_language)
    }

    pub fn set_ui_language(&mut self, language: UiLanguage) {
        self.ui_language = language;
    }

    pub fn indicator(&self) -> watch::Receiver<u8> {
        self.indicator.subscribe()
    }

    /// File picker event. Ignored while the upload control is disabled.
    pub fn pick_file(&mut self, file: ReportFile) -> bool {
        if !self.controls().upload_enabled {
            tracing::debug!(file = file.name(), "Pick ignored while submitting");
            return false;
        }
        self.session.select_file(file);
        true
    }

    pub fn choose_language(&mut self, value: &str) -> Result<(), InvalidLanguage> {
        self.session.set_output_language_str(value)
    }

    /// Submit control event.
    pub async fn submit<G>(&mut self, gateway: &G) -> SubmitOutcome
    where
        G: SubmissionGateway + ?Sized,
    {
        if !self.controls().submit_enabled {
            return SubmitOutcome::Rejected;
        }
        self.session.submit(gateway).await
    }

    /// Stop the indicator. Subscribers see their channel close.
    pub async fn teardown(self) {
        tracing::debug!(session = %self.session.id(), "Tearing down report view");
        self.indicator.stop().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DownloadLink;

    #[test]
    fn controls_for_fresh_session() {
        let session = UploadSession::new();
        let controls = Controls::for_session(&session);

        assert!(controls.upload_enabled);
        assert!(!controls.submit_enabled);
        assert!(!controls.download_enabled);
        assert!(!controls.processing);
    }

    #[test]
    fn controls_while_submitting() {
        let mut session = UploadSession::new();
        session.select_file(ReportFile::new("a.xml", vec![1]));
        session.begin_submission().expect("begin");

        let controls = Controls::for_session(&session);
        assert!(!controls.upload_enabled);
        assert!(!controls.submit_enabled);
        assert!(!controls.download_enabled);
        assert!(controls.processing);
    }

    #[test]
    fn controls_after_success() {
        let mut session = UploadSession::new();
        session.select_file(ReportFile::new("a.xml", vec![1]));
        session.begin_submission().expect("begin");
        session.finish_submission(Ok(DownloadLink::parse("https://x/y.xlsx").expect("link")));

        let controls = Controls::for_session(&session);
        assert!(controls.upload_enabled);
        assert!(!controls.submit_enabled, "file is cleared after success");
        assert!(controls.download_enabled);
    }

    #[tokio::test]
    async fn mount_applies_config() {
        let config = AppConfig {
            default_table_language: crate::session::OutputLanguage::Rus,
            ui_language: UiLanguage::Rus,
            ..AppConfig::default()
        };
        let view = ReportView::mount(&config);

        assert_eq!(
            view.session().output_language(),
            crate::session::OutputLanguage::Rus
        );
        assert_eq!(view.labels().upload, "Загрузить");
        view.teardown().await;
    }
}

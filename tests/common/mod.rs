#![allow(dead_code)]

pub mod config_test_utils;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use vultable::common::SubmissionFailed;
use vultable::gateway::SubmissionGateway;
use vultable::session::{DownloadLink, OutputLanguage, ReportFile};

/// What a scripted gateway answers.
#[derive(Clone)]
pub enum Reply {
    Link(&'static str),
    Fail(&'static str),
}

/// Gateway double that records every call and answers from a script.
pub struct ScriptedGateway {
    reply: Reply,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    requests: Mutex<Vec<(String, OutputLanguage)>>,
}

impl ScriptedGateway {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(link: &'static str) -> Self {
        Self::new(Reply::Link(link))
    }

    pub fn failing() -> Self {
        Self::new(Reply::Fail("service returned 500 Internal Server Error"))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, OutputLanguage)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SubmissionGateway for ScriptedGateway {
    async fn submit(
        &self,
        file: &ReportFile,
        language: OutputLanguage,
    ) -> Result<DownloadLink, SubmissionFailed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((file.name().to_string(), language));

        tokio::task::yield_now().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Link(link) => Ok(DownloadLink::parse(*link).expect("scripted link")),
            Reply::Fail(reason) => Err(SubmissionFailed::new(*reason)),
        }
    }
}

pub fn report(name: &str) -> ReportFile {
    ReportFile::new(name, format!("<report name=\"{name}\"/>").into_bytes())
}

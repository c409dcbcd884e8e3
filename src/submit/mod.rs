pub mod http;
pub mod logger;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::config::SubmissionConfig;

pub use self::http::HttpSink;
pub use self::logger::LogSink;

// ── Types ─────────────────────────────────────────────

/// A validated form, ready to leave the page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Submission {
    pub id: Uuid,
    pub form: String,
    pub fields: BTreeMap<String, String>,
    pub submitted_at: NaiveDateTime,
}

impl Submission {
    pub fn new(form: &str, fields: BTreeMap<String, String>) -> Self {
        Submission {
            id: Uuid::new_v4(),
            form: form.to_string(),
            fields,
            submitted_at: Local::now().naive_local(),
        }
    }
}

/// Where validated submissions are handed off.
/// Implementations: `LogSink` (diagnostic line only), `HttpSink` (JSON POST),
/// and any `Fn(&Submission) -> Result<(), String>`.
pub trait SubmissionSink {
    fn submit(&self, submission: &Submission) -> Result<(), String>;
}

impl<F> SubmissionSink for F
where
    F: Fn(&Submission) -> Result<(), String>,
{
    fn submit(&self, submission: &Submission) -> Result<(), String> {
        self(submission)
    }
}

/// Pick the sink the config asks for: HTTP when an endpoint is set,
/// otherwise the log.
pub fn from_config(config: &SubmissionConfig) -> Result<Box<dyn SubmissionSink>, String> {
    match &config.endpoint {
        Some(endpoint) => Ok(Box::new(HttpSink::new(endpoint, config.timeout_secs)?)),
        None => Ok(Box::new(LogSink)),
    }
}

use super::{Submission, SubmissionSink};

/// POST the submission as JSON to a configured endpoint.
pub struct HttpSink {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpSink {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, String> {
        if endpoint.is_empty() {
            return Err("Submission endpoint not configured".into());
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| format!("HTTP client error: {}", e))?;
        Ok(HttpSink {
            endpoint: endpoint.to_string(),
            client,
        })
    }
}

impl SubmissionSink for HttpSink {
    fn submit(&self, submission: &Submission) -> Result<(), String> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(submission)
            .send()
            .map_err(|e| format!("Submission request failed: {}", e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_default();
            return Err(format!("Submission endpoint returned {}: {}", status, text));
        }

        log::info!("[{}] {} delivered to {}", submission.id, submission.form, self.endpoint);
        Ok(())
    }
}

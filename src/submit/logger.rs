use super::{Submission, SubmissionSink};

/// Writes the submission to the log and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&self, submission: &Submission) -> Result<(), String> {
        let payload = serde_json::to_string(&submission.fields)
            .map_err(|e| format!("Failed to encode submission: {}", e))?;
        log::info!(
            "[{}] {} data: {}",
            submission.id,
            submission.form,
            payload
        );
        Ok(())
    }
}

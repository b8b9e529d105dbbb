use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Which part of the packaging run produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Relocate,
    Purge,
    Copy,
    Launch,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Relocate => write!(f, "relocate"),
            Step::Purge => write!(f, "purge"),
            Step::Copy => write!(f, "copy"),
            Step::Launch => write!(f, "launch"),
        }
    }
}

/// Result of a single filesystem or process operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    Ok(String),
    Skipped(String),
    Failed(String),
}

/// One operation and how it went
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub step: Step,
    /// Path the operation acted on
    pub target: PathBuf,
    pub outcome: Outcome,
}

impl StepRecord {
    pub fn ok(step: Step, target: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            step,
            target: target.into(),
            outcome: Outcome::Ok(message.into()),
        }
    }

    pub fn skipped(step: Step, target: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            step,
            target: target.into(),
            outcome: Outcome::Skipped(message.into()),
        }
    }

    pub fn failed(step: Step, target: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            step,
            target: target.into(),
            outcome: Outcome::Failed(message.into()),
        }
    }

    /// Diagnostic tag: OK, SKIP, ERROR, or EXEC for a successful launch
    pub fn tag(&self) -> &'static str {
        match (&self.outcome, self.step) {
            (Outcome::Ok(_), Step::Launch) => "EXEC",
            (Outcome::Ok(_), _) => "OK",
            (Outcome::Skipped(_), _) => "SKIP",
            (Outcome::Failed(_), _) => "ERROR",
        }
    }

    pub fn message(&self) -> &str {
        match &self.outcome {
            Outcome::Ok(m) | Outcome::Skipped(m) | Outcome::Failed(m) => m,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.outcome, Outcome::Skipped(_))
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok(_))
    }
}

impl std::fmt::Display for StepRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.tag(), self.message())
    }
}

/// Whether the run reached the end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    /// Relocation failed; nothing after it ran
    Aborted,
}

/// Report from a packaging run
#[derive(Debug, Clone, Serialize)]
pub struct PackReport {
    pub app_name: String,
    pub final_app_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub status: RunStatus,
    pub records: Vec<StepRecord>,
}

impl PackReport {
    pub fn new(app_name: &str, final_app_dir: PathBuf) -> Self {
        Self {
            app_name: app_name.to_string(),
            final_app_dir,
            started_at: Utc::now(),
            duration_secs: 0.0,
            status: RunStatus::Completed,
            records: Vec::new(),
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.status == RunStatus::Aborted
    }

    /// Records produced by one step
    pub fn records_for(&self, step: Step) -> impl Iterator<Item = &StepRecord> {
        self.records.iter().filter(move |r| r.step == step)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.records.iter().filter(|r| r.is_failed())
    }

    pub fn ok_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_ok()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_skipped()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(StepRecord::ok(Step::Copy, "a", "Copied a").tag(), "OK");
        assert_eq!(StepRecord::ok(Step::Launch, "a.exe", "Launching").tag(), "EXEC");
        assert_eq!(StepRecord::skipped(Step::Copy, "a", "missing").tag(), "SKIP");
        assert_eq!(StepRecord::failed(Step::Launch, "a.exe", "boom").tag(), "ERROR");
    }

    #[test]
    fn test_display_line() {
        let record = StepRecord::skipped(Step::Copy, "/p/logo.ico", "logo.ico not found at /p/logo.ico");
        assert_eq!(record.to_string(), "[SKIP] logo.ico not found at /p/logo.ico");
    }

    #[test]
    fn test_counts() {
        let mut report = PackReport::new("App", PathBuf::from("/p/App"));
        report.records.push(StepRecord::ok(Step::Relocate, "/p/App", "Moved"));
        report.records.push(StepRecord::skipped(Step::Purge, "/p/build", "absent"));
        report.records.push(StepRecord::failed(Step::Copy, "/p/x", "nope"));
        assert_eq!(report.ok_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.records_for(Step::Purge).count(), 1);
        assert!(!report.is_aborted());
    }

    #[test]
    fn test_outcome_json_shape() {
        let record = StepRecord::failed(Step::Purge, "/p/build", "denied");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["step"], "purge");
        assert_eq!(json["outcome"]["status"], "failed");
        assert_eq!(json["outcome"]["message"], "denied");
    }
}

use chrono::{DateTime, Utc};

/// Status value that marks a check run as started but not finished.
pub const IN_PROGRESS: &str = "in_progress";

/// Body of a "create check run" call.
///
/// `status` and `conclusion` are forwarded exactly as configured; the API is
/// left to judge what it accepts. Optional fields are omitted from the body
/// rather than sent as `null`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CheckRequest {
    /// Path parameter, not part of the body.
    #[serde(skip)]
    pub owner: String,
    /// Path parameter, not part of the body.
    #[serde(skip)]
    pub repo: String,
    pub name: String,
    pub head_sha: String,
    pub status: String,
    pub conclusion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<CheckRunOutput>,
}

impl CheckRequest {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        name: impl Into<String>,
        head_sha: impl Into<String>,
        status: impl Into<String>,
        conclusion: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            name: name.into(),
            head_sha: head_sha.into(),
            status: status.into(),
            conclusion: conclusion.into(),
            started_at: None,
            output: None,
        }
    }

    /// The time that the check run began.
    pub fn started_at(mut self, started_at: impl Into<DateTime<Utc>>) -> Self {
        self.started_at = Some(started_at.into());
        self
    }

    /// Title and summary shown on the check run's page.
    pub fn output(mut self, title: impl Into<String>, summary: impl Into<String>) -> Self {
        self.output = Some(CheckRunOutput {
            title: title.into(),
            summary: summary.into(),
        });
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.title.as_str())
    }

    pub fn summary(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.summary.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
}

/// The parts of the API's check run representation that get logged.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[non_exhaustive]
pub struct CheckRun {
    pub id: u64,
    pub name: String,
    pub head_sha: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub html_url: Option<String>,
}

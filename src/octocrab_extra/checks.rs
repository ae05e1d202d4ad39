use octocrab::Octocrab;

use crate::octocrab_extra::models::checks::{CheckRequest, CheckRun};

/// Owns its client handle so a request can be moved onto a spawned task.
pub struct CheckRunHandler {
    crab: Octocrab,
    owner: String,
    repo: String,
}

impl CheckRunHandler {
    pub(crate) fn new(crab: Octocrab, owner: String, repo: String) -> Self {
        Self { crab, owner, repo }
    }

    /// `POST /repos/{owner}/{repo}/check-runs`
    pub async fn create(&self, request: &CheckRequest) -> octocrab::Result<CheckRun> {
        let route = format!(
            "/repos/{owner}/{repo}/check-runs",
            owner = self.owner,
            repo = self.repo,
        );

        self.crab.post(route, Some(request)).await
    }
}

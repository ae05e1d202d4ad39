use octocrab::Octocrab;

pub mod models {
    pub mod checks;
}
mod checks;

pub use checks::CheckRunHandler;

/// Check-run endpoints with request bodies we control, including the
/// free-form `status`/`conclusion` strings octocrab's own builder won't take.
pub trait OctocrabExt {
    fn check_runs(&self, owner: impl Into<String>, repo: impl Into<String>) -> CheckRunHandler;
}

impl OctocrabExt for Octocrab {
    fn check_runs(&self, owner: impl Into<String>, repo: impl Into<String>) -> CheckRunHandler {
        CheckRunHandler::new(self.clone(), owner.into(), repo.into())
    }
}

// Copyright 2022 Alexander Krivács Schrøder
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// OR
//
// Licensed under the MIT License. See LICENSE-MIT for details.

//! Creates one check run from a [`Config`].

use chrono::{DateTime, Local, Utc};
use log::{info, warn};
use octocrab::{Octocrab, OctocrabBuilder};
use secrecy::ExposeSecret;
use tokio::task::JoinHandle;

use crate::action;
use crate::config::{Config, Environment};
use crate::error::{Error, Result};
use crate::octocrab_extra::models::checks::{CheckRequest, CheckRun, IN_PROGRESS};
use crate::octocrab_extra::OctocrabExt;

/// Assembles the request body; `now` becomes `started_at` for runs that are
/// still in progress.
pub fn build_request(config: &Config, now: DateTime<Utc>) -> CheckRequest {
    let mut request = CheckRequest::new(
        &config.repository.owner,
        &config.repository.repo,
        &config.name,
        &config.head_sha,
        &config.status,
        &config.state,
    );

    if config.status == IN_PROGRESS {
        request = request.started_at(now);
    }

    if let Some(title) = config.output_title.as_deref().filter(|t| !t.is_empty()) {
        request = request.output(title, config.output_summary.clone().unwrap_or_default());
    }

    request
}

pub fn build_client(config: &Config) -> Result<Octocrab> {
    let mut builder =
        OctocrabBuilder::new().user_access_token(config.token.expose_secret().to_owned());
    if let Some(api_url) = &config.api_url {
        builder = builder.base_uri(api_url.as_str()).map_err(Error::Client)?;
    }
    builder.build().map_err(Error::Client)
}

/// Local wall-clock time, e.g. `14:39:07 GMT+0100`.
pub fn time_of_day(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S GMT%z").to_string()
}

/// What a successful run hands back: the `time` output and the in-flight
/// API call.
#[derive(Debug)]
pub struct Report {
    pub time: String,
    pub dispatch: Dispatch,
}

/// A check-run creation that has been sent off but not looked at.
#[derive(Debug)]
pub struct Dispatch(JoinHandle<octocrab::Result<CheckRun>>);

impl Dispatch {
    /// Waits for the call to finish and logs how it went.
    ///
    /// The action's outcome is already decided by then, so a failed call is
    /// only surfaced as a warning.
    pub async fn settle(self) -> Option<CheckRun> {
        match self.0.await {
            Ok(Ok(run)) => {
                info!(
                    "created check run {} ({}) on {}",
                    run.id,
                    run.html_url.as_deref().unwrap_or("no url"),
                    run.head_sha
                );
                Some(run)
            }
            Ok(Err(e)) => {
                warn!("creating the check run failed: {e:?}");
                action::warning(&format!("check run was not created: {e}"));
                None
            }
            Err(e) => {
                warn!("check run dispatch did not complete: {e}");
                None
            }
        }
    }
}

pub struct Reporter {
    config: Config,
}

impl Reporter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Builds the request and client, dispatches the call on a background
    /// task and returns without waiting for it.
    ///
    /// Only errors from setting up the call are returned; how the API
    /// responds is reported by [`Dispatch::settle`].
    pub async fn report(&self) -> Result<Report> {
        let request = build_request(&self.config, Utc::now());
        action::debug(&format!("check run request: {request:?}"));

        let client = build_client(&self.config)?;
        let handler = client.check_runs(&request.owner, &request.repo);
        info!(
            "creating check run {:?} ({}) on {}/{}@{}",
            request.name, request.status, request.owner, request.repo, request.head_sha
        );
        let dispatch = Dispatch(tokio::spawn(async move { handler.create(&request).await }));

        Ok(Report {
            time: time_of_day(Local::now()),
            dispatch,
        })
    }
}

/// Reads the configuration from `env` and reports the check run.
pub async fn run(env: &impl Environment) -> Result<Report> {
    let config = Config::from_env(env)?;
    Reporter::new(config).report().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use secrecy::SecretString;
    use std::collections::HashMap;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Repository;

    fn config(status: &str) -> Config {
        Config {
            repository: Repository {
                owner: "acme".into(),
                repo: "widgets".into(),
            },
            head_sha: "abc123".into(),
            token: SecretString::from("test-token"),
            name: "build".into(),
            status: status.into(),
            state: "success".into(),
            output_title: None,
            output_summary: None,
            api_url: None,
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn completed_request_has_only_base_fields() {
        let request = build_request(&config("completed"), noon());

        assert_eq!(request.owner, "acme");
        assert_eq!(request.repo, "widgets");
        assert_eq!(request.name, "build");
        assert_eq!(request.head_sha, "abc123");
        assert_eq!(request.status, "completed");
        assert_eq!(request.conclusion, "success");
        assert_eq!(request.started_at, None);
        assert_eq!(request.title(), None);
        assert_eq!(request.summary(), None);
    }

    #[test]
    fn in_progress_request_is_stamped() {
        let request = build_request(&config("in_progress"), noon());
        assert_eq!(request.started_at, Some(noon()));

        let body = serde_json::to_value(&request).unwrap();
        let started_at = body["started_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(started_at).is_ok());
    }

    #[test]
    fn other_statuses_are_not_stamped() {
        for status in ["queued", "IN_PROGRESS", "in_progress ", "completed"] {
            let request = build_request(&config(status), noon());
            assert_eq!(request.started_at, None, "status {status:?}");
            assert_eq!(request.status, status);
        }
    }

    #[test]
    fn title_brings_summary_along() {
        let mut config = config("completed");
        config.output_title = Some("Build".into());
        config.output_summary = Some(" 12 passed ".into());

        let request = build_request(&config, noon());
        assert_eq!(request.title(), Some("Build"));
        assert_eq!(request.summary(), Some(" 12 passed "));
    }

    #[test]
    fn title_without_summary_sends_empty_summary() {
        let mut config = config("completed");
        config.output_title = Some("Build".into());

        let request = build_request(&config, noon());
        assert_eq!(request.title(), Some("Build"));
        assert_eq!(request.summary(), Some(""));
    }

    #[test]
    fn summary_without_title_is_dropped() {
        let mut config = config("completed");
        config.output_summary = Some("orphan".into());
        assert_eq!(build_request(&config, noon()).output, None);

        config.output_title = Some(String::new());
        assert_eq!(build_request(&config, noon()).output, None);
    }

    #[test]
    fn values_are_forwarded_verbatim() {
        let mut config = config("Completed");
        config.name = "  Build (Linux) ".into();
        config.state = "SUCCESS".into();

        let request = build_request(&config, noon());
        assert_eq!(request.name, "  Build (Linux) ");
        assert_eq!(request.status, "Completed");
        assert_eq!(request.conclusion, "SUCCESS");
    }

    #[test]
    fn time_of_day_shows_clock_and_offset() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap();
        let time = time_of_day(now);
        assert!(time.starts_with("09:05:07 GMT"), "{time}");
        assert_eq!(time.len(), "09:05:07 GMT+0000".len());
    }

    #[test]
    fn bad_api_url_fails_client_construction() {
        let mut config = config("completed");
        config.api_url = Some("not a url".into());
        assert!(matches!(build_client(&config), Err(Error::Client(_))));
    }

    #[tokio::test]
    async fn report_dispatches_the_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/acme/widgets/check-runs"))
            .and(body_json(serde_json::json!({
                "name": "build",
                "head_sha": "abc123",
                "status": "completed",
                "conclusion": "success",
                "output": { "title": "Build", "summary": "ok" }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 42,
                "name": "build",
                "head_sha": "abc123",
                "status": "completed",
                "conclusion": "success",
                "html_url": "https://github.com/acme/widgets/runs/42"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut config = config("completed");
        config.api_url = Some(mock_server.uri());
        config.output_title = Some("Build".into());
        config.output_summary = Some("ok".into());

        let report = Reporter::new(config).report().await.unwrap();
        assert!(report.time.contains(" GMT"));

        let run = report.dispatch.settle().await.unwrap();
        assert_eq!(run.id, 42);
    }

    #[tokio::test]
    async fn rejected_call_does_not_fail_the_report() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/acme/widgets/check-runs"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "message": "Validation Failed",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut config = config("bogus");
        config.api_url = Some(mock_server.uri());

        let report = Reporter::new(config).report().await.unwrap();
        assert!(!report.time.is_empty());
        assert!(report.dispatch.settle().await.is_none());
    }

    #[tokio::test]
    async fn run_fails_on_malformed_repository() {
        let env: HashMap<String, String> = [
            ("GITHUB_REPOSITORY", "widgets"),
            ("GITHUB_SHA", "abc123"),
            ("INPUT_GITHUB-TOKEN", "t"),
            ("INPUT_NAME", "build"),
            ("INPUT_STATUS", "completed"),
            ("INPUT_STATE", "success"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let err = run(&env).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed repository identifier \"widgets\", expected \"owner/repo\""
        );
    }
}

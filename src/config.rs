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

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::str::FromStr;

use secrecy::SecretString;

use crate::action::{get_input, get_required_input};
use crate::error::{Error, Result};

/// Source of environment variables, so tests don't have to touch the real
/// process environment.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<S: BuildHasher> Environment for HashMap<String, String, S> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// A repository as named by `GITHUB_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub repo: String,
}

impl FromStr for Repository {
    type Err = Error;

    /// Splits on the first `/`; anything after it belongs to the repo.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_owned(),
                repo: repo.to_owned(),
            }),
            _ => Err(Error::MalformedRepository(s.to_owned())),
        }
    }
}

/// Everything one run of the action needs to know.
#[derive(Debug)]
pub struct Config {
    pub repository: Repository,
    pub head_sha: String,
    pub token: SecretString,
    pub name: String,
    pub status: String,
    pub state: String,
    pub output_title: Option<String>,
    pub output_summary: Option<String>,
    /// Overrides the API root, e.g. for GitHub Enterprise Server.
    pub api_url: Option<String>,
}

impl Config {
    pub fn from_env(env: &impl Environment) -> Result<Self> {
        let repository = require_env(env, "GITHUB_REPOSITORY")?.parse()?;
        let head_sha = require_env(env, "GITHUB_SHA")?;

        Ok(Self {
            repository,
            head_sha,
            token: SecretString::from(get_required_input(env, "github-token")?),
            name: get_required_input(env, "name")?,
            status: get_required_input(env, "status")?,
            state: get_required_input(env, "state")?,
            output_title: get_input(env, "output-title"),
            output_summary: get_input(env, "output-summary"),
            api_url: env.var("GITHUB_API_URL").filter(|u| !u.is_empty()),
        })
    }
}

fn require_env(env: &impl Environment, key: &'static str) -> Result<String> {
    env.var(key).ok_or(Error::MissingEnv(key))
}

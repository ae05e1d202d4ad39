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

//! The slice of the GitHub Actions runner protocol this action speaks.
//!
//! Inputs arrive as `INPUT_*` environment variables, outputs go to the file
//! named by `GITHUB_OUTPUT` and everything else is a workflow command printed
//! on stdout (`::error::...`, `::warning::...`).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::config::Environment;
use crate::error::{Error, Result};

/// Name of the environment variable the runner uses for input `name`.
pub fn input_variable(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Value of input `name`, or `None` if it is unset or empty.
///
/// Values are returned exactly as given; surrounding whitespace is kept.
pub fn get_input(env: &impl Environment, name: &str) -> Option<String> {
    env.var(&input_variable(name)).filter(|v| !v.is_empty())
}

pub fn get_required_input(env: &impl Environment, name: &'static str) -> Result<String> {
    get_input(env, name).ok_or(Error::MissingInput(name))
}

/// Where `set_output` writes to.
#[derive(Debug, Clone, Default)]
pub struct Outputs {
    file: Option<PathBuf>,
}

impl Outputs {
    pub fn from_env(env: &impl Environment) -> Self {
        Self {
            file: env
                .var("GITHUB_OUTPUT")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
        }
    }

    /// Publish `value` under `name` for later steps of the job.
    ///
    /// Runners too old to provide `GITHUB_OUTPUT` get the deprecated
    /// `set-output` command instead.
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        match &self.file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(file_command_entry(name, value)?.as_bytes())?;
            }
            None => issue(&command("set-output", &[("name", name)], value)),
        }
        Ok(())
    }
}

fn file_command_entry(name: &str, value: &str) -> Result<String> {
    if !value.contains('\n') && !value.contains('\r') {
        return Ok(format!("{name}={value}\n"));
    }

    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let delimiter = format!("ghadelimiter_{nanos}");
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(Error::Output(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("output {name} collides with the delimiter {delimiter}"),
        )));
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

/// Marks the step as failed. The caller is responsible for exiting non-zero.
pub fn set_failed(message: &str) {
    issue(&command("error", &[], message));
}

pub fn warning(message: &str) {
    issue(&command("warning", &[], message));
}

pub fn debug(message: &str) {
    issue(&command("debug", &[], message));
}

/// Renders a workflow command line, `::name key=value,key=value::message`.
pub fn command(name: &str, properties: &[(&str, &str)], message: &str) -> String {
    let mut line = format!("::{name}");
    for (i, (key, value)) in properties.iter().enumerate() {
        line.push(if i == 0 { ' ' } else { ',' });
        line.push_str(key);
        line.push('=');
        line.push_str(&escape_property(value));
    }
    line.push_str("::");
    line.push_str(&escape_data(message));
    line
}

fn issue(line: &str) {
    println!("{line}");
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

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

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop the action before the check run is dispatched.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("{0} environment variable is not set")]
    #[diagnostic(
        code(create_status_check::missing_env),
        help("this variable is provided by the GitHub Actions runner")
    )]
    MissingEnv(&'static str),

    #[error("Input required and not supplied: {0}")]
    #[diagnostic(
        code(create_status_check::missing_input),
        help("set it in the `with:` block of the step using this action")
    )]
    MissingInput(&'static str),

    #[error("malformed repository identifier {0:?}, expected \"owner/repo\"")]
    #[diagnostic(code(create_status_check::malformed_repository))]
    MalformedRepository(String),

    #[error("could not construct the GitHub API client: {0}")]
    #[diagnostic(code(create_status_check::client))]
    Client(#[source] octocrab::Error),

    #[error("could not write action output: {0}")]
    #[diagnostic(code(create_status_check::output))]
    Output(#[from] std::io::Error),
}

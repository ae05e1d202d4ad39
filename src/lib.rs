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

//! Creates a GitHub check run for the commit a workflow is running on.
//!
//! Meant to run as a GitHub Action step: configuration comes from the
//! runner's environment, the result is the `time` output or a failed step.

pub mod action;
pub mod config;
pub mod error;
pub mod octocrab_extra;
pub mod reporter;

pub use config::{Config, Environment, ProcessEnv, Repository};
pub use error::{Error, Result};
pub use reporter::{run, Dispatch, Report, Reporter};

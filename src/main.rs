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

use std::process::ExitCode;

use create_status_check::action::{self, Outputs};
use create_status_check::{Error, ProcessEnv, Report};
use env_logger::Env;
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("create_status_check=info"))
        .init();

    let env = ProcessEnv;
    let outputs = Outputs::from_env(&env);

    let Report { time, dispatch } = match create_status_check::run(&env).await {
        Ok(report) => report,
        Err(e) => return fail(e),
    };

    let published = outputs.set("time", &time);
    // Keep the runtime alive until the request has left.
    dispatch.settle().await;

    match published {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn fail(e: Error) -> ExitCode {
    action::set_failed(&e.to_string());
    error!("{:?}", miette::Report::new(e));
    ExitCode::FAILURE
}

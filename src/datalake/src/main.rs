// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provisions the sports-analytics data lake.

mod args;

use args::Args;
use clap::Parser;
use sports_data_lake::plan::Plan;
use sports_data_lake::{ProvisionReport, Provisioner};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _guard = enable_tracing();

    let args = Args::parse();
    tracing::info!("{args:?}");
    let config = args.config();

    if args.dry_run {
        let plan = Plan::new(&config)?;
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(ExitCode::SUCCESS);
    }

    let provisioner = Provisioner::connect(config).await?;
    let report = provisioner.run().await;
    println!("{report}");
    if is_failure(args.strict, &report) {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Step failures only change the exit status in strict mode.
fn is_failure(strict: bool, report: &ProvisionReport) -> bool {
    strict && !report.is_complete()
}

fn enable_tracing() -> tracing::dispatcher::DefaultGuard {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt::format::FmtSpan;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .with_thread_ids(true)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

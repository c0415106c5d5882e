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

use clap::Parser;
use sports_data_lake::config::{DEFAULT_BUCKET, DEFAULT_DATABASE, DEFAULT_REGION, DEFAULT_TABLE};
use sports_data_lake::readiness::ReadinessPolicy;
use sports_data_lake::{Config, FailurePolicy};
use std::time::Duration;

const DESCRIPTION: &str = concat!(
    "Provisions the data lake for the sports-analytics demo. The program creates",
    " a Cloud Storage bucket, a BigQuery dataset acting as the metadata catalog,",
    " uploads a small sample dataset, registers an external table over it, and",
    " configures a result-output location for BigQuery queries.",
    " Every step is attempted in order, and the program prints the outcome of",
    " each step. Running the program again is safe, resources that already",
    " exist are reported as such."
);

/// Provisions the sports-analytics data lake.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = DESCRIPTION)]
pub struct Args {
    /// The project that owns the bucket, the datasets, and the query jobs.
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    pub project: String,

    /// The region for the bucket and the catalog database.
    ///
    /// Buckets in the default region are created without an explicit location.
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// The bucket name. Bucket names are globally unique.
    #[arg(long, default_value = DEFAULT_BUCKET)]
    pub bucket: String,

    /// The catalog database (BigQuery dataset) name.
    #[arg(long, default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// The catalog table name.
    #[arg(long, default_value = DEFAULT_TABLE)]
    pub table: String,

    /// How many times to check if a new bucket is visible.
    #[arg(long, default_value_t = 10)]
    pub readiness_attempts: u32,

    /// The delay between bucket visibility checks, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub readiness_interval_ms: u64,

    /// Skip the remaining steps after the first failure.
    #[arg(long, default_value_t = false)]
    pub stop_on_failure: bool,

    /// Exit with an error status if any step fails.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Print the requests as JSON and exit, without calling any service.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl Args {
    /// The provisioning configuration selected by the arguments.
    pub fn config(&self) -> Config {
        let readiness = ReadinessPolicy::new(
            self.readiness_attempts,
            Duration::from_millis(self.readiness_interval_ms),
        );
        let failure_policy = if self.stop_on_failure {
            FailurePolicy::StopOnFailure
        } else {
            FailurePolicy::Continue
        };
        Config::new(&self.project)
            .set_region(self.region.as_str())
            .set_bucket(&self.bucket)
            .set_database(&self.database)
            .set_table(&self.table)
            .set_readiness(readiness)
            .set_failure_policy(failure_policy)
    }
}

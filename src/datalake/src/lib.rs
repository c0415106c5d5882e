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

//! Provisions a small data lake for a sports-analytics demo.
//!
//! The provisioner creates a Cloud Storage bucket, registers a BigQuery
//! dataset and an external table describing a sample dataset, uploads the
//! sample records, and configures a result-output location for the query
//! service.
//!
//! # Example
//! ```no_run
//! # async fn sample() -> anyhow::Result<()> {
//! use sports_data_lake::{Config, Provisioner};
//! let config = Config::new("my-project").set_bucket("my-unique-bucket-name");
//! let provisioner = Provisioner::connect(config).await?;
//! let report = provisioner.run().await;
//! println!("{report}");
//! # Ok(()) }
//! ```
//!
//! All the service calls go through the traits in [stub]. Applications and
//! tests can supply their own implementations with [Provisioner::new].

pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod plan;
pub mod readiness;
pub mod report;
pub mod schema;
pub mod stub;
pub mod transport;

mod provisioner;

#[cfg(test)]
mod mocks;

pub use config::{Config, FailurePolicy, Region};
pub use error::{Error, ErrorKind};
pub use provisioner::Provisioner;
pub use report::{Outcome, ProvisionReport, Step};

/// The result type used by the provisioning steps and the service traits.
pub type Result<T> = std::result::Result<T, Error>;

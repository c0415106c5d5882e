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

//! Configuration for the provisioning workflow.
//!
//! The defaults reproduce the demo data lake. Every provisioning step reads
//! its names and locations from a [Config] value, never from globals.

use crate::readiness::ReadinessPolicy;

/// The region used when none is configured.
///
/// Cloud Storage places buckets created without a location in this region,
/// so the bucket creation request omits the location for it.
pub const DEFAULT_REGION: &str = "US";

/// The default bucket name. Bucket names are globally unique, most
/// deployments need to override it.
pub const DEFAULT_BUCKET: &str = "sports-analytics-data-lake";

/// The default catalog database (a BigQuery dataset).
pub const DEFAULT_DATABASE: &str = "nba_data_lake";

/// The description attached to the catalog database.
pub const DATABASE_DESCRIPTION: &str = "Catalog database for NBA sports analytics.";

/// The default catalog table.
pub const DEFAULT_TABLE: &str = "nba_players";

/// The database created by the query service bootstrap statement.
pub const ANALYTICS_DATABASE: &str = "nba_analytics";

/// The prefix for the raw data objects. The catalog table points here.
pub const SAMPLE_DATA_PREFIX: &str = "raw-data/";

/// The name of the sample data object, relative to [SAMPLE_DATA_PREFIX].
pub const SAMPLE_DATA_OBJECT: &str = "nba_sample_data.json";

/// The prefix where the query service writes its results.
pub const QUERY_OUTPUT_PREFIX: &str = "query-results/";

/// A cloud region, or multi-region, such as `US` or `us-central1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region(String);

impl Region {
    /// Creates a new region.
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self(name.into())
    }

    /// The region name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the designated default region.
    ///
    /// Location names are case-insensitive in Cloud Storage.
    pub fn is_default(&self) -> bool {
        self.0.eq_ignore_ascii_case(DEFAULT_REGION)
    }

    /// The explicit location constraint for a new bucket, if any.
    ///
    /// # Example
    /// ```
    /// use sports_data_lake::Region;
    /// assert_eq!(Region::default().location_constraint(), None);
    /// assert_eq!(Region::new("us-east1").location_constraint(), Some("us-east1"));
    /// ```
    pub fn location_constraint(&self) -> Option<&str> {
        if self.is_default() {
            None
        } else {
            Some(self.as_str())
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Region {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// What the provisioner does after a step fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Run every step, regardless of earlier failures.
    #[default]
    Continue,
    /// Skip the remaining steps after the first failure.
    StopOnFailure,
}

/// The configuration for a provisioning run.
///
/// # Example
/// ```
/// use sports_data_lake::Config;
/// let config = Config::new("my-project")
///     .set_bucket("my-bucket")
///     .set_region("us-central1");
/// assert_eq!(config.sample_data_uri(), "gs://my-bucket/raw-data/nba_sample_data.json");
/// assert_eq!(config.table_location(), "gs://my-bucket/raw-data/");
/// ```
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Config {
    /// The project that owns the bucket, the datasets, and the query jobs.
    pub project_id: String,
    /// The region for the bucket and the catalog database.
    pub region: Region,
    /// The bucket name.
    pub bucket: String,
    /// The catalog database name.
    pub database: String,
    /// The catalog table name.
    pub table: String,
    /// How long to wait for a new bucket to become visible.
    pub readiness: ReadinessPolicy,
    /// What to do after a step fails.
    pub failure_policy: FailurePolicy,
}

impl Config {
    /// Creates a configuration with the default names.
    pub fn new<T: Into<String>>(project_id: T) -> Self {
        Self {
            project_id: project_id.into(),
            region: Region::default(),
            bucket: DEFAULT_BUCKET.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            table: DEFAULT_TABLE.to_string(),
            readiness: ReadinessPolicy::default(),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Sets the region.
    pub fn set_region<T: Into<Region>>(mut self, v: T) -> Self {
        self.region = v.into();
        self
    }

    /// Sets the bucket name.
    pub fn set_bucket<T: Into<String>>(mut self, v: T) -> Self {
        self.bucket = v.into();
        self
    }

    /// Sets the catalog database name.
    pub fn set_database<T: Into<String>>(mut self, v: T) -> Self {
        self.database = v.into();
        self
    }

    /// Sets the catalog table name.
    pub fn set_table<T: Into<String>>(mut self, v: T) -> Self {
        self.table = v.into();
        self
    }

    /// Sets the readiness policy.
    pub fn set_readiness(mut self, v: ReadinessPolicy) -> Self {
        self.readiness = v;
        self
    }

    /// Sets the failure policy.
    pub fn set_failure_policy(mut self, v: FailurePolicy) -> Self {
        self.failure_policy = v;
        self
    }

    /// The object name for the sample data.
    pub fn sample_data_key(&self) -> String {
        format!("{SAMPLE_DATA_PREFIX}{SAMPLE_DATA_OBJECT}")
    }

    /// The full `gs://` URI of the sample data object.
    pub fn sample_data_uri(&self) -> String {
        format!("gs://{}/{}", self.bucket, self.sample_data_key())
    }

    /// The storage location referenced by the catalog table.
    pub fn table_location(&self) -> String {
        format!("gs://{}/{SAMPLE_DATA_PREFIX}", self.bucket)
    }

    /// The location where the query service writes its results.
    pub fn query_output_location(&self) -> String {
        format!("gs://{}/{QUERY_OUTPUT_PREFIX}", self.bucket)
    }
}

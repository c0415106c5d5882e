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

//! Builds the requests for each provisioning step from a [Config].
//!
//! The functions here are pure. The provisioner sends their results through
//! the [stub][crate::stub] traits, and `--dry-run` prints them.

use crate::config::{ANALYTICS_DATABASE, DATABASE_DESCRIPTION};
use crate::dataset::{encode, sample_records};
use crate::model::{
    CreateBucketRequest, CreateDatabaseRequest, CreateTableRequest, PutObjectRequest,
    StartQueryRequest,
};
use crate::schema::TableSchema;
use crate::{Config, Result};
use serde::Serialize;

/// The request to create the bucket.
///
/// The location is omitted for the default region.
pub fn create_bucket(config: &Config) -> CreateBucketRequest {
    CreateBucketRequest::new()
        .set_project_id(&config.project_id)
        .set_bucket(&config.bucket)
        .set_or_clear_location(config.region.location_constraint())
}

/// The request to create the catalog database.
pub fn create_database(config: &Config) -> CreateDatabaseRequest {
    CreateDatabaseRequest::new()
        .set_project_id(&config.project_id)
        .set_database(&config.database)
        .set_description(DATABASE_DESCRIPTION)
        .set_location(config.region.as_str())
}

/// The request to upload the sample dataset.
pub fn put_sample_data(config: &Config) -> Result<PutObjectRequest> {
    let body = encode(&sample_records())?;
    Ok(PutObjectRequest::new()
        .set_bucket(&config.bucket)
        .set_key(config.sample_data_key())
        .set_body(body))
}

/// The request to create the catalog table over the sample data.
pub fn create_table(config: &Config) -> CreateTableRequest {
    let table = TableSchema::nba_players(&config.table, config.table_location());
    CreateTableRequest::new(&config.project_id, &config.database, table)
}

/// The statement that prepares the query service.
///
/// It creates the analytics database and writes a marker row to the output
/// location, which confirms the query service can write there.
///
/// # Example
/// ```
/// use sports_data_lake::{Config, plan::bootstrap_statement};
/// let statement = bootstrap_statement(&Config::new("p").set_bucket("b"));
/// assert!(statement.starts_with("CREATE SCHEMA IF NOT EXISTS `nba_analytics`;"));
/// assert!(statement.contains("gs://b/query-results/"));
/// ```
pub fn bootstrap_statement(config: &Config) -> String {
    let output = config.query_output_location();
    format!(
        "CREATE SCHEMA IF NOT EXISTS `{ANALYTICS_DATABASE}`;\n\
         EXPORT DATA OPTIONS (uri = '{output}bootstrap-*.json', format = 'JSON', overwrite = true) AS \
         SELECT '{ANALYTICS_DATABASE}' AS schema_name, CURRENT_TIMESTAMP() AS configured_at"
    )
}

/// The request to configure the query output location.
pub fn start_query(config: &Config) -> StartQueryRequest {
    StartQueryRequest::new()
        .set_project_id(&config.project_id)
        .set_statement(bootstrap_statement(config))
        .set_default_database(&config.database)
        .set_output_location(config.query_output_location())
}

/// All the requests the provisioner would send, in order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub create_bucket: CreateBucketRequest,
    pub create_database: CreateDatabaseRequest,
    pub put_sample_data: PutObjectRequest,
    pub create_table: CreateTableRequest,
    pub start_query: StartQueryRequest,
}

impl Plan {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            create_bucket: create_bucket(config),
            create_database: create_database(config),
            put_sample_data: put_sample_data(config)?,
            create_table: create_table(config),
            start_query: start_query(config),
        })
    }
}

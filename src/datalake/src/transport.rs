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

//! Implements the [stub][crate::stub] traits with the Google Cloud clients.
//!
//! Object storage maps to Cloud Storage. The metadata catalog maps to BigQuery
//! datasets and external tables. The query service maps to BigQuery query
//! jobs. All the clients use Application Default Credentials.

use crate::model::{
    CreateBucketRequest, CreateDatabaseRequest, CreateTableRequest, PutObjectRequest,
    StartQueryRequest,
};
use crate::schema::{TableSchema, TableType};
use crate::{Config, Error, Provisioner, Result};
use google_cloud_bigquery_v2::client::{DatasetService, JobService, TableService};
use google_cloud_bigquery_v2::model as bq;
use google_cloud_storage::client::{Storage, StorageControl};
use google_cloud_storage::model::Bucket;

const GLOBAL_PARENT: &str = "projects/_";
const NULLABLE: &str = "NULLABLE";

fn bucket_name(bucket: &str) -> String {
    format!("{GLOBAL_PARENT}/buckets/{bucket}")
}

/// Object storage backed by Cloud Storage.
#[derive(Clone, Debug)]
pub struct StorageTransport {
    control: StorageControl,
    storage: Storage,
}

impl StorageTransport {
    /// Creates the Cloud Storage clients.
    pub async fn new() -> Result<Self> {
        let control = StorageControl::builder()
            .build()
            .await
            .map_err(Error::transport)?;
        let storage = Storage::builder().build().await.map_err(Error::transport)?;
        Ok(Self::from_clients(control, storage))
    }

    /// Uses existing clients, e.g. clients with custom retry policies.
    pub fn from_clients(control: StorageControl, storage: Storage) -> Self {
        Self { control, storage }
    }
}

impl crate::stub::ObjectStorage for StorageTransport {
    async fn create_bucket(&self, req: CreateBucketRequest) -> Result<()> {
        let bucket = Bucket::new().set_project(format!("projects/{}", req.project_id));
        let bucket = match req.location {
            Some(location) => bucket.set_location(location),
            None => bucket,
        };
        let created = self
            .control
            .create_bucket()
            .set_parent(GLOBAL_PARENT)
            .set_bucket_id(req.bucket)
            .set_bucket(bucket)
            .send()
            .await?;
        tracing::debug!("created bucket {} in {}", created.name, created.location);
        Ok(())
    }

    async fn bucket_exists(&self, bucket: String) -> Result<bool> {
        let response = self
            .control
            .get_bucket()
            .set_name(bucket_name(&bucket))
            .send()
            .await;
        match response {
            Ok(_) => Ok(true),
            Err(e) => {
                let error = Error::from(e);
                if error.is_not_found() {
                    return Ok(false);
                }
                Err(error)
            }
        }
    }

    async fn put_object(&self, req: PutObjectRequest) -> Result<()> {
        let object = self
            .storage
            .write_object(bucket_name(&req.bucket), req.key, req.body)
            .send_unbuffered()
            .await?;
        tracing::debug!(
            "uploaded {} ({} bytes, generation {})",
            object.name,
            object.size,
            object.generation
        );
        Ok(())
    }
}

/// The metadata catalog backed by BigQuery datasets and tables.
#[derive(Clone, Debug)]
pub struct CatalogTransport {
    datasets: DatasetService,
    tables: TableService,
}

impl CatalogTransport {
    /// Creates the BigQuery dataset and table clients.
    pub async fn new() -> Result<Self> {
        let datasets = DatasetService::builder()
            .build()
            .await
            .map_err(Error::transport)?;
        let tables = TableService::builder()
            .build()
            .await
            .map_err(Error::transport)?;
        Ok(Self::from_clients(datasets, tables))
    }

    pub fn from_clients(datasets: DatasetService, tables: TableService) -> Self {
        Self { datasets, tables }
    }
}

impl crate::stub::Catalog for CatalogTransport {
    async fn create_database(&self, req: CreateDatabaseRequest) -> Result<()> {
        let dataset = bq::Dataset::new()
            .set_dataset_reference(
                bq::DatasetReference::new()
                    .set_project_id(&req.project_id)
                    .set_dataset_id(&req.database),
            )
            .set_description(req.description)
            .set_location(req.location);
        self.datasets
            .insert_dataset()
            .set_project_id(req.project_id)
            .set_dataset(dataset)
            .send()
            .await?;
        Ok(())
    }

    async fn create_table(&self, req: CreateTableRequest) -> Result<()> {
        let table = catalog_table(&req.project_id, &req.database, &req.table);
        self.tables
            .insert_table()
            .set_project_id(req.project_id)
            .set_dataset_id(req.database)
            .set_table(table)
            .send()
            .await?;
        Ok(())
    }
}

fn catalog_table(project_id: &str, dataset_id: &str, schema: &TableSchema) -> bq::Table {
    let fields = schema.columns.iter().map(|c| {
        bq::TableFieldSchema::new()
            .set_name(&c.name)
            .set_type(c.column_type.bigquery_type())
            .set_mode(NULLABLE)
    });
    let table = bq::Table::new()
        .set_table_reference(
            bq::TableReference::new()
                .set_project_id(project_id)
                .set_dataset_id(dataset_id)
                .set_table_id(&schema.name),
        )
        .set_schema(bq::TableSchema::new().set_fields(fields));
    match schema.table_type {
        TableType::External => table.set_external_data_configuration(
            bq::ExternalDataConfiguration::new()
                .set_source_uris(schema.source_uris())
                .set_source_format(&schema.source_format),
        ),
    }
}

/// The query service backed by BigQuery jobs.
#[derive(Clone, Debug)]
pub struct QueryTransport {
    jobs: JobService,
}

impl QueryTransport {
    /// Creates the BigQuery job client.
    pub async fn new() -> Result<Self> {
        let jobs = JobService::builder()
            .build()
            .await
            .map_err(Error::transport)?;
        Ok(Self::from_client(jobs))
    }

    pub fn from_client(jobs: JobService) -> Self {
        Self { jobs }
    }
}

impl crate::stub::QueryService for QueryTransport {
    async fn start_query(&self, req: StartQueryRequest) -> Result<String> {
        // The statement carries the output location, see `plan::bootstrap_statement()`.
        let request = bq::QueryRequest::new()
            .set_query(req.statement)
            .set_use_legacy_sql(false)
            .set_default_dataset(
                bq::DatasetReference::new()
                    .set_project_id(&req.project_id)
                    .set_dataset_id(req.default_database),
            );
        let response = self
            .jobs
            .query()
            .set_project_id(req.project_id)
            .set_query_request(request)
            .send()
            .await?;
        let job_id = response
            .job_reference
            .map(|r| r.job_id)
            .unwrap_or_default();
        tracing::debug!(
            "query job {job_id} complete={:?} output={}",
            response.job_complete,
            req.output_location
        );
        Ok(job_id)
    }
}

impl Provisioner<StorageTransport, CatalogTransport, QueryTransport> {
    /// Creates a provisioner using the Google Cloud clients.
    ///
    /// The clients use Application Default Credentials.
    pub async fn connect(config: Config) -> Result<Self> {
        let storage = StorageTransport::new().await?;
        let catalog = CatalogTransport::new().await?;
        let query = QueryTransport::new().await?;
        Ok(Self::new(config, storage, catalog, query))
    }
}

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

use crate::config::{Config, FailurePolicy};
use crate::plan;
use crate::readiness::{Readiness, wait_for_bucket};
use crate::report::{Outcome, ProvisionReport, Step};
use crate::stub::{Catalog, ObjectStorage, QueryService};
use crate::{Error, ErrorKind, Result};
use std::time::Duration;
use tracing::Instrument;

/// Provisions the data lake.
///
/// Each step is available as a separate function, returning a typed result.
/// [run][Provisioner::run] executes all of them in order and collects the
/// outcomes into a [ProvisionReport].
///
/// # Example
/// ```
/// # use sports_data_lake::{Config, Provisioner};
/// # use sports_data_lake::stub::{Catalog, ObjectStorage, QueryService};
/// async fn provision<S, C, Q>(storage: S, catalog: C, query: Q)
/// where
///     S: ObjectStorage,
///     C: Catalog,
///     Q: QueryService,
/// {
///     let config = Config::new("my-project").set_bucket("my-bucket");
///     let provisioner = Provisioner::new(config, storage, catalog, query);
///     let report = provisioner.run().await;
///     println!("{report}");
/// }
/// ```
#[derive(Debug)]
pub struct Provisioner<S, C, Q> {
    config: Config,
    storage: S,
    catalog: C,
    query: Q,
}

impl<S, C, Q> Provisioner<S, C, Q>
where
    S: ObjectStorage,
    C: Catalog,
    Q: QueryService,
{
    /// Creates a provisioner using the given service implementations.
    pub fn new(config: Config, storage: S, catalog: C, query: Q) -> Self {
        Self {
            config,
            storage,
            catalog,
            query,
        }
    }

    /// The configuration used by this provisioner.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Creates the storage bucket.
    ///
    /// The bucket location is omitted for the default region. Bucket names are
    /// global. If another project owns the name, the step fails.
    pub async fn create_storage_bucket(&self) -> Result<()> {
        let request = plan::create_bucket(&self.config);
        tracing::info!(
            "creating bucket {} in {}",
            request.bucket,
            request.location.as_deref().unwrap_or(self.config.region.as_str())
        );
        match self.storage.create_bucket(request).await {
            Err(e) if e.is_already_exists() => self.check_bucket_access(e).await,
            result => result,
        }
    }

    // Cloud Storage reports the same conflict for buckets owned by other
    // projects. Only a bucket the caller can read counts as already existing.
    async fn check_bucket_access(&self, conflict: Error) -> Result<()> {
        let bucket = &self.config.bucket;
        if self.storage.bucket_exists(bucket.clone()).await? {
            return Err(conflict);
        }
        Err(Error::new(
            ErrorKind::PermissionDenied,
            format!("bucket {bucket} exists but is not accessible, the name may be taken"),
        ))
    }

    /// Waits until the bucket is visible, using the configured policy.
    ///
    /// Timing out is not an error, the dependent steps report their own
    /// failures if the bucket never appears.
    pub async fn wait_for_bucket(&self) -> Readiness {
        let readiness =
            wait_for_bucket(&self.storage, &self.config.bucket, &self.config.readiness).await;
        if let Readiness::TimedOut { attempts } = readiness {
            tracing::warn!(
                "bucket {} is not visible after {attempts} attempt(s), continuing",
                self.config.bucket
            );
        }
        readiness
    }

    /// Creates the catalog database.
    pub async fn create_catalog_database(&self) -> Result<()> {
        let request = plan::create_database(&self.config);
        tracing::info!("creating catalog database {}", request.database);
        self.catalog.create_database(request).await
    }

    /// Uploads the sample dataset, replacing any previous upload.
    ///
    /// Waits for the bucket to become visible before uploading.
    pub async fn upload_sample_dataset(&self) -> Result<()> {
        let request = plan::put_sample_data(&self.config)?;
        self.wait_for_bucket().await;
        tracing::info!(
            "uploading {} bytes to gs://{}/{}",
            request.body.len(),
            request.bucket,
            request.key
        );
        self.storage.put_object(request).await
    }

    /// Creates the external table over the sample dataset.
    pub async fn create_catalog_table(&self) -> Result<()> {
        let request = plan::create_table(&self.config);
        tracing::info!(
            "creating catalog table {}.{} at {}",
            request.database,
            request.table.name,
            request.table.location
        );
        self.catalog.create_table(request).await
    }

    /// Configures the query service output location.
    ///
    /// Returns the identifier of the query job. The service waits for the job
    /// to complete, up to its default timeout, before returning. A job that is
    /// still running at that point is not an error.
    pub async fn configure_query_output(&self) -> Result<String> {
        let request = plan::start_query(&self.config);
        tracing::info!(
            "configuring query output location {}",
            request.output_location
        );
        let job_id = self.query.start_query(request).await?;
        tracing::info!("started query job {job_id}");
        Ok(job_id)
    }

    /// Runs every step, in order.
    ///
    /// This function never fails. The outcome of each step is in the returned
    /// report. With [FailurePolicy::StopOnFailure] the steps after the first
    /// failure are reported as [Outcome::Skipped].
    pub async fn run(&self) -> ProvisionReport {
        let mut report = ProvisionReport::new();
        let mut failed = false;
        for step in Step::ALL {
            if failed && self.config.failure_policy == FailurePolicy::StopOnFailure {
                tracing::info!("skipping {step} after an earlier failure");
                report.push(step, Outcome::Skipped, Duration::ZERO);
                continue;
            }
            let span = tracing::info_span!("provision", step = step.name());
            let start = tokio::time::Instant::now();
            let outcome = self.run_step(step).instrument(span).await;
            let elapsed = start.elapsed();
            match &outcome {
                Outcome::Created => tracing::info!("{step} succeeded"),
                Outcome::AlreadyExists => {
                    tracing::info!("{step}: the resource already exists")
                }
                Outcome::Failed(e) => tracing::error!("{step} failed: {e}"),
                Outcome::Skipped => {}
            }
            failed = failed || matches!(outcome, Outcome::Failed(_));
            report.push(step, outcome, elapsed);

            if step == Step::CreateStorageBucket
                && !(failed && self.config.failure_policy == FailurePolicy::StopOnFailure)
            {
                self.wait_for_bucket().await;
            }
        }
        report
    }

    async fn run_step(&self, step: Step) -> Outcome {
        match step {
            Step::CreateStorageBucket => self.create_storage_bucket().await.into(),
            Step::CreateCatalogDatabase => self.create_catalog_database().await.into(),
            Step::UploadSampleDataset => self.upload_sample_dataset().await.into(),
            Step::CreateCatalogTable => self.create_catalog_table().await.into(),
            Step::ConfigureQueryOutput => self.configure_query_output().await.into(),
        }
    }
}

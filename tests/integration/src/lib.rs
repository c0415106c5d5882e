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

//! Runs the provisioner against a real project.
//!
//! Every run uses a new bucket and dataset, and removes them when done. The
//! cleanup is best-effort, a failed run may leave resources behind.

use data_lake_test_utils::resource_names::{random_bucket_id, random_dataset_id};
use data_lake_test_utils::runtime_config::{project_id, region_id};
use google_cloud_bigquery_v2::client::DatasetService;
use google_cloud_storage::client::StorageControl;
use sports_data_lake::{Config, Outcome, Provisioner, Step};

pub type Result<T> = anyhow::Result<T>;

/// Provisions a data lake twice, verifying the second run is idempotent.
pub async fn provision_twice() -> Result<()> {
    let _guard = data_lake_test_utils::tracing::enable_tracing();

    let project_id = project_id()?;
    let config = Config::new(&project_id)
        .set_region(region_id())
        .set_bucket(random_bucket_id())
        .set_database(random_dataset_id());
    tracing::info!("provisioning with {config:?}");

    let result = run(config.clone()).await;
    if let Err(e) = cleanup(&config).await {
        tracing::warn!("error cleaning up {config:?}: {e}");
    }
    result
}

async fn run(config: Config) -> Result<()> {
    let provisioner = Provisioner::connect(config).await?;

    let first = provisioner.run().await;
    tracing::info!("first run:\n{first}");
    if let Some((step, e)) = first.failures().next() {
        anyhow::bail!("{step} failed in the first run: {e}");
    }
    assert!(first.is_complete(), "{first}");

    let second = provisioner.run().await;
    tracing::info!("second run:\n{second}");
    assert!(second.is_complete(), "{second}");
    for step in [
        Step::CreateStorageBucket,
        Step::CreateCatalogDatabase,
        Step::CreateCatalogTable,
    ] {
        assert!(
            matches!(second.outcome(step), Some(Outcome::AlreadyExists)),
            "{step} should report an existing resource: {second}"
        );
    }
    Ok(())
}

async fn cleanup(config: &Config) -> Result<()> {
    let datasets = DatasetService::builder().build().await?;
    // The analytics dataset is shared by every run in the project, keep it.
    datasets
        .delete_dataset()
        .set_project_id(&config.project_id)
        .set_dataset_id(&config.database)
        .set_delete_contents(true)
        .send()
        .await?;

    let control = StorageControl::builder().build().await?;
    cleanup_bucket(&control, format!("projects/_/buckets/{}", config.bucket)).await
}

async fn cleanup_bucket(client: &StorageControl, name: String) -> Result<()> {
    use google_cloud_gax::paginator::ItemPaginator;

    let mut objects = client
        .list_objects()
        .set_parent(&name)
        .set_versions(true)
        .by_item();
    while let Some(item) = objects.next().await {
        let Ok(object) = item else {
            continue;
        };
        let _ = client
            .delete_object()
            .set_bucket(object.bucket)
            .set_object(object.name)
            .set_generation(object.generation)
            .send()
            .await;
    }
    client.delete_bucket().set_name(&name).send().await?;
    Ok(())
}

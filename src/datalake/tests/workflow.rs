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

//! Runs the whole workflow against mocked services.

#[cfg(test)]
mod tests {
    use sports_data_lake::dataset::decode;
    use sports_data_lake::model::{
        CreateBucketRequest, CreateDatabaseRequest, CreateTableRequest, PutObjectRequest,
        StartQueryRequest,
    };
    use sports_data_lake::readiness::ReadinessPolicy;
    use sports_data_lake::{Config, Error, ErrorKind, Outcome, Provisioner, Result, Step};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    mockall::mock! {
        #[derive(Debug)]
        Storage {}
        impl sports_data_lake::stub::ObjectStorage for Storage {
            async fn create_bucket(&self, req: CreateBucketRequest) -> Result<()>;
            async fn bucket_exists(&self, bucket: String) -> Result<bool>;
            async fn put_object(&self, req: PutObjectRequest) -> Result<()>;
        }
    }

    mockall::mock! {
        #[derive(Debug)]
        Catalog {}
        impl sports_data_lake::stub::Catalog for Catalog {
            async fn create_database(&self, req: CreateDatabaseRequest) -> Result<()>;
            async fn create_table(&self, req: CreateTableRequest) -> Result<()>;
        }
    }

    mockall::mock! {
        #[derive(Debug)]
        Query {}
        impl sports_data_lake::stub::QueryService for Query {
            async fn start_query(&self, req: StartQueryRequest) -> Result<String>;
        }
    }

    type Calls = Arc<Mutex<Vec<&'static str>>>;

    fn record(calls: &Calls, name: &'static str) {
        if let Ok(mut guard) = calls.lock() {
            guard.push(name);
        }
    }

    fn test_config() -> Config {
        Config::new("test-project")
            .set_bucket("test-bucket")
            .set_readiness(ReadinessPolicy::new(2, Duration::from_millis(50)))
    }

    fn unavailable() -> Error {
        Error::new(ErrorKind::Unavailable, "test-only")
    }

    fn already_exists() -> Error {
        Error::new(ErrorKind::AlreadyExists, "test-only")
    }

    /// Mocks that succeed and record the requests they receive.
    fn recording_mocks(
        buckets: Arc<Mutex<Vec<CreateBucketRequest>>>,
        objects: Arc<Mutex<Vec<PutObjectRequest>>>,
        tables: Arc<Mutex<Vec<CreateTableRequest>>>,
    ) -> (MockStorage, MockCatalog, MockQuery) {
        let mut storage = MockStorage::new();
        storage.expect_create_bucket().returning(move |r| {
            if let Ok(mut guard) = buckets.lock() {
                guard.push(r);
            }
            Ok(())
        });
        storage.expect_bucket_exists().returning(|_| Ok(true));
        storage.expect_put_object().returning(move |r| {
            if let Ok(mut guard) = objects.lock() {
                guard.push(r);
            }
            Ok(())
        });
        let mut catalog = MockCatalog::new();
        catalog.expect_create_database().returning(|_| Ok(()));
        catalog.expect_create_table().returning(move |r| {
            if let Ok(mut guard) = tables.lock() {
                guard.push(r);
            }
            Ok(())
        });
        let mut query = MockQuery::new();
        query
            .expect_start_query()
            .returning(|_| Ok("test-job-id".to_string()));
        (storage, catalog, query)
    }

    #[tokio::test]
    async fn default_region_omits_location() -> anyhow::Result<()> {
        let buckets = Arc::new(Mutex::new(Vec::new()));
        let (storage, catalog, query) = recording_mocks(
            buckets.clone(),
            Arc::new(Mutex::new(Vec::new())),
            Arc::new(Mutex::new(Vec::new())),
        );
        let provisioner = Provisioner::new(test_config(), storage, catalog, query);
        let report = provisioner.run().await;
        assert!(report.is_complete(), "{report}");

        let buckets = buckets.lock().map_err(|e| anyhow::anyhow!("{e}"))?;
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].location, None);
        Ok(())
    }

    #[tokio::test]
    async fn other_region_sets_location() -> anyhow::Result<()> {
        let buckets = Arc::new(Mutex::new(Vec::new()));
        let (storage, catalog, query) = recording_mocks(
            buckets.clone(),
            Arc::new(Mutex::new(Vec::new())),
            Arc::new(Mutex::new(Vec::new())),
        );
        let config = test_config().set_region("europe-west1");
        let provisioner = Provisioner::new(config, storage, catalog, query);
        let report = provisioner.run().await;
        assert!(report.is_complete(), "{report}");

        let buckets = buckets.lock().map_err(|e| anyhow::anyhow!("{e}"))?;
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].location.as_deref(), Some("europe-west1"));
        Ok(())
    }

    #[tokio::test]
    async fn uploaded_data_matches_table() -> anyhow::Result<()> {
        let objects = Arc::new(Mutex::new(Vec::new()));
        let tables = Arc::new(Mutex::new(Vec::new()));
        let (storage, catalog, query) = recording_mocks(
            Arc::new(Mutex::new(Vec::new())),
            objects.clone(),
            tables.clone(),
        );
        let provisioner = Provisioner::new(test_config(), storage, catalog, query);
        let report = provisioner.run().await;
        assert!(report.is_complete(), "{report}");

        let objects = objects.lock().map_err(|e| anyhow::anyhow!("{e}"))?;
        let tables = tables.lock().map_err(|e| anyhow::anyhow!("{e}"))?;
        assert_eq!(objects.len(), 1);
        assert_eq!(tables.len(), 1);

        let records = decode(&objects[0].body)?;
        assert_eq!(records.len(), 2);
        for r in &records {
            assert!(!r.player.is_empty(), "{r:?}");
            assert!(!r.team.is_empty(), "{r:?}");
        }

        let columns = tables[0]
            .table
            .columns
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        assert_eq!(columns, ["player:string", "team:string", "points:int"]);

        let object_uri = format!("gs://{}/{}", objects[0].bucket, objects[0].key);
        assert!(
            object_uri.starts_with(&tables[0].table.location),
            "{object_uri} {}",
            tables[0].table.location
        );
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn every_call_fails() -> anyhow::Result<()> {
        let calls = Calls::default();
        let mut storage = MockStorage::new();
        let c = calls.clone();
        storage.expect_create_bucket().times(1).returning(move |_| {
            record(&c, "create_bucket");
            Err(unavailable())
        });
        storage
            .expect_bucket_exists()
            .returning(|_| Err(unavailable()));
        let c = calls.clone();
        storage.expect_put_object().times(1).returning(move |_| {
            record(&c, "put_object");
            Err(unavailable())
        });
        let mut catalog = MockCatalog::new();
        let c = calls.clone();
        catalog.expect_create_database().times(1).returning(move |_| {
            record(&c, "create_database");
            Err(unavailable())
        });
        let c = calls.clone();
        catalog.expect_create_table().times(1).returning(move |_| {
            record(&c, "create_table");
            Err(unavailable())
        });
        let mut query = MockQuery::new();
        let c = calls.clone();
        query.expect_start_query().times(1).returning(move |_| {
            record(&c, "start_query");
            Err(unavailable())
        });

        let provisioner = Provisioner::new(test_config(), storage, catalog, query);
        let report = provisioner.run().await;
        assert!(!report.is_complete());
        assert_eq!(report.failures().count(), 5);

        let calls = calls.lock().map_err(|e| anyhow::anyhow!("{e}"))?;
        assert_eq!(
            *calls,
            [
                "create_bucket",
                "create_database",
                "put_object",
                "create_table",
                "start_query"
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn rerun_is_successful() {
        let mut storage = MockStorage::new();
        let mut seq = mockall::Sequence::new();
        storage
            .expect_create_bucket()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        storage
            .expect_create_bucket()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(already_exists()));
        storage.expect_bucket_exists().returning(|_| Ok(true));
        storage.expect_put_object().times(2).returning(|_| Ok(()));

        let mut catalog = MockCatalog::new();
        let mut database_seq = mockall::Sequence::new();
        catalog
            .expect_create_database()
            .times(1)
            .in_sequence(&mut database_seq)
            .returning(|_| Ok(()));
        catalog
            .expect_create_database()
            .times(1)
            .in_sequence(&mut database_seq)
            .returning(|_| Err(already_exists()));
        let mut table_seq = mockall::Sequence::new();
        catalog
            .expect_create_table()
            .times(1)
            .in_sequence(&mut table_seq)
            .returning(|_| Ok(()));
        catalog
            .expect_create_table()
            .times(1)
            .in_sequence(&mut table_seq)
            .returning(|_| Err(already_exists()));

        let mut query = MockQuery::new();
        query
            .expect_start_query()
            .times(2)
            .returning(|_| Ok("test-job-id".to_string()));

        let provisioner = Provisioner::new(test_config(), storage, catalog, query);
        let first = provisioner.run().await;
        assert!(first.is_complete(), "{first}");
        let second = provisioner.run().await;
        assert!(second.is_complete(), "{second}");
        for step in [
            Step::CreateStorageBucket,
            Step::CreateCatalogDatabase,
            Step::CreateCatalogTable,
        ] {
            assert!(
                matches!(second.outcome(step), Some(Outcome::AlreadyExists)),
                "{step}: {second}"
            );
        }
    }
}

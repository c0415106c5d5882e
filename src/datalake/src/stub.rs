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

//! Traits to mock the services used by the provisioner.
//!
//! The provisioner is generic over these traits. The [transport][crate::transport]
//! module implements them with the Google Cloud client libraries. Application
//! developers may need to implement them to test code that uses the
//! provisioner without a real project.

use crate::Result;
use crate::model::{
    CreateBucketRequest, CreateDatabaseRequest, CreateTableRequest, PutObjectRequest,
    StartQueryRequest,
};

/// Defines the trait used to reach the object storage service.
///
/// Implementations must report duplicate buckets with an error of kind
/// [AlreadyExists][crate::ErrorKind::AlreadyExists].
pub trait ObjectStorage: std::fmt::Debug + Send + Sync {
    /// Creates a bucket.
    fn create_bucket(
        &self,
        req: CreateBucketRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Returns true if the bucket exists and is visible to the caller.
    fn bucket_exists(
        &self,
        bucket: String,
    ) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// Uploads an object, replacing any existing object with the same name.
    fn put_object(
        &self,
        req: PutObjectRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Defines the trait used to reach the metadata catalog.
///
/// Implementations must report duplicate databases and tables with an error
/// of kind [AlreadyExists][crate::ErrorKind::AlreadyExists].
pub trait Catalog: std::fmt::Debug + Send + Sync {
    /// Creates a database.
    fn create_database(
        &self,
        req: CreateDatabaseRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Creates a table in an existing database.
    fn create_table(
        &self,
        req: CreateTableRequest,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Defines the trait used to reach the query service.
pub trait QueryService: std::fmt::Debug + Send + Sync {
    /// Starts a query and returns the job identifier.
    ///
    /// The provisioner does not wait for the query to complete.
    fn start_query(
        &self,
        req: StartQueryRequest,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

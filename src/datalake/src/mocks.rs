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

use crate::Result;
use crate::model::{
    CreateBucketRequest, CreateDatabaseRequest, CreateTableRequest, PutObjectRequest,
    StartQueryRequest,
};

mockall::mock! {
    #[derive(Debug)]
    pub Storage {}
    impl crate::stub::ObjectStorage for Storage {
        async fn create_bucket(&self, req: CreateBucketRequest) -> Result<()>;
        async fn bucket_exists(&self, bucket: String) -> Result<bool>;
        async fn put_object(&self, req: PutObjectRequest) -> Result<()>;
    }
}

mockall::mock! {
    #[derive(Debug)]
    pub Catalog {}
    impl crate::stub::Catalog for Catalog {
        async fn create_database(&self, req: CreateDatabaseRequest) -> Result<()>;
        async fn create_table(&self, req: CreateTableRequest) -> Result<()>;
    }
}

mockall::mock! {
    #[derive(Debug)]
    pub Query {}
    impl crate::stub::QueryService for Query {
        async fn start_query(&self, req: StartQueryRequest) -> Result<String>;
    }
}

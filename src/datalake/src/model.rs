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

//! The requests sent through the [stub][crate::stub] traits.
//!
//! These are independent of any client library. The [transport][crate::transport]
//! module converts them to the Cloud Storage and BigQuery request types.

use crate::schema::TableSchema;
use serde::Serialize;

/// Creates a bucket.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct CreateBucketRequest {
    /// The project that owns the bucket.
    pub project_id: String,
    /// The bucket name.
    pub bucket: String,
    /// The bucket location. `None` selects the service default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CreateBucketRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [project_id][CreateBucketRequest::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }

    /// Sets the value of [bucket][CreateBucketRequest::bucket].
    pub fn set_bucket<T: Into<String>>(mut self, v: T) -> Self {
        self.bucket = v.into();
        self
    }

    /// Sets or clears the value of [location][CreateBucketRequest::location].
    pub fn set_or_clear_location<T: Into<String>>(mut self, v: Option<T>) -> Self {
        self.location = v.map(Into::into);
        self
    }
}

/// Uploads an object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct PutObjectRequest {
    /// The bucket receiving the object.
    pub bucket: String,
    /// The object name.
    pub key: String,
    /// The object contents.
    #[serde(serialize_with = "serialize_utf8")]
    pub body: bytes::Bytes,
}

impl PutObjectRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [bucket][PutObjectRequest::bucket].
    pub fn set_bucket<T: Into<String>>(mut self, v: T) -> Self {
        self.bucket = v.into();
        self
    }

    /// Sets the value of [key][PutObjectRequest::key].
    pub fn set_key<T: Into<String>>(mut self, v: T) -> Self {
        self.key = v.into();
        self
    }

    /// Sets the value of [body][PutObjectRequest::body].
    pub fn set_body<T: Into<bytes::Bytes>>(mut self, v: T) -> Self {
        self.body = v.into();
        self
    }
}

fn serialize_utf8<S>(body: &bytes::Bytes, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match std::str::from_utf8(body) {
        Ok(s) => serializer.serialize_str(s),
        Err(_) => serializer.serialize_bytes(body),
    }
}

/// Creates a catalog database.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct CreateDatabaseRequest {
    pub project_id: String,
    pub database: String,
    pub description: String,
    pub location: String,
}

impl CreateDatabaseRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [project_id][CreateDatabaseRequest::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }

    /// Sets the value of [database][CreateDatabaseRequest::database].
    pub fn set_database<T: Into<String>>(mut self, v: T) -> Self {
        self.database = v.into();
        self
    }

    /// Sets the value of [description][CreateDatabaseRequest::description].
    pub fn set_description<T: Into<String>>(mut self, v: T) -> Self {
        self.description = v.into();
        self
    }

    /// Sets the value of [location][CreateDatabaseRequest::location].
    pub fn set_location<T: Into<String>>(mut self, v: T) -> Self {
        self.location = v.into();
        self
    }
}

/// Creates a catalog table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct CreateTableRequest {
    pub project_id: String,
    /// The database containing the table.
    pub database: String,
    pub table: TableSchema,
}

impl CreateTableRequest {
    pub fn new<P, D>(project_id: P, database: D, table: TableSchema) -> Self
    where
        P: Into<String>,
        D: Into<String>,
    {
        Self {
            project_id: project_id.into(),
            database: database.into(),
            table,
        }
    }
}

/// Starts a query.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct StartQueryRequest {
    /// The project running the query job.
    pub project_id: String,
    /// The SQL statement.
    pub statement: String,
    /// The database used to resolve unqualified table names.
    pub default_database: String,
    /// Where the statement writes its results.
    pub output_location: String,
}

impl StartQueryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [project_id][StartQueryRequest::project_id].
    pub fn set_project_id<T: Into<String>>(mut self, v: T) -> Self {
        self.project_id = v.into();
        self
    }

    /// Sets the value of [statement][StartQueryRequest::statement].
    pub fn set_statement<T: Into<String>>(mut self, v: T) -> Self {
        self.statement = v.into();
        self
    }

    /// Sets the value of [default_database][StartQueryRequest::default_database].
    pub fn set_default_database<T: Into<String>>(mut self, v: T) -> Self {
        self.default_database = v.into();
        self
    }

    /// Sets the value of [output_location][StartQueryRequest::output_location].
    pub fn set_output_location<T: Into<String>>(mut self, v: T) -> Self {
        self.output_location = v.into();
        self
    }
}

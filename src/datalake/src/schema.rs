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

//! The catalog table describing the sample dataset.

use serde::Serialize;

/// The source format for newline-delimited JSON data.
pub const NEWLINE_DELIMITED_JSON: &str = "NEWLINE_DELIMITED_JSON";

/// The type of a catalog column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Int,
}

impl ColumnType {
    /// The catalog-neutral type name, as used in `name:type` descriptors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
        }
    }

    /// The BigQuery standard SQL type for this column type.
    pub fn bigquery_type(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Int => "INT64",
        }
    }
}

/// A column descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new<T: Into<String>>(name: T, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.column_type.name())
    }
}

/// How the catalog manages the table data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum TableType {
    /// The data lives outside the catalog's own storage.
    #[default]
    #[serde(rename = "EXTERNAL_TABLE")]
    External,
}

/// A catalog table definition.
///
/// # Example
/// ```
/// use sports_data_lake::schema::TableSchema;
/// let table = TableSchema::nba_players("nba_players", "gs://my-bucket/raw-data/");
/// let columns: Vec<String> = table.columns.iter().map(|c| c.to_string()).collect();
/// assert_eq!(columns, ["player:string", "team:string", "points:int"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    /// The table name.
    pub name: String,
    /// The columns, in order.
    pub columns: Vec<Column>,
    /// The storage prefix holding the table data, e.g. `gs://bucket/raw-data/`.
    pub location: String,
    /// The table type.
    pub table_type: TableType,
    /// The format of the objects under `location`.
    pub source_format: String,
}

impl TableSchema {
    /// The table describing [SampleRecord][crate::dataset::SampleRecord] data
    /// stored under `location`.
    pub fn nba_players<N, L>(name: N, location: L) -> Self
    where
        N: Into<String>,
        L: Into<String>,
    {
        Self {
            name: name.into(),
            columns: vec![
                Column::new("player", ColumnType::String),
                Column::new("team", ColumnType::String),
                Column::new("points", ColumnType::Int),
            ],
            location: location.into(),
            table_type: TableType::External,
            source_format: NEWLINE_DELIMITED_JSON.to_string(),
        }
    }

    /// The source URIs for an external table, matching every object under
    /// the table location.
    pub fn source_uris(&self) -> Vec<String> {
        let prefix = self.location.trim_end_matches('/');
        vec![format!("{prefix}/*")]
    }
}

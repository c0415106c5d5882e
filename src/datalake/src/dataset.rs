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

//! The sample dataset uploaded to the data lake.
//!
//! The dataset is encoded as newline-delimited JSON, one record per line. That
//! is the format the query service expects for JSON external tables.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One row of the sample dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub player: String,
    pub team: String,
    pub points: u32,
}

impl SampleRecord {
    pub fn new<P, T>(player: P, team: T, points: u32) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        Self {
            player: player.into(),
            team: team.into(),
            points,
        }
    }
}

/// The records uploaded by the provisioner.
pub fn sample_records() -> Vec<SampleRecord> {
    vec![
        SampleRecord::new("LeBron James", "Lakers", 30),
        SampleRecord::new("Stephen Curry", "Warriors", 40),
    ]
}

/// Encodes `records` as newline-delimited JSON.
///
/// # Example
/// ```
/// use sports_data_lake::dataset::{SampleRecord, encode};
/// let body = encode(&[SampleRecord::new("A", "B", 1)])?;
/// assert_eq!(&body[..], br#"{"player":"A","team":"B","points":1}"#.as_slice());
/// # Ok::<(), sports_data_lake::Error>(())
/// ```
pub fn encode(records: &[SampleRecord]) -> Result<bytes::Bytes> {
    let lines = records
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::serialization)?;
    Ok(bytes::Bytes::from(lines.join("\n")))
}

/// Decodes newline-delimited JSON records, skipping blank lines.
pub fn decode(body: &[u8]) -> Result<Vec<SampleRecord>> {
    let text = std::str::from_utf8(body).map_err(Error::serialization)?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(Error::serialization))
        .collect()
}

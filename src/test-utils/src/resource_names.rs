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

//! Random names for the resources created by the integration tests.

use rand::{Rng, distr::Distribution};

/// A common prefix for bucket names.
///
/// Buckets left behind by failed test runs are easy to recognize and delete
/// by hand.
pub const BUCKET_PREFIX: &str = "sports-data-lake-test-";

/// A common prefix for dataset names. Dataset names cannot contain `-`.
pub const DATASET_PREFIX: &str = "sports_data_lake_test_";

const BUCKET_ID_LENGTH: usize = 63;
const DATASET_ID_LENGTH: usize = 48;

const LOWERCASE_ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random bucket id, with the [BUCKET_PREFIX].
pub fn random_bucket_id() -> String {
    let id = RandomChars::new(LOWERCASE_ALPHANUMERIC).sample(BUCKET_ID_LENGTH - BUCKET_PREFIX.len());
    format!("{BUCKET_PREFIX}{id}")
}

/// Generate a random dataset id, with the [DATASET_PREFIX].
pub fn random_dataset_id() -> String {
    let id =
        RandomChars::new(LOWERCASE_ALPHANUMERIC).sample(DATASET_ID_LENGTH - DATASET_PREFIX.len());
    format!("{DATASET_PREFIX}{id}")
}

/// Generate random characters from a provided list.
///
/// # Example
/// ```
/// use data_lake_test_utils::resource_names::RandomChars;
/// let got = RandomChars::new("abcde").sample(32);
/// assert_eq!(got.len(), 32);
/// ```
#[derive(Clone, Debug)]
pub struct RandomChars {
    chars: Vec<char>,
}

impl RandomChars {
    /// Initializes a new generator of random characters.
    pub fn new(chars: &str) -> Self {
        Self {
            chars: chars.chars().collect(),
        }
    }

    /// Create a string with `n` characters from the character set.
    pub fn sample(&self, n: usize) -> String {
        rand::rng().sample_iter(self).take(n).collect()
    }
}

impl Distribution<char> for RandomChars {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        let index = rng.random_range(0..self.chars.len());
        self.chars[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use pretty_assertions::assert_eq;

    #[test]
    fn bucket_id() -> anyhow::Result<()> {
        let got = random_bucket_id();
        assert_eq!(got.len(), BUCKET_ID_LENGTH, "{got}");
        let Some(suffix) = got.strip_prefix(BUCKET_PREFIX) else {
            bail!("{got} should start with {BUCKET_PREFIX}");
        };
        is_lowercase_alphanumeric(suffix)
    }

    #[test]
    fn dataset_id() -> anyhow::Result<()> {
        let got = random_dataset_id();
        assert_eq!(got.len(), DATASET_ID_LENGTH, "{got}");
        assert!(!got.contains('-'), "{got}");
        let Some(suffix) = got.strip_prefix(DATASET_PREFIX) else {
            bail!("{got} should start with {DATASET_PREFIX}");
        };
        is_lowercase_alphanumeric(suffix)
    }

    #[test]
    fn unique() {
        assert_ne!(random_bucket_id(), random_bucket_id());
    }

    #[test]
    fn chars() {
        let got = RandomChars::new("abcde").sample(64);
        assert!(
            !got.contains(|c| !("abcde".contains(c))),
            "{got:?} contains unexpected character"
        );
    }

    fn is_lowercase_alphanumeric(got: &str) -> anyhow::Result<()> {
        for (idx, c) in got.chars().enumerate() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() {
                bail!("character at {idx} ({c}) is not in expected character class in {got}");
            }
        }
        Ok(())
    }
}

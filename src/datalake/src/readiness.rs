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

//! Waits for a newly created bucket to become visible.
//!
//! Bucket creation is eventually consistent: requests that depend on the
//! bucket may fail for a short time after it is created. The provisioner
//! polls the bucket metadata, with a bounded number of attempts, before it
//! issues those requests.

use crate::stub::ObjectStorage;
use std::time::Duration;

const DEFAULT_ATTEMPTS: u32 = 10;
const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Controls how long the provisioner waits for a bucket.
///
/// # Example
/// ```
/// use sports_data_lake::readiness::ReadinessPolicy;
/// use std::time::Duration;
/// let policy = ReadinessPolicy::default()
///     .with_attempts(5)
///     .with_interval(Duration::from_millis(500));
/// assert_eq!(policy.attempts(), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadinessPolicy {
    attempts: u32,
    interval: Duration,
}

impl ReadinessPolicy {
    /// Creates a new policy.
    ///
    /// The policy makes at least one attempt, even if `attempts` is zero.
    pub fn new(attempts: u32, interval: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            interval,
        }
    }

    /// Changes the maximum number of attempts.
    pub fn with_attempts(self, attempts: u32) -> Self {
        Self::new(attempts, self.interval)
    }

    /// Changes the delay between attempts.
    pub fn with_interval(self, interval: Duration) -> Self {
        Self::new(self.attempts, interval)
    }

    /// The maximum number of attempts.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The delay between attempts.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS, DEFAULT_INTERVAL)
    }
}

/// The result of waiting for a bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// The bucket was visible after the given number of attempts.
    Ready { attempts: u32 },
    /// The bucket was not visible after the given number of attempts.
    TimedOut { attempts: u32 },
}

impl Readiness {
    /// Returns true if the bucket became visible.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Polls `storage` until `bucket` exists, or the policy is exhausted.
///
/// Lookup errors count as "not ready yet". They are common while the bucket
/// metadata propagates.
pub async fn wait_for_bucket<S>(storage: &S, bucket: &str, policy: &ReadinessPolicy) -> Readiness
where
    S: ObjectStorage,
{
    let attempts = policy.attempts();
    for attempt in 1..=attempts {
        match storage.bucket_exists(bucket.to_string()).await {
            Ok(true) => {
                tracing::debug!("bucket {bucket} is ready after {attempt} attempt(s)");
                return Readiness::Ready { attempts: attempt };
            }
            Ok(false) => {
                tracing::debug!("bucket {bucket} is not visible yet, attempt={attempt}");
            }
            Err(e) => {
                tracing::debug!("cannot get bucket {bucket}, attempt={attempt}: {e}");
            }
        }
        if attempt < attempts {
            tokio::time::sleep(policy.interval()).await;
        }
    }
    Readiness::TimedOut { attempts }
}

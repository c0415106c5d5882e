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

//! Reads the integration test configuration from the environment.

use anyhow::Result;

const PROJECT_VAR: &str = "GOOGLE_CLOUD_PROJECT";
const REGION_VAR: &str = "SPORTS_DATA_LAKE_TEST_REGION";
const DEFAULT_REGION: &str = "us-central1";

/// Returns the project id used for the integration tests.
pub fn project_id() -> Result<String> {
    std::env::var(PROJECT_VAR).map_err(anyhow::Error::from)
}

/// Returns the region used for the integration tests.
///
/// The default is a single region, so the tests exercise the explicit bucket
/// location.
pub fn region_id() -> String {
    std::env::var(REGION_VAR).unwrap_or_else(|_| DEFAULT_REGION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoped_env::ScopedEnv;
    use serial_test::serial;
    use test_case::test_case;

    #[serial]
    #[test]
    fn project() {
        let _env = ScopedEnv::remove(PROJECT_VAR);
        let got = project_id();
        assert!(got.is_err(), "{got:?}");
        let _env = ScopedEnv::set(PROJECT_VAR, "abc");
        let got = project_id();
        assert!(got.as_ref().is_ok_and(|v| v == "abc"), "{got:?}");
    }

    #[test_case(None, DEFAULT_REGION; "default")]
    #[test_case(Some("europe-west1"), "europe-west1"; "override")]
    #[serial]
    fn region(value: Option<&str>, want: &str) {
        let _env = match value {
            Some(v) => ScopedEnv::set(REGION_VAR, v),
            None => ScopedEnv::remove(REGION_VAR),
        };
        assert_eq!(region_id(), want);
    }
}

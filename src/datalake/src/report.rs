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

//! The outcome of a provisioning run.

use crate::Error;
use std::time::Duration;

/// The provisioning steps, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    CreateStorageBucket,
    CreateCatalogDatabase,
    UploadSampleDataset,
    CreateCatalogTable,
    ConfigureQueryOutput,
}

impl Step {
    /// Every step, in the order the provisioner runs them.
    pub const ALL: [Step; 5] = [
        Step::CreateStorageBucket,
        Step::CreateCatalogDatabase,
        Step::UploadSampleDataset,
        Step::CreateCatalogTable,
        Step::ConfigureQueryOutput,
    ];

    /// A short name, used in logs and in the report.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateStorageBucket => "create_storage_bucket",
            Self::CreateCatalogDatabase => "create_catalog_database",
            Self::UploadSampleDataset => "upload_sample_dataset",
            Self::CreateCatalogTable => "create_catalog_table",
            Self::ConfigureQueryOutput => "configure_query_output",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The outcome of a single step.
#[derive(Debug)]
pub enum Outcome {
    /// The step created (or overwrote) its resource.
    Created,
    /// The resource existed before the step ran.
    AlreadyExists,
    /// The step failed.
    Failed(Error),
    /// The step did not run because an earlier step failed.
    Skipped,
}

impl Outcome {
    /// Returns true unless the step failed or was skipped.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Created | Self::AlreadyExists)
    }

    /// The error, if the step failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Creating a resource that already exists is not a failure.
impl<T> From<crate::Result<T>> for Outcome {
    fn from(value: crate::Result<T>) -> Self {
        match value {
            Ok(_) => Self::Created,
            Err(e) if e.is_already_exists() => Self::AlreadyExists,
            Err(e) => Self::Failed(e),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => f.write_str("created"),
            Self::AlreadyExists => f.write_str("already exists"),
            Self::Failed(e) => write!(f, "failed: {e}"),
            Self::Skipped => f.write_str("skipped"),
        }
    }
}

/// The outcome of one step, with its elapsed time.
#[derive(Debug)]
pub struct StepReport {
    pub step: Step,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// The per-step outcomes of a provisioning run, in execution order.
///
/// Partial completion, e.g. the bucket was created but the table was not, is
/// visible here: [is_complete][ProvisionReport::is_complete] is false and
/// [failures][ProvisionReport::failures] lists the failed steps.
#[derive(Debug, Default)]
pub struct ProvisionReport {
    steps: Vec<StepReport>,
}

impl ProvisionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of a step.
    pub fn push(&mut self, step: Step, outcome: Outcome, elapsed: Duration) {
        self.steps.push(StepReport {
            step,
            outcome,
            elapsed,
        });
    }

    /// The recorded steps, in execution order.
    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    /// The outcome recorded for `step`, if any.
    pub fn outcome(&self, step: Step) -> Option<&Outcome> {
        self.steps
            .iter()
            .find(|s| s.step == step)
            .map(|s| &s.outcome)
    }

    /// Returns true if every step ran and succeeded.
    pub fn is_complete(&self) -> bool {
        self.steps.len() == Step::ALL.len() && self.steps.iter().all(|s| s.outcome.is_success())
    }

    /// The steps that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (Step, &Error)> {
        self.steps
            .iter()
            .filter_map(|s| s.outcome.error().map(|e| (s.step, e)))
    }

    /// The total time spent in the recorded steps.
    pub fn elapsed(&self) -> Duration {
        self.steps.iter().map(|s| s.elapsed).sum()
    }
}

impl std::fmt::Display for ProvisionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for s in &self.steps {
            writeln!(
                f,
                "{:<24} {} ({} ms)",
                s.step.name(),
                s.outcome,
                s.elapsed.as_millis()
            )?;
        }
        let failures = self.failures().count();
        if self.is_complete() {
            write!(f, "data lake provisioned")
        } else {
            write!(f, "data lake partially provisioned, {failures} step(s) failed")
        }
    }
}

#![allow(async_fn_in_trait)]

use anyhow::Result;

use crate::status::{JobStatus, LampGroup};

/// Access to the CI system owning the monitored jobs. The evaluator only
/// sees this interface, never a concrete server client.
pub trait JobStatusAccess {
    async fn job_statuses(&self, view: &str) -> Result<Vec<JobStatus>>;
}

/// Access to the operator-maintained lamp group configuration. Re-read on
/// every tick, edits take effect on the next update.
pub trait GroupConfigAccess {
    async fn lamp_groups(&self) -> Result<Vec<LampGroup>>;
}

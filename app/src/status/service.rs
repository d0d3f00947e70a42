use crate::outlet::{Outlet, OutletChannel, OutletState};
use crate::port::JobStatusAccess;
use crate::t;

use super::{AggregateDecision, LampGroup, is_in_restricted_hours};

/// Turns CI job state into outlet commands, one group at a time. Holds no
/// state between ticks, every evaluation starts from scratch.
pub struct StatusUpdateService<C, J> {
    channel: C,
    jobs: J,
}

impl<C, J> StatusUpdateService<C, J>
where
    C: OutletChannel,
    J: JobStatusAccess,
{
    pub fn new(channel: C, jobs: J) -> Self {
        Self { channel, jobs }
    }

    /// One tick. Groups are processed sequentially; a failing group never
    /// stops the others.
    pub async fn update_all(&self, groups: &[LampGroup]) {
        tracing::debug!("Updating status of all lamp groups");

        for group in groups {
            if let Err(e) = self.update_group(group).await {
                tracing::error!("Error updating lamp group '{}': {:#}", group.view, e);
            }
        }

        tracing::debug!("Done updating status of all lamp groups");
    }

    #[tracing::instrument(skip(self, group), fields(group = %group.view))]
    async fn update_group(&self, group: &LampGroup) -> anyhow::Result<()> {
        let Some(endpoint) = &group.outlet else {
            tracing::debug!("Lamp group has no outlet configuration, skipping");
            return Ok(());
        };

        if !endpoint.is_complete() {
            tracing::debug!("Outlet configuration is incomplete, skipping");
            return Ok(());
        }

        if group.disabled {
            tracing::debug!("Lamp group is temporarily disabled, switching all lights off");
            return self.channel.switch_all_off(endpoint).await;
        }

        if group.restricted_hours && is_in_restricted_hours(&t!(now)) {
            tracing::debug!("Within restricted operating hours, switching all lights off");
            return self.channel.switch_all_off(endpoint).await;
        }

        let jobs = self.jobs.job_statuses(&group.view).await?;

        for job in &jobs {
            tracing::debug!(
                "Job '{}' is {}{}",
                job.name,
                job.health,
                if job.building { " (building)" } else { "" }
            );
        }

        let decision = AggregateDecision::from_jobs(&jobs);

        self.channel
            .switch(endpoint, Outlet::Red, OutletState::from_bool(decision.red_on))
            .await?;
        self.channel
            .switch(endpoint, Outlet::Yellow, OutletState::from_bool(decision.yellow_on))
            .await?;
        self.channel
            .switch(endpoint, Outlet::Green, OutletState::from_bool(decision.green_on))
            .await?;

        Ok(())
    }
}

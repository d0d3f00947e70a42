mod domain;
mod service;

pub use domain::*;
pub use service::StatusUpdateService;

use crate::core::time::Duration;
use crate::outlet::OutletChannel;
use crate::port::{GroupConfigAccess, JobStatusAccess};

/// Drives the status update on a fixed cadence. The period is read once at
/// startup, changing it requires a restart. Ticks are serialized, the next
/// tick is only taken after the previous one finished.
pub struct StatusUpdateRunner<C, J, G> {
    service: StatusUpdateService<C, J>,
    config: G,
    period: Duration,
}

impl<C, J, G> StatusUpdateRunner<C, J, G>
where
    C: OutletChannel,
    J: JobStatusAccess,
    G: GroupConfigAccess,
{
    pub fn new(channel: C, jobs: J, config: G, period: Duration) -> Self {
        Self {
            service: StatusUpdateService::new(channel, jobs),
            config,
            period,
        }
    }

    pub async fn run(self) {
        let mut timer = tokio::time::interval(self.period.into_std());

        loop {
            timer.tick().await;

            match self.config.lamp_groups().await {
                Ok(groups) => self.service.update_all(&groups).await,
                Err(e) => tracing::error!("Error reading lamp group configuration: {:#}", e),
            }
        }
    }
}

#![allow(async_fn_in_trait)]

use anyhow::Context as _;
use tokio::net::UdpSocket;

use crate::core::time::Duration;
use crate::t;

use super::{Outlet, OutletEndpoint, OutletState, switch_datagram};

/// Pause after every command. The relay needs time to actuate, fast
/// switchings would otherwise be missed or coalesced by the box.
fn settle_delay() -> Duration {
    t!(500 millis)
}

fn self_test_step_delay() -> Duration {
    t!(2 seconds)
}

fn self_test_reset_delay() -> Duration {
    t!(1 seconds)
}

pub trait OutletChannel {
    /// Sets one outlet to a new state. Transport problems are contained
    /// here; only an unusable endpoint configuration surfaces as an error.
    async fn switch(
        &self,
        endpoint: &OutletEndpoint,
        outlet: Outlet,
        state: OutletState,
    ) -> anyhow::Result<()>;

    /// Switches all outlets off, in ascending outlet-number order.
    async fn switch_all_off(&self, endpoint: &OutletEndpoint) -> anyhow::Result<()> {
        for outlet in Outlet::all() {
            self.switch(endpoint, outlet, OutletState::Off).await?;
        }

        Ok(())
    }

    /// Diagnostic sequence: all off, then each outlet on one-by-one (earlier
    /// outlets stay on), then all off again.
    async fn run_self_test(&self, endpoint: &OutletEndpoint) -> anyhow::Result<()> {
        self.switch_all_off(endpoint).await?;
        tokio::time::sleep(self_test_reset_delay().into_std()).await;

        for outlet in Outlet::all() {
            self.switch(endpoint, outlet, OutletState::On).await?;
            tokio::time::sleep(self_test_step_delay().into_std()).await;
        }

        self.switch_all_off(endpoint).await?;
        tokio::time::sleep(self_test_reset_delay().into_std()).await;

        Ok(())
    }
}

/// Talks to a NET-PwrCtrl power-control box. The protocol is one-way UDP:
/// no session, no acknowledgment, at-most-once delivery. A fresh socket is
/// opened per datagram and dropped right after.
#[derive(Debug, Clone, Copy, Default)]
pub struct UdpOutletChannel;

impl OutletChannel for UdpOutletChannel {
    #[tracing::instrument(skip(self, endpoint), fields(host = %endpoint.host))]
    async fn switch(
        &self,
        endpoint: &OutletEndpoint,
        outlet: Outlet,
        state: OutletState,
    ) -> anyhow::Result<()> {
        let port: u16 = endpoint
            .port
            .trim()
            .parse()
            .with_context(|| format!("Invalid outlet port '{}'", endpoint.port))?;

        let datagram = switch_datagram(outlet, state, endpoint.secret.trim());

        tracing::debug!("Switching outlet no. {} to {} using UDP", outlet.number(), state);

        if let Err(e) = send_datagram(endpoint.host.trim(), port, &datagram).await {
            tracing::warn!("Could not switch outlet via UDP: {:#}", e);
        }

        tokio::time::sleep(settle_delay().into_std()).await;

        Ok(())
    }
}

async fn send_datagram(host: &str, port: u16, datagram: &[u8]) -> anyhow::Result<()> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.send_to(datagram, (host, port)).await?;

    Ok(())
}

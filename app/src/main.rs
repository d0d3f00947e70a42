use settings::Settings;

use crate::adapter::jenkins::JenkinsClient;
use crate::core::time::Duration;
use crate::outlet::UdpOutletChannel;
use crate::status::StatusUpdateRunner;

mod adapter;
mod core;
mod outlet;
pub mod port;
mod settings;
mod status;

#[tokio::main(flavor = "multi_thread")]
pub async fn main() {
    let settings = Settings::new().expect("Error reading configuration");

    settings
        .monitoring
        .init()
        .expect("Error initializing monitoring");

    let jenkins_client =
        JenkinsClient::new(&settings.jenkins).expect("Error initializing Jenkins client");

    let status_runner = StatusUpdateRunner::new(
        UdpOutletChannel,
        jenkins_client,
        settings::ConfiguredGroups(settings.groups),
        Duration::seconds(settings.scheduler.period_seconds as i64),
    );

    let http_server_exec = async move {
        settings
            .http_server
            .run_server(adapter::api::new_routes)
            .await
            .expect("HTTP server execution failed");
    };

    tracing::info!("Starting main loop");

    tokio::select!(
        _ = status_runner.run() => {},
        _ = http_server_exec => {},
    );
}

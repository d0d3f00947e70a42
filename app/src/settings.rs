use config::{Config, ConfigError, Environment, File};
use infrastructure::{HttpServerConfig, MonitoringConfig};
use serde::Deserialize;

use crate::adapter::jenkins::JenkinsSettings;
use crate::status::LampGroup;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub monitoring: MonitoringConfig,
    pub http_server: HttpServerConfig,
    pub jenkins: JenkinsSettings,
    pub scheduler: SchedulerSettings,
    #[serde(default)]
    pub groups: Vec<LampGroup>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerSettings {
    #[serde(default = "default_period_seconds")]
    pub period_seconds: u64,
}

fn default_period_seconds() -> u64 {
    60
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config.toml"))
            .add_source(Environment::default().separator("_").list_separator(","));

        let s = builder.build()?;
        s.try_deserialize()
    }
}

/// Lamp groups loaded from the configuration file. The file is read at
/// startup, so re-reads per tick yield the same snapshot until a restart.
pub struct ConfiguredGroups(pub Vec<LampGroup>);

impl crate::port::GroupConfigAccess for ConfiguredGroups {
    async fn lamp_groups(&self) -> anyhow::Result<Vec<LampGroup>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_settings_decoding() {
        let raw = r#"
            [[groups]]
            view = "main"
            restricted_hours = true

            [groups.outlet]
            host = "10.0.0.42"
            port = "75"
            secret = "anel"

            [[groups]]
            view = "experimental"
            disabled = true
        "#;

        #[derive(Debug, Deserialize)]
        struct GroupsOnly {
            groups: Vec<LampGroup>,
        }

        let settings: GroupsOnly = toml_decode(raw);

        assert_eq!(settings.groups.len(), 2);

        let first = &settings.groups[0];
        assert_eq!(first.view, "main");
        assert!(first.restricted_hours);
        assert!(!first.disabled);
        assert_eq!(first.outlet.as_ref().unwrap().host, "10.0.0.42");
        assert_eq!(first.outlet.as_ref().unwrap().port, "75");

        let second = &settings.groups[1];
        assert!(second.disabled);
        assert!(second.outlet.is_none());
    }

    fn toml_decode<T: serde::de::DeserializeOwned>(raw: &str) -> T {
        Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}

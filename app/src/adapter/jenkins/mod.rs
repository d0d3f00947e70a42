use anyhow::Context as _;
use infrastructure::HttpClientConfig;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;

use crate::port::JobStatusAccess;
use crate::status::{JobHealth, JobStatus};

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct JenkinsSettings {
    pub url: String,
    pub user: String,
    pub token: String,
}

/// Reads job states from the Jenkins view API, one request per view:
/// `GET /view/<name>/api/json?tree=jobs[name,color]`.
pub struct JenkinsClient {
    client: ClientWithMiddleware,
    base_url: reqwest::Url,
    user: String,
    token: String,
}

impl JenkinsClient {
    pub fn new(settings: &JenkinsSettings) -> anyhow::Result<Self> {
        let client = HttpClientConfig::new(Some(DEFAULT_TIMEOUT_SECONDS)).new_tracing_client()?;
        let base_url = reqwest::Url::parse(settings.url.trim())
            .with_context(|| format!("Invalid Jenkins URL '{}'", settings.url))?;

        Ok(Self {
            client,
            base_url,
            user: settings.user.clone(),
            token: settings.token.clone(),
        })
    }

    fn view_url(&self, view: &str) -> anyhow::Result<reqwest::Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Jenkins URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(["view", view, "api", "json"]);
        url.set_query(Some("tree=jobs[name,color]"));

        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct ViewResponse {
    #[serde(default)]
    jobs: Vec<ViewJob>,
}

#[derive(Debug, Deserialize)]
struct ViewJob {
    name: String,
    //folders and other non-job items carry no color
    color: Option<String>,
}

impl JobStatusAccess for JenkinsClient {
    #[tracing::instrument(skip(self))]
    async fn job_statuses(&self, view: &str) -> anyhow::Result<Vec<JobStatus>> {
        let url = self.view_url(view)?;

        let response = self
            .client
            .get(url)
            .basic_auth(&self.user, Some(&self.token))
            .send()
            .await?
            .error_for_status()?;

        let view_response: ViewResponse = response
            .json()
            .await
            .with_context(|| format!("Error reading job status of view '{}'", view))?;

        Ok(view_response
            .jobs
            .into_iter()
            .filter_map(|ViewJob { name, color }| color.map(|color| job_status(name, &color)))
            .collect())
    }
}

/// Maps a Jenkins ball color to health and building state. Red and yellow
/// balls are troubled, anything else counts as ok; the `_anime` suffix marks
/// a running build.
fn job_status(name: String, color: &str) -> JobStatus {
    let health = if color.starts_with("red") {
        JobHealth::Failing
    } else if color.starts_with("yellow") {
        JobHealth::Warning
    } else {
        JobHealth::Ok
    };

    JobStatus {
        name,
        health,
        building: color.ends_with("_anime"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health_of(color: &str) -> JobHealth {
        job_status("job".to_string(), color).health
    }

    #[test]
    fn test_color_to_health_mapping() {
        assert_eq!(health_of("blue"), JobHealth::Ok);
        assert_eq!(health_of("blue_anime"), JobHealth::Ok);
        assert_eq!(health_of("yellow"), JobHealth::Warning);
        assert_eq!(health_of("yellow_anime"), JobHealth::Warning);
        assert_eq!(health_of("red"), JobHealth::Failing);
        assert_eq!(health_of("red_anime"), JobHealth::Failing);
        assert_eq!(health_of("disabled"), JobHealth::Ok);
        assert_eq!(health_of("notbuilt"), JobHealth::Ok);
        assert_eq!(health_of("aborted"), JobHealth::Ok);
        assert_eq!(health_of("grey"), JobHealth::Ok);
    }

    #[test]
    fn test_anime_suffix_marks_building() {
        assert!(job_status("job".to_string(), "blue_anime").building);
        assert!(job_status("job".to_string(), "red_anime").building);
        assert!(!job_status("job".to_string(), "red").building);
    }

    #[test]
    fn test_view_response_decoding() {
        let payload = r#"{
            "_class": "hudson.model.ListView",
            "jobs": [
                {"_class": "hudson.model.FreeStyleProject", "name": "backend", "color": "blue"},
                {"_class": "hudson.model.FreeStyleProject", "name": "frontend", "color": "red_anime"},
                {"_class": "com.cloudbees.hudson.plugins.folder.Folder", "name": "archive"}
            ]
        }"#;

        let response: ViewResponse = serde_json::from_str(payload).unwrap();
        let statuses: Vec<JobStatus> = response
            .jobs
            .into_iter()
            .filter_map(|ViewJob { name, color }| color.map(|color| job_status(name, &color)))
            .collect();

        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].name, "backend");
        assert_eq!(statuses[0].health, JobHealth::Ok);
        assert_eq!(statuses[1].name, "frontend");
        assert_eq!(statuses[1].health, JobHealth::Failing);
        assert!(statuses[1].building);
    }

    #[test]
    fn test_view_url_encodes_view_name() {
        let client = JenkinsClient::new(&JenkinsSettings {
            url: "https://ci.example.com/".to_string(),
            user: "bot".to_string(),
            token: "token".to_string(),
        })
        .unwrap();

        let url = client.view_url("My View").unwrap();

        assert_eq!(
            url.as_str(),
            "https://ci.example.com/view/My%20View/api/json?tree=jobs[name,color]"
        );
    }
}

//! REST client for the project store.
//!
//! The store exposes projects under `{rest_url}/projects`; each project's
//! object list lives at `/projects/{uid}/objects` and is read with GET and
//! replaced wholesale with PUT.

use frames::{ObjectInfo, ObjectList, ProjectInfo};
use reqwest::Client;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{method} {url} returned HTTP {status}")]
    Status { method: &'static str, url: String, status: u16 },
}

/// Thin typed wrapper over the store's endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { http: Client::new(), base_url: base_url.trim_end_matches('/').to_owned() }
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectInfo>, ApiError> {
        let url = projects_url(&self.base_url);
        let response = self.http.get(&url).send().await?;
        let response = check_status("GET", url, response)?;
        Ok(response.json().await?)
    }

    pub async fn create_project(&self) -> Result<ProjectInfo, ApiError> {
        let url = projects_url(&self.base_url);
        let response = self.http.post(&url).send().await?;
        let response = check_status("POST", url, response)?;
        Ok(response.json().await?)
    }

    pub async fn fetch_objects(&self, project: &str) -> Result<Vec<ObjectInfo>, ApiError> {
        let url = objects_url(&self.base_url, project);
        let response = self.http.get(&url).send().await?;
        let response = check_status("GET", url, response)?;
        let list: ObjectList = response.json().await?;
        Ok(list.objects)
    }

    pub async fn save_objects(&self, project: &str, objects: Vec<ObjectInfo>) -> Result<(), ApiError> {
        let url = objects_url(&self.base_url, project);
        let body = ObjectList { objects };
        let response = self.http.put(&url).json(&body).send().await?;
        check_status("PUT", url, response)?;
        Ok(())
    }
}

fn check_status(method: &'static str, url: String, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status { method, url, status: status.as_u16() });
    }
    Ok(response)
}

#[must_use]
pub fn projects_url(base_url: &str) -> String {
    format!("{}/projects", base_url.trim_end_matches('/'))
}

#[must_use]
pub fn objects_url(base_url: &str, project: &str) -> String {
    format!("{}/projects/{project}/objects", base_url.trim_end_matches('/'))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

// src/client/rest.rs

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::client::SurveyApi;
use crate::config::Config;
use crate::domain::Survey;
use crate::errors::ClientError;

const COLLECTION_PATH: &str = "api/surveys";

/// Talks to `{api_url}/api/surveys` over JSON.
#[derive(Debug, Clone)]
pub struct SurveyClient {
    client: Client,
    endpoint: Url,
}

impl SurveyClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            endpoint: collection_url(&config.api_url)?,
        })
    }

    /// Collection URL every request is built from.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn item_url(&self, id: i64) -> Result<Url, ClientError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.endpoint.to_string()))?
            .push(&id.to_string());
        Ok(url)
    }
}

/// `base` may or may not end in a slash, and may carry a path prefix.
fn collection_url(base: &Url) -> Result<Url, ClientError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(COLLECTION_PATH)
        .map_err(|e| ClientError::InvalidUrl(format!("{base}: {e}")))
}

/// Turn a non-2xx answer into an error; 404 on a single resource is `NotFound`.
async fn check(resp: Response, id: Option<i64>) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(ClientError::NotFound(id));
        }
    }

    let message = resp.text().await.unwrap_or_else(|_| "(no body)".to_string());
    warn!(status = status.as_u16(), %message, "survey backend rejected request");
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl SurveyApi for SurveyClient {
    async fn create(&self, survey: &Survey) -> Result<Survey, ClientError> {
        debug!(url = %self.endpoint, "POST survey");
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&survey.without_id())
            .send()
            .await?;

        let created: Survey = decode(check(resp, None).await?).await?;
        info!(id = ?created.id, "survey created");
        Ok(created)
    }

    async fn list_all(&self) -> Result<Vec<Survey>, ClientError> {
        debug!(url = %self.endpoint, "GET surveys");
        let resp = self.client.get(self.endpoint.clone()).send().await?;

        let surveys: Vec<Survey> = decode(check(resp, None).await?).await?;
        debug!(count = surveys.len(), "surveys listed");
        Ok(surveys)
    }

    async fn get_by_id(&self, id: i64) -> Result<Survey, ClientError> {
        let url = self.item_url(id)?;
        debug!(%url, "GET survey");
        let resp = self.client.get(url).send().await?;

        decode(check(resp, Some(id)).await?).await
    }

    async fn update(&self, id: i64, survey: &Survey) -> Result<Survey, ClientError> {
        let url = self.item_url(id)?;
        debug!(%url, "PUT survey");
        let body = Survey {
            id: Some(id),
            ..survey.clone()
        };
        let resp = self.client.put(url).json(&body).send().await?;

        let updated = decode(check(resp, Some(id)).await?).await?;
        info!(id, "survey updated");
        Ok(updated)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ClientError> {
        let url = self.item_url(id)?;
        debug!(%url, "DELETE survey");
        let resp = self.client.delete(url).send().await?;

        check(resp, Some(id)).await?;
        info!(id, "survey deleted");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), ClientError> {
        debug!(url = %self.endpoint, "DELETE surveys");
        let resp = self.client.delete(self.endpoint.clone()).send().await?;

        check(resp, None).await?;
        info!("all surveys deleted");
        Ok(())
    }
}

use crate::domain::ports::{ConfigProvider, RawResponse, ScheduleBackend};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    process_path: String,
    stored_path: String,
    plan_path: String,
}

impl HttpBackend {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            process_path: config.process_path().to_string(),
            stored_path: config.stored_path().to_string(),
            plan_path: config.plan_path().to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn into_raw(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl ScheduleBackend for HttpBackend {
    async fn process_timetable(&self, url: &str) -> Result<RawResponse> {
        let endpoint = self.url(&self.process_path);
        tracing::debug!("POST {} (new_url={})", endpoint, url);

        let response = self
            .client
            .post(&endpoint)
            .form(&[("new_url", url)])
            .send()
            .await?;

        tracing::debug!("process_timetable response status: {}", response.status());
        Self::into_raw(response).await
    }

    async fn load_stored_timetable(&self) -> Result<RawResponse> {
        let endpoint = self.url(&self.stored_path);
        tracing::debug!("GET {}", endpoint);

        let response = self.client.get(&endpoint).send().await?;

        tracing::debug!("load_stored_timetable response status: {}", response.status());
        Self::into_raw(response).await
    }

    async fn submit_plan(&self, fields: &[(String, String)]) -> Result<RawResponse> {
        let endpoint = self.url(&self.plan_path);
        tracing::debug!("POST {} with {} form fields", endpoint, fields.len());

        let response = self.client.post(&endpoint).form(fields).send().await?;

        tracing::debug!("plan response status: {}", response.status());
        Self::into_raw(response).await
    }
}

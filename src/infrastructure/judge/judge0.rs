//! Judge0 client over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};

use super::client::{JudgeClient, JudgeError, Submission, SubmissionRecord, SubmissionToken};
use crate::config::JudgeSettings;

/// Query parameters sent with every call: plain-text payloads, all fields.
const QUERY: [(&str, &str); 2] = [("base64_encoded", "false"), ("fields", "*")];

/// RapidAPI-authenticated Judge0 client.
#[derive(Debug, Clone)]
pub struct Judge0Client {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    host: String,
}

impl Judge0Client {
    pub fn new(settings: &JudgeSettings, api_key: &str) -> Result<Self, JudgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.endpoint().to_string(),
            api_key: api_key.to_string(),
            host: settings.host.clone(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .query(&QUERY)
    }
}

fn ensure_success(response: Response) -> Result<Response, JudgeError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(JudgeError::Upstream(status.as_u16()))
    }
}

#[async_trait]
impl JudgeClient for Judge0Client {
    async fn submit(&self, submission: &Submission) -> Result<SubmissionToken, JudgeError> {
        let url = format!("{}/submissions", self.base_url);
        let response = self
            .authorized(self.client.post(url))
            .json(submission)
            .send()
            .await?;

        Ok(ensure_success(response)?.json().await?)
    }

    async fn fetch(&self, token: &SubmissionToken) -> Result<SubmissionRecord, JudgeError> {
        let url = format!("{}/submissions/{}", self.base_url, token.token);
        let response = self.authorized(self.client.get(url)).send().await?;

        Ok(ensure_success(response)?.json().await?)
    }
}

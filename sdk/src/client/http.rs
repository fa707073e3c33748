//! `reqwest` transport for the FAN Courier API.

use reqwest::multipart::{Form, Part};

use super::decode::decode_reply;
use super::Transport;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::FILE_FIELD;

/// Uploads CSV bodies as multipart forms with the account credentials.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn form(&self, csv: String) -> ApiResult<Form> {
        let file = Part::bytes(csv.into_bytes())
            .file_name(format!("{}.csv", FILE_FIELD))
            .mime_str("text/csv")?;

        Ok(Form::new()
            .text("username", self.config.username.clone())
            .text("user_pass", self.config.password.clone())
            .text("client_id", self.config.client_id.clone())
            .part(FILE_FIELD, file))
    }
}

impl Transport for HttpTransport {
    async fn submit(&self, path: &str, csv: String) -> ApiResult<String> {
        let url = self.config.endpoint_url(path);
        tracing::info!(%url, bytes = csv.len(), "Uploading CSV");

        let response = self
            .http
            .post(&url)
            .multipart(self.form(csv)?)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let reply = decode_reply(&bytes);
        tracing::info!(status = status.as_u16(), encoding = reply.encoding, bytes = bytes.len(), "API replied");

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: reply.text,
            });
        }

        Ok(reply.text)
    }
}

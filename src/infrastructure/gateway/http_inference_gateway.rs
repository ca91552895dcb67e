use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use serde_json::Value;

use crate::application::ports::{GatewayError, InferenceGateway};
use crate::domain::{ModelTag, UploadedFile};
use crate::presentation::config::GatewaySettings;

const DEFAULT_MIME: &str = "application/octet-stream";

/// Multipart HTTP client for the hosted model endpoint.
///
/// Built once at startup and shared; the underlying `reqwest::Client` keeps
/// its own connection pool.
pub struct HttpInferenceGateway {
    client: reqwest::Client,
    base_url: String,
    predict_url: String,
    files_field: String,
    api_key: Option<String>,
}

impl HttpInferenceGateway {
    pub fn connect(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        let base = reqwest::Url::parse(&settings.base_url)
            .map_err(|e| GatewayError::Configuration(format!("base_url: {}", e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        let base_url = base.as_str().trim_end_matches('/').to_string();
        let predict_url = format!(
            "{}/{}",
            base_url,
            settings.predict_path.trim_start_matches('/')
        );

        tracing::info!(predict_url = %predict_url, "Inference gateway configured");

        Ok(Self {
            client,
            base_url,
            predict_url,
            files_field: settings.files_field.clone(),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

fn file_part(file: &UploadedFile) -> multipart::Part {
    let part = || multipart::Part::bytes(file.bytes.to_vec()).file_name(file.original_name.clone());
    let mime = if file.mime_type.is_empty() {
        DEFAULT_MIME
    } else {
        file.mime_type.as_str()
    };
    part()
        .mime_str(mime)
        .or_else(|_| part().mime_str(DEFAULT_MIME))
        .unwrap_or_else(|_| part())
}

#[async_trait]
impl InferenceGateway for HttpInferenceGateway {
    async fn predict(
        &self,
        model: ModelTag,
        files: &[UploadedFile],
    ) -> Result<Value, GatewayError> {
        let form = files.iter().fold(
            multipart::Form::new().text("model", model.as_str()),
            |form, file| form.part(self.files_field.clone(), file_part(file)),
        );

        tracing::debug!(
            model = %model,
            files = files.len(),
            url = %self.predict_url,
            "Submitting batch to gateway"
        );

        let response = self
            .authorize(self.client.post(&self.predict_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(GatewayError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        tracing::info!(model = %model, "Gateway prediction received");
        Ok(value)
    }

    async fn warm_up(&self) -> Result<(), GatewayError> {
        let response = self
            .authorize(self.client.get(&self.base_url))
            .send()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Remote {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

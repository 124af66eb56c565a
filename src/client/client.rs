//! HTTP client for communicating with the form server
//!
//! Wraps a `reqwest::Client` bound to the configured server origin and maps
//! every endpoint of the form protocol onto a `FormBackend` method.

use super::error::ClientError;
use super::traits::FormBackend;
use crate::config::FormConfig;
use crate::form::{FieldSchema, FieldValueStore};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Client for the form server
pub struct HttpFormClient {
    /// The underlying HTTP client
    http: reqwest::Client,
    /// Server origin every endpoint is resolved against
    base: Url,
}

impl HttpFormClient {
    /// Create a new client from the configuration
    pub fn new(config: &FormConfig) -> Result<Self, ClientError> {
        let base = Url::parse(config.server_url())?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()?;

        Ok(Self { http, base })
    }

    /// The server origin
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve an endpoint below the base url, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `new` rejects cannot-be-a-base urls, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json(&self, url: Url) -> Result<serde_json::Value, ClientError> {
        tracing::debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }
}

/// Reject non-2xx responses and parse the body as JSON
async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status(status.as_u16()));
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl FormBackend for HttpFormClient {
    async fn fetch_schema(&self) -> Result<Vec<FieldSchema>, ClientError> {
        let body = self.get_json(self.endpoint(&["form"])).await?;
        let fields: Vec<FieldSchema> = serde_json::from_value(body)?;
        tracing::debug!("Loaded schema with {} fields", fields.len());
        Ok(fields)
    }

    async fn fetch_choices(&self, field_id: &str) -> Result<serde_json::Value, ClientError> {
        self.get_json(self.endpoint(&["choice", field_id])).await
    }

    async fn submit(&self, values: &FieldValueStore) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&["save"]);
        tracing::debug!("POST {url} ({} values)", values.len());
        // `json` also sets `Content-Type: application/json`
        let response = self.http.post(url).json(values).send().await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server_url: &str) -> Result<HttpFormClient, ClientError> {
        let config = FormConfig {
            server_url: Some(server_url.to_string()),
            ..Default::default()
        };
        HttpFormClient::new(&config)
    }

    #[test]
    fn test_endpoints_below_origin() {
        let client = client_for("https://forms.example.com").unwrap();
        assert_eq!(
            client.endpoint(&["form"]).as_str(),
            "https://forms.example.com/form"
        );
        assert_eq!(
            client.endpoint(&["choice", "color"]).as_str(),
            "https://forms.example.com/choice/color"
        );
    }

    #[test]
    fn test_endpoints_keep_base_path() {
        let client = client_for("http://localhost:8080/api/").unwrap();
        assert_eq!(
            client.endpoint(&["save"]).as_str(),
            "http://localhost:8080/api/save"
        );
    }

    #[test]
    fn test_field_id_is_percent_encoded() {
        let client = client_for("https://forms.example.com").unwrap();
        let url = client.endpoint(&["choice", "a b/c"]);
        assert_eq!(url.path(), "/choice/a%20b%2Fc");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(matches!(
            client_for("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_cannot_be_a_base_url_is_rejected() {
        assert!(matches!(
            client_for("mailto:forms@example.com"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_base_url_accessor() {
        let client = client_for("https://forms.example.com").unwrap();
        assert_eq!(client.base_url().host_str(), Some("forms.example.com"));
    }
}

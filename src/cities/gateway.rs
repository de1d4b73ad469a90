use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::cities::city::{City, NewCity};

/// Errors from the remote cities backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection, body, or decoding failure in the transport.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status} for {path}")]
    Status { status: StatusCode, path: String },

    /// The request payload could not be encoded.
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The sole boundary to the remote cities collection.
///
/// Production code talks REST through [`HttpCityGateway`]; tests substitute
/// an in-memory implementation.
#[async_trait]
pub trait CityGateway: Send + Sync {
    /// Fetch the full collection.
    async fn fetch_all(&self) -> Result<Vec<City>, GatewayError>;

    /// Fetch a single city by id.
    async fn fetch_one(&self, id: u64) -> Result<City, GatewayError>;

    /// Create a city; the backend echoes the created record.
    async fn create(&self, city: &NewCity) -> Result<City, GatewayError>;

    /// Delete a city by id. Success is signaled by response status only.
    async fn delete(&self, id: u64) -> Result<(), GatewayError>;
}

/// REST gateway over reqwest.
///
/// Routes: `GET /cities`, `GET /cities/{id}`, `POST /cities`,
/// `DELETE /cities/{id}`. No request timeouts are configured; whatever the
/// transport does is inherited.
pub struct HttpCityGateway {
    client: Client,
    base_url: String,
}

impl HttpCityGateway {
    /// Create a gateway rooted at `base_url`, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check_status(response: &reqwest::Response, path: &str) -> Result<(), GatewayError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(GatewayError::Status {
                status,
                path: path.to_string(),
            })
        }
    }
}

#[async_trait]
impl CityGateway for HttpCityGateway {
    async fn fetch_all(&self) -> Result<Vec<City>, GatewayError> {
        let path = "/cities";
        tracing::debug!(path, "fetching collection");

        let response = self.client.get(self.url(path)).send().await?;
        Self::check_status(&response, path)?;
        Ok(response.json().await?)
    }

    async fn fetch_one(&self, id: u64) -> Result<City, GatewayError> {
        let path = format!("/cities/{id}");
        tracing::debug!(path = %path, "fetching city");

        let response = self.client.get(self.url(&path)).send().await?;
        Self::check_status(&response, &path)?;
        Ok(response.json().await?)
    }

    async fn create(&self, city: &NewCity) -> Result<City, GatewayError> {
        let path = "/cities";
        tracing::debug!(path, name = %city.name, "creating city");

        // The payload is serialized explicitly and the content type declared,
        // rather than leaning on the client's json sugar.
        let body = serde_json::to_string(city)?;
        let response = self
            .client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        Self::check_status(&response, path)?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        let path = format!("/cities/{id}");
        tracing::debug!(path = %path, "deleting city");

        let response = self.client.delete(self.url(&path)).send().await?;
        Self::check_status(&response, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_normalized() {
        let gateway = HttpCityGateway::new("http://localhost:8000///");
        assert_eq!(gateway.url("/cities"), "http://localhost:8000/cities");
        assert_eq!(gateway.url("/cities/3"), "http://localhost:8000/cities/3");
    }

    #[test]
    fn status_error_is_human_readable() {
        let err = GatewayError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            path: "/cities".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("/cities"));
    }
}

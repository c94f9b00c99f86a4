//! USGS event service client.
//!
//! Issues a single GET per query and hands back the raw body. Callers that
//! only care about "data or no data" use [`QuakeClient::fetch`]; the failure
//! reason stays available through [`QuakeClient::try_fetch`].

use reqwest::{Client, StatusCode, Url};
use tracing::{debug, instrument, warn};

use crate::config::QuakeConfig;
use crate::errors::QuakeError;
use crate::models::{self, EarthquakeRecord};

/// Client for the USGS event query API.
#[derive(Debug, Clone)]
pub struct QuakeClient {
    client: Client,
}

impl QuakeClient {
    /// Create a client with the given timeouts and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &QuakeConfig) -> Result<Self, QuakeError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the body at `url` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`QuakeError::InvalidUrl`] without issuing a request if `url`
    /// does not parse, [`QuakeError::Status`] for any status other than 200,
    /// and [`QuakeError::Http`] for connect, timeout, or body read failures.
    #[instrument(skip(self))]
    pub async fn try_fetch(&self, url: &str) -> Result<String, QuakeError> {
        let url = Url::parse(url).map_err(|e| QuakeError::invalid_url(url, e))?;

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(QuakeError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("fetched {} bytes", body.len());
        Ok(body)
    }

    /// Fetch the body at `url`, yielding empty text on any failure.
    pub async fn fetch(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("problem retrieving earthquake results: {}", e);
                String::new()
            }
        }
    }

    /// Fetch and decode in one step. `None` means "nothing to display".
    pub async fn fetch_records(&self, url: &str) -> Option<Vec<EarthquakeRecord>> {
        let body = self.fetch(url).await;
        models::parse_records(&body)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const BODY: &str = r#"{"features":[{"properties":{"mag":2.7,"place":"5km N of Anza, CA","time":1700000000000,"tsunami":0,"url":"https://example.com/e/1"}}]}"#;

    fn test_client() -> QuakeClient {
        QuakeClient::new(&QuakeConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .mount(&server)
            .await;

        let body = test_client()
            .fetch(&format!("{}/query", server.uri()))
            .await;
        assert_eq!(body, BODY);
    }

    #[tokio::test]
    async fn test_non_200_yields_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let client = test_client();
        let url = format!("{}/query", server.uri());

        let err = client.try_fetch(&url).await.unwrap_err();
        assert!(matches!(err, QuakeError::Status { status: 503 }));
        assert_eq!(client.fetch(&url).await, "");
        assert_eq!(client.fetch_records(&url).await, None);
    }

    #[tokio::test]
    async fn test_only_200_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let err = test_client()
            .try_fetch(&server.uri())
            .await
            .unwrap_err();
        assert!(matches!(err, QuakeError::Status { status: 204 }));
    }

    #[tokio::test]
    async fn test_read_timeout_yields_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(BODY)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = QuakeConfig {
            read_timeout: Duration::from_millis(50),
            ..QuakeConfig::default()
        };
        let client = QuakeClient::new(&config).unwrap();

        let err = client.try_fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, QuakeError::Http(_)), "got {err:?}");
        assert_eq!(client.fetch_records(&server.uri()).await, None);
    }

    #[tokio::test]
    async fn test_invalid_url_issues_no_request() {
        let err = test_client().try_fetch("::not a url::").await.unwrap_err();
        assert!(matches!(err, QuakeError::InvalidUrl { .. }));
        assert_eq!(test_client().fetch("::not a url::").await, "");
    }

    #[tokio::test]
    async fn test_fetch_records_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .mount(&server)
            .await;

        let records = test_client()
            .fetch_records(&server.uri())
            .await
            .expect("expected records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, "5km N of Anza, CA");
    }
}

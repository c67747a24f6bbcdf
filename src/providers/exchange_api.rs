use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::core::rates::RateService;

/// Client for the companion exchange-rate service.
pub struct ExchangeApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent("fxc/0.1").build()?;
        Ok(ExchangeApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_rate_field(&self, url: &str, pair: &str) -> Result<f64> {
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}", e, pair))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}",
                response.status(),
                pair
            ));
        }

        let text = response.text().await?;

        let data: RateResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse response for {}: {}", pair, e))?;

        Ok(data.rate)
    }
}

// The service reports the result of both endpoints in a field named `rate`;
// on the amount endpoint it carries the converted amount. The wire contract
// is kept as-is for compatibility.
#[derive(Debug, Deserialize)]
struct RateResponse {
    rate: f64,
}

#[async_trait]
impl RateService for ExchangeApiClient {
    async fn fetch_rate(&self, from: &str, to: &str) -> Result<f64> {
        let pair = format!("{from}/{to}");
        let url = format!("{}/exchange?curr1={}&curr2={}", self.base_url, from, to);
        self.get_rate_field(&url, &pair).await
    }

    async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<f64> {
        let pair = format!("{from}/{to}");
        let url = format!(
            "{}/exchange/amount?curr1={}&curr2={}&amount={}",
            self.base_url, from, to, amount
        );
        self.get_rate_field(&url, &pair).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/exchange"))
            .and(query_param("curr1", "USD"))
            .and(query_param("curr2", "THB"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rate": 36.05}"#))
            .mount(&mock_server)
            .await;

        let client = ExchangeApiClient::new(&mock_server.uri()).unwrap();
        let rate = client
            .fetch_rate("USD", "THB")
            .await
            .expect("Failed to get rate");
        assert_eq!(rate, 36.05);
    }

    #[tokio::test]
    async fn test_successful_conversion() {
        let mock_server = MockServer::start().await;

        // The converted amount travels in the `rate` field.
        Mock::given(method("GET"))
            .and(path("/exchange/amount"))
            .and(query_param("curr1", "EUR"))
            .and(query_param("curr2", "GBP"))
            .and(query_param("amount", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rate": 21.4}"#))
            .mount(&mock_server)
            .await;

        let client = ExchangeApiClient::new(&mock_server.uri()).unwrap();
        let converted = client
            .convert("EUR", "GBP", 25.0)
            .await
            .expect("Failed to convert");
        assert_eq!(converted, 21.4);
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/exchange"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = ExchangeApiClient::new(&mock_server.uri()).unwrap();
        let result = client.fetch_rate("USD", "EUR").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error: 500 Internal Server Error for currency pair: USD/EUR"
        );
    }

    #[tokio::test]
    async fn test_api_malformed_response() {
        let mock_server = MockServer::start().await;

        let mock_response = r#"{"value": 36.05}"#; // wrong field name

        Mock::given(method("GET"))
            .and(path("/exchange"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        let client = ExchangeApiClient::new(&mock_server.uri()).unwrap();
        let result = client.fetch_rate("USD", "EUR").await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse response for USD/EUR")
        );
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/exchange"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"rate": 1.0}"#))
            .mount(&mock_server)
            .await;

        let base = format!("{}/", mock_server.uri());
        let client = ExchangeApiClient::new(&base).unwrap();
        assert_eq!(client.fetch_rate("USD", "USD").await.unwrap(), 1.0);
    }
}

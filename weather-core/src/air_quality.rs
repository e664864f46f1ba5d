//! Pass-through client for the Ontario AQHI feed.

use reqwest::{Client, header::ACCEPT};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::AqhiConfig,
    error::{Result, WeatherError},
};

#[derive(Debug, Clone)]
pub struct AqhiClient {
    url: String,
    http: Client,
}

impl AqhiClient {
    pub fn new(config: &AqhiConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        Ok(Self { url: config.url.clone(), http })
    }

    /// Fetch the feed and return the JSON body untouched.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<serde_json::Value> {
        debug!("Fetching Ontario AQHI");

        let res = self
            .http
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| WeatherError::AirQuality(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::AirQuality(format!("HTTP {status}")));
        }

        res.json().await.map_err(|e| WeatherError::AirQuality(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    fn client(server: &MockServer) -> AqhiClient {
        AqhiClient::new(&AqhiConfig {
            url: format!("{}/aqhi/json/aqhi.json", server.uri()),
            timeout_secs: 10,
        })
        .expect("client builds")
    }

    #[tokio::test]
    async fn body_is_passed_through() {
        let server = MockServer::start().await;
        let feed = json!({ "stations": [{ "name": "Toronto Downtown", "aqhi": 3 }] });
        Mock::given(method("GET"))
            .and(path("/aqhi/json/aqhi.json"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(feed.clone()))
            .mount(&server)
            .await;

        let body = client(&server).fetch().await.expect("feed");
        assert_eq!(body, feed);
    }

    #[tokio::test]
    async fn zero_timeout_is_raised_to_one_second() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "stations": [] }))
                    .set_delay(Duration::from_millis(100)),
            )
            .mount(&server)
            .await;

        let client = AqhiClient::new(&AqhiConfig { url: server.uri(), timeout_secs: 0 })
            .expect("client builds");

        assert_eq!(client.fetch().await.expect("feed"), json!({ "stations": [] }));
    }

    #[tokio::test]
    async fn server_error_is_air_quality_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server).fetch().await.unwrap_err();
        assert!(matches!(err, WeatherError::AirQuality(ref m) if m.contains("503")));
    }

    #[tokio::test]
    async fn non_json_body_is_air_quality_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client(&server).fetch().await.unwrap_err();
        assert!(matches!(err, WeatherError::AirQuality(_)));
    }
}

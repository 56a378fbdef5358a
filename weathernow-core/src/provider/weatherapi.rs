use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{Config, WeatherError, model::WeatherSnapshot};

use super::WeatherProvider;

/// WeatherAPI.com `forecast.json` client.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    forecast_days: u8,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            forecast_days: 3,
            http: Client::new(),
        }
    }

    pub fn from_config(api_key: String, config: &Config) -> Result<Self, WeatherError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| WeatherError::transport(format!("Failed to build HTTP client: {e}"), None))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            forecast_days: config.forecast_days.clamp(1, 14),
            http,
        })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self), fields(days = self.forecast_days))]
    async fn fetch_snapshot(&self, query: &str) -> Result<WeatherSnapshot, WeatherError> {
        let url = self.forecast_url();
        debug!(url = %url, "Requesting WeatherAPI forecast");

        let days = self.forecast_days.to_string();
        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .map_err(|e| {
                WeatherError::transport(format!("Failed to send request to WeatherAPI: {e}"), None)
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::transport(
                format!("Failed to read WeatherAPI response body: {e}"),
                Some(status.as_u16()),
            )
        })?;

        if !status.is_success() {
            warn!(%status, "WeatherAPI request rejected");
            return Err(WeatherError::transport(
                format!("WeatherAPI request failed with status {}: {}", status, truncate_body(&body)),
                Some(status.as_u16()),
            ));
        }

        let snapshot: WeatherSnapshot = serde_json::from_str(&body).map_err(|e| {
            WeatherError::application(format!("Failed to parse WeatherAPI forecast JSON: {e}"))
        })?;

        debug!(
            location = %snapshot.location.name,
            code = snapshot.current.condition.code,
            "WeatherAPI forecast parsed"
        );

        Ok(snapshot)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

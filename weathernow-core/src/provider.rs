use crate::{Config, WeatherError, WeatherSnapshot, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// A source of weather snapshots.
///
/// `query` is already resolved: a location text or [`crate::AUTO_IP_QUERY`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_snapshot(&self, query: &str) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the provider from config.
///
/// `Ok(None)` means no API key is configured; the store reports that as a
/// configuration failure on the first fetch instead of failing at startup.
pub fn provider_from_config(
    config: &Config,
) -> Result<Option<Arc<dyn WeatherProvider>>, WeatherError> {
    let Some(api_key) = config.api_key() else {
        return Ok(None);
    };

    let provider = WeatherApiProvider::from_config(api_key.to_owned(), config)?;
    Ok(Some(Arc::new(provider)))
}

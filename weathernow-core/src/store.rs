//! Session state container.
//!
//! [`WeatherStore`] owns the one [`AppState`] of a session. Consumers get a
//! cloned handle, read state through [`WeatherStore::state`] or
//! [`WeatherStore::subscribe`], and change it only through the three action
//! methods.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    Config, TemperatureUnit, WeatherError, WeatherSnapshot,
    model::AUTO_IP_QUERY,
    provider::{WeatherProvider, provider_from_config},
};

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Last successful result. Kept while a new request is loading, cleared on failure.
    pub snapshot: Option<WeatherSnapshot>,
    pub loading: bool,
    /// User-facing failure message. Never set while `loading` is true.
    pub error: Option<String>,
    /// Last resolved or user-entered location; empty until the first one is known.
    pub location_query: String,
    pub temperature_unit: TemperatureUnit,
}

impl AppState {
    fn new(temperature_unit: TemperatureUnit) -> Self {
        Self {
            snapshot: None,
            loading: false,
            error: None,
            location_query: String::new(),
            temperature_unit,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failure
        } else if self.snapshot.is_some() {
            Phase::Success
        } else {
            Phase::Idle
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TemperatureUnit::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

/// What happens when fetches overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RacePolicy {
    /// Only the most recently issued request may change state; older
    /// responses are dropped when they arrive.
    #[default]
    LastIssued,
    /// Every response overwrites state as it settles.
    LastSettled,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    pub race_policy: RacePolicy,
    pub initial_unit: TemperatureUnit,
}

/// Where the query of one fetch came from.
#[derive(Debug, Clone)]
enum QuerySource {
    Explicit(String),
    Remembered(String),
    AutoIp,
}

impl QuerySource {
    fn as_query(&self) -> &str {
        match self {
            QuerySource::Explicit(q) | QuerySource::Remembered(q) => q,
            QuerySource::AutoIp => AUTO_IP_QUERY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// `None` when no API key is configured.
    provider: Option<Arc<dyn WeatherProvider>>,
    state: watch::Sender<AppState>,
    latest_request: AtomicU64,
    race_policy: RacePolicy,
}

impl WeatherStore {
    pub fn new(provider: Option<Arc<dyn WeatherProvider>>) -> Self {
        Self::with_options(provider, StoreOptions::default())
    }

    pub fn with_options(provider: Option<Arc<dyn WeatherProvider>>, options: StoreOptions) -> Self {
        let (state, _) = watch::channel(AppState::new(options.initial_unit));

        Self {
            inner: Arc::new(Inner {
                provider,
                state,
                latest_request: AtomicU64::new(0),
                race_policy: options.race_policy,
            }),
        }
    }

    /// Build a store backed by WeatherAPI.com. A missing API key is not an
    /// error here; it surfaces as a failure state on the first fetch.
    pub fn from_config(config: &Config) -> Result<Self, WeatherError> {
        let provider = provider_from_config(config)?;
        let options = StoreOptions { initial_unit: config.default_unit, ..Default::default() };
        Ok(Self::with_options(provider, options))
    }

    pub fn is_configured(&self) -> bool {
        self.inner.provider.is_some()
    }

    /// A copy of the current state.
    pub fn state(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    pub fn set_location(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.state.send_modify(|s| s.location_query = text);
    }

    pub fn toggle_temperature_unit(&self) {
        self.inner.state.send_modify(|s| s.temperature_unit = s.temperature_unit.toggled());
    }

    /// Fetch weather for `query`, the remembered location, or the caller's IP
    /// location, in that order of preference.
    ///
    /// Never returns an error: the outcome lands in [`AppState`].
    pub async fn fetch_weather(&self, query: Option<&str>) {
        let Some(provider) = self.inner.provider.clone() else {
            let err = WeatherError::configuration("no WeatherAPI key configured");
            warn!(error = %err, "Weather fetch skipped");
            self.fail(&err);
            return;
        };

        let source = self.resolve(query);
        let token = self.inner.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(token, query = source.as_query(), "Weather fetch started");

        self.inner.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = provider.fetch_snapshot(source.as_query()).await;

        if self.inner.race_policy == RacePolicy::LastIssued
            && token != self.inner.latest_request.load(Ordering::SeqCst)
        {
            debug!(token, "Discarding response of superseded request");
            return;
        }

        match result {
            Ok(snapshot) => self.succeed(source, snapshot),
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "Weather fetch failed");
                self.fail(&err);
            }
        }
    }

    fn resolve(&self, query: Option<&str>) -> QuerySource {
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            return QuerySource::Explicit(q.to_owned());
        }

        let remembered = self.inner.state.borrow().location_query.trim().to_owned();
        if remembered.is_empty() { QuerySource::AutoIp } else { QuerySource::Remembered(remembered) }
    }

    fn succeed(&self, source: QuerySource, snapshot: WeatherSnapshot) {
        info!(
            location = %snapshot.location.name,
            country = %snapshot.location.country,
            "Weather updated"
        );

        self.inner.state.send_modify(|s| {
            match source {
                QuerySource::Explicit(q) => s.location_query = q,
                // Adopt the provider's name only if nobody set a location meanwhile.
                QuerySource::AutoIp if s.location_query.is_empty() => {
                    s.location_query = snapshot.location.name.clone();
                }
                QuerySource::AutoIp | QuerySource::Remembered(_) => {}
            }
            s.snapshot = Some(snapshot);
            s.error = None;
            s.loading = false;
        });
    }

    fn fail(&self, err: &WeatherError) {
        let message = err.user_message().to_string();
        self.inner.state.send_modify(|s| {
            s.snapshot = None;
            s.error = Some(message);
            s.loading = false;
        });
    }
}

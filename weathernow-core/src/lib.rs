//! Core library for the `weathernow` dashboard.
//!
//! This crate defines:
//! - The session state store and its fetch/location/unit actions
//! - Classification of condition codes into icons and background themes
//! - The WeatherAPI.com provider behind a swappable trait
//! - Configuration & credentials handling
//!
//! It is used by `weathernow-cli`, but can also back any other front end.

pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod store;
pub mod view;

pub use classify::{DayPhase, DisplayCategory, Gradient, Icon, WeatherCategory, classify};
pub use config::Config;
pub use error::WeatherError;
pub use model::{AUTO_IP_QUERY, TemperatureUnit, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config, weatherapi::WeatherApiProvider};
pub use store::{AppState, Phase, RacePolicy, StoreOptions, WeatherStore};
pub use view::{CurrentView, Screen};

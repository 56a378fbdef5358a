use thiserror::Error;

/// Message shown when no API key is available.
pub const CONFIGURATION_MESSAGE: &str = "Weather API key is not configured. \
     Please add your API key to the config file or set WEATHER_API_KEY.";

/// Message shown for every transport or payload failure.
pub const FETCH_FAILED_MESSAGE: &str =
    "Failed to fetch weather data. Please verify your API key and try again.";

/// Failures of a weather fetch.
///
/// The store collapses every variant into a single user-facing string, see
/// [`WeatherError::user_message`]. The structured variant is only visible to
/// code that talks to a provider directly.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No credential configured; detected before any network call.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Network failure or non-success HTTP status.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
    },

    /// The provider answered, but with a payload we could not understand.
    #[error("Unexpected response: {message}")]
    Application { message: String },
}

impl WeatherError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn transport<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        Self::Transport { message: message.into(), status }
    }

    pub fn application<S: Into<String>>(message: S) -> Self {
        Self::Application { message: message.into() }
    }

    /// HTTP status of a failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// The opaque message exposed to presentation.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Configuration { .. } => CONFIGURATION_MESSAGE,
            WeatherError::Transport { .. } | WeatherError::Application { .. } => {
                FETCH_FAILED_MESSAGE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_has_its_own_message() {
        let err = WeatherError::configuration("missing api key");
        assert!(matches!(err, WeatherError::Configuration { .. }));
        assert_eq!(err.user_message(), CONFIGURATION_MESSAGE);
        assert!(err.to_string().contains("missing api key"));
    }

    #[test]
    fn transport_and_application_collapse_to_one_message() {
        let transport = WeatherError::transport("HTTP 401 Unauthorized", Some(401));
        let application = WeatherError::application("missing field `current`");

        assert_eq!(transport.user_message(), FETCH_FAILED_MESSAGE);
        assert_eq!(application.user_message(), FETCH_FAILED_MESSAGE);
        assert_eq!(transport.status(), Some(401));
        assert_eq!(application.status(), None);
    }
}

//! Mapping from provider condition codes to display categories.
//!
//! Icons and panel backgrounds come from one table keyed by [`WeatherCategory`].
//! The background groups are coarser than the icon groups: fog, snow and
//! thunderstorm share the clear-sky gradient, drizzle and rain share the
//! rainy one.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCategory {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

impl WeatherCategory {
    pub const fn all() -> &'static [WeatherCategory] {
        &[
            WeatherCategory::Clear,
            WeatherCategory::PartlyCloudy,
            WeatherCategory::Cloudy,
            WeatherCategory::Fog,
            WeatherCategory::Drizzle,
            WeatherCategory::Rain,
            WeatherCategory::Snow,
            WeatherCategory::Thunderstorm,
        ]
    }

    /// Category for a WeatherAPI.com condition code. Unknown codes are `Clear`.
    pub const fn from_code(code: u32) -> Self {
        match code {
            1000 => Self::Clear,
            1003 => Self::PartlyCloudy,
            1006 | 1009 => Self::Cloudy,
            1030 | 1135 | 1147 => Self::Fog,
            1063 | 1150 | 1153 | 1180 | 1183 | 1240 => Self::Drizzle,
            1186 | 1189 | 1192 | 1195 | 1243 | 1246 => Self::Rain,
            1066 | 1114 | 1117 | 1210 | 1213 | 1216 | 1219 | 1222 | 1225 | 1255 | 1258 => {
                Self::Snow
            }
            1087 | 1273 | 1276 | 1279 | 1282 => Self::Thunderstorm,
            _ => Self::Clear,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly-cloudy",
            Self::Cloudy => "cloudy",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
        }
    }

    const fn backdrop(&self) -> Backdrop {
        match self {
            Self::PartlyCloudy => Backdrop::PartlyCloudy,
            Self::Cloudy => Backdrop::Cloudy,
            Self::Drizzle | Self::Rain => Backdrop::Rainy,
            Self::Clear | Self::Fog | Self::Snow | Self::Thunderstorm => Backdrop::Clear,
        }
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPhase {
    Day,
    Night,
}

impl DayPhase {
    pub const fn from_is_day(is_day: bool) -> Self {
        if is_day { Self::Day } else { Self::Night }
    }
}

/// Glyph identifiers, named after the icon set the dashboard was drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Sun,
    Moon,
    Cloud,
    CloudMoon,
    CloudFog,
    CloudDrizzle,
    CloudRain,
    CloudSnow,
    CloudLightning,
}

impl Icon {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Cloud => "cloud",
            Self::CloudMoon => "cloud-moon",
            Self::CloudFog => "cloud-fog",
            Self::CloudDrizzle => "cloud-drizzle",
            Self::CloudRain => "cloud-rain",
            Self::CloudSnow => "cloud-snow",
            Self::CloudLightning => "cloud-lightning",
        }
    }
}

/// Two-stop background gradient for the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Gradient {
    pub id: &'static str,
    /// Hex RGB, top-left stop.
    pub from: &'static str,
    /// Hex RGB, bottom-right stop.
    pub to: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backdrop {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rainy,
}

impl Backdrop {
    const fn gradient(self, phase: DayPhase) -> Gradient {
        use DayPhase::{Day, Night};

        match (self, phase) {
            (Backdrop::Clear, Day) => Gradient { id: "clear-day", from: "#60a5fa", to: "#2563eb" },
            (Backdrop::Clear, Night) => {
                Gradient { id: "clear-night", from: "#1e3a8a", to: "#312e81" }
            }
            (Backdrop::PartlyCloudy, Day) => {
                Gradient { id: "partly-cloudy-day", from: "#93c5fd", to: "#3b82f6" }
            }
            (Backdrop::PartlyCloudy, Night) => {
                Gradient { id: "partly-cloudy-night", from: "#1e40af", to: "#312e81" }
            }
            (Backdrop::Cloudy, Day) => {
                Gradient { id: "cloudy-day", from: "#d1d5db", to: "#60a5fa" }
            }
            (Backdrop::Cloudy, Night) => {
                Gradient { id: "cloudy-night", from: "#1f2937", to: "#1e3a8a" }
            }
            (Backdrop::Rainy, Day) => Gradient { id: "rainy-day", from: "#9ca3af", to: "#3b82f6" },
            (Backdrop::Rainy, Night) => {
                Gradient { id: "rainy-night", from: "#111827", to: "#1e3a8a" }
            }
        }
    }
}

/// A category in its day or night variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DisplayCategory {
    pub category: WeatherCategory,
    pub phase: DayPhase,
}

impl DisplayCategory {
    pub const fn new(category: WeatherCategory, phase: DayPhase) -> Self {
        Self { category, phase }
    }

    pub const fn icon(&self) -> Icon {
        use DayPhase::{Day, Night};

        match (self.category, self.phase) {
            (WeatherCategory::Clear, Day) => Icon::Sun,
            (WeatherCategory::Clear, Night) => Icon::Moon,
            (WeatherCategory::PartlyCloudy, Day) => Icon::Cloud,
            (WeatherCategory::PartlyCloudy, Night) => Icon::CloudMoon,
            (WeatherCategory::Cloudy, _) => Icon::Cloud,
            (WeatherCategory::Fog, _) => Icon::CloudFog,
            (WeatherCategory::Drizzle, _) => Icon::CloudDrizzle,
            (WeatherCategory::Rain, _) => Icon::CloudRain,
            (WeatherCategory::Snow, _) => Icon::CloudSnow,
            (WeatherCategory::Thunderstorm, _) => Icon::CloudLightning,
        }
    }

    pub const fn gradient(&self) -> Gradient {
        self.category.backdrop().gradient(self.phase)
    }
}

/// Classify a condition code for display. Total over `u32`.
pub const fn classify(code: u32, is_day: bool) -> DisplayCategory {
    DisplayCategory::new(WeatherCategory::from_code(code), DayPhase::from_is_day(is_day))
}

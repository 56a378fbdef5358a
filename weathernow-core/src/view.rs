//! Display-ready values derived from [`AppState`].

use serde::Serialize;

use crate::{
    AppState, TemperatureUnit, WeatherSnapshot,
    classify::{DisplayCategory, classify},
};

/// The current-conditions panel, formatted for one temperature unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    /// `"{name}, {country}"`
    pub heading: String,
    /// e.g. `Monday, January 15`
    pub date: String,
    /// e.g. `2:30 PM`
    pub time: String,
    pub temperature: String,
    pub feels_like: String,
    pub condition_text: String,
    pub humidity: String,
    pub wind: String,
    pub unit: TemperatureUnit,
    pub display: DisplayCategory,
}

impl CurrentView {
    pub fn new(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> Self {
        let location = &snapshot.location;
        let current = &snapshot.current;

        let (date, time) = match location.local_datetime() {
            Some(dt) => (dt.format("%A, %B %-d").to_string(), dt.format("%-I:%M %p").to_string()),
            None => (location.localtime.clone(), String::new()),
        };

        Self {
            heading: format!("{}, {}", location.name, location.country),
            date,
            time,
            temperature: format_temperature(current.temperature(unit), unit),
            feels_like: format_temperature(current.feels_like(unit), unit),
            condition_text: current.condition.text.clone(),
            humidity: format!("{}%", current.humidity),
            wind: format!("{} km/h {}", current.wind_kph, current.wind_dir),
            unit,
            display: classify(current.condition.code, current.is_day()),
        }
    }
}

/// Rounded to a whole degree; halves round up, so -2.5 shows as -2.
pub fn format_temperature(value: f64, unit: TemperatureUnit) -> String {
    format!("{}{}", (value + 0.5).floor() as i64, unit.symbol())
}

/// What the content area shows for a given state.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Error(String),
    Weather(Box<CurrentView>),
    Empty,
}

impl Screen {
    pub fn from_state(state: &AppState) -> Self {
        if state.loading {
            return Screen::Loading;
        }
        if let Some(message) = &state.error {
            return Screen::Error(message.clone());
        }
        match &state.snapshot {
            Some(snapshot) => {
                Screen::Weather(Box::new(CurrentView::new(snapshot, state.temperature_unit)))
            }
            None => Screen::Empty,
        }
    }
}

use std::fmt::Write;

use weathernow_core::{AppState, CurrentView, Icon, Screen, TemperatureUnit};

pub fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Sun => "☀",
        Icon::Moon => "☾",
        Icon::Cloud => "☁",
        Icon::CloudMoon => "☁☾",
        Icon::CloudFog => "🌫",
        Icon::CloudDrizzle => "🌦",
        Icon::CloudRain => "🌧",
        Icon::CloudSnow => "🌨",
        Icon::CloudLightning => "🌩",
    }
}

/// Title line with the unit switch, active unit in brackets.
pub fn header(unit: TemperatureUnit) -> String {
    let (c, f) = match unit {
        TemperatureUnit::Celsius => ("[°C]", " °F "),
        TemperatureUnit::Fahrenheit => (" °C ", "[°F]"),
    };
    format!("WeatherNow{:>24}", format!("{c} | {f}"))
}

/// Shown alongside errors while no API key is set.
pub fn configure_hint(configured: bool) -> Option<&'static str> {
    if configured {
        None
    } else {
        Some("Hint: run `weathernow configure` or set WEATHER_API_KEY.")
    }
}

/// The content area below the search prompt.
pub fn content(state: &AppState) -> String {
    match Screen::from_state(state) {
        Screen::Loading => "Loading weather...".to_string(),
        Screen::Error(message) => format!("! {message}"),
        Screen::Weather(view) => current_weather(&view),
        Screen::Empty => String::new(),
    }
}

fn current_weather(view: &CurrentView) -> String {
    let mut out = String::new();
    let icon = view.display.icon();
    let gradient = view.display.gradient();

    let _ = writeln!(out, "{}", view.heading);
    if view.time.is_empty() {
        let _ = writeln!(out, "{}", view.date);
    } else {
        let _ = writeln!(out, "{} • {}", view.date, view.time);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}  {} ({})", view.temperature, glyph(icon), icon.as_str());
    let _ = writeln!(out, "  {}", view.condition_text);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Weather Details");
    let _ = writeln!(out, "    Feels like: {}", view.feels_like);
    let _ = writeln!(out, "    Humidity:   {}", view.humidity);
    let _ = writeln!(out, "    Wind:       {}", view.wind);
    let _ = write!(out, "  theme: {} ({} → {})", gradient.id, gradient.from, gradient.to);

    out
}

use inquire::{InquireError, Text};
use tracing::debug;
use weathernow_core::WeatherStore;

use crate::render;

#[derive(Debug, PartialEq, Eq)]
enum Action {
    Search(String),
    ToggleUnit,
    Refresh,
    Quit,
    Nothing,
}

impl Action {
    fn parse(input: &str) -> Self {
        match input.trim() {
            "" => Action::Nothing,
            ":q" | ":quit" | ":exit" => Action::Quit,
            ":u" | ":unit" => Action::ToggleUnit,
            ":r" | ":refresh" => Action::Refresh,
            text => Action::Search(text.to_string()),
        }
    }
}

/// Run the interactive session until the user quits.
///
/// The first fetch goes out without a location so the provider can resolve
/// one from the caller's IP.
pub async fn run(store: WeatherStore) -> anyhow::Result<()> {
    println!("{}", render::header(store.state().temperature_unit));
    fetch_with_progress(&store, None).await;

    loop {
        let state = store.state();
        println!();
        println!("{}", render::header(state.temperature_unit));
        let content = render::content(&state);
        if !content.is_empty() {
            println!("{content}");
        }
        if let Some(hint) = render::configure_hint(store.is_configured()) {
            println!("{hint}");
        }

        let input = match Text::new("Search city or zip code...")
            .with_help_message(":unit toggles °C/°F, :refresh reloads, :quit exits")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let action = Action::parse(&input);
        debug!(?action, "Dashboard input");

        match action {
            Action::Quit => break,
            Action::Nothing => {}
            Action::ToggleUnit => store.toggle_temperature_unit(),
            Action::Refresh => fetch_with_progress(&store, None).await,
            Action::Search(query) => {
                store.set_location(query.clone());
                fetch_with_progress(&store, Some(&query)).await;
            }
        }
    }

    Ok(())
}

/// Drive one fetch, printing the loading screen when the store enters it.
async fn fetch_with_progress(store: &WeatherStore, query: Option<&str>) {
    let mut rx = store.subscribe();
    let fetch = store.fetch_weather(query);
    tokio::pin!(fetch);

    loop {
        tokio::select! {
            biased;
            () = &mut fetch => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    (&mut fetch).await;
                    break;
                }
                let state = rx.borrow_and_update().clone();
                if state.loading {
                    println!("{}", render::content(&state));
                }
            }
        }
    }
}

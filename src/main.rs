//! Study Room web client entry point.

use studyroom_web::app::{App, AppContext};
use studyroom_web::config;

fn main() {
    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            let _ = dioxus::logger::init(tracing::Level::INFO);
            tracing::error!("Invalid configuration: {e:#}");
            return;
        }
    };

    if let Err(e) = dioxus::logger::init(config.level()) {
        eprintln!("Logger already initialised: {e}");
    }

    tracing::info!(api = %config.api_base_url, "Starting Study Room client");

    let context = match AppContext::new(config) {
        Ok(context) => context,
        Err(e) => {
            tracing::error!("Cannot create API client: {e}");
            return;
        }
    };

    dioxus::LaunchBuilder::new().with_context(context).launch(App);
}

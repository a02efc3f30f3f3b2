mod app;
mod msg;
mod modals;
mod pages;
mod widgets;

use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use taskdeck_api::ApiClient;

use crate::app::App;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[tokio::main]
async fn main() {
    // The terminal is taken over by the UI, so logs go to a file.
    if let Ok(log_file) = File::create("taskdeck-tui.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let base_url =
        std::env::var("TASKDECK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

    let client = match ApiClient::new(&base_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = App::new(client).run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

use el_pregonero::bot::telegram_client::Api;
use el_pregonero::bot::update_handler::UpdateHandler;
use el_pregonero::sync;
use el_pregonero::App;
use std::process;
use std::sync::Arc;
use std::thread;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let api = Api::new();

    let app = match App::from_config(Box::new(api.clone())) {
        Ok(app) => Arc::new(app),
        Err(error) => {
            log::error!("Failed to open the bot state: {}", error);
            process::exit(1);
        }
    };

    let poller_app = app.clone();
    thread::spawn(move || sync::start_polling(poller_app));

    UpdateHandler::start(app, api);
}

//! ferrite-classify prediction server
//!
//! Serves an upload page and a JSON prediction endpoint backed by a
//! pre-trained ferrite model. Synchronous tiny_http server, one thread per
//! request.
//!
//! Run with:
//!   cargo run --bin server --release -- --model-path plant_growth_model.json
//! Then open http://127.0.0.1:5000
//!
//! Routes:
//!   GET  /         upload page
//!   POST /predict  multipart field `file` -> {"predicted_class", "confidence"}

mod config;
mod handlers;
mod routes;
mod state;
mod util;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tiny_http::Server;

use ferrite_classify::Classifier;

use config::Config;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter(None, log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Config::parse();

    std::fs::create_dir_all(&config.upload_folder).with_context(|| {
        format!("could not create upload folder '{}'", config.upload_folder.display())
    })?;

    let classifier = load_classifier(&config);

    let state = Arc::new(AppState {
        classifier,
        upload_dir: config.upload_folder.clone(),
        max_upload_bytes: config.max_upload_bytes(),
    });

    let addr = config.bind_addr();
    let server = Server::http(&addr)
        .map_err(|e| anyhow::anyhow!("could not bind {}: {}", addr, e))?;
    log::info!("listening on http://{}", addr);

    routes::serve(server, state);
    Ok(())
}

/// Loads the model once. A failure is logged and the server still starts;
/// predictions then answer 500 until the process is restarted with a good model.
fn load_classifier(config: &Config) -> Option<Classifier> {
    match Classifier::load(&config.model_path, &config.class_names) {
        Ok(classifier) => {
            let (width, height) = classifier.input_size();
            log::info!("model '{}' loaded", config.model_path);
            log::info!("model expects input shape ({}, {}, 3)", height, width);
            log::info!("class names: {:?}", classifier.labels());
            Some(classifier)
        }
        Err(e) => {
            log::error!("error loading model: {}", e);
            log::error!(
                "make sure '{}' exists and is a ferrite model with RGB image metadata",
                config.model_path
            );
            None
        }
    }
}

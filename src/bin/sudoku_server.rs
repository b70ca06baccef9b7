use std::env;
use std::path::PathBuf;

use sudoku_vision::classify::MlpClassifier;
use sudoku_vision::config::{self, RuntimeConfig};
use sudoku_vision::pipeline::SudokuPipeline;
use sudoku_vision::server::{self, AppState};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config = load_config_from_args()?;
    let pipeline =
        SudokuPipeline::new(config.pipeline).map_err(|e| format!("invalid pipeline config: {e}"))?;

    // A missing model must not keep the service from starting; requests
    // report it as unavailable instead.
    let classifier = match MlpClassifier::from_file(&config.model_path) {
        Ok(model) => {
            log::info!("digit model loaded from {}", config.model_path.display());
            Some(model)
        }
        Err(err) => {
            log::error!("{err}; serving with the digit model unavailable");
            None
        }
    };

    let state = AppState::new(pipeline, classifier);
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    runtime
        .block_on(server::serve(&config.bind_addr, state))
        .map_err(|e| format!("server failed: {e}"))
}

fn load_config_from_args() -> Result<RuntimeConfig, String> {
    let mut args = env::args().skip(1);
    let mut config_path: Option<PathBuf> = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or("--config requires a path")?;
                config_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                println!("Usage: sudoku_server [--config <config.json>]");
                std::process::exit(0);
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    match config_path {
        Some(path) => config::load_config(&path),
        None => Ok(RuntimeConfig::default()),
    }
}

use std::env;
use std::path::PathBuf;

use sudoku_vision::classify::MlpClassifier;
use sudoku_vision::config::{self, RuntimeConfig};
use sudoku_vision::image::io::{load_rgb, save_rgb, write_json_file};
use sudoku_vision::pipeline::SudokuPipeline;

struct DemoArgs {
    image: PathBuf,
    config: Option<PathBuf>,
    overlay_out: Option<PathBuf>,
    json_out: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_cli()?;
    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => RuntimeConfig::default(),
    };

    let classifier = MlpClassifier::from_file(&config.model_path)?;
    let pipeline =
        SudokuPipeline::new(config.pipeline).map_err(|e| format!("invalid pipeline config: {e}"))?;

    let input = load_rgb(&args.image)?;
    let report = pipeline
        .process_image(&input, &classifier)
        .map_err(|e| e.to_string())?;

    println!("Recognized board:\n{}", report.recognized);
    println!("Solved board:\n{}", report.solved);
    println!(
        "Grid area: {:.0}px², total {:.1}ms",
        report.grid_area, report.timing.total_ms
    );
    for stage in &report.timing.stages {
        println!("  {:<12} {:>8.2}ms", stage.label, stage.elapsed_ms);
    }

    if let Some(path) = &args.overlay_out {
        save_rgb(&report.overlay, path)?;
        println!("Overlay written to {}", path.display());
    }
    if let Some(path) = &args.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn parse_cli() -> Result<DemoArgs, String> {
    let mut args = env::args().skip(1);
    let mut image = None;
    let mut config = None;
    let mut overlay_out = None;
    let mut json_out = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(next_path(&mut args, "--config")?),
            "--overlay" => overlay_out = Some(next_path(&mut args, "--overlay")?),
            "--json" => json_out = Some(next_path(&mut args, "--json")?),
            "--help" | "-h" => {
                println!(
                    "Usage: solve_demo <image> [--config <config.json>] \
                     [--overlay <out.png>] [--json <report.json>]"
                );
                std::process::exit(0);
            }
            other if image.is_none() && !other.starts_with('-') => {
                image = Some(PathBuf::from(other));
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(DemoArgs {
        image: image.ok_or("missing input image path")?,
        config,
        overlay_out,
        json_out,
    })
}

fn next_path(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<PathBuf, String> {
    args.next()
        .map(PathBuf::from)
        .ok_or_else(|| format!("{flag} requires a path"))
}

use std::path::PathBuf;
use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use workflow_diagram::{RenderConfig, run, success_message};

/// Render the agent workflow architecture diagram to a PNG image
#[derive(Parser, Debug)]
#[command(name = "workflow-diagram")]
#[command(version)]
#[command(about = "Render the agent workflow architecture diagram to PNG", long_about = None)]
struct Args {
    /// Output PNG path [default: langgraph_architecture.png]
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Raster resolution in dots per inch [default: 300]
    #[arg(long)]
    dpi: Option<f32>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Export the whole canvas instead of cropping to the drawn content
    #[arg(long)]
    no_tight: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn apply(&self, config: &mut RenderConfig) {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if self.no_tight {
            config.tight = false;
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(args:?; "Parsed arguments");

    let result = RenderConfig::load(args.config.as_deref()).and_then(|mut config| {
        args.apply(&mut config);
        run(&config)
    });

    match result {
        Ok(path) => {
            println!("{}", success_message(&path));
            info!("Completed successfully");
        }
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    }
}

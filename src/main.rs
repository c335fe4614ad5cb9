// Inherit lint configuration from lib.rs for consistency
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::needless_pass_by_value
)]

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hb_docgen::cli::commands::{Cli, Command};
use hb_docgen::cli::output;
use hb_docgen::config::Config;
use hb_docgen::pipeline;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        eprintln!("{}", output::format_error(&e));
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries the JSON result.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::fmt::Display>> {
    let root = cli.root;
    match cli.command {
        Command::Devices { source, output: out } => {
            cmd_devices(&root, source.as_deref(), out.as_deref())
        }
        Command::Functions { input, output: out } => {
            cmd_functions(&root, input.as_deref(), out.as_deref())
        }
        Command::Build { output: out } => cmd_build(&root, out.as_deref()),
        Command::Inspect { path } => cmd_inspect(&path),
        Command::InspectReference { path, module } => {
            cmd_inspect_reference(&path, module.as_deref())
        }
    }
}

type CmdResult = Result<(), Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn get_config(root: &str, out_dir: Option<&str>) -> Result<Config, Box<dyn std::fmt::Display>> {
    let config = if root == "." {
        Config::from_cwd().map_err(map_err)?
    } else {
        Config::new(root)
    };
    Ok(match out_dir {
        Some(dir) => config.with_output_dir(dir),
        None => config,
    })
}

fn cmd_devices(root: &str, source: Option<&str>, out_dir: Option<&str>) -> CmdResult {
    let mut config = get_config(root, out_dir)?;
    if let Some(dir) = source {
        config = config.with_source_dir(dir);
    }
    let result = pipeline::run_devices(&config).map_err(map_err)?;
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_functions(root: &str, input: Option<&str>, out_dir: Option<&str>) -> CmdResult {
    let mut config = get_config(root, out_dir)?;
    if let Some(file) = input {
        config = config.with_reference_path(file);
    }
    let result = pipeline::run_functions(&config).map_err(map_err)?;
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_build(root: &str, out_dir: Option<&str>) -> CmdResult {
    let config = get_config(root, out_dir)?;
    let result = pipeline::run_build(&config).map_err(map_err)?;
    println!("{}", output::format_json(&result));
    Ok(())
}

fn cmd_inspect(path: &str) -> CmdResult {
    let doc = pipeline::inspect_document(Path::new(path)).map_err(map_err)?;
    println!("{}", output::format_pretty(&doc));
    Ok(())
}

fn cmd_inspect_reference(path: &str, module: Option<&str>) -> CmdResult {
    let modules = pipeline::inspect_reference(Path::new(path), module).map_err(map_err)?;
    println!("{}", output::format_pretty(&modules));
    Ok(())
}

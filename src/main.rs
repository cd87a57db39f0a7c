use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = releng::cli::Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        owo_colors::set_override(false);
    }

    if cli.version {
        releng::cmd::completions::print_version();
        return Ok(());
    }

    if cli.command.is_none() {
        releng::cli::Cli::command().print_help()?;
        return Ok(());
    }

    match releng::execute(cli) {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(e) => {
            print_error(&e);
            std::process::exit(1);
        }
    }
}

fn print_error(error: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), error);
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();
}

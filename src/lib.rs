pub mod cli;
pub mod error;

pub mod cmd {
    pub mod add_nature;
    pub mod completions;
    pub mod copy_settings;
    pub mod copyright;
    pub mod report;
    pub mod update_version;
}

pub mod core {
    pub mod config;
    pub mod copyright;
    pub mod descriptor;
    pub mod embed;
    pub mod nature;
    pub mod prompt;
    pub mod rewriter;
    pub mod session;
    pub mod settings;
    pub mod version;
    pub mod workspace;
}

pub mod utils {
    pub mod file_io;
    pub mod theme;
}

use anyhow::Result;
use cli::{Cli, Commands};
use crate::core::session::SessionOptions;
use error::CliError;
use utils::theme::info_message;

/// Runs the parsed command and returns the process exit code.
pub fn execute(cli: Cli) -> Result<i32> {
    let Some(command) = cli.command else {
        return Ok(0);
    };

    let options = SessionOptions {
        workspace: cli.workspace,
        config: cli.config,
        dry_run: cli.dry_run,
    };

    let result = match command {
        Commands::Copyright(args) => cmd::copyright::run(&options, args.pattern, args.prefix),
        Commands::UpdateVersion(args) => {
            let prompter = crate::core::prompt::default_prompter();
            cmd::update_version::run(&options, prompter.as_ref(), args.to, args.prefix)
        }
        Commands::CopySettings(args) => {
            let prompter = crate::core::prompt::default_prompter();
            cmd::copy_settings::run(&options, prompter.as_ref(), args.from, args.prefix)
        }
        Commands::AddNature(args) => cmd::add_nature::run(&options, args.nature, args.items),
        Commands::Completions { shell } => {
            cmd::completions::generate(shell);
            Ok(0)
        }
        Commands::Version => {
            cmd::completions::print_version();
            Ok(0)
        }
    };

    match result {
        Err(e) if matches!(e.downcast_ref::<CliError>(), Some(CliError::UserCancelled)) => {
            println!("{}", info_message("Cancelled, nothing was changed"));
            Ok(0)
        }
        other => other,
    }
}

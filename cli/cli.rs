mod cli_args;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use log;
use std::path::Path;
use std::process;

use cli_args::{Cli, Commands, ProjectConfigOpts};
use cofifo_core::{AppError, Config};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let exit_code = exit_code_for(&e);
            // Failures are always reported; quiet only silences progress output.
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

/// 1 config/generic, 2 I/O, 3 not found, 5 invalid argument, 6 serialization.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(AppError::NotFound { .. }) => 3,
        Some(AppError::Config(_)) => 1,
        Some(AppError::TomlParse(_)) => 1,
        Some(AppError::TomlSerialize(_)) => 6,
        Some(AppError::Io(_)) => 2,
        Some(AppError::FileRead { .. }) => 2,
        Some(AppError::FileWrite { .. }) => 2,
        Some(AppError::DirCreation { .. }) => 2,
        Some(AppError::WalkDir(_)) => 2,
        Some(AppError::StoreParse { .. }) => 2,
        Some(AppError::InvalidArgument(_)) => 5,
        Some(AppError::JsonSerialize(_)) => 6,
        Some(AppError::YamlError(_)) => 6,
        Some(_) => 1,
        None => 1,
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::List(args) => {
            log::debug!("Executing 'list' command...");
            commands::shortcuts::handle_list_command(args)?;
        }
        Commands::Add(args) => {
            log::debug!("Executing 'add' command...");
            commands::shortcuts::handle_add_command(args, quiet)?;
        }
        Commands::Remove(args) => {
            log::debug!("Executing 'remove' command...");
            commands::shortcuts::handle_remove_command(args, quiet)?;
        }
        Commands::Use(args) => {
            log::debug!("Executing 'use' command...");
            commands::shortcuts::handle_use_command(args, quiet)?;
        }
        Commands::Combine(args) => {
            log::debug!("Executing 'combine' command...");
            commands::combine::handle_combine_command(args, quiet)?;
        }
        Commands::Tree(args) => {
            log::debug!("Executing 'tree' command...");
            commands::tree::handle_tree_command(&args)?;
        }
        Commands::Browse(args) => {
            log::debug!("Executing 'browse' command...");
            commands::browse::handle_browse_command(&args)?;
        }
        Commands::Completion(args) => {
            log::debug!("Executing 'completion' command...");
            commands::completion::handle_completion_command(&args, quiet)?;
        }
        Commands::Config(args) => {
            log::debug!("Executing 'config' command...");
            commands::config::handle_config_command(&args, quiet)?;
        }
    }
    Ok(())
}

/// Loads the project's TOML config, honouring `--config-file` and `--disable-config-file`.
pub fn load_config_for_command(
    project_root: &Path,
    project_opts: &ProjectConfigOpts,
) -> Result<Config> {
    let config_path = Config::resolve_config_path(
        project_root,
        project_opts.config_file.as_ref(),
        project_opts.disable_config_file,
    )
    .context("Failed to resolve configuration path")?;

    let config = match &config_path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    log::trace!("Effective config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn exit_codes_distinguish_not_found_from_io() {
        let not_found = anyhow::Error::from(AppError::shortcut_not_found("x"));
        assert_eq!(exit_code_for(&not_found), 3);

        let io = anyhow::Error::from(AppError::Io(std::io::Error::other("boom")));
        assert_eq!(exit_code_for(&io), 2);

        let wrapped = anyhow::Error::from(AppError::InvalidArgument("bad".into()))
            .context("while doing something");
        assert_eq!(exit_code_for(&wrapped), 5);

        assert_eq!(exit_code_for(&anyhow::anyhow!("plain")), 1);
    }

    #[test]
    fn load_config_reads_project_file() {
        let dir = TempDir::new().unwrap();
        let path = Config::default_config_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[output]\ninclude_tree = true\n").unwrap();

        let config = load_config_for_command(dir.path(), &ProjectConfigOpts::default()).unwrap();
        assert!(config.output.include_tree);

        let disabled = ProjectConfigOpts {
            disable_config_file: true,
            ..Default::default()
        };
        let config = load_config_for_command(dir.path(), &disabled).unwrap();
        assert!(!config.output.include_tree);
    }
}

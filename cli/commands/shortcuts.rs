use crate::cli_args::{AddArgs, ListArgs, ProjectConfigOpts, RemoveArgs, UseArgs};
use crate::load_config_for_command;
use crate::output::{print_data_or_text, print_report, render_shortcuts_table};
use anyhow::{Context, Result};
use colored::*;
use log;
use cofifo_core::{AddOutcome, Assembler, Config, ShortcutStore};

fn open_store(project_opts: &ProjectConfigOpts) -> Result<(Config, ShortcutStore)> {
    let project_root = Config::determine_project_root(project_opts.project_root.as_ref())
        .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());
    let config = load_config_for_command(&project_root, project_opts)?;
    let store = ShortcutStore::from_config(&config, &project_root);
    log::debug!("Using shortcut store at {}", store.path().display());
    Ok((config, store))
}

pub fn handle_list_command(args: ListArgs) -> Result<()> {
    let (_, store) = open_store(&args.project_config)?;
    let shortcuts = store.list().context("Failed to load shortcuts")?;
    let table = render_shortcuts_table(&shortcuts);
    print_data_or_text(&shortcuts, Some(table), &args.format_output)
}

pub fn handle_add_command(args: AddArgs, quiet: bool) -> Result<()> {
    let (_, store) = open_store(&args.project_config)?;
    let outcome = store
        .add(&args.name, args.paths)
        .with_context(|| format!("Failed to save shortcut '{}'", args.name))?;

    if !quiet {
        if outcome == AddOutcome::Replaced {
            eprintln!(
                "{} Shortcut '{}' already existed and was overwritten.",
                "Warning:".yellow(),
                args.name.cyan()
            );
        }
        println!("{} Shortcut '{}' added.", "✅".green(), args.name.cyan());
    }
    Ok(())
}

pub fn handle_remove_command(args: RemoveArgs, quiet: bool) -> Result<()> {
    let (_, store) = open_store(&args.project_config)?;
    store.remove(&args.name)?;
    if !quiet {
        println!("{} Shortcut '{}' removed.", "✅".green(), args.name.cyan());
    }
    Ok(())
}

pub fn handle_use_command(args: UseArgs, quiet: bool) -> Result<()> {
    let (config, store) = open_store(&args.project_config)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.default_file.clone());
    let include_tree = args.tree.resolve(config.output.include_tree);
    let assembler = Assembler::from_config(&config);

    let report = store.use_shortcut(&args.name, &output, include_tree, &assembler, &config)?;
    print_report(&report, quiet);
    Ok(())
}

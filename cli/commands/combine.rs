use crate::cli_args::CombineArgs;
use crate::load_config_for_command;
use crate::output::print_report;
use anyhow::{Context, Result};
use log;
use cofifo_core::{Assembler, Config, DocumentSource};

pub fn handle_combine_command(args: CombineArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    let config = load_config_for_command(&project_root, &args.project_config)?;

    let paths: Vec<String> = args.paths.iter().map(|p| config.expand_path(p)).collect();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.default_file.clone());
    let include_tree = args.tree.resolve(config.output.include_tree);
    log::debug!(
        "Combining {:?} into {} (tree: {})",
        paths,
        output.display(),
        include_tree
    );

    let report = Assembler::from_config(&config)
        .combine(DocumentSource::Paths, &paths, &output, include_tree)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    print_report(&report, quiet);
    Ok(())
}

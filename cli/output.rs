use anyhow::{Context, Result};
use byte_unit::{Byte, UnitType};
use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use cofifo_core::{AssemblyReport, BrowseResult, NodeKind, Shortcuts, output_formats};

use crate::cli_args::FormatOutputOpts;

/// Prints `plain_text` for the text format, otherwise serializes `data`.
pub fn print_data_or_text<T: Serialize>(
    data: &T,
    plain_text: Option<String>,
    format_opts: &FormatOutputOpts,
) -> Result<()> {
    let format = format_opts
        .format
        .as_deref()
        .unwrap_or("text")
        .to_lowercase();

    let content = match format.as_str() {
        "yaml" | "yml" => output_formats::serialize_to_yaml(data)?,
        "json" => output_formats::serialize_to_json(data, true)?,
        _ => match plain_text {
            Some(text) => text,
            None => output_formats::serialize_to_json(data, true)?,
        },
    };
    write_to_stdout(&content)
}

pub fn render_shortcuts_table(shortcuts: &Shortcuts) -> String {
    if shortcuts.is_empty() {
        return format!("{}", "No shortcuts available.".yellow());
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Shortcut").fg(Color::Green),
        Cell::new("Paths").fg(Color::Green),
    ]);
    for (name, paths) in shortcuts {
        table.add_row(vec![
            Cell::new(name).fg(Color::Cyan),
            Cell::new(paths.join("\n")),
        ]);
    }
    table.to_string()
}

pub fn render_browse_text(result: &BrowseResult) -> String {
    match result {
        BrowseResult::Directory { path, entries } => {
            let mut out = format!("{}\n", path.display().to_string().bold());
            if entries.is_empty() {
                out.push_str(&format!("  {}\n", "(empty)".dimmed()));
            }
            for entry in entries {
                let line = match entry.kind {
                    NodeKind::Directory => format!("{}/", entry.name).blue().to_string(),
                    NodeKind::File => entry.name.clone(),
                };
                out.push_str(&format!("  {}\n", line));
            }
            out
        }
        BrowseResult::File { path, size, .. } => {
            let readable = Byte::from_u64(*size).get_appropriate_unit(UnitType::Binary);
            format!(
                "{} {}\n",
                path.display().to_string().bold(),
                format!("({:.1})", readable).dimmed()
            )
        }
    }
}

pub fn print_report(report: &AssemblyReport, quiet: bool) {
    if quiet {
        return;
    }
    for warning in &report.warnings {
        eprintln!("{} {}", "Warning:".yellow(), warning);
    }
    println!(
        "{} Combined {} files into: {}",
        "✅".green(),
        report.file_count.to_string().cyan(),
        report.output_path.display().to_string().blue()
    );
}

pub fn write_to_stdout(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write newline to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Asks before replacing an existing file. In quiet mode an existing file is an error.
pub fn confirm_overwrite(path: &Path, quiet: bool) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    if quiet {
        anyhow::bail!(
            "Target file '{}' exists. Overwrite prevented in quiet mode.",
            path.display()
        );
    }
    print!(
        "{} File already exists at '{}'. Overwrite? [{}/{}] ",
        "⚠️".yellow(),
        path.display().to_string().cyan(),
        "y".green(),
        "N".red()
    );
    io::stdout().flush().context("Failed to flush stdout")?;
    let mut response = String::new();
    io::stdin()
        .read_line(&mut response)
        .context("Failed to read user input")?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}

use crate::cli_args::TreeArgs;
use crate::output::print_data_or_text;
use anyhow::Result;
use cofifo_core::tree::{build_tree, render_nodes};
use cofifo_core::{AppError, TreeNode, render_tree};
use std::path::Path;

pub fn handle_tree_command(args: &TreeArgs) -> Result<()> {
    if !args.path.exists() {
        anyhow::bail!(AppError::path_not_found(args.path.display().to_string()));
    }
    let (nodes, text) = tree_listing(&args.path);
    print_data_or_text(&nodes, Some(text), &args.format_output)
}

/// Walks `path` once and returns both the nodes and their text rendering.
fn tree_listing(path: &Path) -> (Vec<TreeNode>, String) {
    let (nodes, lines) = if path.is_dir() {
        let nodes = build_tree(path);
        let mut lines = Vec::new();
        render_nodes(&nodes, "", &mut lines);
        (nodes, lines)
    } else {
        (Vec::new(), render_tree(path))
    };
    log::debug!(
        "Tree of {} holds {} entries",
        path.display(),
        nodes.iter().map(|n| 1 + n.descendant_count()).sum::<usize>()
    );

    let mut text = format!("{}\n", path.display());
    for line in &lines {
        text.push_str(line);
        text.push('\n');
    }
    (nodes, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn listing_text_matches_rendered_nodes() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), "").unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let (nodes, text) = tree_listing(dir.path());
        assert_eq!(nodes.len(), 2);
        let expected = format!(
            "{}\n{}\n",
            dir.path().display(),
            render_tree(dir.path()).join("\n")
        );
        assert_eq!(text, expected);
        assert!(text.ends_with("└── src\n    └── lib.rs\n"));
    }

    #[test]
    fn file_listing_is_a_single_leaf_without_nodes() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "x").unwrap();

        let (nodes, text) = tree_listing(&file);
        assert!(nodes.is_empty());
        assert_eq!(text, format!("{}\n└── notes.txt\n", file.display()));
    }
}

use crate::error::AppError;
use crate::output_formats::is_ignored_name;
use log;
use serde::Serialize;
use std::path::Path;
use walkdir::WalkDir;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_PREFIX: &str = "│   ";
const EMPTY_PREFIX: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of nodes below this one, at any depth.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Reads the structure below `dir`. Ignored names are pruned before the walk
/// descends into them, and siblings are sorted by name so output is reproducible.
pub fn build_tree(dir: &Path) -> Vec<TreeNode> {
    log::debug!("Building tree structure for {}", dir.display());
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let ignored = is_ignored_name(entry.file_name());
            if ignored {
                log::trace!("Tree skipping ignored entry: {}", entry.path().display());
            }
            !ignored
        });

    let mut roots: Vec<TreeNode> = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("{}", AppError::from(e));
                continue;
            }
        };
        // Symlinked directories are shown but not entered.
        let kind = if entry.file_type().is_dir() {
            NodeKind::Directory
        } else {
            NodeKind::File
        };
        let node = TreeNode {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
            children: Vec::new(),
        };
        insert_at_depth(&mut roots, entry.depth(), node);
    }
    roots
}

/// Pre-order sorted walks visit a parent right before its children, so the
/// parent of a node at `depth` is always the last node on each level above.
fn insert_at_depth(level: &mut Vec<TreeNode>, depth: usize, node: TreeNode) {
    if depth > 1 {
        if let Some(parent) = level.last_mut() {
            return insert_at_depth(&mut parent.children, depth - 1, node);
        }
    }
    level.push(node);
}

/// Renders the directory below `root` as `tree`-style lines. A root that is
/// not a directory is rendered as a single leaf.
pub fn render_tree(root: &Path) -> Vec<String> {
    if !root.is_dir() {
        return vec![format!("{}{}", LAST_BRANCH, display_name(root))];
    }
    log::debug!("Rendering tree for {}", root.display());
    let nodes = build_tree(root);
    let mut lines = Vec::new();
    render_nodes(&nodes, "", &mut lines);
    lines
}

pub fn render_nodes(nodes: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i + 1 == nodes.len();
        let (connector, continuation) = if is_last {
            (LAST_BRANCH, EMPTY_PREFIX)
        } else {
            (BRANCH, PIPE_PREFIX)
        };
        lines.push(format!("{}{}{}", prefix, connector, node.name));
        if !node.children.is_empty() {
            render_nodes(&node.children, &format!("{}{}", prefix, continuation), lines);
        }
    }
}

/// Base name of a path, or the whole path when it has none (e.g. `/` or `..`).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

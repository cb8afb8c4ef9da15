pub mod browse;
pub mod config;
pub mod document;
pub mod error;
pub mod gather;
pub mod output_formats;
pub mod reader;
pub mod store;
pub mod tree;

pub use browse::{BrowseEntry, BrowseResult, browse};
pub use config::{Config, DocumentStrategy};
pub use document::{Assembler, AssemblyReport, DocumentSource, assemble};
pub use error::{AppError, Result};
pub use gather::{Aggregation, FileInfo, PathWarning, aggregate};
pub use output_formats::get_ignored_dirs;
pub use reader::read_file_content;
pub use store::{AddOutcome, ShortcutStore, Shortcuts};
pub use tree::{NodeKind, TreeNode, render_tree};

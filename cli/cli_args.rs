use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectConfigOpts {
    #[arg(
        long,
        help = "Directory holding the shortcut store and config (default: current dir).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        long,
        help = "Specify path/filename of the TOML config file (default: .cofifo/cofifo.toml).",
        value_name = "CONFIG_FILE",
        conflicts_with = "disable_config_file",
        help_heading = "Project Setup"
    )]
    pub config_file: Option<String>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config_file",
        help_heading = "Project Setup"
    )]
    pub disable_config_file: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FormatOutputOpts {
    #[arg(short = 'f', long, help = "Set the output format [default: text].", value_name = "FORMAT", value_parser = ["text", "json", "yaml"], help_heading = "Output Formatting")]
    pub format: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TreeToggle {
    #[arg(
        short = 't',
        long,
        help = "Prepend the directory structure to the output file.",
        overrides_with = "no_tree",
        help_heading = "Output Control"
    )]
    pub tree: bool,
    #[arg(
        long,
        help = "Omit the directory structure even if enabled in config.",
        overrides_with = "tree",
        help_heading = "Output Control"
    )]
    pub no_tree: bool,
}

impl TreeToggle {
    pub fn resolve(&self, config_default: bool) -> bool {
        if self.tree {
            true
        } else if self.no_tree {
            false
        } else {
            config_default
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Combine files and directories into one text file for AI workflows.",
    long_about = "cofifo concatenates the contents of files and whole directory trees into a \nsingle document, optionally prefixed with a directory tree. Frequently used \npath sets can be saved as named shortcuts.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  cofifo add my_project /path/to/dir /path/to/file.txt\n  cofifo use my_project output.txt --tree\n  cofifo list\n  cofifo combine src Cargo.toml -o context.txt",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(visible_alias = "ls", about = "List all saved shortcuts.")]
    List(ListArgs),

    #[command(
        visible_alias = "a",
        about = "Add a shortcut (overwrites an existing one with the same name)."
    )]
    Add(AddArgs),

    #[command(visible_alias = "rm", about = "Remove a shortcut.")]
    Remove(RemoveArgs),

    #[command(
        visible_alias = "u",
        about = "Combine the files of a shortcut into an output file."
    )]
    Use(UseArgs),

    #[command(
        visible_alias = "c",
        about = "Combine the given paths into an output file without a shortcut."
    )]
    Combine(CombineArgs),

    #[command(about = "Print the directory structure of a path.")]
    Tree(TreeArgs),

    #[command(visible_alias = "b", about = "Show the entries of a directory or details of a file.")]
    Browse(BrowseArgs),

    #[command(about = "Generate or save shell completion scripts.")]
    Completion(CompletionArgs),

    #[command(about = "Show or save the default configuration file.")]
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[clap(flatten)]
    pub format_output: FormatOutputOpts,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[arg(required = true, help = "Name of the shortcut.")]
    pub name: String,
    #[arg(required = true, num_args = 1.., help = "Files and directories to include.")]
    pub paths: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RemoveArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[arg(required = true, help = "Name of the shortcut to remove.")]
    pub name: String,
}

#[derive(Args, Debug, Clone)]
pub struct UseArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[arg(required = true, help = "Name of the shortcut to use.")]
    pub name: String,
    #[arg(help = "Output file [default: from config, 'combined.txt'].", value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
    #[clap(flatten)]
    pub tree: TreeToggle,
}

#[derive(Args, Debug, Clone)]
pub struct CombineArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[arg(required = true, num_args = 1.., help = "Files and directories to combine.")]
    pub paths: Vec<String>,
    #[arg(
        short = 'o',
        long,
        help = "Output file [default: from config, 'combined.txt'].",
        value_name = "OUTPUT",
        help_heading = "Output Control"
    )]
    pub output: Option<PathBuf>,
    #[clap(flatten)]
    pub tree: TreeToggle,
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    #[clap(flatten)]
    pub format_output: FormatOutputOpts,
    #[arg(default_value = ".", help = "Directory to render.")]
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct BrowseArgs {
    #[clap(flatten)]
    pub format_output: FormatOutputOpts,
    #[arg(default_value = ".", help = "Directory or file to inspect.")]
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(
        long,
        value_name = "SHELL",
        help = "Shell to generate completions for (fish, bash, zsh) [default: fish]"
    )]
    pub shell: Option<String>,
    #[arg(
        long,
        help = "Save completion script to default location (prompts overwrite)."
    )]
    pub save: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,
    #[arg(
        long,
        help = "Save default config to .cofifo/cofifo.toml (prompts overwrite)."
    )]
    pub save: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_multiple_paths() {
        let cli = Cli::try_parse_from(["cofifo", "add", "proj", "/a", "/b/c.txt"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.name, "proj");
                assert_eq!(args.paths, vec!["/a", "/b/c.txt"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_requires_at_least_one_path() {
        assert!(Cli::try_parse_from(["cofifo", "add", "proj"]).is_err());
    }

    #[test]
    fn use_accepts_alias_output_and_tree_flag() {
        let cli = Cli::try_parse_from(["cofifo", "u", "proj", "out.txt", "--tree"]).unwrap();
        match cli.command {
            Some(Commands::Use(args)) => {
                assert_eq!(args.name, "proj");
                assert_eq!(args.output, Some(PathBuf::from("out.txt")));
                assert!(args.tree.resolve(false));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn tree_toggle_falls_back_to_config() {
        let none = TreeToggle::default();
        assert!(none.resolve(true));
        assert!(!none.resolve(false));
        let off = TreeToggle {
            tree: false,
            no_tree: true,
        };
        assert!(!off.resolve(true));
    }

    #[test]
    fn last_tree_flag_wins() {
        let cli =
            Cli::try_parse_from(["cofifo", "combine", "src", "--tree", "--no-tree"]).unwrap();
        match cli.command {
            Some(Commands::Combine(args)) => assert!(!args.tree.resolve(true)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["cofifo", "list", "-f", "xml"]).is_err());
    }
}

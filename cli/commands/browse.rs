use crate::cli_args::BrowseArgs;
use crate::output::{print_data_or_text, render_browse_text};
use anyhow::Result;
use cofifo_core::browse;

pub fn handle_browse_command(args: &BrowseArgs) -> Result<()> {
    let result = browse(&args.path)?;
    let text = render_browse_text(&result);
    print_data_or_text(&result, Some(text), &args.format_output)
}

//! sting: demo command showing flags, environment and config file merged
//! into a single view.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}

use clap::CommandFactory;
use clap_complete::generate;
use eyre::Result;
use std::io;

use crate::cli::Cli;
use crate::config::APP_NAME;

pub fn run(shell: clap_complete::Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, APP_NAME, &mut io::stdout());
    Ok(())
}

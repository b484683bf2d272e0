//! Shell completion generation
//!
//! Generate shell completion scripts for bash, zsh, fish, and powershell.

use clap::CommandFactory;
use clap_complete::{Generator, Shell};
use tokio::io::AsyncWrite;

use s3c_core::Result;

use super::Cli;
use crate::output::Printer;

/// Arguments for the completions command
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generate shell completions and print them on stdout
pub async fn execute<O, E>(args: CompletionsArgs, printer: &mut Printer<O, E>) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let script = render(args.shell);
    printer.text(&script).await
}

fn render<G: Generator>(generator: G) -> String {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let mut buf = Vec::new();
    clap_complete::generate(generator, &mut cmd, name, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

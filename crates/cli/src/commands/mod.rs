//! CLI command definitions and execution
//!
//! The command line is a flat set of subcommands. Help, version and
//! completions run locally; everything else goes through a [`Context`]
//! holding the storage and identity clients.

use std::ffi::OsString;
use std::time::Duration;

use clap::error::{ContextKind, ErrorKind};
use clap::{Parser, Subcommand};
use jiff::tz::TimeZone;
use tokio::io::AsyncWrite;

use s3c_aws::Session;
use s3c_core::{ConfigManager, Error, IdentityService, ObjectStore, Result};

use crate::exit_code::ExitCode;
use crate::output::Printer;

mod cat;
mod completions;
mod get;
mod ls;
mod put;
mod rm;
mod url;
mod whoami;

#[cfg(test)]
pub(crate) mod testing;

/// Static usage text printed by `help`
pub const HELP_MESSAGE: &str = "\
Usage: s3-client [--debug] command args...

Command:
  help
  version
  whoami

  get         bucket/key [localFile]
  cat         bucket/key
  zcat        bucket/key

  ls
  ls          bucket
  ls          bucket/keyPrefix

  put         [--content-type TYPE] localFile bucket/key
  rm          bucket/key [bucket/key...]

  private-url [--expires SECONDS] bucket/key
  public-url  bucket/key

  completions SHELL

Addresses may also be written as s3://bucket/key.
";

/// s3-client - a small command-line client for S3 object storage
#[derive(Parser, Debug)]
#[command(name = "s3-client")]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print usage
    #[command(short_flag = 'h', long_flag = "help")]
    Help,

    /// Print the version
    #[command(long_flag = "version")]
    Version,

    /// Generate a shell completion script
    Completions(completions::CompletionsArgs),

    #[command(flatten)]
    Remote(RemoteCommand),
}

/// Commands that talk to the storage or identity service
#[derive(Subcommand, Debug)]
pub enum RemoteCommand {
    /// Show the identity of the caller
    Whoami,

    /// Write an object to stdout
    Cat(cat::CatArgs),

    /// Write a gzip-compressed object to stdout, decompressed
    Zcat(cat::CatArgs),

    /// Download an object to a local file
    Get(get::GetArgs),

    /// List buckets, or objects under a bucket/prefix
    Ls(ls::LsArgs),

    /// Upload a local file
    Put(put::PutArgs),

    /// Delete objects
    Rm(rm::RmArgs),

    /// Print the unsigned HTTPS URL of an object
    PublicUrl(url::UrlArgs),

    /// Print a presigned, time-limited URL of an object
    PrivateUrl(url::PrivateUrlArgs),
}

/// Everything a remote command needs besides its arguments
pub struct Context<'a> {
    /// Storage client
    pub store: &'a dyn ObjectStore,
    /// Identity client
    pub identity: &'a dyn IdentityService,
    /// Region in effect
    pub region: Option<&'a str>,
    /// Default lifetime of presigned URLs
    pub presign_expires: Duration,
    /// Zone used to render listing timestamps
    pub time_zone: TimeZone,
}

/// Version string: the build-time `S3_CLIENT_VERSION` when provided
pub fn version() -> &'static str {
    option_env!("S3_CLIENT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Parse the command line.
///
/// Returns `Ok(None)` when clap already printed help for a subcommand.
/// Usage errors are reduced to the short messages scripts rely on:
/// `unknown command: NAME`, `need argument` and `invalid arguments`.
pub fn parse<I, T>(args: I) -> Result<Option<Cli>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let err = match Cli::try_parse_from(&args) {
        Ok(cli) => return Ok(Some(cli)),
        Err(err) => err,
    };

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            err.print()?;
            Ok(None)
        }
        ErrorKind::InvalidSubcommand => {
            let name = err
                .get(ContextKind::InvalidSubcommand)
                .map(ToString::to_string)
                .or_else(|| first_positional(&args))
                .unwrap_or_default();
            Err(Error::UnknownCommand(name))
        }
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Err(Error::MissingCommand)
        }
        _ => {
            tracing::debug!("usage error: {}", err.render());
            Err(Error::InvalidArguments)
        }
    }
}

fn first_positional(args: &[OsString]) -> Option<String> {
    args.iter()
        .skip(1)
        .map(|a| a.to_string_lossy())
        .find(|a| !a.starts_with('-'))
        .map(|a| a.into_owned())
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let mut printer = Printer::stdio();

    let result = match run(cli.command, &mut printer).await {
        Ok(()) => printer.flush().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            tracing::debug!(remote = e.is_remote(), "command failed");
            let _ = printer.flush().await;
            printer.error(&e).await;
            ExitCode::GeneralError
        }
    }
}

async fn run<O, E>(command: Commands, printer: &mut Printer<O, E>) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    match command {
        Commands::Help => printer.text(HELP_MESSAGE).await,
        Commands::Version => printer.line(version()).await,
        Commands::Completions(args) => completions::execute(args, printer).await,
        Commands::Remote(command) => {
            let config = ConfigManager::new()?.load()?;
            let session = Session::load(&config.s3).await;
            let store = session.storage();
            let identity = session.identity();

            let ctx = Context {
                store: &store,
                identity: &identity,
                region: session.region(),
                presign_expires: config.defaults.presign_expires(),
                time_zone: TimeZone::system(),
            };
            dispatch(command, &ctx, printer).await
        }
    }
}

/// Run a remote command against the given context
pub async fn dispatch<O, E>(
    command: RemoteCommand,
    ctx: &Context<'_>,
    printer: &mut Printer<O, E>,
) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    match command {
        RemoteCommand::Whoami => whoami::execute(ctx, printer).await,
        RemoteCommand::Cat(args) => cat::execute(args, cat::Decoding::Raw, ctx, printer).await,
        RemoteCommand::Zcat(args) => cat::execute(args, cat::Decoding::Gzip, ctx, printer).await,
        RemoteCommand::Get(args) => get::execute(args, ctx, printer).await,
        RemoteCommand::Ls(args) => ls::execute(args, ctx, printer).await,
        RemoteCommand::Put(args) => put::execute(args, ctx, printer).await,
        RemoteCommand::Rm(args) => rm::execute(args, ctx, printer).await,
        RemoteCommand::PublicUrl(args) => url::public(args, ctx, printer).await,
        RemoteCommand::PrivateUrl(args) => url::private(args, ctx, printer).await,
    }
}

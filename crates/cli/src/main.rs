//! s3-client - a small command-line client for S3 object storage

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use s3_client::commands;
use s3_client::exit_code::ExitCode;
use s3_client::output::Printer;

#[tokio::main]
async fn main() {
    // --debug has to take effect before clap runs so usage errors get logged
    let debug = std::env::args_os().any(|a| a == "--debug");
    init_tracing(debug);

    let exit_code = match commands::parse(std::env::args_os()) {
        Ok(Some(cli)) => commands::execute(cli).await,
        Ok(None) => ExitCode::Success,
        Err(e) => {
            Printer::stdio().error(&e).await;
            ExitCode::GeneralError
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

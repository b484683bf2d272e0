//! public-url and private-url commands

use std::time::Duration;

use clap::Args;
use tokio::io::AsyncWrite;

use s3c_core::{parse_object, Error, ObjectRef, Result};

use super::Context;
use crate::output::Printer;

/// Print the unsigned URL of an object
#[derive(Args, Debug)]
pub struct UrlArgs {
    /// Object address (bucket/key or s3://bucket/key)
    pub path: String,
}

/// Print a presigned URL of an object
#[derive(Args, Debug)]
pub struct PrivateUrlArgs {
    /// Object address (bucket/key or s3://bucket/key)
    pub path: String,

    /// Lifetime of the URL in seconds (defaults to the configured value)
    #[arg(long, value_name = "SECONDS")]
    pub expires: Option<u64>,
}

/// Print `https://{bucket}.s3-{region}.amazonaws.com/{key}`
pub async fn public<O, E>(
    args: UrlArgs,
    ctx: &Context<'_>,
    printer: &mut Printer<O, E>,
) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let object = parse_object(&args.path, true)?;
    let region = ctx
        .region
        .ok_or_else(|| Error::Config("no region configured".into()))?;

    printer.line(&public_url(&object, region)).await
}

/// Print a presigned GET URL
pub async fn private<O, E>(
    args: PrivateUrlArgs,
    ctx: &Context<'_>,
    printer: &mut Printer<O, E>,
) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let object = parse_object(&args.path, true)?;
    let expires_in = args
        .expires
        .map(Duration::from_secs)
        .unwrap_or(ctx.presign_expires);

    let url = ctx.store.presign_get(&object, expires_in).await?;
    printer.line(&url).await
}

fn public_url(object: &ObjectRef, region: &str) -> String {
    format!(
        "https://{}.s3-{}.amazonaws.com/{}",
        object.bucket, region, object.key
    )
}

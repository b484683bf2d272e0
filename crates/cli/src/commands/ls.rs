//! ls command - List buckets or objects
//!
//! Without an address it lists buckets; with one it lists the first page of
//! objects in that bucket, under the key as prefix.

use clap::Args;
use tokio::io::AsyncWrite;

use s3c_core::{parse_object, BucketInfo, ObjectInfo, ObjectRef, Result};

use super::Context;
use crate::output::{format_timestamp, Printer};

/// List buckets or objects
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Bucket or bucket/prefix (omit to list buckets)
    pub path: Option<String>,
}

/// Execute the ls command
pub async fn execute<O, E>(
    args: LsArgs,
    ctx: &Context<'_>,
    printer: &mut Printer<O, E>,
) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    match args.path {
        None => list_buckets(ctx, printer).await,
        Some(path) => {
            let location = parse_object(&path, false)?;
            list_objects(&location, ctx, printer).await
        }
    }
}

async fn list_buckets<O, E>(ctx: &Context<'_>, printer: &mut Printer<O, E>) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let buckets = ctx.store.list_buckets().await?;
    for bucket in &buckets {
        printer.line(&bucket_line(bucket, ctx)).await?;
    }
    Ok(())
}

async fn list_objects<O, E>(
    location: &ObjectRef,
    ctx: &Context<'_>,
    printer: &mut Printer<O, E>,
) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let result = ctx
        .store
        .list_objects(&location.bucket, location.key_prefix())
        .await?;

    for item in &result.items {
        printer
            .line(&object_line(&location.bucket, item, ctx))
            .await?;
    }
    printer
        .diag(&format!("IsTruncated: {}", result.truncated))
        .await
}

fn bucket_line(bucket: &BucketInfo, ctx: &Context<'_>) -> String {
    format!(
        "{} {}",
        format_timestamp(bucket.created, &ctx.time_zone),
        bucket.name
    )
}

fn object_line(bucket: &str, item: &ObjectInfo, ctx: &Context<'_>) -> String {
    format!(
        "{} {:>10} {}/{}",
        format_timestamp(item.last_modified, &ctx.time_zone),
        item.size,
        bucket,
        item.key
    )
}

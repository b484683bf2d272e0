//! rm command - Remove objects
//!
//! All addresses are deleted in one batch, which must stay inside a single
//! bucket.

use clap::Args;
use tokio::io::AsyncWrite;

use s3c_core::{common_bucket, parse_object, ObjectRef, Result};

use super::Context;
use crate::output::Printer;

/// Remove objects
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Object addresses to remove (bucket/key or s3://bucket/key)
    #[arg(required = true)]
    pub paths: Vec<String>,
}

/// Execute the rm command
pub async fn execute<O, E>(
    args: RmArgs,
    ctx: &Context<'_>,
    _printer: &mut Printer<O, E>,
) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let objects = args
        .paths
        .iter()
        .map(|path| parse_object(path, true))
        .collect::<Result<Vec<ObjectRef>>>()?;

    common_bucket(&objects)?;
    ctx.store.delete_objects(&objects).await
}

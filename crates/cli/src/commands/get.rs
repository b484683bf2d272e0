//! get command - Download an object to a local file
//!
//! The body lands in a temporary file next to the target and is renamed
//! into place only once it has been written out completely, so a failed
//! download never leaves a truncated file behind.

use std::io;
use std::path::{Path, PathBuf};

use clap::Args;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use s3c_core::{parse_object, ObjectBody, ObjectRef, Result};

use super::Context;
use crate::output::Printer;

const TEMP_PREFIX: &str = ".s3-client-";
const TEMP_SUFFIX: &str = ".tmp";

/// Download an object
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Object address (bucket/key or s3://bucket/key)
    pub path: String,

    /// Local file or existing directory (defaults to the key with '/' replaced by '_')
    pub local: Option<PathBuf>,
}

/// Execute the get command
pub async fn execute<O, E>(
    args: GetArgs,
    ctx: &Context<'_>,
    _printer: &mut Printer<O, E>,
) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let object = parse_object(&args.path, true)?;
    let target = local_target(&object, args.local.as_deref());

    let mut body = ctx.store.get_object(&object).await?;
    let content_length = body.content_length();
    let downloaded = download(&mut body, &target).await;
    body.release().await;

    if downloaded.is_ok() {
        tracing::debug!(
            object = %object,
            target = %target.display(),
            content_length,
            "downloaded"
        );
    }
    downloaded
}

/// Where an object ends up locally
fn local_target(object: &ObjectRef, local: Option<&Path>) -> PathBuf {
    match local {
        Some(dir) if dir.is_dir() => dir.join(object.flat_file_name()),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(object.flat_file_name()),
    }
}

async fn download(body: &mut ObjectBody, target: &Path) -> Result<()> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
    // Same mode as a freshly created file, subject to the umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let temp = builder
        .tempfile_in(dir)
        .map_err(|e| with_path(e, "create temporary file in", dir))?;

    let mut file = tokio::fs::File::from_std(temp.as_file().try_clone()?);
    tokio::io::copy(body, &mut file).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    temp.persist(target)
        .map_err(|e| with_path(e.error, "rename into", target))?;
    Ok(())
}

fn with_path(err: io::Error, action: &str, path: &Path) -> io::Error {
    io::Error::new(err.kind(), format!("{action} {}: {err}", path.display()))
}

//! put command - Upload a local file
//!
//! The file is streamed with its exact size as the content length.

use std::io;
use std::path::PathBuf;

use clap::Args;
use tokio::io::AsyncWrite;

use s3c_core::{parse_object, PutObjectRequest, Result};

use super::Context;
use crate::output::Printer;

/// Upload a local file
#[derive(Args, Debug)]
pub struct PutArgs {
    /// Content-Type of the uploaded object
    #[arg(long = "content-type", value_name = "TYPE")]
    pub content_type: Option<String>,

    /// Local file to upload
    pub local: PathBuf,

    /// Destination address (bucket/key or s3://bucket/key)
    pub path: String,
}

/// Execute the put command
pub async fn execute<O, E>(
    args: PutArgs,
    ctx: &Context<'_>,
    _printer: &mut Printer<O, E>,
) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let object = parse_object(&args.path, true)?;

    let file = tokio::fs::File::open(&args.local)
        .await
        .map_err(|e| io::Error::new(e.kind(), format!("open {}: {e}", args.local.display())))?;
    let size = file.metadata().await?.len();
    let content_length = i64::try_from(size)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "file too large"))?;

    let content_type = args.content_type.filter(|t| !t.is_empty());

    tracing::debug!(
        local = %args.local.display(),
        object = %object,
        content_length,
        "uploading"
    );

    ctx.store
        .put_object(PutObjectRequest {
            object,
            body: file,
            content_length,
            content_type,
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context, printer, Call, MemoryStore};
    use s3c_core::{Error, ObjectRef};

    #[tokio::test]
    async fn test_put_with_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("f.txt");
        std::fs::write(&local, "hello, world\n").unwrap();

        let store = MemoryStore::default();
        let mut printer = printer();

        let args = PutArgs {
            content_type: Some("text/plain".into()),
            local,
            path: "bucket/key".into(),
        };
        execute(args, &context(&store), &mut printer).await.unwrap();

        assert_eq!(
            store.calls(),
            vec![Call::PutObject {
                object: ObjectRef::new("bucket", "key"),
                content_length: 13,
                content_type: Some("text/plain".into()),
                body: b"hello, world\n".to_vec(),
            }]
        );
    }

    #[tokio::test]
    async fn test_put_without_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("empty.bin");
        std::fs::write(&local, "").unwrap();

        let store = MemoryStore::default();
        let mut printer = printer();

        let args = PutArgs {
            content_type: Some(String::new()),
            local,
            path: "s3://bucket/dir/empty.bin".into(),
        };
        execute(args, &context(&store), &mut printer).await.unwrap();

        assert_eq!(
            store.calls(),
            vec![Call::PutObject {
                object: ObjectRef::new("bucket", "dir/empty.bin"),
                content_length: 0,
                content_type: None,
                body: Vec::new(),
            }]
        );
    }

    #[tokio::test]
    async fn test_put_missing_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::default();
        let mut printer = printer();

        let args = PutArgs {
            content_type: None,
            local: dir.path().join("missing.txt"),
            path: "bucket/key".into(),
        };
        let err = execute(args, &context(&store), &mut printer)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing.txt"));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_put_requires_key() {
        let store = MemoryStore::default();
        let mut printer = printer();

        let args = PutArgs {
            content_type: None,
            local: PathBuf::from("whatever.txt"),
            path: "bucket/".into(),
        };
        let err = execute(args, &context(&store), &mut printer)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NeedKey(_)));
    }
}

//! cat and zcat commands - Write object contents to stdout
//!
//! `zcat` runs the body through a gzip decoder that accepts concatenated
//! members, the way `gzip -dc` does.

use std::io::Write;

use clap::Args;
use flate2::write::MultiGzDecoder;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use s3c_core::{parse_object, Result};

use super::Context;
use crate::output::Printer;

const CHUNK_SIZE: usize = 64 * 1024;

/// Write an object to stdout
#[derive(Args, Debug)]
pub struct CatArgs {
    /// Object address (bucket/key or s3://bucket/key)
    pub path: String,
}

/// How the object bytes are turned into output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoding {
    /// Bytes as stored
    Raw,
    /// Gzip-decompressed
    Gzip,
}

/// Execute cat or zcat
pub async fn execute<O, E>(
    args: CatArgs,
    decoding: Decoding,
    ctx: &Context<'_>,
    printer: &mut Printer<O, E>,
) -> Result<()>
where
    O: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    let object = parse_object(&args.path, true)?;
    let mut body = ctx.store.get_object(&object).await?;

    let copied = match decoding {
        Decoding::Raw => tokio::io::copy(&mut body, printer.stdout())
            .await
            .map(|n| tracing::debug!(bytes = n, object = %object, "copied object"))
            .map_err(Into::into),
        Decoding::Gzip => gunzip(&mut body, printer.stdout()).await,
    };

    body.release().await;
    copied
}

/// Stream gzip data from `reader` to `writer`, decompressed
async fn gunzip<R, W>(reader: &mut R, writer: &mut W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut decoder = MultiGzDecoder::new(Vec::new());
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        decoder.write_all(&chunk[..n])?;
        drain(decoder.get_mut(), writer).await?;
    }

    decoder.try_finish()?;
    drain(decoder.get_mut(), writer).await
}

async fn drain<W>(buf: &mut Vec<u8>, writer: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    if !buf.is_empty() {
        writer.write_all(buf).await?;
        buf.clear();
    }
    Ok(())
}

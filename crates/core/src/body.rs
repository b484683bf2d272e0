//! Streaming object body
//!
//! A fetched object is read through [`ObjectBody`]. The underlying connection
//! is only returned to the pool once the body has been read to the end, so
//! callers finish with [`ObjectBody::release`] whatever happened while
//! copying.

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, ReadBuf};

/// Readable body of a fetched object
pub struct ObjectBody {
    reader: Pin<Box<dyn AsyncRead + Send>>,
    content_length: Option<i64>,
}

impl ObjectBody {
    /// Wrap any async reader
    pub fn new(reader: impl AsyncRead + Send + 'static) -> Self {
        Self {
            reader: Box::pin(reader),
            content_length: None,
        }
    }

    /// Attach the length announced by the service
    pub fn with_content_length(mut self, length: Option<i64>) -> Self {
        self.content_length = length;
        self
    }

    /// Length announced by the service, if any
    pub fn content_length(&self) -> Option<i64> {
        self.content_length
    }

    /// Drain whatever is left of the stream and close it.
    ///
    /// Consumes the body, so it can run at most once. Read errors while
    /// draining are ignored: the body is being discarded anyway.
    pub async fn release(mut self) {
        let drained = tokio::io::copy(&mut self.reader, &mut tokio::io::sink()).await;
        if let Ok(n) = drained {
            if n > 0 {
                tracing::debug!(bytes = n, "discarded unread object bytes");
            }
        }
    }
}

impl AsyncRead for ObjectBody {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        self.get_mut().reader.as_mut().poll_read(cx, buf)
    }
}

impl std::fmt::Debug for ObjectBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectBody")
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

//! Response body types
//!
//! Small in-memory pages use `Full`; regular files are streamed from disk
//! in fixed-size chunks so large files are never held in memory whole.

use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Frame, SizeHint};
use std::convert::Infallible;
use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::fs::File;
use tokio::io::{AsyncRead, ReadBuf};

/// Body type of every response the server builds
pub type Body = BoxBody<Bytes, io::Error>;

/// Read size per frame
const CHUNK_SIZE: usize = 64 * 1024;

/// Body backed by bytes already in memory
pub fn full(data: Bytes) -> Body {
    Full::new(data)
        .map_err(|never: Infallible| -> io::Error { match never {} })
        .boxed()
}

/// Body streamed from an open file.
///
/// Yields exactly `len` bytes, the length announced in `Content-Length`.
/// A file that shrinks while being sent ends the body with an error, which
/// aborts the connection instead of sending a short response.
pub struct FileBody {
    file: File,
    remaining: u64,
    buf: Box<[u8]>,
}

impl FileBody {
    pub fn new(file: File, len: u64) -> Self {
        Self {
            file,
            remaining: len,
            buf: vec![0; CHUNK_SIZE].into_boxed_slice(),
        }
    }
}

impl hyper::body::Body for FileBody {
    type Data = Bytes;
    type Error = io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        if this.remaining == 0 {
            return Poll::Ready(None);
        }

        let want = usize::try_from(this.remaining)
            .map_or(this.buf.len(), |r| r.min(this.buf.len()));
        let mut read_buf = ReadBuf::new(&mut this.buf[..want]);
        ready!(Pin::new(&mut this.file).poll_read(cx, &mut read_buf))?;

        let filled = read_buf.filled();
        if filled.is_empty() {
            this.remaining = 0;
            return Poll::Ready(Some(Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "file shrank while being sent",
            ))));
        }

        this.remaining -= filled.len() as u64;
        Poll::Ready(Some(Ok(Frame::data(Bytes::copy_from_slice(filled)))))
    }

    fn is_end_stream(&self) -> bool {
        self.remaining == 0
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.remaining)
    }
}

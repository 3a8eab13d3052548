//! Provides the response body type.

use std::{
    fmt,
    io::{self, Read},
};

/// The body of an HTTP response.
///
/// A body streamed from the network owns the transfer it is read from, and
/// releases it when the body is dropped. This happens exactly once on every
/// path out of the scope holding the body, whether the body was read fully,
/// failed partway, or was never read at all.
pub struct Body(Inner);

/// All possible body implementations.
enum Inner {
    /// An empty body.
    Empty,

    /// A body streamed from an open transfer. `None` once released.
    Stream(Option<Box<dyn Source + Send>>),
}

/// A readable stream that holds a resource which must be released.
pub(crate) trait Source: Read {
    /// Release the resource backing the stream.
    fn close(&mut self);
}

impl Source for crate::transport::Transport {
    fn close(&mut self) {
        crate::transport::Transport::close(self)
    }
}

impl Body {
    /// Create a new empty body.
    pub const fn empty() -> Self {
        Body(Inner::Empty)
    }

    pub(crate) fn from_source(source: impl Source + Send + 'static) -> Self {
        Body(Inner::Stream(Some(Box::new(source))))
    }

    /// Report if this body is known to be empty.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Inner::Empty => true,
            Inner::Stream(_) => false,
        }
    }

    /// Read the remainder of the body into memory.
    ///
    /// Either every byte of the stream is returned or an error is; bytes
    /// received before a failure are discarded.
    pub fn bytes(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_to_end(&mut buf)?;
        Ok(buf)
    }

    fn release(&mut self) {
        if let Inner::Stream(source) = &mut self.0 {
            if let Some(mut source) = source.take() {
                source.close();
            }
        }
    }
}

impl Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.0 {
            Inner::Empty => Ok(0),
            Inner::Stream(Some(source)) => source.read(buf),
            Inner::Stream(None) => Ok(0),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::empty()
    }
}

impl Drop for Body {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Inner::Empty => f.write_str("Body(empty)"),
            Inner::Stream(Some(_)) => f.write_str("Body(stream)"),
            Inner::Stream(None) => f.write_str("Body(closed)"),
        }
    }
}

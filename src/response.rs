use crate::{Body, Error};
use http::Response;
use std::io::{self, Read, Write};

/// Provides extension methods for consuming HTTP response streams.
pub trait ReadResponseExt<R: Read> {
    /// Copy the response body into a writer.
    ///
    /// Returns the number of bytes that were written.
    fn copy_to<W: Write>(&mut self, writer: W) -> io::Result<u64>;

    /// Read the entire response body into memory.
    fn bytes(&mut self) -> io::Result<Vec<u8>>;

    /// Read the entire response body as text.
    ///
    /// With the `text-decoding` feature, the charset named by the
    /// `Content-Type` header is honored and UTF-8 is assumed otherwise.
    /// Invalid sequences are replaced rather than rejected.
    fn text(&mut self) -> Result<String, Error>;
}

impl ReadResponseExt<Body> for Response<Body> {
    fn copy_to<W: Write>(&mut self, mut writer: W) -> io::Result<u64> {
        io::copy(self.body_mut(), &mut writer)
    }

    fn bytes(&mut self) -> io::Result<Vec<u8>> {
        self.body_mut().bytes()
    }

    #[cfg(feature = "text-decoding")]
    fn text(&mut self) -> Result<String, Error> {
        let decoder = crate::text::Decoder::for_response(self);

        Ok(decoder.decode_reader(self.body_mut())?)
    }

    #[cfg(not(feature = "text-decoding"))]
    fn text(&mut self) -> Result<String, Error> {
        let bytes = self.body_mut().bytes()?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

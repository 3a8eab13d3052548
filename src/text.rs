//! Text decoding routines.

#![cfg(feature = "text-decoding")]

use encoding_rs::{CoderResult, Encoding};
use http::Response;
use std::io;

/// A streaming text decoder that supports multiple encodings.
pub(crate) struct Decoder {
    /// Inner decoder implementation.
    decoder: encoding_rs::Decoder,

    /// The output string that characters are accumulated to.
    output: String,
}

impl Decoder {
    /// Create a new decoder with the given encoding.
    pub(crate) fn new(encoding: &'static Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder(),
            output: String::new(),
        }
    }

    /// Create a new decoder suitable for decoding the given response, based
    /// on the charset of its `Content-Type`.
    pub(crate) fn for_response<T>(response: &Response<T>) -> Self {
        if let Some(content_type) = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.parse::<mime::Mime>().ok())
        {
            if let Some(charset) = content_type.get_param(mime::CHARSET) {
                if let Some(encoding) = Encoding::for_label(charset.as_str().as_bytes()) {
                    return Self::new(encoding);
                } else {
                    tracing::warn!("unknown encoding '{}', falling back to UTF-8", charset);
                }
            }
        }

        Self::new(encoding_rs::UTF_8)
    }

    /// Consume this decoder to decode all text from a given reader.
    ///
    /// Nothing is returned unless the reader reaches its end; an error from
    /// the reader discards everything decoded so far.
    pub(crate) fn decode_reader(mut self, mut reader: impl io::Read) -> io::Result<String> {
        let mut buf = [0; 8192];
        let mut unread = 0;

        loop {
            let len = match reader.read(&mut buf[unread..]) {
                Ok(0) => break,
                Ok(len) => len,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            // Carry trailing bytes of a partial character over to the front
            // of the buffer for the next read.
            let total = unread + len;
            unread = self.push(&buf[..total]).len();
            buf.copy_within(total - unread..total, 0);
        }

        Ok(self.finish(&buf[..unread]))
    }

    /// Push additional bytes into the decoder, returning any trailing bytes
    /// that formed a partial character.
    pub(crate) fn push<'b>(&mut self, buf: &'b [u8]) -> &'b [u8] {
        self.decode(buf, false)
    }

    /// Mark the stream as complete and finish the decoding process, returning
    /// the resulting string.
    pub(crate) fn finish(mut self, buf: &[u8]) -> String {
        self.decode(buf, true);
        self.output
    }

    fn decode<'b>(&mut self, mut buf: &'b [u8], last: bool) -> &'b [u8] {
        loop {
            let (result, consumed, _) = self.decoder.decode_to_string(buf, &mut self.output, last);
            buf = &buf[consumed..];

            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => self.output.reserve(
                    self.decoder
                        .max_utf8_buffer_length(buf.len())
                        .unwrap_or(buf.len() * 3),
                ),
            }
        }

        buf
    }
}

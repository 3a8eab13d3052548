use http::{
    header::{HeaderName, HeaderValue},
    HeaderMap, StatusCode, Version,
};
use std::collections::VecDeque;

/// Receives callbacks from curl and incrementally collects the response.
///
/// Curl hands us every header line of every response it sees, including
/// interim `100 Continue` responses and the responses of redirect hops it
/// follows on its own. Each new status line starts the head over, so once
/// body bytes arrive the collected head always belongs to the final response.
#[derive(Debug, Default)]
pub(crate) struct Collector {
    /// Status code of the most recent response head.
    status: Option<StatusCode>,

    /// HTTP version of the most recent response head.
    version: Option<Version>,

    /// Headers of the most recent response head.
    headers: HeaderMap,

    /// Set when the blank line terminating a response head is seen.
    head_complete: bool,

    /// Body bytes received from curl but not yet read by the consumer.
    pub(crate) buffer: VecDeque<u8>,

    /// Set once curl has delivered the first byte of the final response body.
    pub(crate) body_started: bool,

    /// Total number of body bytes received.
    pub(crate) bytes_received: u64,
}

impl Collector {
    /// Returns true if a complete response head has been received.
    pub(crate) fn has_head(&self) -> bool {
        self.head_complete && self.status.is_some()
    }

    /// Build a response out of the head received so far.
    pub(crate) fn response_builder(&mut self) -> http::response::Builder {
        let mut builder = http::Response::builder();

        if let Some(status) = self.status {
            builder = builder.status(status);
        }

        if let Some(version) = self.version {
            builder = builder.version(version);
        }

        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers.drain());
        }

        builder
    }
}

impl curl::easy::Handler for Collector {
    // Gets called by curl for each line of data in the HTTP response header.
    fn header(&mut self, data: &[u8]) -> bool {
        // Curl calls this function for all lines in the response not part of
        // the response body, not just for headers.
        if let Some((version, status)) = parse_status_line(data) {
            self.status = Some(status);
            self.version = Some(version);
            self.headers.clear();
            self.head_complete = false;

            return true;
        }

        if let Some((name, value)) = parse_header(data) {
            self.headers.append(name, value);

            return true;
        }

        if data == b"\r\n" || data == b"\n" {
            self.head_complete = true;

            return true;
        }

        tracing::debug!(
            "ignoring unrecognized response header line: {:?}",
            String::from_utf8_lossy(data)
        );

        true
    }

    // Gets called by curl when bytes from the response body are received.
    fn write(&mut self, data: &[u8]) -> Result<usize, curl::easy::WriteError> {
        tracing::trace!("received {} bytes of response body", data.len());

        self.body_started = true;
        self.bytes_received += data.len() as u64;
        self.buffer.extend(data);

        Ok(data.len())
    }
}

/// Parse a status line such as `HTTP/1.1 404 Not Found`.
pub(crate) fn parse_status_line(line: &[u8]) -> Option<(Version, StatusCode)> {
    let line = std::str::from_utf8(line).ok()?;
    let mut parts = line.split_ascii_whitespace();

    let version = match parts.next()? {
        "HTTP/3" => Version::HTTP_3,
        "HTTP/2" | "HTTP/2.0" => Version::HTTP_2,
        "HTTP/1.1" => Version::HTTP_11,
        "HTTP/1.0" => Version::HTTP_10,
        "HTTP/0.9" => Version::HTTP_09,
        _ => return None,
    };

    let status = StatusCode::from_bytes(parts.next()?.as_bytes()).ok()?;

    Some((version, status))
}

/// Parse a single `name: value` header line.
pub(crate) fn parse_header(line: &[u8]) -> Option<(HeaderName, HeaderValue)> {
    let split = line.iter().position(|&byte| byte == b':')?;
    let name = HeaderName::from_bytes(&line[..split]).ok()?;
    let value = trim(&line[split + 1..]);
    let value = HeaderValue::from_bytes(value).ok()?;

    Some((name, value))
}

fn trim(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if first.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }

    while let [rest @ .., last] = bytes {
        if last.is_ascii_whitespace() {
            bytes = rest;
        } else {
            break;
        }
    }

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use curl::easy::Handler;

    #[test]
    fn parse_http1_status_line() {
        assert_eq!(
            parse_status_line(b"HTTP/1.1 404 Not Found\r\n"),
            Some((Version::HTTP_11, StatusCode::NOT_FOUND))
        );
    }

    #[test]
    fn parse_http2_status_line_without_reason() {
        assert_eq!(
            parse_status_line(b"HTTP/2 200 \r\n"),
            Some((Version::HTTP_2, StatusCode::OK))
        );
    }

    #[test]
    fn parse_invalid_status_line() {
        assert_eq!(parse_status_line(b"content-type: text/plain\r\n"), None);
        assert_eq!(parse_status_line(b"HTTP/1.1 abc\r\n"), None);
        assert_eq!(parse_status_line(b"\r\n"), None);
    }

    #[test]
    fn parse_header_trims_value() {
        let (name, value) = parse_header(b"Content-Type:  text/plain; charset=utf-8 \r\n").unwrap();

        assert_eq!(name, http::header::CONTENT_TYPE);
        assert_eq!(value, "text/plain; charset=utf-8");
    }

    #[test]
    fn parse_header_without_colon() {
        assert!(parse_header(b"garbage\r\n").is_none());
    }

    #[test]
    fn new_status_line_resets_head() {
        let mut collector = Collector::default();

        collector.header(b"HTTP/1.1 301 Moved Permanently\r\n");
        collector.header(b"Location: /elsewhere\r\n");
        collector.header(b"\r\n");
        collector.header(b"HTTP/1.1 200 OK\r\n");
        collector.header(b"Content-Length: 5\r\n");
        collector.header(b"\r\n");

        assert!(collector.has_head());

        let response = collector.response_builder().body(()).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.version(), Version::HTTP_11);
        assert!(response.headers().get("location").is_none());
        assert_eq!(response.headers()["content-length"], "5");
    }

    #[test]
    fn write_buffers_body_bytes() {
        let mut collector = Collector::default();

        assert!(!collector.body_started);
        assert_eq!(collector.write(b"hello").unwrap(), 5);
        assert_eq!(collector.write(b" world").unwrap(), 6);

        assert!(collector.body_started);
        assert_eq!(collector.bytes_received, 11);
        assert_eq!(collector.buffer.iter().copied().collect::<Vec<u8>>(), b"hello world");
    }
}

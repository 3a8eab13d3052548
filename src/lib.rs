//! Fetch a single page over HTTP and print its body.
//!
//! The `fetcher` binary sends one GET request to
//! [`TARGET_URL`], reads the whole response body, and prints it to standard
//! output. The library underneath is a small blocking client built on
//! [curl]; [`run`] performs the whole exchange against any address, which is
//! also how the behavior is tested.
//!
//! # Examples
//!
//! ```no_run
//! use fetcher::ReadResponseExt;
//!
//! let mut response = fetcher::get("https://example.org")?;
//! println!("status: {}", response.status());
//! println!("{}", response.text()?);
//! # Ok::<(), fetcher::Error>(())
//! ```
//!
//! # Feature flags
//!
//! - `text-decoding` (default): decode bodies using the charset from the
//!   `Content-Type` header. Without it, bodies are decoded as lossy UTF-8.
//! - `http2` (default): allow curl to negotiate HTTP/2.
//! - `default-tls`, `native-tls`, `rustls-tls`: choose the TLS backend used
//!   by curl.
//! - `static-curl` (default): build and link a static copy of curl.
//!
//! # Logging
//!
//! Events are emitted through [tracing], with its `log` compatibility
//! enabled, so either a `tracing` subscriber or a `log` logger will see them.
//!
//! [curl]: https://curl.se/libcurl/
//! [tracing]: https://docs.rs/tracing

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

use http::{Response, Uri};
use std::io::Write;

mod body;
mod client;
pub mod config;
mod error;
mod handler;
mod response;
mod text;
mod transport;

pub use crate::{
    body::Body,
    client::{HttpClient, HttpClientBuilder},
    error::{Error, ErrorKind},
    response::ReadResponseExt,
};

/// Re-export of the standard HTTP types.
pub use http;

/// The address fetched by the `fetcher` binary.
pub const TARGET_URL: &str = "https://suse.com/";

/// Send a GET request to the given URI using the default client.
///
/// See [`HttpClient::get`] for details.
pub fn get<U>(uri: U) -> Result<Response<Body>, Error>
where
    Uri: TryFrom<U>,
    <Uri as TryFrom<U>>::Error: Into<http::Error>,
{
    HttpClient::new().get(uri)
}

/// Fetch the given URI and write its body to `out`, followed by a newline.
///
/// The body bytes are written exactly as received, with no decoding, in a
/// single write. The body is read completely before anything is written, so
/// on error `out` is left untouched. The response status is not inspected.
/// The body is released before this function returns, whatever the outcome.
pub fn run<U, W>(uri: U, mut out: W) -> Result<(), Error>
where
    Uri: TryFrom<U>,
    <Uri as TryFrom<U>>::Error: Into<http::Error>,
    W: Write,
{
    let mut response = get(uri)?;
    let mut bytes = response.bytes()?;

    bytes.push(b'\n');

    out.write_all(&bytes)?;
    out.flush()?;

    Ok(())
}

/// Turn the outcome of [`run`] into a process exit status.
///
/// Success is `0`. A failure writes a one-line diagnostic naming `uri` to
/// `stderr` and returns `1`.
pub fn report<W: Write>(uri: &str, result: Result<(), Error>, mut stderr: W) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!("fetch failed: {:?}", e);

            // Nothing better to do if stderr itself is gone.
            let _ = writeln!(stderr, "fetcher: failed to fetch {}: {}", uri, e);

            1
        }
    }
}

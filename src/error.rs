//! Types for error handling.

use std::{error::Error as StdError, fmt, io, sync::Arc};

/// A non-exhaustive list of error types that can occur while fetching a
/// resource.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Failed to connect to the server, or the connection was lost before a
    /// response was received.
    ConnectionFailed,

    /// Couldn't resolve the host name of the server.
    NameResolution,

    /// The server certificate could not be validated.
    BadServerCertificate,

    /// An error occurred in the secure socket engine, or the TLS handshake
    /// failed.
    TlsEngine,

    /// Number of redirects hit the maximum amount.
    TooManyRedirects,

    /// The request could not be built, usually because of a malformed or
    /// unsupported URI.
    InvalidRequest,

    /// An error occurred while reading the response body, after the response
    /// head had already been received.
    ResponseBodyError,

    /// An I/O error unrelated to the transfer itself, such as failing to
    /// write the output.
    Io,

    /// An unknown error occurred. This likely indicates a problem in the HTTP
    /// engine that is not understood by this crate.
    Unknown,
}

impl ErrorKind {
    fn description(&self) -> &str {
        match self {
            Self::ConnectionFailed => "failed to connect to the server",
            Self::NameResolution => "couldn't resolve host name",
            Self::BadServerCertificate => "the server certificate could not be validated",
            Self::TlsEngine => "failed to establish a secure connection",
            Self::TooManyRedirects => "max redirect limit exceeded",
            Self::InvalidRequest => "invalid HTTP request",
            Self::ResponseBodyError => "failed to read the response body",
            Self::Io => "unknown I/O error",
            Self::Unknown => "unknown error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// An error encountered while sending the request or receiving the response.
///
/// Errors are cheap to clone, which lets them travel through an
/// [`io::Error`] while a response body is being read and come back out
/// intact.
#[derive(Clone)]
pub struct Error(Arc<Inner>);

struct Inner {
    kind: ErrorKind,
    context: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    /// Create a new error from a given error kind and source error.
    pub(crate) fn new<E>(kind: ErrorKind, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(Inner {
            kind,
            context: None,
            source: Some(Box::new(source)),
        }))
    }

    /// Create a new error with an extra message but no source.
    pub(crate) fn with_context(kind: ErrorKind, context: impl Into<String>) -> Self {
        Self(Arc::new(Inner {
            kind,
            context: Some(context.into()),
            source: None,
        }))
    }

    /// Create an error from a curl error that occurred while the response
    /// body was already streaming. Whatever curl thinks went wrong, the
    /// caller only sees a failed body read.
    pub(crate) fn from_body_failure(error: curl::Error) -> Self {
        let context = error.extra_description().map(str::to_owned);

        Self(Arc::new(Inner {
            kind: ErrorKind::ResponseBodyError,
            context,
            source: Some(Box::new(error)),
        }))
    }

    /// Get the kind of error this represents.
    pub fn kind(&self) -> &ErrorKind {
        &self.0.kind
    }

    /// Returns true if the request could not be established or did not get a
    /// response.
    pub fn is_connect(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ConnectionFailed
                | ErrorKind::NameResolution
                | ErrorKind::BadServerCertificate
                | ErrorKind::TlsEngine
                | ErrorKind::TooManyRedirects
        )
    }

    /// Returns true if the response body stream failed while being consumed.
    pub fn is_read(&self) -> bool {
        self.kind() == &ErrorKind::ResponseBodyError
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source.as_ref().map(|source| &**source as _)
    }
}

impl PartialEq<ErrorKind> for Error {
    fn eq(&self, kind: &ErrorKind) -> bool {
        self.kind().eq(kind)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind())
            .field("context", &self.0.context)
            .field("source", &self.0.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.0.context, &self.0.source) {
            (Some(context), _) => write!(f, "{}: {}", self.kind(), context),
            (None, Some(source)) => write!(f, "{}: {}", self.kind(), source),
            (None, None) => write!(f, "{}", self.kind()),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self(Arc::new(Inner {
            kind,
            context: None,
            source: None,
        }))
    }
}

#[doc(hidden)]
impl From<curl::Error> for Error {
    fn from(error: curl::Error) -> Error {
        let kind = if error.is_couldnt_connect()
            || error.is_got_nothing()
            || error.is_send_error()
            || error.is_recv_error()
        {
            ErrorKind::ConnectionFailed
        } else if error.is_couldnt_resolve_host() || error.is_couldnt_resolve_proxy() {
            ErrorKind::NameResolution
        } else if error.is_peer_failed_verification() || error.is_ssl_cacert() {
            ErrorKind::BadServerCertificate
        } else if error.is_ssl_connect_error()
            || error.is_ssl_engine_initfailed()
            || error.is_ssl_engine_notfound()
            || error.is_ssl_engine_setfailed()
        {
            ErrorKind::TlsEngine
        } else if error.is_too_many_redirects() {
            ErrorKind::TooManyRedirects
        } else if error.is_url_malformed() || error.is_unsupported_protocol() {
            ErrorKind::InvalidRequest
        } else if error.is_partial_file() || error.is_write_error() {
            ErrorKind::ResponseBodyError
        } else {
            ErrorKind::Unknown
        };

        let context = error.extra_description().map(str::to_owned);

        Self(Arc::new(Inner {
            kind,
            context,
            source: Some(Box::new(error)),
        }))
    }
}

#[doc(hidden)]
impl From<curl::MultiError> for Error {
    fn from(error: curl::MultiError) -> Error {
        Self::new(ErrorKind::Unknown, error)
    }
}

#[doc(hidden)]
impl From<http::Error> for Error {
    fn from(error: http::Error) -> Error {
        Self::new(ErrorKind::InvalidRequest, error)
    }
}

#[doc(hidden)]
impl From<io::Error> for Error {
    fn from(error: io::Error) -> Error {
        // Errors raised while reading a body are smuggled through io::Error;
        // unwrap them back into the original.
        if error.get_ref().map(|inner| inner.is::<Error>()).unwrap_or(false) {
            return match error.into_inner().map(|inner| inner.downcast::<Error>()) {
                Some(Ok(inner)) => *inner,
                _ => ErrorKind::Io.into(),
            };
        }

        match error.kind() {
            io::ErrorKind::ConnectionRefused => Self::new(ErrorKind::ConnectionFailed, error),
            _ => Self::new(ErrorKind::Io, error),
        }
    }
}

#[doc(hidden)]
impl From<Error> for io::Error {
    fn from(error: Error) -> io::Error {
        let kind = match error.kind() {
            ErrorKind::ConnectionFailed => io::ErrorKind::ConnectionRefused,
            ErrorKind::ResponseBodyError => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::Other,
        };

        Self::new(kind, error)
    }
}

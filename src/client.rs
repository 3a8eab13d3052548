//! The HTTP client implementation.

use crate::{config::RedirectPolicy, transport::Transport, Body, Error};
use http::{Response, Uri};

/// An HTTP client builder, capable of creating custom [`HttpClient`]
/// instances with customized behavior.
///
/// # Examples
///
/// ```
/// use fetcher::{config::RedirectPolicy, HttpClient};
///
/// let client = HttpClient::builder()
///     .redirect_policy(RedirectPolicy::None)
///     .build();
/// ```
#[derive(Clone, Debug, Default)]
pub struct HttpClientBuilder {
    redirect_policy: RedirectPolicy,
}

impl HttpClientBuilder {
    /// Create a new builder for building a custom client. All configuration
    /// will start out with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a policy for automatically following server redirects.
    ///
    /// The default is to follow up to 10 redirects.
    pub fn redirect_policy(mut self, policy: RedirectPolicy) -> Self {
        self.redirect_policy = policy;
        self
    }

    /// Build an [`HttpClient`] using the configured options.
    pub fn build(self) -> HttpClient {
        HttpClient {
            redirect_policy: self.redirect_policy,
        }
    }
}

/// An HTTP client for making blocking GET requests.
///
/// Each request runs its own transfer on the calling thread; there is no
/// background agent and no connection reuse between requests.
#[derive(Clone, Debug, Default)]
pub struct HttpClient {
    redirect_policy: RedirectPolicy,
}

impl HttpClient {
    /// Create a new HTTP client using the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`HttpClientBuilder`] for building a custom client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Send a GET request to the given URI.
    ///
    /// Blocks until the head of the final response has been received. The
    /// status code is not inspected; a `404` is returned like any other
    /// response. The body is streamed from the network as it is read, and the
    /// connection is released when the body is dropped.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fetcher::{HttpClient, ReadResponseExt};
    ///
    /// let client = HttpClient::new();
    /// let mut response = client.get("https://example.org")?;
    /// println!("{}", response.text()?);
    /// # Ok::<(), fetcher::Error>(())
    /// ```
    pub fn get<U>(&self, uri: U) -> Result<Response<Body>, Error>
    where
        Uri: TryFrom<U>,
        <Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        let uri = Uri::try_from(uri)
            .map_err(|e| Error::from(Into::<http::Error>::into(e)))?;

        self.send_get(uri)
    }

    fn send_get(&self, uri: Uri) -> Result<Response<Body>, Error> {
        let span = tracing::debug_span!("request", method = "GET", uri = %uri);
        let _enter = span.enter();

        let (transport, builder) = Transport::execute(&uri, self.redirect_policy)?;
        let response = builder.body(Body::from_source(transport))?;

        tracing::debug!(
            status = response.status().as_u16(),
            version = ?response.version(),
            "received response head"
        );

        Ok(response)
    }
}

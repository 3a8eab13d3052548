use crate::{request::Request, response::Response};

/// Produces a response for a request received by a mock.
///
/// Returning `None` makes the mock answer with an empty `404`.
pub trait Responder: Send + Sync + 'static {
    fn respond(&self, request: &Request) -> Option<Response>;
}

impl<F> Responder for F
where
    F: Fn(&Request) -> Option<Response> + Send + Sync + 'static,
{
    fn respond(&self, request: &Request) -> Option<Response> {
        (self)(request)
    }
}

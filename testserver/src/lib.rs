//! Mock HTTP servers for integration tests.

mod mock;
mod pool;
mod raw;
mod request;
mod responder;
mod response;

pub use mock::Mock;
pub use raw::{refused_url, RawServer};
pub use request::Request;
pub use responder::Responder;
pub use response::Response;

/// Macro to define a mock endpoint using a more concise DSL.
///
/// ```ignore
/// let m = mock! {
///     status: 404,
///     body: "not found",
///     headers {
///         "content-type": "text/plain",
///     }
/// };
/// ```
#[macro_export]
macro_rules! mock {
    (@response($response:expr) status: $status:expr, $($tail:tt)*) => {{
        let mut response = $response;

        response.status_code = $status as u16;

        $crate::mock!(@response(response) $($tail)*)
    }};

    (@response($response:expr) body: $body:expr, $($tail:tt)*) => {{
        let mut response = $response;

        response.body = $body.into();

        $crate::mock!(@response(response) $($tail)*)
    }};

    (@response($response:expr) headers {
        $(
            $name:literal: $value:expr,
        )*
    } $($tail:tt)*) => {{
        let mut response = $response;

        $(
            response.headers.push(($name.to_string(), $value.to_string()));
        )*

        $crate::mock!(@response(response) $($tail)*)
    }};

    (@response($response:expr)) => {{
        $response
    }};

    ($($inner:tt)*) => {{
        $crate::Mock::new(move |_: &$crate::Request| {
            let response = $crate::Response::default();

            Some($crate::mock!(@response(response) $($inner)*))
        })
    }};
}

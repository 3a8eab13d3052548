//! A tiny mock HTTP server that records incoming requests and answers them
//! with canned responses.

use crate::{pool::pool, request::Request, responder::Responder, response::Response};
use std::{
    io::Read,
    net::SocketAddr,
    sync::{Arc, Mutex},
};
use tiny_http::Server;

/// A mock HTTP endpoint.
#[derive(Clone)]
pub struct Mock(Arc<Inner>);

struct Inner {
    server: Server,

    /// Requests received so far, in order of arrival.
    requests: Mutex<Vec<Request>>,

    responder: Box<dyn Responder>,
}

impl Mock {
    /// Start a new mock server answering every request with the given
    /// responder.
    pub fn new<R: Responder>(responder: R) -> Self {
        let mock = Mock(Arc::new(Inner {
            server: Server::http("127.0.0.1:0").unwrap(),
            requests: Default::default(),
            responder: Box::new(responder),
        }));

        pool().execute({
            let mock = mock.clone();

            move || {
                for request in mock.0.server.incoming_requests() {
                    mock.handle_request(request);
                }
            }
        });

        mock
    }

    /// Get the socket address of this mock server.
    pub fn addr(&self) -> SocketAddr {
        self.0
            .server
            .server_addr()
            .to_ip()
            .expect("mock server is not listening on TCP")
    }

    /// Get the HTTP URL of this mock server.
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr())
    }

    /// Get all requests received by this mock so far.
    pub fn requests(&self) -> Vec<Request> {
        self.0.requests.lock().unwrap().clone()
    }

    /// Get the first request received by this mock.
    pub fn request(&self) -> Request {
        self.requests()
            .into_iter()
            .next()
            .expect("no request received")
    }

    fn handle_request(&self, mut request: tiny_http::Request) {
        let mut body = Vec::new();
        request.as_reader().read_to_end(&mut body).unwrap();

        let mock_request = Request {
            method: request.method().to_string(),
            url: request.url().to_string(),
            headers: request
                .headers()
                .iter()
                .map(|header| (header.field.to_string(), header.value.to_string()))
                .collect(),
            body,
        };

        let response = self
            .0
            .responder
            .respond(&mock_request)
            .unwrap_or_else(|| Response {
                status_code: 404,
                ..Response::default()
            });

        self.0.requests.lock().unwrap().push(mock_request);

        request.respond(response.into_http_response()).ok();
    }
}

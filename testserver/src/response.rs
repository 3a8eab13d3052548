use std::io::Cursor;

#[derive(Clone, Debug)]
pub struct Response {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status_code: 200,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }
}

impl Response {
    pub(crate) fn into_http_response(self) -> tiny_http::Response<Cursor<Vec<u8>>> {
        let len = self.body.len();

        tiny_http::Response::new(
            self.status_code.into(),
            self.headers
                .into_iter()
                .filter_map(|(name, value)| tiny_http::Header::from_bytes(name, value).ok())
                .collect(),
            Cursor::new(self.body),
            Some(len),
            None,
        )
    }
}

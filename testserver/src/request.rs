/// A record of a request received by a mock.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Request {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    pub fn get_header(&self, name: impl AsRef<str>) -> impl Iterator<Item = String> + '_ {
        let name_lower = name.as_ref().to_lowercase();

        self.headers
            .iter()
            .filter(move |(name, _)| name.to_lowercase() == name_lower)
            .map(|(_, value)| value.clone())
    }

    pub fn expect_no_header(&self, name: impl AsRef<str>) {
        let name = name.as_ref();

        if let Some(value) = self.get_header(name).next() {
            panic!("expected no header named `{}`, found `{}`", name, value);
        }
    }
}

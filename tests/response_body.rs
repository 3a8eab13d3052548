use fetcher::ReadResponseExt;
use std::io::{self, Read};
use testserver::mock;

#[test]
fn simple_response_body() {
    let m = mock! {
        body: "hello world",
    };

    let mut response = fetcher::get(m.url()).unwrap();
    let response_text = response.text().unwrap();

    assert_eq!(response_text, "hello world");
    assert_eq!(m.requests().len(), 1);
}

#[test]
fn large_response_body() {
    let m = mock! {
        body: "wow so large ".repeat(10_000),
    };

    let mut response = fetcher::get(m.url()).unwrap();
    let response_text = response.text().unwrap();

    assert_eq!(response_text, "wow so large ".repeat(10_000));
}

#[test]
fn response_headers_are_available() {
    let m = mock! {
        body: "hello",
        headers {
            "x-served-by": "mock",
        }
    };

    let response = fetcher::get(m.url()).unwrap();

    assert_eq!(response.headers()["x-served-by"], "mock");
    assert_eq!(response.headers()["content-length"], "5");
}

#[test]
fn text_honors_charset() {
    let m = mock! {
        body: b"caf\xe9".to_vec(),
        headers {
            "content-type": "text/plain; charset=iso-8859-1",
        }
    };

    let mut response = fetcher::get(m.url()).unwrap();

    assert_eq!(response.text().unwrap(), "caf\u{e9}");
}

#[test]
fn text_replaces_invalid_utf8() {
    let m = mock! {
        body: b"bad \xff byte".to_vec(),
    };

    let mut response = fetcher::get(m.url()).unwrap();

    assert_eq!(response.text().unwrap(), "bad \u{fffd} byte");
}

#[test]
fn copy_to_writes_raw_bytes() {
    let m = mock! {
        body: "raw bytes",
    };

    let mut response = fetcher::get(m.url()).unwrap();
    let mut buf = Vec::new();

    assert_eq!(response.copy_to(&mut buf).unwrap(), 9);
    assert_eq!(buf, b"raw bytes");
}

#[test]
fn reading_from_response_body_after_eof_continues_to_return_eof() {
    let m = mock! {
        body: "hello world",
    };

    let mut response = fetcher::get(m.url()).unwrap();
    let body = response.body_mut();

    // Read until EOF
    io::copy(body, &mut io::sink()).unwrap();

    // Read after already receiving EOF
    let mut buf = [0; 1024];
    for _ in 0..3 {
        assert_eq!(body.read(&mut buf).unwrap(), 0);
    }
}

#[test]
fn dropping_unread_body_releases_connection() {
    let m = mock! {
        body: "hello world\n".repeat(8192),
    };

    let response = fetcher::get(m.url()).unwrap();
    drop(response);

    // A fresh request still gets the whole body.
    let mut response = fetcher::get(m.url()).unwrap();

    assert_eq!(response.text().unwrap().len(), 12 * 8192);
    assert_eq!(m.requests().len(), 2);
}

//! End-to-end behavior of `fetcher::run`, the routine behind the binary.

use testserver::{mock, refused_url, RawServer};

#[test]
fn prints_body_followed_by_newline() {
    env_logger::try_init().ok();

    let m = mock! {
        body: "hello",
    };

    let mut out = Vec::new();
    fetcher::run(m.url(), &mut out).unwrap();

    assert_eq!(out, b"hello\n");
    assert_eq!(m.requests().len(), 1);
}

#[test]
fn status_code_is_not_inspected() {
    let m = mock! {
        status: 404,
        body: "not found",
    };

    let mut out = Vec::new();
    fetcher::run(m.url(), &mut out).unwrap();

    assert_eq!(out, b"not found\n");
}

#[test]
fn empty_body_prints_only_newline() {
    let m = mock! {
        status: 200,
    };

    let mut out = Vec::new();
    fetcher::run(m.url(), &mut out).unwrap();

    assert_eq!(out, b"\n");
}

#[test]
fn invalid_utf8_body_is_printed_verbatim() {
    let m = mock! {
        body: b"bad \xff byte".to_vec(),
    };

    let mut out = Vec::new();
    fetcher::run(m.url(), &mut out).unwrap();

    assert_eq!(out, b"bad \xff byte\n");
}

#[test]
fn latin1_body_is_printed_verbatim() {
    let m = mock! {
        body: b"caf\xe9".to_vec(),
        headers {
            "content-type": "text/plain; charset=iso-8859-1",
        }
    };

    let mut out = Vec::new();
    fetcher::run(m.url(), &mut out).unwrap();

    assert_eq!(out, b"caf\xe9\n");
}

#[test]
fn refused_connection_fails_without_output() {
    let mut out = Vec::new();
    let error = fetcher::run(refused_url(), &mut out).unwrap_err();

    assert!(error.is_connect(), "unexpected error: {:?}", error);
    assert_eq!(error, fetcher::ErrorKind::ConnectionFailed);
    assert!(out.is_empty());
}

#[test]
fn truncated_body_fails_without_partial_output() {
    let server = RawServer::truncated(100, "hello");

    let mut out = Vec::new();
    let error = fetcher::run(server.url(), &mut out).unwrap_err();

    assert!(error.is_read(), "unexpected error: {:?}", error);
    assert!(out.is_empty());
    assert_eq!(server.connections(), 1);
}

#[test]
fn invalid_uri_is_rejected_before_connecting() {
    let mut out = Vec::new();
    let error = fetcher::run("not a uri", &mut out).unwrap_err();

    assert_eq!(error, fetcher::ErrorKind::InvalidRequest);
    assert!(out.is_empty());
}

#[test]
fn diagnostic_names_the_failure() {
    let error = fetcher::run(refused_url(), Vec::new()).unwrap_err();

    assert!(error.to_string().starts_with("failed to connect to the server"));
}

#[test]
fn successful_fetch_exits_zero_without_diagnostic() {
    let m = mock! {
        body: "hello",
    };

    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = fetcher::run(m.url(), &mut out);

    assert_eq!(fetcher::report(&m.url(), result, &mut err), 0);
    assert_eq!(out, b"hello\n");
    assert!(err.is_empty());
}

#[test]
fn refused_connection_exits_nonzero_with_diagnostic() {
    let url = refused_url();

    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = fetcher::run(url.as_str(), &mut out);

    assert_eq!(fetcher::report(&url, result, &mut err), 1);
    assert!(out.is_empty());

    let err = String::from_utf8(err).unwrap();
    assert!(err.starts_with(&format!("fetcher: failed to fetch {}: ", url)));
    assert!(err.ends_with('\n'));
    assert_eq!(err.lines().count(), 1);
}

#[test]
fn truncated_body_exits_nonzero_with_diagnostic() {
    let server = RawServer::truncated(100, "hello");

    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = fetcher::run(server.url(), &mut out);

    assert_eq!(fetcher::report(&server.url(), result, &mut err), 1);
    assert!(out.is_empty());
    assert!(String::from_utf8(err)
        .unwrap()
        .contains("failed to read the response body"));
}

#[test]
fn target_url_is_fixed() {
    assert_eq!(fetcher::TARGET_URL, "https://suse.com/");
}

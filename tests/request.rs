use testserver::mock;

#[test]
fn sends_bare_get_request() {
    let m = mock! {
        body: "ok",
    };

    let response = fetcher::get(m.url()).unwrap();
    drop(response);

    let request = m.request();

    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "/");
    assert!(request.body.is_empty());
    request.expect_no_header("user-agent");
    request.expect_no_header("content-length");
}

#[test]
fn path_and_query_are_sent_verbatim() {
    let m = mock! {};

    fetcher::get(format!("{}index.html?lang=en", m.url())).unwrap();

    assert_eq!(m.request().url, "/index.html?lang=en");
}

#[test]
fn each_get_is_one_request() {
    let m = mock! {
        body: "once",
    };

    let client = fetcher::HttpClient::new();
    client.get(m.url()).unwrap();
    client.get(m.url()).unwrap();

    assert_eq!(m.requests().len(), 2);
}

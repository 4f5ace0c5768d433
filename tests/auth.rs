//! Login and token handling

mod common;

use common::{login_mock, version_mock, TestServer};
use molcmd::errors::Error;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn token_is_empty_before_login() {
    let ts = TestServer::start();
    let client = ts.client();
    assert_eq!(client.auth().token(), "");
}

#[test]
fn login_stores_the_token_and_requests_carry_it() {
    let ts = TestServer::start();
    ts.mount(login_mock("tok-123").expect(1));
    ts.mount(
        Mock::given(method("GET"))
            .and(path("/api/v2/version"))
            .and(header("x-molgenis-token", "tok-123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"molgenisVersion": "8.1.0"})),
            )
            .expect(1),
    );

    let client = ts.client();
    client.auth().login().unwrap();
    assert_eq!(client.auth().token(), "tok-123");
    assert_eq!(client.version().unwrap(), "8.1.0");
}

#[test]
fn failed_login_is_an_auth_error() {
    let ts = TestServer::start();
    ts.mount(
        Mock::given(method("POST"))
            .and(path("/api/v1/login"))
            .respond_with(ResponseTemplate::new(401)),
    );

    let client = ts.client();
    let err = client.auth().login().unwrap_err();
    assert!(matches!(err, Error::Auth(_)), "got {:?}", err);
}

#[test]
fn login_response_without_a_token_is_an_auth_error() {
    let ts = TestServer::start();
    ts.mount(
        Mock::given(method("POST"))
            .and(path("/api/v1/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"username": "admin"}))),
    );

    let client = ts.client();
    let err = client.auth().login().unwrap_err();
    match err {
        Error::Auth(message) => assert!(message.contains("token"), "got {}", message),
        other => panic!("expected Auth error, got {:?}", other),
    }
}

#[test]
fn relogin_replaces_the_token_wholesale() {
    let ts = TestServer::start();
    // first exchange answers once, then the fallback takes over
    ts.mount(login_mock("first").up_to_n_times(1));
    ts.mount(login_mock("second"));
    ts.mount(version_mock("8.1.0"));

    let client = ts.client();
    client.auth().login().unwrap();
    assert_eq!(client.auth().token(), "first");
    client.auth().login().unwrap();
    assert_eq!(client.auth().token(), "second");
    client.version().unwrap();
}

//! Request composition of the shared executor

use crate::integration::mock_server::{MockServerFixture, BASIC_AUTH};
use mockito::Matcher;
use robo_sdk::robo_ai::CallContext;
use robo_sdk::transport::{Auth, FormData, HttpExecutor, RequestMethod, RequestOptions};
use robo_sdk::{RoboAiError, Session, TransportError};
use serde_json::json;
use std::rc::Rc;

fn executor(fixture: &MockServerFixture, session: Session) -> HttpExecutor {
    HttpExecutor::new(Rc::new(fixture.config()), session).expect("executor")
}

#[test]
fn test_execute_raw_returns_body_bytes() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture
        .server
        .mock("GET", "/raw")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("not json at all")
        .create();

    let body = executor(&fixture, Session::new())
        .execute_raw(
            RequestMethod::Get,
            "/raw",
            RequestOptions::new(),
            &CallContext::Resource,
        )
        .expect("raw body");
    assert_eq!(&body[..], b"not json at all");
}

#[test]
fn test_send_does_not_interpret_status() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_json("GET", "/teapot", 418, r#"{"message":"short and stout"}"#);

    let response = executor(&fixture, Session::new())
        .send(RequestMethod::Get, "/teapot", RequestOptions::new())
        .expect("response");
    assert_eq!(response.status(), 418);
    assert!(!response.is_success());
    assert_eq!(response.detail().as_deref(), Some("short and stout"));
}

#[test]
fn test_query_params_json_body_and_custom_header() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("PUT", "/things/7")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("dry_run".into(), "true".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .match_header("x-trace", "abc")
        .match_header("content-type", "application/json")
        .match_header("authorization", "bearer tok")
        .match_body(Matcher::Json(json!({"name": "seven"})))
        .with_status(200)
        .with_body(r#"{"ok": true}"#)
        .create();

    let options = RequestOptions::new()
        .param("dry_run", true)
        .param("limit", 5)
        .header("x-trace", "abc")
        .header("content-type", "text/plain")
        .json(&json!({"name": "seven"}))
        .expect("json body");
    let value: serde_json::Value = executor(&fixture, Session::with_token("tok"))
        .execute(
            RequestMethod::Put,
            "/things/7",
            options,
            &CallContext::Resource,
        )
        .expect("decoded");

    mock.assert();
    assert_eq!(value, json!({"ok": true}));
}

#[test]
fn test_computed_auth_overrides_caller_header() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("GET", "/secure")
        .match_header("authorization", BASIC_AUTH)
        .with_status(204)
        .create();

    executor(&fixture, Session::new())
        .execute_raw(
            RequestMethod::Get,
            "/secure",
            RequestOptions::new()
                .header("Authorization", "bearer forged")
                .auth(Auth::Basic),
            &CallContext::Resource,
        )
        .expect("accepted");
    mock.assert();
}

#[test]
fn test_auth_headers_can_be_disabled() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("GET", "/public")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("{}")
        .create();

    executor(&fixture, Session::with_token("tok"))
        .execute_raw(
            RequestMethod::Get,
            "/public",
            RequestOptions::new().use_auth_headers(false),
            &CallContext::Resource,
        )
        .expect("ok");
    mock.assert();
}

#[test]
fn test_text_only_form_is_url_encoded() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("POST", "/form")
        .match_header(
            "content-type",
            Matcher::Regex("^application/x-www-form-urlencoded".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("a".into(), "1".into()),
            Matcher::UrlEncoded("b".into(), "two words".into()),
        ]))
        .with_status(200)
        .create();

    executor(&fixture, Session::new())
        .execute_raw(
            RequestMethod::Post,
            "/form",
            RequestOptions::new().form(FormData::new().text("a", "1").text("b", "two words")),
            &CallContext::Resource,
        )
        .expect("ok");
    mock.assert();
}

#[test]
fn test_conflicting_body_never_dispatches() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture.server.mock("POST", "/both").expect(0).create();

    let err = executor(&fixture, Session::new())
        .execute_raw(
            RequestMethod::Post,
            "/both",
            RequestOptions::new()
                .json_value(json!({"a": 1}))
                .form(FormData::new().text("b", "2")),
            &CallContext::Resource,
        )
        .unwrap_err();

    mock.assert();
    assert!(matches!(
        err,
        RoboAiError::Transport(TransportError::ConflictingBody)
    ));
}

#[test]
fn test_connection_failure_is_transport_error() {
    let config = robo_sdk::Config::new("http://127.0.0.1:9", "client", "secret").expect("config");

    let err = HttpExecutor::new(Rc::new(config), Session::new())
        .expect("executor")
        .send(RequestMethod::Get, "/anything", RequestOptions::new())
        .unwrap_err();
    assert!(matches!(err, TransportError::Http(_)));
}

//! Token issuance and introspection against a mock server

use crate::integration::mock_server::{MockServerFixture, BASIC_AUTH};
use mockito::Matcher;
use robo_sdk::robo_ai::{AccessInfo, AccessToken};
use robo_sdk::RoboAiError;

const TOKEN_BODY: &str =
    r#"{"access_token":"t","token_type":"bearer","expires_in":3600,"scope":"x"}"#;

#[test]
fn test_authenticate_returns_access_token() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("POST", "/oauth/token")
        .match_header("authorization", BASIC_AUTH)
        .match_header(
            "content-type",
            Matcher::Regex("application/x-www-form-urlencoded".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
            Matcher::UrlEncoded("apiKey".into(), "k".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TOKEN_BODY)
        .create();

    let client = fixture.robo_ai();
    let token = client.oauth().authenticate("k").expect("token");

    mock.assert();
    assert_eq!(
        token,
        AccessToken {
            access_token: "t".into(),
            token_type: "bearer".into(),
            expires_in: 3600,
            scope: "x".into(),
        }
    );
    // Issuing a token never stores it.
    assert!(!client.session().is_authenticated());
}

#[test]
fn test_authenticate_401_is_invalid_credentials() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_json("POST", "/oauth/token", 401, r#"{"error":"unauthorized"}"#);

    let err = fixture.robo_ai().oauth().authenticate("k").unwrap_err();
    assert!(
        matches!(err, RoboAiError::InvalidCredentials { .. }),
        "got {err:?}"
    );
}

#[test]
fn test_authenticate_other_status_is_api_error() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_json("POST", "/oauth/token", 503, "{}");

    let err = fixture.robo_ai().oauth().authenticate("k").unwrap_err();
    assert!(matches!(err, RoboAiError::Api { status: 503, .. }));
}

#[test]
fn test_authenticate_uses_basic_auth_even_with_session_token() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("POST", "/oauth/token")
        .match_header("authorization", BASIC_AUTH)
        .with_status(200)
        .with_body(TOKEN_BODY)
        .create();

    let client = fixture.robo_ai();
    client.set_session_token("old-token");
    client.oauth().authenticate("k").expect("token");

    mock.assert();
    assert_eq!(client.session().access_token().as_deref(), Some("old-token"));
}

#[test]
fn test_get_token_info() {
    let mut fixture = MockServerFixture::new();
    let mock = fixture
        .server
        .mock("POST", "/oauth/check_token/")
        .match_header("authorization", BASIC_AUTH)
        .match_body(Matcher::UrlEncoded("token".into(), "t".into()))
        .with_status(200)
        .with_body(
            r#"{"active":true,"exp":1700000000,"authorities":["ROLE_A","ROLE_B"],
                "client_id":"client","scope":"read"}"#,
        )
        .create();

    let info = fixture.robo_ai().oauth().get_token_info("t").expect("info");
    mock.assert();
    assert_eq!(
        info,
        AccessInfo {
            active: true,
            exp: 1_700_000_000,
            authorities: vec!["ROLE_A".into(), "ROLE_B".into()],
            client_id: "client".into(),
            scope: "read".into(),
        }
    );
}

#[test]
fn test_get_token_info_401_is_invalid_token() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_json("POST", "/oauth/check_token/", 401, "{}");

    let err = fixture.robo_ai().oauth().get_token_info("bad").unwrap_err();
    assert!(matches!(err, RoboAiError::InvalidToken { .. }), "got {err:?}");
}

#[test]
fn test_malformed_token_body_is_decode_error() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_json("POST", "/oauth/token", 200, r#"{"access_token":"t"}"#);

    let err = fixture.robo_ai().oauth().authenticate("k").unwrap_err();
    assert!(matches!(err, RoboAiError::Decode(_)));
}

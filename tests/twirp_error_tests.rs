use genai_rpc::rpc::{TwirpErrorCode, TwirpErrorEnvelope};
use std::collections::BTreeMap;

#[test]
fn test_well_formed_body_is_used_as_is() {
    let envelope = TwirpErrorEnvelope::from_response_body(
        404,
        "Not Found",
        br#"{"code":"not_found","msg":"missing"}"#,
    );

    assert_eq!(envelope.code, "not_found");
    assert_eq!(envelope.msg, "missing");
    assert!(envelope.meta.is_empty());
    assert_eq!(envelope.error_code(), TwirpErrorCode::NotFound);
}

#[test]
fn test_meta_is_carried_when_present() {
    let envelope = TwirpErrorEnvelope::from_response_body(
        400,
        "Bad Request",
        br#"{"code":"invalid_argument","msg":"bad uuid","meta":{"argument":"prompt_uuid"}}"#,
    );

    assert_eq!(
        envelope.meta,
        BTreeMap::from([("argument".to_string(), "prompt_uuid".to_string())])
    );
}

#[test]
fn test_unparsable_body_falls_back_to_internal() {
    let envelope = TwirpErrorEnvelope::from_response_body(
        500,
        "Internal Server Error",
        b"<html><body>Bad Gateway</body></html>",
    );

    assert_eq!(
        envelope,
        TwirpErrorEnvelope {
            code: "internal".into(),
            msg: "HTTP 500: Internal Server Error".into(),
            meta: BTreeMap::new(),
        }
    );
}

#[test]
fn test_empty_body_falls_back_to_internal() {
    let envelope = TwirpErrorEnvelope::from_response_body(503, "Service Unavailable", b"");

    assert_eq!(envelope.code, "internal");
    assert_eq!(envelope.msg, "HTTP 503: Service Unavailable");
}

#[test]
fn test_unexpected_shape_falls_back_to_internal() {
    for body in [
        &br#"{"code":"not_found"}"#[..],
        br#"{"error":"nope"}"#,
        br#"["not_found","missing"]"#,
        br#"{"code":404,"msg":"missing"}"#,
    ] {
        let envelope = TwirpErrorEnvelope::from_response_body(404, "Not Found", body);
        assert_eq!(envelope, TwirpErrorEnvelope::fallback(404, "Not Found"));
    }
}

#[test]
fn test_error_codes_map_to_and_from_strings() {
    for code in [
        "canceled",
        "invalid_argument",
        "deadline_exceeded",
        "permission_denied",
        "unauthenticated",
        "internal",
        "data_loss",
    ] {
        let parsed = TwirpErrorCode::from(code);
        assert!(!matches!(parsed, TwirpErrorCode::Other(_)), "{}", code);
        assert_eq!(parsed.as_str(), code);
        assert_eq!(parsed.to_string(), code);
    }

    assert_eq!(
        TwirpErrorCode::from("quota_exceeded"),
        TwirpErrorCode::Other("quota_exceeded".into())
    );
    assert_eq!(TwirpErrorCode::from("quota_exceeded").as_str(), "quota_exceeded");
}

#[test]
fn test_null_meta_keeps_peer_error() {
    let envelope = TwirpErrorEnvelope::from_response_body(
        404,
        "Not Found",
        br#"{"code":"not_found","msg":"missing","meta":null}"#,
    );

    assert_eq!(envelope.code, "not_found");
    assert_eq!(envelope.msg, "missing");
    assert!(envelope.meta.is_empty());
}

#[test]
fn test_malformed_meta_keeps_peer_error() {
    let envelope = TwirpErrorEnvelope::from_response_body(
        429,
        "Too Many Requests",
        br#"{"code":"resource_exhausted","msg":"slow down","meta":{"retry":3,"scope":"user","hint":null}}"#,
    );

    assert_eq!(envelope.code, "resource_exhausted");
    assert_eq!(envelope.msg, "slow down");
    assert_eq!(
        envelope.meta,
        BTreeMap::from([
            ("retry".to_string(), "3".to_string()),
            ("scope".to_string(), "user".to_string()),
        ])
    );

    for meta in ["[1,2]", "\"oops\"", "7"] {
        let body = format!(r#"{{"code":"not_found","msg":"missing","meta":{}}}"#, meta);
        let envelope = TwirpErrorEnvelope::from_response_body(404, "Not Found", body.as_bytes());
        assert_eq!(envelope.code, "not_found", "{}", meta);
        assert!(envelope.meta.is_empty(), "{}", meta);
    }
}

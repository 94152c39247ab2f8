//! 响应解析与成败判定测试。

use serde_json::json;

use crate::uploader::{ResponseOutcome, classify, is_truthy, parse_response_document};

#[test]
fn object_body_is_kept_as_document() {
    let doc = parse_response_document(r#"{"success":true,"newUuid":"abc"}"#);
    assert_eq!(doc.get("newUuid"), Some(&json!("abc")));
    assert_eq!(classify(200, &doc), ResponseOutcome::Success);
}

#[test]
fn malformed_body_becomes_empty_document() {
    for body in ["", "<html>502 Bad Gateway</html>", "[1,2,3]", "\"ok\"", "{\"success\":"] {
        let doc = parse_response_document(body);
        assert!(doc.is_empty(), "body={body:?}");
        assert_eq!(classify(200, &doc), ResponseOutcome::Failed);
    }
}

#[test]
fn non_200_status_fails_even_with_success_flag() {
    let doc = parse_response_document(r#"{"success":true}"#);
    assert_eq!(classify(201, &doc), ResponseOutcome::Failed);
    assert_eq!(classify(500, &doc), ResponseOutcome::Failed);
    assert_eq!(classify(0, &doc), ResponseOutcome::Failed);
}

#[test]
fn success_flag_uses_truthiness() {
    let outcome = |body: &str| classify(200, &parse_response_document(body));

    assert_eq!(outcome(r#"{"success":1}"#), ResponseOutcome::Success);
    assert_eq!(outcome(r#"{"success":"yes"}"#), ResponseOutcome::Success);
    assert_eq!(outcome(r#"{"success":"false"}"#), ResponseOutcome::Success);
    assert_eq!(outcome(r#"{"success":{}}"#), ResponseOutcome::Success);

    assert_eq!(outcome(r#"{"success":false}"#), ResponseOutcome::Failed);
    assert_eq!(outcome(r#"{"success":0}"#), ResponseOutcome::Failed);
    assert_eq!(outcome(r#"{"success":""}"#), ResponseOutcome::Failed);
    assert_eq!(outcome(r#"{"success":null}"#), ResponseOutcome::Failed);
    assert_eq!(outcome(r#"{"error":"boom"}"#), ResponseOutcome::Failed);
}

#[test]
fn truthiness_of_plain_values() {
    assert!(is_truthy(&json!([])));
    assert!(is_truthy(&json!(-0.5)));
    assert!(!is_truthy(&json!(0.0)));
}

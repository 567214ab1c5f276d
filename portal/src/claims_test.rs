use super::*;
use crate::testing::{NOW, make_token, make_token_from};

// =============================================================================
// decode
// =============================================================================

#[test]
fn decode_reads_subject_roles_and_expiry() {
    let claims = decode(&make_token("a@b.com", NOW + 60)).unwrap();
    assert_eq!(claims.subject, "a@b.com");
    assert_eq!(claims.roles, vec!["ROLE_USER".to_owned()]);
    assert_eq!(claims.issued_at, Some(NOW - 60));
    assert_eq!(claims.expires_at, NOW + 60);
}

#[test]
fn decode_accepts_single_string_scope() {
    let token = make_token_from(&serde_json::json!({ "sub": "x", "scopes": "ROLE_ADMIN", "exp": NOW }));
    assert_eq!(decode(&token).unwrap().roles, vec!["ROLE_ADMIN".to_owned()]);
}

#[test]
fn decode_accepts_roles_alias_and_missing_roles() {
    let aliased = make_token_from(&serde_json::json!({ "sub": "x", "roles": ["R"], "exp": NOW }));
    assert_eq!(decode(&aliased).unwrap().roles, vec!["R".to_owned()]);

    let bare = make_token_from(&serde_json::json!({ "sub": "x", "exp": NOW }));
    assert!(decode(&bare).unwrap().roles.is_empty());
}

#[test]
fn decode_tolerates_padding_and_bearer_prefix() {
    let token = make_token("pad@b.com", NOW);
    let mut parts: Vec<String> = token.split('.').map(str::to_owned).collect();
    parts[1].push_str("==");
    let padded = format!("Bearer {}", parts.join("."));
    assert_eq!(decode(&padded).unwrap().subject, "pad@b.com");
}

#[test]
fn decode_without_claims_segment_fails() {
    assert!(matches!(decode("onlyheader"), Err(DecodeError::MissingSegment)));
    assert!(matches!(decode("header..sig"), Err(DecodeError::MissingSegment)));
}

#[test]
fn decode_non_base64_segment_fails() {
    assert!(matches!(decode("h.!!!.s"), Err(DecodeError::Base64(_))));
}

#[test]
fn decode_non_claims_json_fails() {
    let missing_exp = make_token_from(&serde_json::json!({ "sub": "x" }));
    assert!(matches!(decode(&missing_exp), Err(DecodeError::Json(_))));

    let not_object = make_token_from(&serde_json::json!([1, 2, 3]));
    assert!(matches!(decode(&not_object), Err(DecodeError::Json(_))));
}

// =============================================================================
// is_expired
// =============================================================================

#[test]
fn is_expired_boundary_is_inclusive() {
    let claims = decode(&make_token("a", NOW)).unwrap();
    assert!(is_expired(&claims, NOW));
    assert!(is_expired(&claims, NOW + 1));
    assert!(!is_expired(&claims, NOW - 1));
}

#[test]
fn system_now_is_after_2020() {
    assert!(system_now() > 1_577_836_800);
}

use guestline_api::usecase::token::issue_access_token;
use guestline_auth_types::token::{AuthError, validate_access_token};

use crate::helpers::TEST_JWT_SECRET;

#[tokio::test]
async fn should_issue_token_that_validates_to_same_user() {
    let (token, exp) = issue_access_token(42, TEST_JWT_SECRET, 3600).unwrap();

    assert!(!token.is_empty());

    let info = validate_access_token(&token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, 42);
    assert_eq!(info.access_token_exp, exp);
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let (token, _) = issue_access_token(42, TEST_JWT_SECRET, 3600).unwrap();

    let result = validate_access_token(&token, "wrong-secret");
    assert!(
        matches!(result, Err(AuthError::InvalidSignature)),
        "expected InvalidSignature, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_garbage_token() {
    let result = validate_access_token("not-a-jwt", TEST_JWT_SECRET);
    assert!(matches!(result, Err(AuthError::Malformed)));
}

#[tokio::test]
async fn should_respect_configured_ttl() {
    let before = chrono::Utc::now().timestamp() as u64;
    let (_, exp) = issue_access_token(42, TEST_JWT_SECRET, 120).unwrap();
    let after = chrono::Utc::now().timestamp() as u64;

    assert!(exp >= before + 120);
    assert!(exp <= after + 121);
}

use serde_json::json;
use url::Url;

use guestline_api::domain::provider::AuthProvider;
use guestline_api::usecase::login::{CompleteLoginUseCase, resolve_or_create};
use guestline_auth_types::token::validate_access_token;

use crate::helpers::{MockOAuthGateway, MockUserRepo, TEST_JWT_SECRET, test_user};

fn google_profile() -> guestline_api::domain::provider::OAuthProfile {
    guestline_api::domain::provider::OAuthProfile {
        provider_id: "sub-123".to_owned(),
        email: "user@example.com".to_owned(),
        name: "Test User".to_owned(),
        avatar_url: Some("https://img.example.com/a.png".to_owned()),
    }
}

// ── resolve_or_create ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_user_on_first_login() {
    let repo = MockUserRepo::empty();

    let user = resolve_or_create(&repo, AuthProvider::Google, google_profile())
        .await
        .unwrap();

    assert_eq!(user.email, "user@example.com");
    assert_eq!(user.provider, AuthProvider::Google);
    assert_eq!(repo.users_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_resolve_same_user_on_repeat_login_without_update() {
    let repo = MockUserRepo::empty();

    let first = resolve_or_create(&repo, AuthProvider::Google, google_profile())
        .await
        .unwrap();
    let second = resolve_or_create(&repo, AuthProvider::Google, google_profile())
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(repo.users_handle().lock().unwrap().len(), 1);
    // An unchanged profile must not touch the stored row.
    assert_eq!(repo.update_call_count(), 0);
}

#[tokio::test]
async fn should_refresh_profile_in_place_when_name_changes() {
    let repo = MockUserRepo::new(vec![test_user(AuthProvider::Google, "sub-123")]);

    let mut profile = google_profile();
    profile.name = "Renamed User".to_owned();

    let resolved = resolve_or_create(&repo, AuthProvider::Google, profile)
        .await
        .unwrap();

    assert_eq!(resolved.id, 1);
    assert_eq!(resolved.name, "Renamed User");
    assert_eq!(repo.users_handle().lock().unwrap().len(), 1);
    assert_eq!(repo.update_call_count(), 1);
}

#[tokio::test]
async fn should_keep_stored_avatar_when_provider_sends_none() {
    let repo = MockUserRepo::new(vec![test_user(AuthProvider::Microsoft, "ms-1")]);

    let profile = guestline_api::domain::provider::OAuthProfile {
        provider_id: "ms-1".to_owned(),
        email: "user@example.com".to_owned(),
        name: "Renamed User".to_owned(),
        avatar_url: None,
    };

    let resolved = resolve_or_create(&repo, AuthProvider::Microsoft, profile)
        .await
        .unwrap();

    assert_eq!(
        resolved.avatar_url.as_deref(),
        Some("https://img.example.com/a.png")
    );
}

#[tokio::test]
async fn should_treat_same_provider_id_on_other_provider_as_new_user() {
    let repo = MockUserRepo::new(vec![test_user(AuthProvider::Google, "sub-123")]);

    let mut profile = google_profile();
    profile.email = "other@example.com".to_owned();

    let resolved = resolve_or_create(&repo, AuthProvider::Github, profile)
        .await
        .unwrap();

    assert_ne!(resolved.id, 1);
    assert_eq!(repo.users_handle().lock().unwrap().len(), 2);
}

// ── CompleteLoginUseCase ─────────────────────────────────────────────────────

fn complete_login(
    users: MockUserRepo,
    gateway: MockOAuthGateway,
) -> CompleteLoginUseCase<MockUserRepo, MockOAuthGateway> {
    CompleteLoginUseCase {
        users,
        gateway,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: 3600,
        redirect_uri: "http://localhost:5173/oauth2/redirect".to_owned(),
    }
}

#[tokio::test]
async fn should_complete_login_with_token_in_redirect_url() {
    let gateway = MockOAuthGateway {
        attrs: json!({
            "sub": "sub-123",
            "email": "user@example.com",
            "name": "Test User",
            "picture": "https://img.example.com/a.png",
        }),
    };
    let usecase = complete_login(MockUserRepo::empty(), gateway);

    let login = usecase
        .execute(AuthProvider::Google, "auth-code")
        .await
        .unwrap();

    let url = Url::parse(&login.redirect_url).unwrap();
    assert_eq!(url.path(), "/oauth2/redirect");
    let (_, token) = url
        .query_pairs()
        .find(|(k, _)| k == "token")
        .expect("redirect URL carries a token parameter");
    assert_eq!(token, login.access_token);

    let info = validate_access_token(&token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, login.user.id);
}

#[tokio::test]
async fn should_extract_nested_facebook_avatar() {
    let gateway = MockOAuthGateway {
        attrs: json!({
            "id": "fb-42",
            "email": "user@example.com",
            "name": "Test User",
            "picture": { "data": { "url": "https://fb.example.com/pic.jpg" } },
        }),
    };
    let usecase = complete_login(MockUserRepo::empty(), gateway);

    let login = usecase
        .execute(AuthProvider::Facebook, "auth-code")
        .await
        .unwrap();

    assert_eq!(
        login.user.avatar_url.as_deref(),
        Some("https://fb.example.com/pic.jpg")
    );
}

#[tokio::test]
async fn should_fail_exchange_when_profile_has_no_email() {
    let gateway = MockOAuthGateway {
        attrs: json!({ "id": 42, "login": "octocat" }),
    };
    let usecase = complete_login(MockUserRepo::empty(), gateway);

    let result = usecase.execute(AuthProvider::Github, "auth-code").await;
    assert!(matches!(
        result,
        Err(guestline_api::error::ApiError::ProviderExchange(_))
    ));
}

use guestline_api::error::ApiError;
use guestline_api::usecase::guest::{
    CountGuestsUseCase, CreateGuestUseCase, DeleteGuestUseCase, GetGuestUseCase,
    ListGuestsUseCase, UpdateGuestUseCase,
};

use crate::helpers::{MockGuestRepo, test_fields};

const OWNER: i64 = 10;
const STRANGER: i64 = 20;

#[tokio::test]
async fn should_create_and_fetch_guest_for_owner() {
    let repo = MockGuestRepo::empty();

    let created = CreateGuestUseCase { repo: &repo }
        .execute(OWNER, test_fields("Alice"))
        .await
        .unwrap();
    assert_eq!(created.user_id, OWNER);
    assert_eq!(created.num_of_guests, 2);

    let fetched = GetGuestUseCase { repo: &repo }
        .execute(created.id, OWNER)
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn should_hide_guest_from_other_users() {
    let repo = MockGuestRepo::empty();
    let created = CreateGuestUseCase { repo: &repo }
        .execute(OWNER, test_fields("Alice"))
        .await
        .unwrap();

    let result = GetGuestUseCase { repo: &repo }
        .execute(created.id, STRANGER)
        .await;
    assert!(matches!(result, Err(ApiError::GuestNotFound)));

    let result = DeleteGuestUseCase { repo: &repo }
        .execute(created.id, STRANGER)
        .await;
    assert!(matches!(result, Err(ApiError::GuestNotFound)));

    // The stranger's failed delete must not remove the record.
    assert!(
        GetGuestUseCase { repo: &repo }
            .execute(created.id, OWNER)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn should_list_only_own_guests() {
    let repo = MockGuestRepo::empty();
    CreateGuestUseCase { repo: &repo }
        .execute(OWNER, test_fields("Alice"))
        .await
        .unwrap();
    CreateGuestUseCase { repo: &repo }
        .execute(OWNER, test_fields("Bob"))
        .await
        .unwrap();
    CreateGuestUseCase { repo: &repo }
        .execute(STRANGER, test_fields("Carol"))
        .await
        .unwrap();

    let listed = ListGuestsUseCase { repo: &repo }.execute(OWNER).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|g| g.user_id == OWNER));
}

#[tokio::test]
async fn should_replace_all_fields_on_update() {
    let repo = MockGuestRepo::empty();
    let created = CreateGuestUseCase { repo: &repo }
        .execute(OWNER, test_fields("Alice"))
        .await
        .unwrap();

    let mut replacement = test_fields("Alice Updated");
    replacement.email = None;
    replacement.phone = None;
    replacement.num_of_guests = 5;

    let updated = UpdateGuestUseCase { repo: &repo }
        .execute(created.id, OWNER, replacement)
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Alice Updated");
    // Omitted optionals are cleared, not preserved.
    assert_eq!(updated.email, None);
    assert_eq!(updated.phone, None);
    assert_eq!(updated.num_of_guests, 5);
}

#[tokio::test]
async fn should_return_not_found_for_absent_id() {
    let repo = MockGuestRepo::empty();
    let result = GetGuestUseCase { repo: &repo }.execute(999, OWNER).await;
    assert!(matches!(result, Err(ApiError::GuestNotFound)));
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_guest() {
    let repo = MockGuestRepo::empty();
    let result = UpdateGuestUseCase { repo: &repo }
        .execute(999, OWNER, test_fields("Ghost"))
        .await;
    assert!(matches!(result, Err(ApiError::GuestNotFound)));
}

#[tokio::test]
async fn should_delete_then_miss_on_second_lookup() {
    let repo = MockGuestRepo::empty();
    let created = CreateGuestUseCase { repo: &repo }
        .execute(OWNER, test_fields("Alice"))
        .await
        .unwrap();

    DeleteGuestUseCase { repo: &repo }
        .execute(created.id, OWNER)
        .await
        .unwrap();

    let result = GetGuestUseCase { repo: &repo }
        .execute(created.id, OWNER)
        .await;
    assert!(matches!(result, Err(ApiError::GuestNotFound)));

    let result = DeleteGuestUseCase { repo: &repo }
        .execute(created.id, OWNER)
        .await;
    assert!(matches!(result, Err(ApiError::GuestNotFound)));
}

#[tokio::test]
async fn should_count_per_owner() {
    let repo = MockGuestRepo::empty();
    for name in ["Alice", "Bob", "Carol"] {
        CreateGuestUseCase { repo: &repo }
            .execute(OWNER, test_fields(name))
            .await
            .unwrap();
    }
    CreateGuestUseCase { repo: &repo }
        .execute(STRANGER, test_fields("Dave"))
        .await
        .unwrap();

    assert_eq!(
        CountGuestsUseCase { repo: &repo }.execute(OWNER).await.unwrap(),
        3
    );
    assert_eq!(
        CountGuestsUseCase { repo: &repo }
            .execute(STRANGER)
            .await
            .unwrap(),
        1
    );
}

//! Tests for the user service.

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{ErrorCode, Version, VersionPrecondition};
use rstest::{fixture, rstest};

fn details(name: &str, email: &str) -> UserDetails {
    UserDetails::try_from_parts(Some(name), Some(email)).expect("fixture details are valid")
}

fn stored(id: i32, name: &str, email: &str, version: i32) -> User {
    User::new(UserId::new(id), details(name, email), Version::new(version))
}

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

#[fixture]
fn ann() -> User {
    stored(1, "Ann", "ann@example.com", 1)
}

#[rstest]
#[tokio::test]
async fn get_user_wraps_found_row(ann: User) {
    let mut repo = MockUserRepository::new();
    let row = ann.clone();
    repo.expect_find_by_id()
        .withf(|id| id.value() == 1)
        .times(1)
        .return_once(move |_| Ok(Some(row)));

    let users = make_service(repo)
        .get_user(UserId::new(1))
        .await
        .expect("lookup succeeds");
    assert_eq!(users, vec![ann]);
}

#[rstest]
#[tokio::test]
async fn get_user_returns_empty_list_when_missing() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let users = make_service(repo)
        .get_user(UserId::new(9))
        .await
        .expect("missing user is not an error");
    assert!(users.is_empty());
}

#[rstest]
#[case(UserPersistenceError::connection("refused"))]
#[case(UserPersistenceError::query("syntax"))]
#[tokio::test]
async fn get_user_maps_storage_failures_to_internal(#[case] failure: UserPersistenceError) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Err(failure));

    let err = make_service(repo)
        .get_user(UserId::new(1))
        .await
        .expect_err("storage failure propagates");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn create_user_inserts_when_email_is_free(ann: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .withf(|email| email.as_ref() == "ann@example.com")
        .times(1)
        .return_once(|_| Ok(None));
    let row = ann.clone();
    repo.expect_insert().times(1).return_once(move |_| Ok(row));

    let created = make_service(repo)
        .create_user(details("Ann", "ann@example.com"))
        .await
        .expect("create succeeds");
    assert_eq!(created, ann);
}

#[rstest]
#[tokio::test]
async fn create_user_rejects_taken_email_without_insert(ann: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(ann)));
    repo.expect_insert().never();

    let err = make_service(repo)
        .create_user(details("Ann", "ann@example.com"))
        .await
        .expect_err("duplicate email");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), DUPLICATE_EMAIL_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn create_user_reports_lost_insert_race_as_conflict() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email().times(1).return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::duplicate_email()));

    let err = make_service(repo)
        .create_user(details("Ann", "ann@example.com"))
        .await
        .expect_err("race lost");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn update_user_returns_not_found_for_unknown_id() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().times(1).return_once(|_| Ok(None));
    repo.expect_update().never();

    let err = make_service(repo)
        .update_user(UpdateUserRequest {
            id: UserId::new(5),
            precondition: VersionPrecondition::Any,
            details: details("Ann", "ann@example.com"),
        })
        .await
        .expect_err("unknown id");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), USER_NOT_FOUND_MESSAGE);
}

#[rstest]
#[case(VersionPrecondition::Absent)]
#[case(VersionPrecondition::OneOf(vec!["2".to_owned()]))]
#[tokio::test]
async fn update_user_rejects_unmatched_precondition(
    ann: User,
    #[case] precondition: VersionPrecondition,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(ann)));
    repo.expect_update().never();

    let err = make_service(repo)
        .update_user(UpdateUserRequest {
            id: UserId::new(1),
            precondition,
            details: details("Ann B", "ann@example.com"),
        })
        .await
        .expect_err("precondition fails");
    assert_eq!(err.code(), ErrorCode::PreconditionFailed);
    assert_eq!(err.message(), VERSION_MISMATCH_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn update_user_writes_with_stored_version(ann: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(ann)));
    repo.expect_find_by_email().never();
    repo.expect_update()
        .withf(|id, expected, details| {
            id.value() == 1 && *expected == Version::new(1) && details.name().as_ref() == "Ann B"
        })
        .times(1)
        .return_once(|_, _, _| Ok(stored(1, "Ann B", "ann@example.com", 2)));

    let updated = make_service(repo)
        .update_user(UpdateUserRequest {
            id: UserId::new(1),
            precondition: VersionPrecondition::OneOf(vec!["1".to_owned()]),
            details: details("Ann B", "ann@example.com"),
        })
        .await
        .expect("update succeeds");
    assert_eq!(updated.version(), Version::new(2));
}

#[rstest]
#[tokio::test]
async fn update_user_rejects_email_held_by_another_user(ann: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(ann)));
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(Some(stored(2, "Bob", "bob@example.com", 1))));
    repo.expect_update().never();

    let err = make_service(repo)
        .update_user(UpdateUserRequest {
            id: UserId::new(1),
            precondition: VersionPrecondition::Any,
            details: details("Ann", "bob@example.com"),
        })
        .await
        .expect_err("email collision");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(UserPersistenceError::version_mismatch(1, 2), ErrorCode::PreconditionFailed)]
#[case(UserPersistenceError::not_found(1), ErrorCode::NotFound)]
#[case(UserPersistenceError::duplicate_email(), ErrorCode::Conflict)]
#[case(UserPersistenceError::query("boom"), ErrorCode::InternalError)]
#[tokio::test]
async fn update_user_maps_write_failures(
    ann: User,
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(ann)));
    repo.expect_update()
        .times(1)
        .return_once(move |_, _, _| Err(failure));

    let err = make_service(repo)
        .update_user(UpdateUserRequest {
            id: UserId::new(1),
            precondition: VersionPrecondition::Any,
            details: details("Ann", "ann@example.com"),
        })
        .await
        .expect_err("write fails");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn delete_user_succeeds_whether_or_not_a_row_existed(#[case] removed: bool) {
    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .withf(|id| id.value() == 3)
        .times(1)
        .return_once(move |_| Ok(removed));

    make_service(repo)
        .delete_user(UserId::new(3))
        .await
        .expect("delete is idempotent");
}

#[rstest]
#[tokio::test]
async fn delete_user_maps_storage_failure_to_internal() {
    let mut repo = MockUserRepository::new();
    repo.expect_delete()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::connection("pool timed out")));

    let err = make_service(repo)
        .delete_user(UserId::new(3))
        .await
        .expect_err("storage failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

//! Lost-update detection and the service retry loop.

use crate::common::flaky::INTERFERING_AVATAR;
use crate::common::{FlakyStorage, init_logging, service_with_users};
use jokebox::error::{ErrorKind, JokeboxError};
use jokebox::storage::{InMemoryStorage, StorageError};
use jokebox::{JokeService, JokeServiceConfig};
use std::sync::Arc;

async fn flaky_service(retries: u32) -> JokeService<FlakyStorage> {
    init_logging();
    let config = JokeServiceConfig::default().with_max_conflict_retries(retries);
    let service = JokeService::with_config(FlakyStorage::new(InMemoryStorage::new()), config);
    service
        .register_user("alice", "Alice", None, "alice@example.com")
        .await
        .unwrap();
    service
}

async fn first_joke(service: &JokeService<FlakyStorage>) -> i64 {
    service
        .create_joke("alice", "Q", "A")
        .await
        .unwrap()
        .id()
        .unwrap()
        .value()
}

#[tokio::test]
async fn test_like_retries_after_losing_a_race() {
    let service = flaky_service(3).await;
    let id = first_joke(&service).await;

    service.storage().interfere(2);
    let joke = service.like_joke(id).await.unwrap();

    // Two competing likes landed first, then ours on the third attempt
    assert_eq!(joke.likes(), 3);
    assert_eq!(service.get_joke(id).await.unwrap().likes(), 3);
    assert_eq!(service.storage().saves_attempted(), 3);
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let service = flaky_service(1).await;
    let id = first_joke(&service).await;

    service.storage().interfere(5);
    let error = service.like_joke(id).await.unwrap_err();

    assert!(matches!(
        error,
        JokeboxError::Storage(StorageError::ConcurrentModification { .. })
    ));
    assert_eq!(error.kind(), ErrorKind::Conflict);
    assert_eq!(error.status_code(), 409);
    // One attempt plus one retry
    assert_eq!(service.storage().saves_attempted(), 2);
}

#[tokio::test]
async fn test_zero_retries_fail_fast() {
    let service = flaky_service(0).await;
    let id = first_joke(&service).await;

    service.storage().interfere(1);
    assert!(service.like_joke(id).await.is_err());
    // The competing like was kept
    assert_eq!(service.get_joke(id).await.unwrap().likes(), 1);
}

#[tokio::test]
async fn test_edit_reapplies_on_fresh_state() {
    let service = flaky_service(3).await;
    let id = first_joke(&service).await;

    service.storage().interfere(1);
    let joke = service
        .edit_joke("alice", id, "New question", "New answer")
        .await
        .unwrap();

    // The competing like survives the edit
    assert_eq!(joke.likes(), 1);
    assert_eq!(joke.question().as_str(), "New question");
}

#[tokio::test]
async fn test_profile_update_retries() {
    let service = flaky_service(3).await;

    service.storage().interfere(1);
    let user = service
        .change_email("alice", "alice@new.example")
        .await
        .unwrap();

    assert_eq!(user.email().as_str(), "alice@new.example");
    assert_eq!(
        user.avatar_url().map(|url| url.as_str()),
        Some(INTERFERING_AVATAR)
    );
}

#[tokio::test]
async fn test_rule_failures_are_not_retried() {
    let service = flaky_service(3).await;
    let id = first_joke(&service).await;

    let error = service.unlike_joke(id).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::DomainRule);
    assert_eq!(service.storage().saves_attempted(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_likes_are_not_lost() {
    const WRITERS: u32 = 16;

    let service = service_with_users(&["alice"]).await;
    // Each writer can lose at most once to every other writer
    let config = service.config().clone().with_max_conflict_retries(WRITERS);
    let service = Arc::new(JokeService::with_config(service.storage().clone(), config));

    let id = service
        .create_joke("alice", "Q", "A")
        .await
        .unwrap()
        .id()
        .unwrap()
        .value();

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.like_joke(id).await })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        result.expect("task panicked").expect("like should succeed");
    }

    assert_eq!(service.get_joke(id).await.unwrap().likes(), WRITERS);
}

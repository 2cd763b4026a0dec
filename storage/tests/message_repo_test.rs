//! Integration tests for [`storage::MessageRepository`].
//!
//! Covers ordering, lookups, create/delete round trips, duplicate ids and concurrent
//! writers using a document file in a temporary directory.

use serde_json::{json, Value};
use storage::{MessageRecord, MessageRepository, Repository};
use tempfile::TempDir;

async fn repo_with(dir: &TempDir, contents: &str) -> MessageRepository {
    let path = dir.path().join("messages.json");
    std::fs::write(&path, contents).expect("Failed to seed document");
    MessageRepository::new(&path)
        .await
        .expect("Failed to create repository")
}

fn document(repo: &MessageRepository) -> Value {
    let raw = std::fs::read_to_string(repo.path()).expect("Failed to read document");
    serde_json::from_str(&raw).expect("Document is not JSON")
}

/// **Test: Scenario from a two-message document through list, get, delete and create.**
///
/// **Setup:** Document with ids 1 ("a") and 3 ("c").
/// **Action:** list_sorted, get_by_id(1), delete_by_id(1), create(5, "e").
/// **Expected:** Descending list; document after each mutation matches exactly.
#[tokio::test]
async fn test_end_to_end_scenario() {
    let dir = TempDir::new().unwrap();
    let repo = repo_with(
        &dir,
        r#"{"messages":[{"id":1,"message":"a"},{"id":3,"message":"c"}]}"#,
    )
    .await;

    let listed = repo.list_sorted().await.unwrap();
    assert_eq!(
        listed,
        vec![MessageRecord::new(3, "c"), MessageRecord::new(1, "a")]
    );

    let one = repo.get_by_id(1).await.unwrap();
    assert_eq!(one, Some(MessageRecord::new(1, "a")));

    assert!(repo.delete_by_id(1).await.unwrap());
    assert_eq!(
        document(&repo),
        json!({"messages":[{"id":3,"message":"c"}]})
    );

    repo.create(&MessageRecord::new(5, "e")).await.unwrap();
    assert_eq!(
        document(&repo),
        json!({"messages":[{"id":3,"message":"c"},{"id":5,"message":"e"}]})
    );
}

/// **Test: list_sorted returns every record once in non-increasing id order.**
#[tokio::test]
async fn test_list_sorted_descending_with_duplicates() {
    let dir = TempDir::new().unwrap();
    let repo = repo_with(
        &dir,
        &json!({"messages":[
            {"id":4,"message":"d"},
            {"id":-2,"message":"neg"},
            {"id":9007199254740993_i64,"message":"big"},
            {"id":4,"message":"d2"},
            {"id":0,"message":"zero"}
        ]})
        .to_string(),
    )
    .await;

    let listed = repo.list_sorted().await.unwrap();

    let ids: Vec<i64> = listed.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![9007199254740993, 4, 4, 0, -2]);
    assert_eq!(listed.len(), 5);
}

/// **Test: create then get returns an equal message.**
#[tokio::test]
async fn test_create_then_get() {
    let dir = TempDir::new().unwrap();
    let repo = repo_with(&dir, r#"{"messages":[]}"#).await;
    let message = MessageRecord::new(1_547_251_200_000, "hello, \"world\"\n");

    repo.create(&message).await.unwrap();

    assert_eq!(repo.get_by_id(message.id).await.unwrap(), Some(message));
}

/// **Test: delete then get returns None; a second delete reports nothing removed.**
#[tokio::test]
async fn test_delete_then_get_and_repeat_delete() {
    let dir = TempDir::new().unwrap();
    let repo = repo_with(&dir, r#"{"messages":[{"id":7,"message":"x"}]}"#).await;

    assert!(repo.delete_by_id(7).await.unwrap());
    assert!(repo.get_by_id(7).await.unwrap().is_none());
    assert!(!repo.delete_by_id(7).await.unwrap());
    assert_eq!(document(&repo), json!({"messages":[]}));
}

/// **Test: Duplicate ids: create accepts them, get returns the first, delete removes one.**
#[tokio::test]
async fn test_duplicate_ids() {
    let dir = TempDir::new().unwrap();
    let repo = repo_with(&dir, r#"{"messages":[{"id":2,"message":"first"}]}"#).await;

    repo.create(&MessageRecord::new(2, "second")).await.unwrap();
    assert_eq!(repo.get_by_id(2).await.unwrap().unwrap().text, "first");

    assert!(repo.delete_by_id(2).await.unwrap());
    assert_eq!(repo.get_by_id(2).await.unwrap().unwrap().text, "second");
}

/// **Test: Unknown top-level keys survive a rewrite.**
#[tokio::test]
async fn test_extra_top_level_keys_preserved() {
    let dir = TempDir::new().unwrap();
    let repo = repo_with(&dir, r#"{"version":2,"messages":[]}"#).await;

    repo.create(&MessageRecord::new(1, "a")).await.unwrap();

    let doc = document(&repo);
    assert_eq!(doc["version"], 2);
    assert_eq!(doc["messages"], json!([{"id":1,"message":"a"}]));
}

/// **Test: Concurrent creates through clones of one repository are all kept.**
///
/// **Setup:** Empty document; 32 tasks each creating a distinct id.
/// **Expected:** All 32 ids present afterwards (no lost update).
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_do_not_lose_updates() {
    let dir = TempDir::new().unwrap();
    let repo = repo_with(&dir, r#"{"messages":[]}"#).await;

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.create(&MessageRecord::new(i, format!("m{}", i))).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let ids: Vec<i64> = repo.list_sorted().await.unwrap().iter().map(|m| m.id).collect();
    assert_eq!(ids, (0..32).rev().collect::<Vec<i64>>());
}

/// **Test: Repository trait delegates to the message operations.**
#[tokio::test]
async fn test_repository_trait() {
    let dir = TempDir::new().unwrap();
    let repo = repo_with(&dir, r#"{"messages":[]}"#).await;

    repo.save(&MessageRecord::new(1, "a")).await.unwrap();
    repo.save(&MessageRecord::new(2, "b")).await.unwrap();

    assert_eq!(repo.find_all().await.unwrap()[0].id, 2);
    assert!(repo.find_by_id(1).await.unwrap().is_some());
    assert!(Repository::delete(&repo, 1).await.unwrap());
    assert!(repo.find_by_id(1).await.unwrap().is_none());
}

/// **Test: Per-record keys other than id/message survive a rewrite.**
///
/// **Setup:** Record with an extra `author` key.
/// **Action:** create(2, "b").
/// **Expected:** The first record still carries `author`; the new one has no extra keys.
#[tokio::test]
async fn test_extra_record_keys_preserved() {
    let dir = TempDir::new().unwrap();
    let repo = repo_with(
        &dir,
        r#"{"messages":[{"id":1,"message":"a","author":"sam"}]}"#,
    )
    .await;

    repo.create(&MessageRecord::new(2, "b")).await.unwrap();

    assert_eq!(
        document(&repo),
        json!({"messages":[
            {"id":1,"message":"a","author":"sam"},
            {"id":2,"message":"b"}
        ]})
    );
    let first = repo.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(first.extra.get("author"), Some(&json!("sam")));
}

/// **Test: Two repositories opened on the same file do not tear or lose writes.**
///
/// **Setup:** Two independent `MessageRepository::new` on one path.
/// **Action:** 200 concurrent creates split across both, interleaved with reads.
/// **Expected:** No errors; all 200 ids present and the document parses.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_instances_on_one_path() {
    let dir = TempDir::new().unwrap();
    let first = repo_with(&dir, r#"{"messages":[]}"#).await;
    let second = MessageRepository::new(dir.path().join("messages.json"))
        .await
        .expect("Failed to open second repository");

    let tasks: Vec<_> = (0..200_i64)
        .map(|i| {
            let repo = if i % 2 == 0 { first.clone() } else { second.clone() };
            tokio::spawn(async move {
                repo.create(&MessageRecord::new(i, format!("m{}", i))).await?;
                repo.list_sorted().await.map(|_| ())
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().expect("Concurrent operation failed");
    }

    let ids: Vec<i64> = second.list_sorted().await.unwrap().iter().map(|m| m.id).collect();
    assert_eq!(ids, (0..200).rev().collect::<Vec<i64>>());
    assert_eq!(document(&first)["messages"].as_array().unwrap().len(), 200);
}

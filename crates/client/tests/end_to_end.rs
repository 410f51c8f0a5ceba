//! Client cache driving a real daemon over HTTP.

use std::sync::Arc;

use tasklist_client::{HttpTaskApi, TaskApi, TaskCache};
use tasklist_core::{CreateTaskRequest, TaskId, TaskStatus, UpdateTaskRequest};
use tasklist_daemon::{http, TaskService};
use tasklist_storage::InMemoryStore;
use tokio::net::TcpListener;

async fn spawn_daemon() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = http::router(Arc::new(TaskService::new(InMemoryStore::new())));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn buy_milk_through_the_cache() {
    let base = spawn_daemon().await;
    let mut cache = TaskCache::new(HttpTaskApi::new(&base));

    assert!(cache.fetch_all().await);
    assert!(cache.tasks().is_empty());

    let created = cache.add(CreateTaskRequest::new("Buy milk")).await.unwrap();
    assert_eq!(created.status, TaskStatus::Todo);
    assert_eq!(created.description, "");

    let done = cache
        .update_status(&created.id, TaskStatus::Done)
        .await
        .unwrap();
    assert_eq!(done.title, "Buy milk");
    assert_eq!(cache.tasks(), &[done.clone()]);

    assert!(cache.remove(&created.id).await.is_some());
    assert!(cache.tasks().is_empty());

    assert!(cache.remove(&created.id).await.is_none());

    assert!(cache.fetch_all().await);
    assert!(cache.tasks().is_empty());
}

#[tokio::test]
async fn other_clients_writes_show_up_after_fetch() {
    let base = spawn_daemon().await;
    let mut alice = TaskCache::new(HttpTaskApi::new(&base));
    let mut bob = TaskCache::new(HttpTaskApi::new(&base));
    assert!(alice.fetch_all().await);

    let bobs = bob.add(CreateTaskRequest::new("from bob")).await.unwrap();
    assert!(alice.get(&bobs.id).is_none());

    assert!(alice.fetch_all().await);
    assert_eq!(alice.tasks(), &[bobs]);
}

#[tokio::test]
async fn rejected_update_reverts_local_copy() {
    let base = spawn_daemon().await;
    let mut cache = TaskCache::new(HttpTaskApi::new(&base));
    let task = cache.add(CreateTaskRequest::new("keep title")).await.unwrap();

    let patch = UpdateTaskRequest {
        title: Some(String::new()),
        ..Default::default()
    };
    assert!(cache.update(&task.id, patch).await.is_none());
    assert_eq!(cache.tasks(), &[task]);
}

#[tokio::test]
async fn http_errors_carry_status_and_message() {
    let base = spawn_daemon().await;
    let api = HttpTaskApi::new(format!("{base}/"));
    assert_eq!(api.base_url(), base);

    let err = api.delete(&TaskId::from("ghost")).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("ghost"), "{err}");

    let err = api.create(&CreateTaskRequest::default()).await.unwrap_err();
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("title is required"), "{err}");
}

#[tokio::test]
async fn unreachable_daemon_keeps_mirror() {
    let base = spawn_daemon().await;
    let mut cache = TaskCache::new(HttpTaskApi::new(&base));
    let task = cache.add(CreateTaskRequest::new("cached")).await.unwrap();

    // Point a second cache at a port nobody listens on.
    let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", closed.local_addr().unwrap());
    drop(closed);

    let mut offline = TaskCache::new(HttpTaskApi::new(dead));
    assert!(!offline.fetch_all().await);
    assert!(offline.add(CreateTaskRequest::new("lost")).await.is_none());
    assert!(offline.tasks().is_empty());

    assert_eq!(cache.tasks(), &[task]);
}

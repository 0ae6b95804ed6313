//! Task service behavior against the SQLite store

mod common;

use chrono::Duration;
use std::sync::Arc;
use taskapi::{NewTask, TaskChanges, TaskPriority, TaskService, TaskStatus};
use uuid::Uuid;

async fn complete(service: &TaskService, id: Uuid) -> taskapi::TaskRecord {
    let mut task = service.get_task(id).await.unwrap().unwrap();
    task.status = TaskStatus::Completed;
    service.update_task(task).await.unwrap().unwrap()
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let (_dir, _db, service) = common::sqlite_service().await;

    let created = service
        .create_task(NewTask::new("Buy milk").with_description("2 litres"))
        .await
        .unwrap();
    let fetched = service.get_task(created.id).await.unwrap().unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.status, TaskStatus::Pending);
    assert_eq!(fetched.priority, TaskPriority::Medium);
}

#[tokio::test]
async fn test_completed_at_is_preserved_exactly() {
    let (_dir, _db, service) = common::sqlite_service().await;
    let task = service.create_task(NewTask::new("Finish")).await.unwrap();

    let first = complete(&service, task.id).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = complete(&service, task.id).await;

    assert!(first.completed_at.is_some());
    assert_eq!(second.completed_at, first.completed_at);
    assert!(second.updated_at > first.updated_at);

    let stored = service.get_task(task.id).await.unwrap().unwrap();
    assert_eq!(stored.completed_at, first.completed_at);
}

#[tokio::test]
async fn test_update_changes_fields_but_not_created_at() {
    let (_dir, _db, service) = common::sqlite_service().await;
    let task = service.create_task(NewTask::new("Draft")).await.unwrap();

    let changes = TaskChanges {
        title: Some("Final".to_string()),
        description: Some("ready".to_string()),
        priority: Some(TaskPriority::Low),
        status: Some(TaskStatus::Cancelled),
    };
    let mut desired = changes.apply_to(task.clone());
    desired.created_at = task.created_at + Duration::hours(1);

    let updated = service.update_task(desired).await.unwrap().unwrap();
    let stored = service.get_task(task.id).await.unwrap().unwrap();

    assert_eq!(stored, updated);
    assert_eq!(stored.title, "Final");
    assert_eq!(stored.status, TaskStatus::Cancelled);
    assert_eq!(stored.created_at, task.created_at);
    assert!(stored.completed_at.is_none());
}

#[tokio::test]
async fn test_delete_is_idempotent_negative() {
    let (_dir, _db, service) = common::sqlite_service().await;
    let keep = service.create_task(NewTask::new("Keep")).await.unwrap();
    let drop = service.create_task(NewTask::new("Drop")).await.unwrap();

    assert!(service.delete_task(drop.id).await.unwrap());
    assert!(!service.delete_task(drop.id).await.unwrap());
    assert!(!service.delete_task(Uuid::new_v4()).await.unwrap());

    let remaining = service.list_tasks().await.unwrap();
    assert_eq!(remaining, vec![keep]);
}

#[tokio::test]
async fn test_update_of_deleted_task_is_none() {
    let (_dir, _db, service) = common::sqlite_service().await;
    let task = service.create_task(NewTask::new("Gone")).await.unwrap();
    service.delete_task(task.id).await.unwrap();

    assert!(service.update_task(task).await.unwrap().is_none());
    assert!(service.list_tasks().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_statistics_scenario() {
    let (_dir, _db, service) = common::sqlite_service().await;

    let mut ids = Vec::new();
    for (title, priority) in [
        ("T1", TaskPriority::High),
        ("T2", TaskPriority::High),
        ("T3", TaskPriority::Low),
        ("T4", TaskPriority::Medium),
    ] {
        let task = service
            .create_task(NewTask::new(title).with_priority(priority))
            .await
            .unwrap();
        ids.push(task.id);
    }

    let mut t2 = service.get_task(ids[1]).await.unwrap().unwrap();
    t2.status = TaskStatus::InProgress;
    service.update_task(t2).await.unwrap();
    complete(&service, ids[2]).await;
    complete(&service, ids[3]).await;

    let stats = service.compute_statistics().await.unwrap();
    assert_eq!(stats.total_tasks, 4);
    assert_eq!(stats.pending_tasks, 1);
    assert_eq!(stats.in_progress_tasks, 1);
    assert_eq!(stats.completed_tasks, 2);
    assert_eq!(stats.cancelled_tasks, 0);
    assert_eq!(
        stats.tasks_by_priority.into_iter().collect::<Vec<_>>(),
        vec![
            (TaskPriority::Low, 1),
            (TaskPriority::Medium, 1),
            (TaskPriority::High, 2),
        ]
    );
}

#[tokio::test]
async fn test_concurrent_creates_are_all_stored() {
    let (_dir, _db, service) = common::sqlite_service().await;
    let service = Arc::new(service);

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_task(NewTask::new(format!("task {}", i)))
                    .await
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    let tasks = service.list_tasks().await.unwrap();
    assert_eq!(tasks.len(), 20);
    assert!(tasks.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert_eq!(service.compute_statistics().await.unwrap().pending_tasks, 20);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let (_dir, db, service) = common::sqlite_service().await;
    db.close().await;

    let err = service.create_task(NewTask::new("nowhere")).await.unwrap_err();
    assert!(err.is_store_failure());
    assert!(service.compute_statistics().await.unwrap_err().is_store_failure());
}

#[tokio::test]
async fn test_memory_and_sqlite_agree() {
    let (_dir, _db, sqlite) = common::sqlite_service().await;
    let memory = common::memory_service();

    for service in [&sqlite, &memory] {
        let a = service.create_task(NewTask::new("a")).await.unwrap();
        service
            .create_task(NewTask::new("b").with_priority(TaskPriority::Critical))
            .await
            .unwrap();
        complete(service, a.id).await;
    }

    assert_eq!(
        sqlite.compute_statistics().await.unwrap(),
        memory.compute_statistics().await.unwrap()
    );
}

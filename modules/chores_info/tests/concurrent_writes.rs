//! Overlapping writes against a file-backed SQLite database.

use std::sync::Arc;
use std::time::Duration;

use chores_info::config::ChoresInfoConfig;
use chores_info::model::{ChoreFilter, NewChore, NewUser};
use chores_info::ChoresInfo;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tempfile::TempDir;

/// Same pool shape the server uses: several connections, FKs on, busy timeout.
async fn file_db(dir: &TempDir) -> DatabaseConnection {
    let path = dir.path().join("chores.db");
    let dsn = format!(
        "sqlite://{}?mode=rwc",
        path.to_string_lossy().replace('\\', "/")
    );
    let mut opts = ConnectOptions::new(dsn);
    opts.max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    opts.map_sqlx_sqlite_opts(|o| {
        o.foreign_keys(true)
            .busy_timeout(Duration::from_millis(5000))
    });
    let db = Database::connect(opts)
        .await
        .expect("Failed to open file database");
    ChoresInfo::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_of_different_records_all_succeed() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let module = ChoresInfo::with_db(file_db(&dir).await, ChoresInfoConfig::default());
    let svc = module.service();

    let owner = svc
        .create_user(NewUser {
            name: "Owner".into(),
            color: None,
        })
        .await
        .unwrap();
    let owner_id = owner.id;

    let mut tasks = Vec::new();
    for i in 0..40 {
        let svc = Arc::clone(&svc);
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                svc.create_user(NewUser {
                    name: format!("User {i}"),
                    color: None,
                })
                .await
                .map(|_| ())
            } else {
                svc.create_chore(NewChore {
                    description: format!("Chore {i}"),
                    date: Some("2025-03-01".into()),
                    time: None,
                    user_id: Some(owner_id),
                })
                .await
                .map(|_| ())
            }
        }));
    }

    let mut failures = Vec::new();
    for t in tasks {
        if let Err(e) = t.await.unwrap() {
            failures.push(e.to_string());
        }
    }
    assert!(failures.is_empty(), "write failures: {failures:?}");

    assert_eq!(svc.list_users().await.unwrap().len(), 21);
    assert_eq!(svc.list_chores(ChoreFilter::All).await.unwrap().len(), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_cascade_deletes_remove_everything() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let module = ChoresInfo::with_db(file_db(&dir).await, ChoresInfoConfig::default());
    let svc = module.service();

    let mut owners = Vec::new();
    for i in 0..5 {
        let u = svc
            .create_user(NewUser {
                name: format!("Owner {i}"),
                color: None,
            })
            .await
            .unwrap();
        for j in 0..3 {
            svc.create_chore(NewChore {
                description: format!("Chore {i}.{j}"),
                date: None,
                time: None,
                user_id: Some(u.id),
            })
            .await
            .unwrap();
        }
        owners.push(u.id);
    }

    let mut tasks = Vec::new();
    for id in owners {
        let svc = Arc::clone(&svc);
        tasks.push(tokio::spawn(async move {
            svc.delete_user(id, true).await.map(|o| o.is_deleted())
        }));
    }
    for t in tasks {
        assert!(t.await.unwrap().unwrap());
    }

    assert!(svc.list_users().await.unwrap().is_empty());
    assert!(svc.list_chores(ChoreFilter::All).await.unwrap().is_empty());
}

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

use chores_info::config::ErrorStatusPolicy;
use chores_info::contract::model::{
    ChoreFilter, ChorePatch, DeleteOutcome, NewChore, NewUser, UserPatch,
};
use chores_info::domain::dates::today;
use chores_info::domain::error::DomainError;

use common::{create_test_module, create_test_router, expect_json, send};

fn new_user(name: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        color: None,
    }
}

fn new_chore(description: &str, user_id: i64, date: Option<&str>) -> NewChore {
    NewChore {
        description: description.to_string(),
        date: date.map(str::to_string),
        time: None,
        user_id: Some(user_id),
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// --- domain service ---

#[tokio::test]
async fn test_domain_service_crud() -> Result<()> {
    let service = create_test_module().await.service();

    let created = service.create_user(new_user("  Alice  ")).await?;
    assert_eq!(created.name, "Alice");
    assert_eq!(created.color, "#3B82F6");

    let fetched = service.get_user(created.id).await?;
    assert_eq!(fetched, created);

    let updated = service
        .update_user(
            created.id,
            UserPatch {
                name: None,
                color: Some("#FF5733".into()),
            },
        )
        .await?;
    assert_eq!(updated.name, "Alice");
    assert_eq!(updated.color, "#FF5733");

    let users = service.list_users().await?;
    assert_eq!(users, vec![updated]);
    Ok(())
}

#[tokio::test]
async fn duplicate_names_are_rejected_ignoring_case() -> Result<()> {
    let service = create_test_module().await.service();
    service.create_user(new_user("Bob")).await?;

    let err = service.create_user(new_user("bOB ")).await.unwrap_err();
    assert_eq!(err, DomainError::duplicate_user_name("bOB"));
    assert_eq!(err.to_string(), "User with name 'bOB' already exists");
    assert_eq!(service.list_users().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn blank_name_is_required() {
    let service = create_test_module().await.service();
    let err = service.create_user(new_user("   ")).await.unwrap_err();
    assert_eq!(err.to_string(), "User name is required");
}

#[tokio::test]
async fn update_user_without_usable_fields_changes_nothing() -> Result<()> {
    let service = create_test_module().await.service();
    let user = service.create_user(new_user("Carol")).await?;

    let err = service
        .update_user(
            user.id,
            UserPatch {
                name: Some("  ".into()),
                color: Some(String::new()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NoFieldsProvided { .. }));
    assert_eq!(err.to_string(), "At least one of name or color must be provided");
    assert_eq!(service.get_user(user.id).await?, user);

    let missing = service
        .update_user(9999, UserPatch::default())
        .await
        .unwrap_err();
    assert_eq!(missing, DomainError::user_not_found(9999));
    Ok(())
}

#[tokio::test]
async fn renaming_to_own_name_in_any_case_is_allowed() -> Result<()> {
    let service = create_test_module().await.service();
    let dave = service.create_user(new_user("Dave")).await?;
    service.create_user(new_user("Erin")).await?;

    let renamed = service
        .update_user(
            dave.id,
            UserPatch {
                name: Some("DAVE".into()),
                color: None,
            },
        )
        .await?;
    assert_eq!(renamed.name, "DAVE");

    let clash = service
        .update_user(
            dave.id,
            UserPatch {
                name: Some("erin".into()),
                color: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(clash, DomainError::DuplicateUserName { .. }));
    Ok(())
}

#[tokio::test]
async fn delete_user_is_gated_and_cascades() -> Result<()> {
    let service = create_test_module().await.service();
    let frank = service.create_user(new_user("Frank")).await?;
    let gina = service.create_user(new_user("Gina")).await?;
    service.create_chore(new_chore("Dishes", frank.id, None)).await?;
    service.create_chore(new_chore("Laundry", frank.id, Some("2025-10-30"))).await?;
    let keep = service.create_chore(new_chore("Vacuum", gina.id, None)).await?;

    let pending = service.delete_user(frank.id, false).await?;
    match &pending {
        DeleteOutcome::ConfirmationRequired { message } => {
            assert!(message.starts_with("Confirmation required."));
            assert!(message.contains("2 chore(s)"));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(!pending.is_deleted());
    assert_eq!(service.get_user_summary(frank.id).await?.chore_count, 2);

    let done = service.delete_user(frank.id, true).await?;
    assert_eq!(done, DeleteOutcome::Deleted { cascaded: 2 });
    assert_eq!(
        service.get_user(frank.id).await.unwrap_err(),
        DomainError::user_not_found(frank.id)
    );
    let remaining = service.list_chores(ChoreFilter::All).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.chore.id);

    assert_eq!(
        service.delete_user(frank.id, true).await.unwrap_err(),
        DomainError::user_not_found(frank.id)
    );
    Ok(())
}

#[tokio::test]
async fn chore_dates_default_parse_and_reject() -> Result<()> {
    let service = create_test_module().await.service();
    let user = service.create_user(new_user("Hank")).await?;

    let defaulted = service.create_chore(new_chore("Trash", user.id, None)).await?;
    assert_eq!(defaulted.chore.date, today());
    assert_eq!(defaulted.user_name, "Hank");

    let explicit = service
        .create_chore(new_chore("Trash", user.id, Some("2025-10-30")))
        .await?;
    assert_eq!(explicit.chore.date, ymd(2025, 10, 30));

    let err = service
        .create_chore(new_chore("Trash", user.id, Some("not-a-date")))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidFormat { .. }));
    assert_eq!(service.list_chores(ChoreFilter::All).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn chore_for_missing_user_is_not_persisted() -> Result<()> {
    let service = create_test_module().await.service();
    let err = service
        .create_chore(new_chore("Mow lawn", 42, None))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::user_not_found(42));
    assert!(service.list_chores(ChoreFilter::All).await?.is_empty());

    let no_user = service
        .create_chore(NewChore {
            description: "Mow lawn".into(),
            ..NewChore::default()
        })
        .await
        .unwrap_err();
    assert_eq!(no_user.to_string(), "userId is required");

    let no_desc = service
        .create_chore(NewChore {
            user_id: Some(1),
            ..NewChore::default()
        })
        .await
        .unwrap_err();
    assert_eq!(no_desc.to_string(), "Chore description is required");
    Ok(())
}

#[tokio::test]
async fn listing_filters_by_date_and_user() -> Result<()> {
    let service = create_test_module().await.service();
    let ivy = service.create_user(new_user("Ivy")).await?;
    let jon = service.create_user(new_user("Jon")).await?;
    let d1 = "2025-10-30";
    let d2 = "2025-10-31";
    let a = service.create_chore(new_chore("A", ivy.id, Some(d1))).await?;
    let b = service.create_chore(new_chore("B", jon.id, Some(d1))).await?;
    let c = service.create_chore(new_chore("C", ivy.id, Some(d2))).await?;

    let on_d1: Vec<i64> = service
        .list_chores(ChoreFilter::OnDate(ymd(2025, 10, 30)))
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(on_d1, vec![a.chore.id, b.chore.id]);

    let ivy_all: Vec<i64> = service
        .list_chores(ChoreFilter::ForUser {
            user_id: ivy.id,
            date: None,
        })
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ivy_all, vec![a.chore.id, c.chore.id]);

    let ivy_d2 = service
        .list_chores(ChoreFilter::ForUser {
            user_id: ivy.id,
            date: Some(ymd(2025, 10, 31)),
        })
        .await?;
    assert_eq!(ivy_d2.len(), 1);
    assert_eq!(ivy_d2[0].description, "C");

    let views = service.list_chore_views(ChoreFilter::All).await?;
    assert_eq!(views.len(), 3);
    assert_eq!(views[1].user_name, "Jon");

    let missing = service
        .list_chores(ChoreFilter::ForUser {
            user_id: 777,
            date: None,
        })
        .await
        .unwrap_err();
    assert_eq!(missing, DomainError::user_not_found(777));
    Ok(())
}

#[tokio::test]
async fn chore_round_trip_and_partial_update() -> Result<()> {
    let service = create_test_module().await.service();
    let kim = service.create_user(new_user("Kim")).await?;
    let leo = service.create_user(new_user("Leo")).await?;

    let created = service
        .create_chore(NewChore {
            description: " Feed cat ".into(),
            date: Some("2025-11-02".into()),
            time: Some("07:15".into()),
            user_id: Some(kim.id),
        })
        .await?;
    let fetched = service.get_chore(created.chore.id).await?;
    assert_eq!(fetched, created.chore);
    assert_eq!(fetched.description, "Feed cat");
    assert_eq!(fetched.time, NaiveTime::from_hms_opt(7, 15, 0));

    let moved = service
        .update_chore(
            fetched.id,
            ChorePatch {
                time: Some("   ".into()),
                user_id: Some(leo.id),
                ..ChorePatch::default()
            },
        )
        .await?;
    assert_eq!(moved.user_id, leo.id);
    assert_eq!(moved.time, fetched.time, "blank time leaves the time alone");
    assert_eq!(moved.description, "Feed cat");

    let nothing = service
        .update_chore(fetched.id, ChorePatch::default())
        .await
        .unwrap_err();
    assert_eq!(
        nothing.to_string(),
        "At least one field (description, date, time, or userId) must be provided"
    );

    let bad_owner = service
        .update_chore(
            fetched.id,
            ChorePatch {
                user_id: Some(999),
                ..ChorePatch::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(bad_owner, DomainError::user_not_found(999));
    assert_eq!(service.get_chore(fetched.id).await?.user_id, leo.id);
    Ok(())
}

#[tokio::test]
async fn delete_chore_is_gated() -> Result<()> {
    let service = create_test_module().await.service();
    let user = service.create_user(new_user("Mia")).await?;
    let chore = service.create_chore(new_chore("Sweep", user.id, None)).await?;

    let pending = service.delete_chore(chore.chore.id, false).await?;
    assert_eq!(
        pending,
        DeleteOutcome::ConfirmationRequired {
            message: "Confirmation required. Re-issue with confirm:true to delete this chore"
                .into()
        }
    );
    assert!(service.get_chore(chore.chore.id).await.is_ok());

    assert!(service.delete_chore(chore.chore.id, true).await?.is_deleted());
    assert_eq!(
        service.delete_chore(chore.chore.id, true).await.unwrap_err(),
        DomainError::chore_not_found(chore.chore.id)
    );
    Ok(())
}

// --- REST ---

#[tokio::test]
async fn test_rest_api_crud() {
    let router = create_test_router(ErrorStatusPolicy::Typed).await;

    let user = expect_json(
        &router,
        "POST",
        "/users",
        Some(json!({"name": "Nora", "color": "#00FF00"})),
        StatusCode::CREATED,
    )
    .await;
    let uid = user["id"].as_i64().unwrap();
    assert_eq!(user["name"], "Nora");

    let chore = expect_json(
        &router,
        "POST",
        "/chores",
        Some(json!({"description": "Dishes", "date": "2025-10-30", "time": "18:00", "userId": uid})),
        StatusCode::CREATED,
    )
    .await;
    assert_eq!(chore["userId"], uid);
    assert_eq!(chore["date"], "2025-10-30");
    assert_eq!(chore["time"], "18:00:00");
    let cid = chore["id"].as_i64().unwrap();

    let listed = expect_json(&router, "GET", "/chores?date=2025-10-30", None, StatusCode::OK).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    let other_day = expect_json(&router, "GET", "/chores?date=2025-10-31", None, StatusCode::OK).await;
    assert!(other_day.as_array().unwrap().is_empty());
    let all = expect_json(&router, "GET", "/chores", None, StatusCode::OK).await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let mine = expect_json(&router, "GET", &format!("/chores/user/{uid}"), None, StatusCode::OK).await;
    assert_eq!(mine[0]["id"], cid);

    let updated = expect_json(
        &router,
        "PUT",
        &format!("/chores/{cid}"),
        Some(json!({"description": "Dry dishes"})),
        StatusCode::OK,
    )
    .await;
    assert_eq!(updated["description"], "Dry dishes");
    assert_eq!(updated["time"], "18:00:00");

    let renamed = expect_json(
        &router,
        "PUT",
        &format!("/users/{uid}"),
        Some(json!({"name": "Nora B"})),
        StatusCode::OK,
    )
    .await;
    assert_eq!(renamed["color"], "#00FF00");

    let resp = send(&router, "DELETE", &format!("/users/{uid}"), None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = send(&router, "GET", &format!("/chores/{cid}"), None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rest_errors_are_typed_problems() {
    let router = create_test_router(ErrorStatusPolicy::Typed).await;

    let resp = send(&router, "GET", "/users/404", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers()["content-type"],
        "application/problem+json"
    );
    let problem = common::json_body(resp).await;
    assert_eq!(problem["detail"], "User not found with id: 404");
    assert_eq!(problem["code"], "CHORES_USER_NOT_FOUND");
    assert_eq!(problem["status"], 404);

    expect_json(&router, "POST", "/users", Some(json!({"name": "Ola"})), StatusCode::CREATED).await;
    let dup = expect_json(&router, "POST", "/users", Some(json!({"name": "OLA"})), StatusCode::CONFLICT).await;
    assert_eq!(dup["detail"], "User with name 'OLA' already exists");

    let blank = expect_json(&router, "POST", "/users", Some(json!({"name": " "})), StatusCode::BAD_REQUEST).await;
    assert_eq!(blank["detail"], "User name is required");

    let bad_date = expect_json(&router, "GET", "/chores?date=30-10-2025", None, StatusCode::BAD_REQUEST).await;
    assert_eq!(bad_date["code"], "CHORES_INVALID_FORMAT");

    let orphan = expect_json(
        &router,
        "POST",
        "/chores",
        Some(json!({"description": "Ghost", "userId": 12345})),
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(orphan["detail"], "User not found with id: 12345");

    let resp = send(&router, "DELETE", "/chores/5", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn legacy_policy_reports_every_failure_as_500() {
    let router = create_test_router(ErrorStatusPolicy::Legacy).await;

    let missing = expect_json(&router, "GET", "/chores/1", None, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(missing["detail"], "Chore not found with id: 1");

    expect_json(&router, "POST", "/users", Some(json!({"name": "Pat"})), StatusCode::CREATED).await;
    let dup = expect_json(&router, "POST", "/users", Some(json!({"name": "pat"})), StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(dup["detail"], "User with name 'pat' already exists");

    let none = expect_json(&router, "PUT", "/users/1", Some(json!({})), StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(none["detail"], "At least one of name or color must be provided");
}

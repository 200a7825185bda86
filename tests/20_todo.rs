mod common;

use anyhow::Result;
use chrono::DateTime;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn todo_lifecycle_create_complete_delete() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let email = common::unique_email("lifecycle");
    let token = common::register_and_login(&server.base_url, &email, "secret1").await?;

    // Create
    let res = client
        .post(format!("{}/todo", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Buy milk",
            "desc": "2% milk",
            "dueDate": "2025-01-01T00:00:00Z"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    // The new record shows up in the caller's list, not yet completed
    let res = client
        .get(format!("{}/todo", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let todos = res.json::<Vec<Value>>().await?;
    assert_eq!(todos.len(), 1);
    let todo = &todos[0];
    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["desc"], "2% milk");
    assert_eq!(todo["isCompleted"], false);
    assert!(todo["completedTime"].is_null());
    let todo_id = todo["id"].as_i64().expect("todo id");

    // Fetch by id matches the listed record
    let res = client
        .get(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched = res.json::<Value>().await?;
    let due_date = fetched["dueDate"].as_str().expect("due date");
    assert_eq!(
        DateTime::parse_from_rfc3339(due_date)?,
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")?
    );
    assert_eq!(fetched["isCompleted"], false);

    // Completing stamps the completion time once
    let res = client
        .put(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Buy milk",
            "desc": "2% milk",
            "dueDate": "2025-01-01T00:00:00Z",
            "isCompleted": true
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&token)
        .send()
        .await?;
    let completed = res.json::<Value>().await?;
    assert_eq!(completed["isCompleted"], true);
    let completed_time = completed["completedTime"].as_str().expect("completion time");
    let created_time = completed["createdTime"].as_str().expect("creation time");
    assert!(
        DateTime::parse_from_rfc3339(completed_time)?
            >= DateTime::parse_from_rfc3339(created_time)?
    );

    // An update that leaves isCompleted unchanged keeps the timestamp
    let res = client
        .put(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&token)
        .json(&json!({ "title": "Buy oat milk", "isCompleted": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&token)
        .send()
        .await?;
    let unchanged = res.json::<Value>().await?;
    assert_eq!(unchanged["title"], "Buy oat milk");
    assert_eq!(unchanged["completedTime"], completed_time);

    // Delete, then the record is gone
    let res = client
        .delete(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn todos_are_scoped_to_their_owner() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let owner_token = common::register_and_login(
        &server.base_url,
        &common::unique_email("owner"),
        "secret1",
    )
    .await?;
    let other_token = common::register_and_login(
        &server.base_url,
        &common::unique_email("other"),
        "secret1",
    )
    .await?;

    let res = client
        .post(format!("{}/todo", server.base_url))
        .bearer_auth(&owner_token)
        .json(&json!({ "title": "Private", "desc": "owner only" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let todos = client
        .get(format!("{}/todo", server.base_url))
        .bearer_auth(&owner_token)
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    let todo_id = todos[0]["id"].as_i64().expect("todo id");

    // Another user's token must see "not found" everywhere, never the data
    let res = client
        .get(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .put(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&other_token)
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&other_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let other_list = client
        .get(format!("{}/todo", server.base_url))
        .bearer_auth(&other_token)
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert!(other_list.iter().all(|t| t["id"].as_i64() != Some(todo_id)));

    // The record is still intact for its owner
    let res = client
        .get(format!("{}/todo/{}", server.base_url, todo_id))
        .bearer_auth(&owner_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn todo_routes_require_a_valid_bearer_token() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // No header at all
    let res = client.get(format!("{}/todo", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Wrong scheme
    let res = client
        .get(format!("{}/todo", server.base_url))
        .header("Authorization", "Token abc")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Well-formed header, garbage token
    let res = client
        .get(format!("{}/todo", server.base_url))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn todo_id_must_be_numeric() -> Result<()> {
    if !common::database_configured() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::register_and_login(
        &server.base_url,
        &common::unique_email("badid"),
        "secret1",
    )
    .await?;

    let res = client
        .get(format!("{}/todo/not-a-number", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

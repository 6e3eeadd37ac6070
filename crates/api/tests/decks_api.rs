//! HTTP-level tests for decks, cards and tags.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_card, create_deck, delete_auth, get_auth, post_json_auth, put_json_auth,
    register_and_login,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Decks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deck_crud(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "ann").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/decks",
        &token,
        json!({ "name": "Spanish", "description": "Everyday words" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let deck = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/decks/{deck}"),
        &token,
        json!({ "name": "Spanish A1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Spanish A1");
    assert_eq!(json["data"]["description"], "Everyday words");

    let response = get_auth(app.clone(), &format!("/api/v1/decks/{deck}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["total_cards"], 0);

    let response = delete_auth(app.clone(), &format!("/api/v1/decks/{deck}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/decks/{deck}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deck_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "ann").await;

    let response =
        post_json_auth(app.clone(), "/api/v1/decks", &token, json!({ "name": "   " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let long = "x".repeat(201);
    let response = post_json_auth(app.clone(), "/api/v1/decks", &token, json!({ "name": long })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let deck = create_deck(&app, &token, "D").await;
    let response = put_json_auth(app, &format!("/api/v1/decks/{deck}"), &token, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deck_list_is_per_user_with_counts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ann = register_and_login(&app, "ann").await;
    let bob = register_and_login(&app, "bob").await;
    let deck = create_deck(&app, &ann, "Mine").await;
    create_card(&app, &ann, deck, "q1", &[]).await;
    create_card(&app, &ann, deck, "q2", &[]).await;
    create_deck(&app, &bob, "Theirs").await;

    let json = body_json(get_auth(app.clone(), "/api/v1/decks", &ann).await).await;
    let decks = json["data"].as_array().unwrap();
    assert_eq!(decks.len(), 1);
    assert_eq!(decks[0]["name"], "Mine");
    assert_eq!(decks[0]["total_cards"], 2);
    assert_eq!(decks[0]["cards_for_review"], 2);

    let response = get_auth(app.clone(), &format!("/api/v1/decks/{deck}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = delete_auth(app, &format!("/api/v1/decks/{deck}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_card_crud_with_tags(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "ann").await;
    let deck = create_deck(&app, &token, "D").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/decks/{deck}/cards"),
        &token,
        json!({ "front": "hola", "back": "hello", "tags": [" greetings ", "greetings", "a1"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let card = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["difficulty"], "new");
    assert_eq!(json["data"]["deck_id"], deck);
    let names: Vec<&str> = json["data"]["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["a1", "greetings"]);

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/cards/{card}"),
        &token,
        json!({ "back": "hi", "tags": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["front"], "hola");
    assert_eq!(json["data"]["back"], "hi");
    assert_eq!(json["data"]["tags"].as_array().unwrap().len(), 0);

    let json = body_json(get_auth(app.clone(), &format!("/api/v1/decks/{deck}/cards"), &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = delete_auth(app.clone(), &format!("/api/v1/cards/{card}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(app, &format!("/api/v1/cards/{card}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_card_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "ann").await;
    let deck = create_deck(&app, &token, "D").await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/decks/{deck}/cards"),
        &token,
        json!({ "front": "", "back": "x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/decks/{deck}/cards"),
        &token,
        json!({ "front": "q", "back": "a", "tags": ["  "] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app,
        "/api/v1/decks/999999/cards",
        &token,
        json!({ "front": "q", "back": "a" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cards_in_other_users_decks_are_hidden(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ann = register_and_login(&app, "ann").await;
    let bob = register_and_login(&app, "bob").await;
    let deck = create_deck(&app, &ann, "D").await;
    let card = create_card(&app, &ann, deck, "q", &[]).await;

    let response = get_auth(app.clone(), &format!("/api/v1/cards/{card}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/decks/{deck}/cards"),
        &bob,
        json!({ "front": "q", "back": "a" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &format!("/api/v1/cards/{card}"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_tag_create_duplicate_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "ann").await;

    let response =
        post_json_auth(app.clone(), "/api/v1/tags", &token, json!({ "name": " verbs " })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["name"], "verbs");

    let response = post_json_auth(app, "/api/v1/tags", &token, json!({ "name": "verbs" })).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_attach_detach_and_delete_tag(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "ann").await;
    let deck = create_deck(&app, &token, "D").await;
    let card = create_card(&app, &token, deck, "q", &[]).await;

    let response =
        post_json_auth(app.clone(), "/api/v1/tags", &token, json!({ "name": "grammar" })).await;
    let tag = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/cards/{card}/tags"),
        &token,
        json!({ "tag_id": tag }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"][0]["id"], tag);

    let json = body_json(get_auth(app.clone(), &format!("/api/v1/cards/{card}/tags"), &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response =
        delete_auth(app.clone(), &format!("/api/v1/cards/{card}/tags/{tag}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response =
        delete_auth(app.clone(), &format!("/api/v1/cards/{card}/tags/{tag}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &format!("/api/v1/tags/{tag}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The card survives its tag.
    let response = get_auth(app, &format!("/api/v1/cards/{card}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cannot_attach_another_users_tag(pool: PgPool) {
    let app = common::build_test_app(pool);
    let ann = register_and_login(&app, "ann").await;
    let bob = register_and_login(&app, "bob").await;
    let deck = create_deck(&app, &ann, "D").await;
    let card = create_card(&app, &ann, deck, "q", &[]).await;

    let response =
        post_json_auth(app.clone(), "/api/v1/tags", &bob, json!({ "name": "bobs" })).await;
    let bobs_tag = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/v1/cards/{card}/tags"),
        &ann,
        json!({ "tag_id": bobs_tag }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

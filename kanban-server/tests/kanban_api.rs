//! End-to-end tests driving the full router over an in-memory database

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use kanban_server::{AppState, api};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let state = AppState::in_memory().await.unwrap();
    api::create_router(state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn patch(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, Some(body)).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

async fn create_list(app: &Router, name: &str) -> i64 {
    let (status, body) = post(app, "/lists", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_card(app: &Router, list_id: i64, content: &str, position: Value) -> i64 {
    let (status, body) = post(
        app,
        "/cards",
        json!({ "list_id": list_id, "content": content, "position": position }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_tag(app: &Router, name: &str) -> i64 {
    let (status, body) = post(app, "/tags", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

fn not_found() -> Value {
    json!({ "error": "Not found" })
}

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_backlog_flow_nests_cards_and_tags() {
    let app = app().await;

    let list_id = create_list(&app, "Backlog").await;
    let card_id = create_card(&app, list_id, "Write spec", json!(1)).await;
    let tag_id = create_tag(&app, "urgent").await;

    let (status, card) = post(&app, &format!("/cards/{card_id}/tag"), json!({ "tag_id": tag_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card["tags"][0]["name"], "urgent");

    let (status, lists) = get(&app, "/lists").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lists.as_array().unwrap().len(), 1);
    assert_eq!(lists[0]["name"], "Backlog");
    assert_eq!(lists[0]["cards"][0]["content"], "Write spec");
    assert_eq!(lists[0]["cards"][0]["position"], 1);
    assert_eq!(lists[0]["cards"][0]["tags"][0]["name"], "urgent");

    let (status, list) = get(&app, &format!("/lists/{list_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["cards"][0]["tags"][0]["id"], tag_id);
}

#[tokio::test]
async fn test_list_validation_rejects_and_persists_nothing() {
    let app = app().await;

    let (status, body) = post(&app, "/lists", json!({ "name": "ab" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["name must have at least 3 caracters"] }));

    let (status, body) = post(&app, "/lists", json!({ "position": "abc" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": ["name can't be empty", "position must be a number"] })
    );

    let (_, lists) = get(&app, "/lists").await;
    assert_eq!(lists, json!([]));
}

#[tokio::test]
async fn test_duplicate_list_names() {
    let app = app().await;
    create_list(&app, "Backlog").await;
    let doing = create_list(&app, "Doing").await;

    let (status, body) = post(&app, "/lists", json!({ "name": "Backlog" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["This name of list is already in use"] }));

    let (status, body) = patch(&app, &format!("/lists/{doing}"), json!({ "name": "Backlog" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": ["This name of list is already in use on another list"] })
    );

    // keeping its own name is not a conflict
    let (status, body) = patch(&app, &format!("/lists/{doing}"), json!({ "name": "Doing" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Doing");
}

#[tokio::test]
async fn test_lists_ordered_by_position() {
    let app = app().await;
    let (_, _) = post(&app, "/lists", json!({ "name": "Done", "position": 3 })).await;
    let (_, _) = post(&app, "/lists", json!({ "name": "Unplaced" })).await;
    let (_, _) = post(&app, "/lists", json!({ "name": "Backlog", "position": "0" })).await;

    let (_, lists) = get(&app, "/lists").await;
    let names: Vec<&str> = lists
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Backlog", "Done", "Unplaced"]);
    assert_eq!(lists[0]["position"], 0);
}

#[tokio::test]
async fn test_card_requires_existing_list() {
    let app = app().await;

    let (status, body) = post(&app, "/cards", json!({ "list_id": 99, "content": "Write spec" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["The list of the card does not exist"] }));

    let (status, body) = post(&app, "/cards", json!({ "list_id": "abc", "content": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": ["list_id must be an integer", "content can't be empty"] })
    );
}

#[tokio::test]
async fn test_cards_of_list_ordered_by_position() {
    let app = app().await;
    let list_id = create_list(&app, "Backlog").await;
    create_card(&app, list_id, "third", json!(3)).await;
    create_card(&app, list_id, "first", json!(0)).await;
    create_card(&app, list_id, "second", json!("2")).await;

    let (status, cards) = get(&app, &format!("/lists/{list_id}/cards")).await;
    assert_eq!(status, StatusCode::OK);
    let contents: Vec<&str> = cards
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, ["first", "second", "third"]);
    assert_eq!(cards[0]["tags"], json!([]));

    let (status, body) = get(&app, "/lists/999/cards").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found());
}

#[tokio::test]
async fn test_card_patch_semantics() {
    let app = app().await;
    let list_id = create_list(&app, "Backlog").await;
    let card_id = create_card(&app, list_id, "Write spec", json!(5)).await;
    let uri = format!("/cards/{card_id}");

    let (_, before) = get(&app, &uri).await;

    // empty changeset changes nothing
    let (status, body) = patch(&app, &uri, json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Write spec");
    assert_eq!(body["position"], 5);
    assert_eq!(body["updated_at"], before["updated_at"]);

    let (status, body) = patch(&app, &uri, json!({ "content": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["content can't be empty"] }));

    let (status, body) = patch(&app, &uri, json!({ "position": 0 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["position"], 0);

    let (status, body) = patch(&app, &uri, json!({ "position": null, "color": "#00ff00" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["position"], Value::Null);
    assert_eq!(body["color"], "#00ff00");
    assert_eq!(body["content"], "Write spec");

    let other = create_list(&app, "Doing").await;
    let (status, body) = patch(&app, &uri, json!({ "list_id": other })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["list_id"], other);

    let (status, body) = patch(&app, &uri, json!({ "list_id": 12345 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["The list of the card does not exist"] }));
}

#[tokio::test]
async fn test_attach_is_idempotent_and_detach_tolerates_missing_link() {
    let app = app().await;
    let list_id = create_list(&app, "Backlog").await;
    let card_id = create_card(&app, list_id, "Write spec", Value::Null).await;
    let urgent = create_tag(&app, "urgent").await;
    let later = create_tag(&app, "later").await;
    let attach_uri = format!("/cards/{card_id}/tag");

    for _ in 0..2 {
        let (status, card) = post(&app, &attach_uri, json!({ "tag_id": urgent })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(card["tags"].as_array().unwrap().len(), 1);
    }

    // never attached: succeeds, tag set unchanged
    let (status, card) = delete(&app, &format!("/cards/{card_id}/tag/{later}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card["tags"].as_array().unwrap().len(), 1);
    assert_eq!(card["tags"][0]["name"], "urgent");

    let (status, card) = delete(&app, &format!("/cards/{card_id}/tag/{urgent}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card["tags"], json!([]));
}

#[tokio::test]
async fn test_attach_and_detach_misses() {
    let app = app().await;
    let list_id = create_list(&app, "Backlog").await;
    let card_id = create_card(&app, list_id, "Write spec", Value::Null).await;
    let tag_id = create_tag(&app, "urgent").await;

    for (uri, body) in [
        (format!("/cards/{card_id}/tag"), json!({ "tag_id": "abc" })),
        (format!("/cards/{card_id}/tag"), json!({ "tag_id": 999 })),
        (format!("/cards/{card_id}/tag"), json!({})),
        ("/cards/999/tag".to_string(), json!({ "tag_id": tag_id })),
    ] {
        let (status, body) = post(&app, &uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, not_found());
    }

    let (status, _) = delete(&app, &format!("/cards/{card_id}/tag/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = delete(&app, &format!("/cards/999/tag/{tag_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_routing_misses_are_404() {
    let app = app().await;
    for uri in ["/lists/abc", "/lists/999", "/cards/12abc", "/tags/999", "/nope"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, not_found());
    }

    let (status, body) = patch(&app, "/lists/999", json!({ "name": "Backlog" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found());

    let (status, _) = delete(&app, "/tags/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // no PUT route
    let (status, body) = send(&app, Method::PUT, "/lists/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, not_found());
}

#[tokio::test]
async fn test_body_must_be_json_object() {
    let app = app().await;
    let expected = json!({ "errors": ["Request body must be a JSON object"] });

    let (status, body) = post(&app, "/lists", json!(["Backlog"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, expected);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/tags")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{broken"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), expected);
}

#[tokio::test]
async fn test_text_fields_are_sanitized() {
    let app = app().await;

    let (status, list) = post(
        &app,
        "/lists",
        json!({ "name": "Backlog<script>alert(1)</script>" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list["name"], "Backlog");

    let (status, card) = post(
        &app,
        "/cards",
        json!({
            "list_id": list["id"],
            "content": "<b>Write</b> spec<span onclick=\"steal()\">!</span>",
            "color": "red<script></script>",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(card["content"], "<b>Write</b> spec<span>!</span>");
    assert_eq!(card["color"], "red");

    let (status, tag) = post(&app, "/tags", json!({ "name": "<i>urgent</i><!-- x -->" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tag["name"], "<i>urgent</i>");
}

#[tokio::test]
async fn test_images_are_stripped() {
    let app = app().await;

    let (status, list) = post(&app, "/lists", json!({ "name": "Backlog<img src=x>" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(list["name"], "Backlog");
}

#[tokio::test]
async fn test_text_emptied_by_sanitizing_is_rejected() {
    let app = app().await;

    let (status, body) = post(&app, "/lists", json!({ "name": "<script>evil</script>" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["name can't be empty"] }));

    let (status, body) = post(&app, "/tags", json!({ "name": "<img src=x>" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["name can't be empty"] }));

    let list_id = create_list(&app, "Backlog").await;
    let card_id = create_card(&app, list_id, "Write spec", json!(1)).await;
    let (status, body) = patch(
        &app,
        &format!("/cards/{card_id}"),
        json!({ "content": "<style>p{}</style>ab" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["content must have at least 3 caracters"] }));

    // nothing was written
    let (_, lists) = get(&app, "/lists").await;
    assert_eq!(lists.as_array().unwrap().len(), 1);
    let (_, card) = get(&app, &format!("/cards/{card_id}")).await;
    assert_eq!(card["content"], "Write spec");
}

#[tokio::test]
async fn test_deletes_cascade() {
    let app = app().await;
    let list_id = create_list(&app, "Backlog").await;
    let card_id = create_card(&app, list_id, "Write spec", json!(1)).await;
    let tag_id = create_tag(&app, "urgent").await;
    post(&app, &format!("/cards/{card_id}/tag"), json!({ "tag_id": tag_id })).await;

    // deleting the tag drops its links but not the card
    let (status, body) = delete(&app, &format!("/tags/{tag_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    let (_, card) = get(&app, &format!("/cards/{card_id}")).await;
    assert_eq!(card["tags"], json!([]));

    let (status, _) = delete(&app, &format!("/lists/{list_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = get(&app, &format!("/cards/{card_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, cards) = get(&app, "/cards").await;
    assert_eq!(cards, json!([]));
}

#[tokio::test]
async fn test_tags_crud() {
    let app = app().await;
    let zeta = create_tag(&app, "zeta").await;
    create_tag(&app, "alpha").await;

    let (_, tags) = get(&app, "/tags").await;
    assert_eq!(tags[0]["name"], "alpha");
    assert_eq!(tags[1]["name"], "zeta");

    let (status, body) = post(&app, "/tags", json!({ "name": "alpha" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "errors": ["This name of tag is already in use"] }));

    let (status, body) = patch(&app, &format!("/tags/{zeta}"), json!({ "name": "alpha" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": ["This name of tag is already in use on another tag"] })
    );

    let (status, body) = patch(&app, &format!("/tags/{zeta}"), json!({ "name": "omega" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "omega");

    let (status, body) = get(&app, &format!("/tags/{zeta}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "omega");
}

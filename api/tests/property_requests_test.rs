//! Integration tests for franchise property requests

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{authed, id_of, new_request, new_user};

#[actix_web::test]
async fn test_franchise_creates_request_with_preferences() {
    let app = init_app!();
    let franchise: Value =
        test::call_and_read_body_json(&app, new_user("f@x.com", "franchise").to_request()).await;
    let franchise = id_of(&franchise);

    let preferences = json!([
        { "min_area": 30.0, "max_area": 60.0 },
        { "max_rent": 2000000, "tags": "corner" },
    ]);
    let resp = test::call_service(&app, new_request(franchise, preferences).to_request()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let id = id_of(&body);
    assert_eq!(body["data"]["franchise_id"], franchise);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["is_deleted"], false);
    let stored = body["data"]["preferences"].as_array().unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|p| p["request_id"] == id));
    assert_eq!(stored[1]["tags"], "corner");

    let req = test::TestRequest::get()
        .uri(&format!("/property-requests/{}", id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Cafe near Hongdae station");
    assert_eq!(body["data"]["preferences"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_create_request_requires_franchise() {
    let app = init_app!();
    let agent: Value =
        test::call_and_read_body_json(&app, new_user("a@x.com", "agent").to_request()).await;

    let resp = test::call_service(&app, new_request(id_of(&agent), json!([])).to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let anonymous = test::TestRequest::post()
        .uri("/property-requests")
        .set_json(json!({ "title": "Cafe" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, anonymous).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_create_request_validates_preferences() {
    let app = init_app!();
    let franchise: Value =
        test::call_and_read_body_json(&app, new_user("f@x.com", "franchise").to_request()).await;

    let resp = test::call_service(
        &app,
        new_request(id_of(&franchise), json!([{ "min_area": -5.0 }])).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"].get("preferences").is_some());
}

#[actix_web::test]
async fn test_update_replaces_preferences() {
    let app = init_app!();
    let franchise: Value =
        test::call_and_read_body_json(&app, new_user("f@x.com", "franchise").to_request()).await;
    let franchise = id_of(&franchise);
    let created: Value = test::call_and_read_body_json(
        &app,
        new_request(franchise, json!([{ "min_area": 30.0 }, { "max_rent": 1 }])).to_request(),
    )
    .await;
    let uri = format!("/property-requests/{}", id_of(&created));

    // status only: preferences are kept
    let req = authed(test::TestRequest::patch().uri(&uri), franchise)
        .set_json(json!({ "status": "in_progress" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "in_progress");
    assert_eq!(body["data"]["preferences"].as_array().unwrap().len(), 2);

    let req = authed(test::TestRequest::patch().uri(&uri), franchise)
        .set_json(json!({ "preferences": [{ "min_area": 40.0 }] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let stored = body["data"]["preferences"].as_array().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["min_area"], 40.0);
    assert_eq!(body["data"]["status"], "in_progress");
}

#[actix_web::test]
async fn test_list_requests_filters() {
    let app = init_app!();
    let first: Value =
        test::call_and_read_body_json(&app, new_user("f1@x.com", "franchise").to_request()).await;
    let second: Value =
        test::call_and_read_body_json(&app, new_user("f2@x.com", "franchise").to_request()).await;
    let (first, second) = (id_of(&first), id_of(&second));

    let mut ids = Vec::new();
    for franchise in [first, first, second] {
        let body: Value =
            test::call_and_read_body_json(&app, new_request(franchise, json!([])).to_request())
                .await;
        ids.push(id_of(&body));
    }

    let req = authed(
        test::TestRequest::patch().uri(&format!("/property-requests/{}", ids[1])),
        first,
    )
    .set_json(json!({ "status": "completed" }))
    .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/property-requests").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 3);

    let req = test::TestRequest::get()
        .uri(&format!("/property-requests?franchise_id={}", first))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/property-requests?franchise_id={}&status=pending",
            first
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["id"], ids[0]);

    let req = test::TestRequest::get()
        .uri("/property-requests?status=unknown")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_delete_request_requires_owner() {
    let app = init_app!();
    let owner: Value =
        test::call_and_read_body_json(&app, new_user("f1@x.com", "franchise").to_request()).await;
    let rival: Value =
        test::call_and_read_body_json(&app, new_user("f2@x.com", "franchise").to_request()).await;
    let owner = id_of(&owner);
    let created: Value =
        test::call_and_read_body_json(&app, new_request(owner, json!([])).to_request()).await;
    let uri = format!("/property-requests/{}", id_of(&created));

    let req = authed(test::TestRequest::delete().uri(&uri), id_of(&rival)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = authed(test::TestRequest::delete().uri(&uri), owner).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = authed(test::TestRequest::patch().uri(&uri), owner)
        .set_json(json!({ "status": "cancelled" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

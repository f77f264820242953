//! Integration tests for listings, images and favorites

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use common::{authed, id_of, new_property, new_user};

#[actix_web::test]
async fn test_agent_creates_property() {
    let app = init_app!();
    let agent: Value =
        test::call_and_read_body_json(&app, new_user("a@x.com", "agent").to_request()).await;
    let agent_id = id_of(&agent);

    let req = authed(test::TestRequest::post().uri("/properties"), agent_id)
        .set_json(json!({ "title": "Flat", "address": "Seoul" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["agent_id"], agent_id);
    assert_eq!(body["data"]["status"], "available");
    assert_eq!(body["data"]["is_deleted"], false);
    assert_eq!(body["message"], "Property created successfully");
}

#[actix_web::test]
async fn test_create_property_requires_agent() {
    let app = init_app!();
    let owner: Value =
        test::call_and_read_body_json(&app, new_user("o@x.com", "owner").to_request()).await;

    let resp = test::call_service(&app, new_property(id_of(&owner), "Flat").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let anonymous = test::TestRequest::post()
        .uri("/properties")
        .set_json(json!({ "title": "Flat", "address": "Seoul" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, anonymous).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_create_property_rejects_blank_title() {
    let app = init_app!();
    let agent: Value =
        test::call_and_read_body_json(&app, new_user("a@x.com", "agent").to_request()).await;

    let req = authed(test::TestRequest::post().uri("/properties"), id_of(&agent))
        .set_json(json!({ "title": "", "address": "Seoul" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_list_properties_pagination() {
    let app = init_app!();
    let first: Value =
        test::call_and_read_body_json(&app, new_user("a@x.com", "agent").to_request()).await;
    let second: Value =
        test::call_and_read_body_json(&app, new_user("b@x.com", "agent").to_request()).await;
    let (first, second) = (id_of(&first), id_of(&second));

    for i in 0..3 {
        let req = new_property(first, &format!("First {}", i)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }
    for i in 0..2 {
        let req = new_property(second, &format!("Second {}", i)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/properties").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 5);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"][0]["title"], "First 0");

    let req = test::TestRequest::get()
        .uri("/properties?skip=1&limit=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 5);
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First 1", "First 2"]);

    let req = test::TestRequest::get()
        .uri("/properties?skip=10&limit=10")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 5);
    assert!(body["data"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/properties?agent_id={}", second))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);
    assert!(body["data"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["agent_id"] == second));
}

#[actix_web::test]
async fn test_list_properties_rejects_bad_limit() {
    let app = init_app!();

    for uri in ["/properties?limit=0", "/properties?limit=101", "/properties?skip=-1"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[actix_web::test]
async fn test_property_detail_includes_agent_contact() {
    let app = init_app!();
    let agent: Value =
        test::call_and_read_body_json(&app, new_user("a@x.com", "agent").to_request()).await;
    let created: Value =
        test::call_and_read_body_json(&app, new_property(id_of(&agent), "Flat").to_request())
            .await;

    let req = test::TestRequest::get()
        .uri(&format!("/properties/{}", id_of(&created)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Flat");
    assert_eq!(body["data"]["agent_name"], "Kim Minji");
    assert_eq!(body["data"]["agent_phone"], "010-1234-5678");
    assert_eq!(body["data"]["area_pyeong"], 10.0);
}

#[actix_web::test]
async fn test_update_and_delete_require_owner() {
    let app = init_app!();
    let owner: Value =
        test::call_and_read_body_json(&app, new_user("a@x.com", "agent").to_request()).await;
    let rival: Value =
        test::call_and_read_body_json(&app, new_user("b@x.com", "agent").to_request()).await;
    let (owner, rival) = (id_of(&owner), id_of(&rival));
    let created: Value =
        test::call_and_read_body_json(&app, new_property(owner, "Flat").to_request()).await;
    let uri = format!("/properties/{}", id_of(&created));

    let req = authed(test::TestRequest::patch().uri(&uri), rival)
        .set_json(json!({ "status": "sold" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = authed(test::TestRequest::patch().uri(&uri), owner)
        .set_json(json!({ "status": "offMarket", "monthly_rent": 750000 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "offMarket");
    assert_eq!(body["data"]["monthly_rent"], 750000);
    assert_eq!(body["data"]["deposit"], 10000000);

    let req = authed(test::TestRequest::patch().uri(&uri), owner)
        .set_json(json!({ "area_m2": 66.12 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["area_m2"], 66.12);
    assert_eq!(body["data"]["area_pyeong"], 20.0);

    let req = authed(test::TestRequest::delete().uri(&uri), rival).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = authed(test::TestRequest::delete().uri(&uri), owner).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/properties").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 0);
}

#[actix_web::test]
async fn test_property_images() {
    let app = init_app!();
    let owner: Value =
        test::call_and_read_body_json(&app, new_user("a@x.com", "agent").to_request()).await;
    let rival: Value =
        test::call_and_read_body_json(&app, new_user("b@x.com", "agent").to_request()).await;
    let owner = id_of(&owner);
    let created: Value =
        test::call_and_read_body_json(&app, new_property(owner, "Flat").to_request()).await;
    let uri = format!("/properties/{}/images", id_of(&created));

    let req = authed(test::TestRequest::post().uri(&uri), id_of(&rival))
        .set_json(json!({ "url": "https://cdn.kloom.kr/a.jpg" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = authed(test::TestRequest::post().uri(&uri), owner)
        .set_json(json!({ "url": "not a url" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = authed(test::TestRequest::post().uri(&uri), owner)
        .set_json(json!({
            "url": "https://cdn.kloom.kr/front.jpg",
            "is_primary": true,
            "caption": "Front",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let image: Value = test::read_body_json(resp).await;
    assert_eq!(image["data"]["is_primary"], true);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["caption"], "Front");

    let req = test::TestRequest::get()
        .uri("/properties/999/images")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_favorites() {
    let app = init_app!();
    let agent: Value =
        test::call_and_read_body_json(&app, new_user("a@x.com", "agent").to_request()).await;
    let fan: Value =
        test::call_and_read_body_json(&app, new_user("f@x.com", "franchise").to_request()).await;
    let (agent, fan) = (id_of(&agent), id_of(&fan));
    let flat: Value =
        test::call_and_read_body_json(&app, new_property(agent, "Flat").to_request()).await;
    let shop: Value =
        test::call_and_read_body_json(&app, new_property(agent, "Shop").to_request()).await;
    let (flat, shop) = (id_of(&flat), id_of(&shop));

    let favorite = |property: i64| {
        authed(
            test::TestRequest::post().uri(&format!("/properties/{}/favorite", property)),
            fan,
        )
        .to_request()
    };

    let first: Value = test::call_and_read_body_json(&app, favorite(flat)).await;
    let again: Value = test::call_and_read_body_json(&app, favorite(flat)).await;
    assert_eq!(first["data"]["id"], again["data"]["id"]);
    let resp = test::call_service(&app, favorite(shop)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, favorite(999)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let mine = || authed(test::TestRequest::get().uri("/users/me/favorites"), fan).to_request();
    let body: Value = test::call_and_read_body_json(&app, mine()).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["data"][0]["id"], shop);
    assert_eq!(body["data"][1]["id"], flat);

    let req = authed(
        test::TestRequest::delete().uri(&format!("/properties/{}", shop)),
        agent,
    )
    .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let body: Value = test::call_and_read_body_json(&app, mine()).await;
    assert_eq!(body["total"], 1);

    let unfavorite = || {
        authed(
            test::TestRequest::delete().uri(&format!("/properties/{}/favorite", flat)),
            fan,
        )
        .to_request()
    };
    assert_eq!(test::call_service(&app, unfavorite()).await.status(), StatusCode::OK);
    assert_eq!(test::call_service(&app, unfavorite()).await.status(), StatusCode::OK);
    let body: Value = test::call_and_read_body_json(&app, mine()).await;
    assert_eq!(body["total"], 0);

    let anonymous = test::TestRequest::get().uri("/users/me/favorites").to_request();
    assert_eq!(
        test::call_service(&app, anonymous).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

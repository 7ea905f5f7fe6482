//! CSRF enforcement on mutations, in the service layer and over HTTP.
mod common;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use crm_backend::db::users as user_db;
use crm_backend::error::CrmError;
use crm_backend::handlers;
use crm_backend::models::businesses::{BusinessFilter, BusinessForm};
use crm_backend::services::auth::hash_password;
use crm_backend::services::businesses;

#[tokio::test]
async fn mismatched_token_is_rejected_without_writing() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    common::csrf(&state, &admin).await;

    let result = businesses::create_business(
        &state,
        &admin,
        "forged-token",
        BusinessForm {
            name: "Acme AS".to_string(),
            ..Default::default()
        },
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, CrmError::InvalidRequest));
    assert_eq!(err.to_string(), "Invalid request");

    let page = businesses::list_businesses(&state, &admin, BusinessFilter::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn token_is_single_use() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let token = common::csrf(&state, &admin).await;
    let form = || BusinessForm {
        name: "Acme AS".to_string(),
        ..Default::default()
    };

    businesses::create_business(&state, &admin, &token, form()).await.unwrap();
    let replay = businesses::create_business(&state, &admin, &token, form()).await;

    assert!(matches!(replay, Err(CrmError::InvalidRequest)));
}

#[tokio::test]
async fn token_from_another_session_is_rejected() {
    let state = common::setup().await;
    let admin = common::admin(&state).await;
    let mut other_tab = admin.clone();
    other_tab.session_id = "another-session".to_string();
    let token = common::csrf(&state, &other_tab).await;

    let result = businesses::delete_business(&state, &admin, &token, uuid::Uuid::new_v4()).await;
    assert!(matches!(result, Err(CrmError::InvalidRequest)));
}

#[actix_web::test]
async fn http_mutation_requires_csrf_header() {
    let state = common::setup().await;
    let role = common::admin_role(&state).await;
    let hash = hash_password("s3cret-pass", 4).await.unwrap();
    user_db::insert_user(
        &state.db,
        "Ola".to_string(),
        "ola@example.com".to_string(),
        role.id,
        hash,
    )
    .await
    .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(web::scope("/api").configure(handlers::init_routes)),
    )
    .await;

    // No session at all.
    let req = test::TestRequest::get().uri("/api/businesses").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ola@example.com", "password": "s3cret-pass" }))
        .to_request();
    let login: Value = test::call_and_read_body_json(&app, req).await;
    let bearer = format!("Bearer {}", login["token"].as_str().unwrap());

    // Missing CSRF header.
    let req = test::TestRequest::post()
        .uri("/api/businesses")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({ "name": "Acme AS" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid request");

    // With a freshly issued token.
    let req = test::TestRequest::get()
        .uri("/api/auth/csrf")
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let csrf: Value = test::call_and_read_body_json(&app, req).await;
    let token = csrf["csrf_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/businesses")
        .insert_header(("Authorization", bearer.clone()))
        .insert_header(("X-CSRF-Token", token))
        .set_json(json!({ "name": "Acme AS" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/businesses?search=acme")
        .insert_header(("Authorization", bearer))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total_items"], 1);
    assert_eq!(page["items"][0]["name"], "Acme AS");
}

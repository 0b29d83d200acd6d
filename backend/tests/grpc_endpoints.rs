//! End-to-end exercises of the gRPC surface, plus dual-transport visibility.
//!
//! The gRPC service methods are invoked directly (no network listener); the
//! cross-transport tests mount an HTTP app over the *same* service instances
//! to show that a mutation on one transport is immediately visible on the
//! other.

use actix_web::{App, http::StatusCode, test, web};
use profile_backend::inbound::http::profiles::{create_profile, get_profile};
use profile_backend::proto::profile_v1 as pb;
use profile_backend::proto::profile_v1::profile_service_server::ProfileService;
use profile_backend::test_support::FixtureBackend;
use serde_json::{Value, json};
use tonic::{Code, Request};

#[tokio::test]
async fn profile_lifecycle_over_grpc() {
    let backend = FixtureBackend::new();
    let grpc = backend.grpc_service();

    let created = grpc
        .create_profile(Request::new(pb::CreateProfileRequest {
            user_id: 7,
            email: "a@b.com".into(),
        }))
        .await
        .expect("create should succeed")
        .into_inner();
    assert!(created.id > 0);
    assert_eq!(created.user_id, 7);

    // Second create for the same user conflicts.
    let status = grpc
        .create_profile(Request::new(pb::CreateProfileRequest {
            user_id: 7,
            email: "other@b.com".into(),
        }))
        .await
        .expect_err("create should conflict");
    assert_eq!(status.code(), Code::AlreadyExists);

    let fetched = grpc
        .get_profile(Request::new(pb::GetProfileRequest { id: created.id }))
        .await
        .expect("lookup should succeed")
        .into_inner();
    assert_eq!(fetched.email, "a@b.com");
    assert_eq!(fetched.created_at, created.created_at);

    let deleted = grpc
        .delete_profile(Request::new(pb::DeleteProfileRequest { id: created.id }))
        .await
        .expect("delete should succeed")
        .into_inner();
    assert_eq!(deleted.message, "profile deleted successfully");

    let status = grpc
        .get_profile(Request::new(pb::GetProfileRequest { id: created.id }))
        .await
        .expect_err("lookup should miss");
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn contact_validation_matches_the_http_rules() {
    let backend = FixtureBackend::new();
    let grpc = backend.grpc_service();

    let status = grpc
        .create_contact(Request::new(pb::CreateContactRequest {
            profile_id: 5,
            dob: "1990/01/02".into(),
            ..pb::CreateContactRequest::default()
        }))
        .await
        .expect_err("validation should fail");
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "dob must be in YYYY-MM-DD format");

    let status = grpc
        .create_contact(Request::new(pb::CreateContactRequest::default()))
        .await
        .expect_err("validation should fail");
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "profile_id is required");
}

#[tokio::test]
async fn contact_list_pages_over_grpc() {
    let backend = FixtureBackend::new();
    let grpc = backend.grpc_service();

    for n in 1..=7_u32 {
        grpc.create_contact(Request::new(pb::CreateContactRequest {
            profile_id: 3,
            first_name: format!("c{n}"),
            ..pb::CreateContactRequest::default()
        }))
        .await
        .expect("create should succeed");
    }

    let page = grpc
        .list_contacts(Request::new(pb::ListContactsRequest {
            profile_id: 3,
            page: 2,
            page_size: 5,
            ..pb::ListContactsRequest::default()
        }))
        .await
        .expect("list should succeed")
        .into_inner();

    assert_eq!(page.page, 2);
    assert_eq!(page.page_size, 5);
    assert_eq!(page.total, 7);
    let ids: Vec<u64> = page.contacts.iter().map(|row| row.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[actix_web::test]
async fn grpc_writes_are_visible_over_http() {
    let backend = FixtureBackend::new();
    let grpc = backend.grpc_service();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(backend.http_state()))
            .service(create_profile)
            .service(get_profile),
    )
    .await;

    let created = grpc
        .create_profile(Request::new(pb::CreateProfileRequest {
            user_id: 11,
            email: "grpc@b.com".into(),
        }))
        .await
        .expect("create should succeed")
        .into_inner();

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/profiles/{}", created.id))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["email"], "grpc@b.com");
}

#[actix_web::test]
async fn http_writes_are_visible_over_grpc() {
    let backend = FixtureBackend::new();
    let grpc = backend.grpc_service();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(backend.http_state()))
            .service(create_profile),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/profiles")
            .set_json(json!({ "user_id": 12, "email": "http@b.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    let id = created["id"].as_u64().expect("id is numeric");

    let fetched = grpc
        .get_profile(Request::new(pb::GetProfileRequest { id }))
        .await
        .expect("lookup should succeed")
        .into_inner();
    assert_eq!(fetched.email, "http@b.com");
}

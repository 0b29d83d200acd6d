//! Profile HTTP handlers.
//!
//! ```text
//! POST   /profiles
//! GET    /profiles/{id}
//! GET    /profiles/user/{user_id}
//! PUT    /profiles/{id}
//! DELETE /profiles/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::Profile;
use crate::domain::requests::{
    CreateProfileRequest, UpdateProfileRequest, validate_id, validate_user_id,
};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::schemas::DeleteResponse;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /profiles`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProfileBody {
    /// External identity the profile belongs to.
    #[serde(default)]
    pub user_id: u64,
    /// Contact email.
    #[serde(default)]
    pub email: String,
}

/// Request body for `PUT /profiles/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileBody {
    /// Replacement email.
    #[serde(default)]
    pub email: String,
}

/// Profile payload returned by every profile endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// Server-assigned surrogate id.
    pub id: u64,
    /// Owning user id.
    pub user_id: u64,
    /// Contact email.
    pub email: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last-modification timestamp, RFC 3339.
    pub updated_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            email: value.email,
            created_at: value.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: value.updated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Create a profile.
#[utoipa::path(
    post,
    path = "/profiles",
    request_body = CreateProfileBody,
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error),
        (status = 409, description = "Profile already exists for this user", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["profiles"]
)]
#[post("/profiles")]
pub async fn create_profile(
    state: web::Data<HttpState>,
    body: web::Json<CreateProfileBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let req = CreateProfileRequest {
        user_id: body.user_id,
        email: body.email,
    };
    req.validate()?;

    info!(user_id = req.user_id, "create profile request received");
    let profile = state.profiles.create(&req).await?;

    Ok(HttpResponse::Created().json(ProfileResponse::from(profile)))
}

/// Fetch a profile by id.
#[utoipa::path(
    get,
    path = "/profiles/{id}",
    params(("id" = u64, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Profile not found", body = crate::domain::Error)
    ),
    tags = ["profiles"]
)]
#[get("/profiles/{id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    validate_id(id)?;

    let profile = state.profiles.get_by_id(id).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

/// Fetch a profile by its owning user id.
#[utoipa::path(
    get,
    path = "/profiles/user/{user_id}",
    params(("user_id" = u64, Path, description = "Owning user id")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 400, description = "Invalid user id", body = crate::domain::Error),
        (status = 404, description = "Profile not found", body = crate::domain::Error)
    ),
    tags = ["profiles"]
)]
#[get("/profiles/user/{user_id}")]
pub async fn get_profile_by_user_id(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let user_id = path.into_inner();
    validate_user_id(user_id)?;

    let profile = state.profiles.get_by_user_id(user_id).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

/// Replace a profile's mutable fields.
#[utoipa::path(
    put,
    path = "/profiles/{id}",
    params(("id" = u64, Path, description = "Profile id")),
    request_body = UpdateProfileBody,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Validation failure", body = crate::domain::Error),
        (status = 404, description = "Profile not found", body = crate::domain::Error)
    ),
    tags = ["profiles"]
)]
#[put("/profiles/{id}")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    body: web::Json<UpdateProfileBody>,
) -> ApiResult<HttpResponse> {
    let req = UpdateProfileRequest {
        id: path.into_inner(),
        email: body.into_inner().email,
    };
    req.validate()?;

    info!(profile_id = req.id, "update profile request received");
    let profile = state.profiles.update(&req).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

/// Delete a profile.
#[utoipa::path(
    delete,
    path = "/profiles/{id}",
    params(("id" = u64, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile deleted", body = DeleteResponse),
        (status = 400, description = "Invalid id", body = crate::domain::Error),
        (status = 404, description = "Profile not found", body = crate::domain::Error)
    ),
    tags = ["profiles"]
)]
#[delete("/profiles/{id}")]
pub async fn delete_profile(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    validate_id(id)?;

    info!(profile_id = id, "delete profile request received");
    state.profiles.delete(id).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse::deleted("profile")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockProfileRepository, ProfileRepositoryError};
    use crate::inbound::http::test_utils::state_with_profiles;
    use actix_web::{App, http::StatusCode, test};
    use chrono::Utc;
    use serde_json::{Value, json};

    fn stored(id: u64, user_id: u64, email: &str) -> Profile {
        let now = Utc::now();
        Profile {
            id,
            user_id,
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn spawn_app(
        repo: MockProfileRepository,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_profiles(repo)))
                .service(create_profile)
                .service(get_profile)
                .service(get_profile_by_user_id)
                .service(update_profile)
                .service(delete_profile),
        )
        .await
    }

    #[actix_web::test]
    async fn create_returns_201_with_the_stored_profile() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id().returning(|_| Ok(None));
        repo.expect_create().returning(|profile| {
            Ok(Profile {
                id: 42,
                ..profile.clone()
            })
        });

        let app = spawn_app(repo).await;
        let req = test::TestRequest::post()
            .uri("/profiles")
            .set_json(json!({ "user_id": 7, "email": "a@b.com" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["id"], 42);
        assert_eq!(body["user_id"], 7);
        assert_eq!(body["email"], "a@b.com");
    }

    #[actix_web::test]
    async fn create_without_user_id_returns_400() {
        let app = spawn_app(MockProfileRepository::new()).await;
        let req = test::TestRequest::post()
            .uri("/profiles")
            .set_json(json!({ "email": "a@b.com" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "user_id is required");
    }

    #[actix_web::test]
    async fn duplicate_create_returns_409() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id()
            .returning(|user_id| Ok(Some(stored(42, user_id, "a@b.com"))));

        let app = spawn_app(repo).await;
        let req = test::TestRequest::post()
            .uri("/profiles")
            .set_json(json!({ "user_id": 7, "email": "a@b.com" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "profile already exists for this user");
    }

    #[actix_web::test]
    async fn get_missing_profile_returns_404() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let app = spawn_app(repo).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/profiles/42").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn get_zero_id_returns_400() {
        let app = spawn_app(MockProfileRepository::new()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/profiles/0").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "invalid id provided");
    }

    #[actix_web::test]
    async fn get_by_user_id_returns_the_profile() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find_by_user_id()
            .returning(|user_id| Ok(Some(stored(42, user_id, "a@b.com"))));

        let app = spawn_app(repo).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/profiles/user/7").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["user_id"], 7);
    }

    #[actix_web::test]
    async fn update_with_empty_email_returns_400() {
        let app = spawn_app(MockProfileRepository::new()).await;
        let req = test::TestRequest::put()
            .uri("/profiles/42")
            .set_json(json!({ "email": "" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "invalid email");
    }

    #[actix_web::test]
    async fn delete_returns_confirmation_message() {
        let mut repo = MockProfileRepository::new();
        repo.expect_delete().returning(|_| Ok(()));

        let app = spawn_app(repo).await;
        let res = test::call_service(
            &app,
            test::TestRequest::delete().uri("/profiles/42").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "profile deleted successfully");
    }

    #[actix_web::test]
    async fn delete_missing_profile_returns_404() {
        let mut repo = MockProfileRepository::new();
        repo.expect_delete()
            .returning(|_| Err(ProfileRepositoryError::missing()));

        let app = spawn_app(repo).await;
        let res = test::call_service(
            &app,
            test::TestRequest::delete().uri("/profiles/42").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

//! API-key gate for the HTTP transport.
//!
//! Requests must present an `x-api-key` header that the configured
//! [`AccessValidator`] accepts before any handler runs. Health probes are
//! mounted outside this middleware and stay reachable without a key.

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error};

use crate::domain::Error;
use crate::domain::ports::{AccessValidator, AccessValidatorError};

/// Request header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware validating the caller's API key before dispatch.
#[derive(Clone)]
pub struct ApiKeyAuth {
    validator: Arc<dyn AccessValidator>,
}

impl ApiKeyAuth {
    /// Gate requests with the given validator.
    pub fn new(validator: Arc<dyn AccessValidator>) -> Self {
        Self { validator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service: Rc::new(service),
            validator: Arc::clone(&self.validator),
        }))
    }
}

/// Service wrapper produced by [`ApiKeyAuth`].
pub struct ApiKeyAuthMiddleware<S> {
    service: Rc<S>,
    validator: Arc<dyn AccessValidator>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let validator = Arc::clone(&self.validator);

        Box::pin(async move {
            let api_key = req
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .trim()
                .to_owned();

            match validator.validate_access(&api_key).await {
                Ok(()) => service.call(req).await,
                Err(AccessValidatorError::Denied { message }) => {
                    debug!(path = %req.path(), "request rejected by access validation");
                    Err(Error::unauthorized(message).into())
                }
                Err(err @ AccessValidatorError::Unavailable { .. }) => {
                    error!(error = %err, "access validation backend unavailable");
                    Err(Error::internal(err.to_string()).into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockAccessValidator;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    async fn request_with_key(validator: MockAccessValidator, key: Option<&str>) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(ApiKeyAuth::new(Arc::new(validator)))
                .route("/", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/");
        if let Some(key) = key {
            req = req.insert_header((API_KEY_HEADER, key));
        }
        match test::try_call_service(&app, req.to_request()).await {
            Ok(res) => res.status(),
            Err(err) => err.error_response().status(),
        }
    }

    #[actix_web::test]
    async fn accepted_keys_reach_the_handler() {
        let mut validator = MockAccessValidator::new();
        validator
            .expect_validate_access()
            .withf(|key| key == "caller-key")
            .returning(|_| Ok(()));

        let status = request_with_key(validator, Some("caller-key")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn rejected_keys_get_401() {
        let mut validator = MockAccessValidator::new();
        validator
            .expect_validate_access()
            .returning(|_| Err(AccessValidatorError::denied("invalid api key")));

        let status = request_with_key(validator, Some("wrong")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn missing_keys_are_validated_as_empty() {
        let mut validator = MockAccessValidator::new();
        validator
            .expect_validate_access()
            .withf(|key| key.is_empty())
            .returning(|_| Err(AccessValidatorError::denied("invalid api key")));

        let status = request_with_key(validator, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn validator_outage_maps_to_500() {
        let mut validator = MockAccessValidator::new();
        validator
            .expect_validate_access()
            .returning(|_| Err(AccessValidatorError::unavailable("connect refused")));

        let status = request_with_key(validator, Some("caller-key")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

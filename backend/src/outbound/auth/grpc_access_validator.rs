//! gRPC-backed `AccessValidator` adapter.
//!
//! Delegates API-key decisions to the external auth service's
//! `ValidateInternalAccess` RPC. The outbound call authenticates itself with
//! this service's own application API key in the `x-api-key` metadata, and a
//! key is accepted only when the response lists this service among the
//! caller's allowed targets.

use async_trait::async_trait;
use tonic::metadata::MetadataValue;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request};
use tracing::debug;

use crate::domain::ports::{AccessValidator, AccessValidatorError};
use crate::middleware::api_key::API_KEY_HEADER;
use crate::proto::auth_v1::ValidateInternalAccessRequest;
use crate::proto::auth_v1::auth_service_client::AuthServiceClient;

/// Access validator consulting the auth service over gRPC.
#[derive(Clone)]
pub struct GrpcAccessValidator {
    client: AuthServiceClient<Channel>,
    service_name: String,
    app_api_key: String,
}

impl GrpcAccessValidator {
    /// Build a validator with a lazily-connected channel to `addr`.
    ///
    /// The channel is established on first use, so a momentarily unreachable
    /// auth service does not block startup.
    pub fn connect_lazy(
        addr: &str,
        service_name: impl Into<String>,
        app_api_key: impl Into<String>,
    ) -> Result<Self, tonic::transport::Error> {
        let uri = if addr.contains("://") {
            addr.to_owned()
        } else {
            format!("http://{addr}")
        };
        let channel = Endpoint::from_shared(uri)?.connect_lazy();

        Ok(Self {
            client: AuthServiceClient::new(channel),
            service_name: service_name.into(),
            app_api_key: app_api_key.into(),
        })
    }
}

#[async_trait]
impl AccessValidator for GrpcAccessValidator {
    async fn validate_access(&self, api_key: &str) -> Result<(), AccessValidatorError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AccessValidatorError::denied("api key is required"));
        }

        let app_key = MetadataValue::try_from(self.app_api_key.as_str())
            .map_err(|_| AccessValidatorError::unavailable("app api key is not valid metadata"))?;

        let mut request = Request::new(ValidateInternalAccessRequest {
            api_key: api_key.to_owned(),
        });
        request.metadata_mut().insert(API_KEY_HEADER, app_key);

        let mut client = self.client.clone();
        match client.validate_internal_access(request).await {
            Ok(response) => {
                let response = response.into_inner();
                if response
                    .allowed_access
                    .iter()
                    .any(|name| name == &self.service_name)
                {
                    Ok(())
                } else {
                    debug!(
                        caller = %response.service_name,
                        "caller validated but not allowed to access this service"
                    );
                    Err(AccessValidatorError::denied(
                        "caller is not allowed to access this service",
                    ))
                }
            }
            Err(status) => match status.code() {
                Code::Unauthenticated | Code::PermissionDenied => {
                    Err(AccessValidatorError::denied(status.message().to_owned()))
                }
                _ => Err(AccessValidatorError::unavailable(
                    status.message().to_owned(),
                )),
            },
        }
    }
}

//! Port for inbound API-key validation.
//!
//! Both transports gate requests on an API key before any handler runs. The
//! actual decision is delegated to an external auth service; this port keeps
//! the adapters unaware of how the decision is made.

use async_trait::async_trait;

use super::macros::define_port_error;

define_port_error! {
    /// Errors raised by access validator adapters.
    pub enum AccessValidatorError {
        /// The key is missing, unknown or not allowed to call this service.
        Denied { message: String } =>
            "{message}",
        /// The validation backend could not be reached.
        Unavailable { message: String } =>
            "access validation unavailable: {message}",
    }
}

/// Port deciding whether an inbound API key may call this service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessValidator: Send + Sync {
    /// Validate the presented API key; `Ok(())` grants access.
    async fn validate_access(&self, api_key: &str) -> Result<(), AccessValidatorError>;
}

/// Permissive validator used when no auth service address is configured.
///
/// Local development and tests run without an auth backend; production
/// deployments configure the gRPC-backed validator instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAllAccessValidator;

#[async_trait]
impl AccessValidator for AllowAllAccessValidator {
    async fn validate_access(&self, _api_key: &str) -> Result<(), AccessValidatorError> {
        Ok(())
    }
}

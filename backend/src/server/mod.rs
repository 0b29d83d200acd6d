//! Server construction and process bootstrap.
//!
//! Wires the Diesel repositories into the entity services, builds the HTTP
//! and gRPC listeners over those same service instances, and drives graceful
//! shutdown: on SIGINT/SIGTERM both listeners drain in-flight requests
//! within the configured grace period before the process exits.

mod config;

pub use config::{AppConfig, ConfigError};

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{error, info, warn};

use crate::domain::ports::{AccessValidator, AllowAllAccessValidator};
use crate::domain::{AddressService, CompanyService, ContactService, Error, ProfileService};
use crate::inbound::grpc::ProfileGrpcService;
use crate::inbound::http::addresses::{
    create_address, delete_address, get_address, list_addresses, update_address,
};
use crate::inbound::http::companies::{
    create_company, delete_company, get_company, list_companies, update_company,
};
use crate::inbound::http::contacts::{
    create_contact, delete_contact, get_contact, list_contacts, update_contact,
};
use crate::inbound::http::health::{HealthState, health, live, ready};
use crate::inbound::http::profiles::{
    create_profile, delete_profile, get_profile, get_profile_by_user_id, update_profile,
};
use crate::inbound::http::state::HttpState;
use crate::doc::openapi_json;
use crate::middleware::{ApiKeyAuth, Trace};
use crate::outbound::auth::GrpcAccessValidator;
use crate::outbound::persistence::{
    DbPool, DieselAddressRepository, DieselCompanyRepository, DieselContactRepository,
    DieselProfileRepository, PoolConfig, run_pending_migrations,
};
use crate::proto::profile_v1::profile_service_server::ProfileServiceServer;

fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
    access: Arc<dyn AccessValidator>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("")
        .wrap(ApiKeyAuth::new(access))
        .service(create_profile)
        .service(get_profile_by_user_id)
        .service(get_profile)
        .service(update_profile)
        .service(delete_profile)
        .service(create_contact)
        .service(list_contacts)
        .service(get_contact)
        .service(update_contact)
        .service(delete_contact)
        .service(create_address)
        .service(list_addresses)
        .service(get_address)
        .service(update_address)
        .service(delete_address)
        .service(create_company)
        .service(list_companies)
        .service(get_company)
        .service(update_company)
        .service(delete_company);

    App::new()
        .app_data(state)
        .app_data(health_state)
        .app_data(web::JsonConfig::default().error_handler(|_err, _req| {
            Error::invalid_request("invalid request body").into()
        }))
        .app_data(
            web::PathConfig::default()
                .error_handler(|_err, _req| Error::invalid_request("invalid request").into()),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|_err, _req| Error::invalid_request("invalid request").into()),
        )
        .wrap(Trace)
        .service(health)
        .service(ready)
        .service(live)
        .service(openapi_json)
        .service(api)
}

/// Construct the Actix HTTP server over the shared service instances.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_http_server(
    state: HttpState,
    health_state: web::Data<HealthState>,
    access: Arc<dyn AccessValidator>,
    bind: (String, u16),
) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let server = HttpServer::new(move || {
        build_app(state.clone(), health_state.clone(), Arc::clone(&access))
    })
    .bind(bind)?
    .run();

    Ok(server)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

/// Run the service until a shutdown signal arrives.
///
/// Applies pending migrations, builds the pool, repositories and services,
/// then serves HTTP and gRPC concurrently over the same service instances.
///
/// # Errors
///
/// Returns [`std::io::Error`] when startup fails or either listener dies
/// unexpectedly.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    run_pending_migrations(&config.database_url)
        .await
        .map_err(std::io::Error::other)?;

    let pool_config = PoolConfig::new(&config.database_url)
        .with_max_size(config.db_max_connections)
        .with_min_idle(Some(config.db_min_idle))
        .with_connection_timeout(config.db_connect_timeout);
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;

    let profiles = Arc::new(ProfileService::new(Arc::new(DieselProfileRepository::new(
        pool.clone(),
    ))));
    let contacts = Arc::new(ContactService::new(Arc::new(DieselContactRepository::new(
        pool.clone(),
    ))));
    let addresses = Arc::new(AddressService::new(Arc::new(DieselAddressRepository::new(
        pool.clone(),
    ))));
    let companies = Arc::new(CompanyService::new(Arc::new(DieselCompanyRepository::new(
        pool,
    ))));

    let access: Arc<dyn AccessValidator> = match config.auth_grpc_addr.as_deref() {
        Some(addr) => Arc::new(
            GrpcAccessValidator::connect_lazy(addr, &config.service_name, &config.app_api_key)
                .map_err(std::io::Error::other)?,
        ),
        None => {
            warn!("AUTH_SERVICE_GRPC_ADDR not set; access validation is disabled");
            Arc::new(AllowAllAccessValidator)
        }
    };

    let state = HttpState::new(
        Arc::clone(&profiles),
        Arc::clone(&contacts),
        Arc::clone(&addresses),
        Arc::clone(&companies),
    );
    let health_state = web::Data::new(HealthState::new());

    let http_server = create_http_server(
        state,
        health_state.clone(),
        Arc::clone(&access),
        (config.http_host.clone(), config.http_port),
    )?;
    let http_handle = http_server.handle();
    info!(host = %config.http_host, port = config.http_port, "starting HTTP server");
    let mut http_task = tokio::spawn(http_server);

    let grpc_addr: SocketAddr = format!("{}:{}", config.grpc_host, config.grpc_port)
        .parse()
        .map_err(std::io::Error::other)?;
    let grpc_service = ProfileGrpcService::new(profiles, contacts, addresses, companies, access);
    let (grpc_shutdown_tx, grpc_shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    info!(addr = %grpc_addr, "starting gRPC server");
    let mut grpc_task = tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(ProfileServiceServer::new(grpc_service))
            .serve_with_shutdown(grpc_addr, async {
                let _ = grpc_shutdown_rx.await;
            })
            .await
    });

    health_state.mark_ready();

    tokio::select! {
        () = shutdown_signal() => {
            info!("shutdown signal received");
        }
        result = &mut http_task => {
            error!("HTTP server exited unexpectedly");
            return match result {
                Ok(inner) => inner,
                Err(join_err) => Err(std::io::Error::other(join_err)),
            };
        }
        result = &mut grpc_task => {
            error!("gRPC server exited unexpectedly");
            return match result {
                Ok(inner) => inner.map_err(std::io::Error::other),
                Err(join_err) => Err(std::io::Error::other(join_err)),
            };
        }
    }

    health_state.mark_unhealthy();
    let _ = grpc_shutdown_tx.send(());

    if tokio::time::timeout(config.shutdown_grace, http_handle.stop(true))
        .await
        .is_err()
    {
        warn!("graceful HTTP drain timed out; closing remaining connections");
        http_handle.stop(false).await;
    }

    match http_task.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => error!(error = %err, "HTTP server failed during shutdown"),
        Err(err) => error!(error = %err, "HTTP server task failed during shutdown"),
    }
    match tokio::time::timeout(config.shutdown_grace, grpc_task).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(err))) => error!(error = %err, "gRPC server failed during shutdown"),
        Ok(Err(err)) => error!(error = %err, "gRPC server task failed during shutdown"),
        Err(_) => warn!("gRPC drain timed out"),
    }

    info!("server stopped");
    Ok(())
}

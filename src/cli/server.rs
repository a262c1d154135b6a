use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::Result;
use folio::{AppState, Config};
use folio_contact::{ContactService, DeliveryOptions, SqliteStore};
use folio_notification::EmailService;
use folio_site::SiteCatalog;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting folio server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    // Write pool first: it creates the file and applies migrations so the
    // read-only pool can open it.
    let write_pool = folio::db::create_write_pool(&config.database.url).await?;
    folio::db::migrate(&write_pool).await?;

    let read_pool =
        folio::db::create_read_pool(&config.database.url, config.database.max_connections)
            .await?;

    let site = SiteCatalog::load(config.site.path.as_deref().map(Path::new))?;
    let notifier = EmailService::new(&config.email)?;
    let store = SqliteStore::new(write_pool.clone(), read_pool.clone());
    let contact = ContactService::new(
        Arc::new(store),
        Arc::new(notifier),
        DeliveryOptions {
            notify_owner: config.email.notify_owner,
            auto_reply: config.email.auto_reply,
        },
    );

    let state = AppState {
        contact,
        site: Arc::new(site),
        pool: read_pool.clone(),
    };

    let app = folio::router(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}

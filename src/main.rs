//! TCG Radar binary entrypoint.
//!
//! Wires the external interface stubs, the orchestrator, the signal
//! generator, and the admin/health HTTP surface together, then runs
//! until a shutdown signal is received.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tcg_radar::config::Config;
use tcg_radar::generator::SignalGenerator;
use tcg_radar::notify::HttpChatNotifier;
use tcg_radar::orchestrator::sources::{PriceSource, SourceSlot};
use tcg_radar::orchestrator::Orchestrator;
use tcg_radar::sources::{HttpMetadataSource, HttpPriceSource, HttpVelocitySource};
use tcg_radar::store;
use tcg_radar::api;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Arc::new(Config::from_env().context("loading configuration")?);
    info!(admin_port = config.admin_port, "tcg_radar_starting");

    let pool = store::connect(&config.database_url)
        .await
        .context("connecting to database")?;

    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("installing Prometheus recorder")?;

    let webhook_base_url =
        std::env::var("NOTIFIER_WEBHOOK_BASE_URL").unwrap_or_else(|_| "http://localhost:9000".to_string());
    let notifier = Arc::new(HttpChatNotifier::new(webhook_base_url));

    let generator = SignalGenerator::new(config.clone(), notifier);

    let slots = build_source_slots();
    let orchestrator = Orchestrator::new(pool.clone(), config.clone(), generator, slots);
    let shutdown = orchestrator.shutdown_handle();
    let cadence = orchestrator.cadence_handle();

    let orchestrator_task = tokio::spawn(orchestrator.run());

    let app = api::build_router(pool, config.clone(), cadence, prometheus_handle);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.admin_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding admin surface to {addr}"))?;
    info!(%addr, "admin_surface_listening");

    let serve_result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(wait_for_shutdown_signal())
    .await;

    shutdown.notify_one();
    if let Err(e) = serve_result {
        warn!(error = %e, "admin_surface_error");
    }

    if let Err(e) = orchestrator_task.await {
        warn!(error = %e, "orchestrator_task_join_error");
    }

    Ok(())
}

/// External collaborators (Section 6). Each trait has exactly one thin
/// HTTP-backed implementation here; swapping a real provider in means
/// implementing the trait, never touching the orchestrator.
fn build_source_slots() -> Vec<SourceSlot> {
    let justtcg_url = std::env::var("JUSTTCG_BASE_URL").unwrap_or_else(|_| "https://api.justtcg.com".into());
    let ebay_url = std::env::var("EBAY_BASE_URL").unwrap_or_else(|_| "https://api.ebay.com".into());
    let poketrace_url = std::env::var("POKETRACE_BASE_URL").unwrap_or_else(|_| "https://api.poketrace.com".into());
    let pokemontcg_url = std::env::var("POKEMONTCG_BASE_URL").unwrap_or_else(|_| "https://api.pokemontcg.io".into());

    vec![
        SourceSlot::Price(
            PriceSource::BuySide,
            Arc::new(HttpPriceSource::new(justtcg_url, "justtcg")),
        ),
        SourceSlot::Price(
            PriceSource::SellSide,
            Arc::new(HttpPriceSource::new(ebay_url, "ebay")),
        ),
        SourceSlot::Velocity(Arc::new(HttpVelocitySource::new(poketrace_url))),
        SourceSlot::Metadata(Arc::new(HttpMetadataSource::new(pokemontcg_url))),
    ]
}

async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("shutdown_signal_ctrl_c"),
        _ = terminate => info!("shutdown_signal_sigterm"),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tcg_radar=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tplink_ddm_exporter::config::AppConfig;
use tplink_ddm_exporter::handlers::AppState;
use tplink_ddm_exporter::registry::setup_registries;
use tplink_ddm_exporter::routes::create_router;
use tplink_ddm_exporter::{DdmCollector, SnmpWalker};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?.apply(cli.overrides());
    config.validate()?;
    let settings = config.settings;

    init_tracing(&settings.log_level);

    info!(
        target_addr = %settings.target,
        listen_addr = %settings.listen_addr,
        labels = ?settings.labels,
        "запуск TP-Link DDM экспортера"
    );

    let walker = SnmpWalker::new(
        settings.target.clone(),
        settings.community.clone(),
        settings.snmp.clone(),
    );
    let collector = DdmCollector::new(Arc::new(walker), settings.target.clone(), settings.labels)
        .context("Не удалось создать метрики")?;

    let (exporter_registry, scrape_registry) =
        setup_registries(&collector).context("Не удалось зарегистрировать метрики")?;

    let shutdown = CancellationToken::new();
    let app = create_router(AppState {
        collector,
        exporter_registry,
        scrape_registry,
        shutdown: shutdown.clone(),
    });

    let listener = TcpListener::bind(listen_addr(&settings.listen_addr))
        .await
        .with_context(|| format!("Не удалось слушать {}", settings.listen_addr))?;
    info!(addr = %settings.listen_addr, "HTTP сервер запущен");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("HTTP сервер завершился с ошибкой")?;

    info!("экспортер остановлен");
    Ok(())
}

/// ":9116" без хоста слушает на всех интерфейсах
fn listen_addr(addr: &str) -> String {
    match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{}", port),
        None => addr.to_string(),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "не удалось подписаться на Ctrl-C");
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
                tracing::error!(error = %e, "не удалось подписаться на SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("получен сигнал остановки");
    shutdown.cancel();
}

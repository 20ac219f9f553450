mod cli;

use std::sync::Arc;

use crate::cli::{GeneratorArg, LogFormatArg, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use pinhole_core::{Registry, ShortCode, SystemClock, Ttl};
use pinhole_gateway::{App, AppState};
use pinhole_generator::{Generator, RandomGenerator, SeqGenerator};
use pinhole_registry::{InMemoryRegistry, LockedRegistry};
use pinhole_shortener::{ServiceSettings, ShortenerService};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type DynGenerator = Box<dyn Generator<Output = ShortCode>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        storage_backend = %config.storage,
        generator = %config.generator,
        "starting pinhole gateway"
    );

    let settings = ServiceSettings::builder()
        .default_ttl(Ttl::from_minutes(config.default_ttl_minutes).context("invalid default ttl")?)
        .max_batch(config.max_batch)
        .build();

    let generator: DynGenerator = match config.generator {
        GeneratorArg::Random => Box::new(RandomGenerator::with_length(config.code_length)?),
        GeneratorArg::Seq => Box::new(SeqGenerator::with_prefix(config.generator_prefix.as_str())?),
    };

    let state = match config.storage {
        StorageBackendArg::InMemory => {
            build_state(InMemoryRegistry::new(), generator, settings, &config.base_url)
        }
        StorageBackendArg::Locked => {
            build_state(LockedRegistry::new(), generator, settings, &config.base_url)
        }
    };

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

fn build_state<R: Registry>(
    registry: R,
    generator: DynGenerator,
    settings: ServiceSettings,
    base_url: &str,
) -> AppState {
    let service = ShortenerService::from_parts(Arc::new(registry), generator, SystemClock, settings);
    AppState::new(Arc::new(service), base_url)
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(e) => warn!(error = %e, "failed to listen for Ctrl+C, shutting down"),
    }
}

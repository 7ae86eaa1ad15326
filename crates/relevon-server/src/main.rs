//! Relevon HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use relevon::classify::{BertSensitivityClassifier, ClassifierConfig, SensitivityModel};
use relevon::config::Config;
use relevon::embedding::{BertBiEncoder, BiEncoderConfig};
use relevon::scoring::{ScoringParams, TopicRelevanceScorer};
use relevon_server::gateway::{HandlerState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██████╗ ███████╗██╗     ███████╗██╗   ██╗ ██████╗ ███╗   ██╗
██╔══██╗██╔════╝██║     ██╔════╝██║   ██║██╔═══██╗████╗  ██║
██████╔╝█████╗  ██║     █████╗  ██║   ██║██║   ██║██╔██╗ ██║
██╔══██╗██╔══╝  ██║     ██╔══╝  ╚██╗ ██╔╝██║   ██║██║╚██╗██║
██║  ██║███████╗███████╗███████╗ ╚████╔╝ ╚██████╔╝██║ ╚████║
╚═╝  ╚═╝╚══════╝╚══════╝╚══════╝  ╚═══╝   ╚═════╝ ╚═╝  ╚═══╝

        CHUNK. EMBED. JUDGE.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Relevon starting"
    );

    let mut model_path = config.model_path.clone();
    let mut classifier_path = config.classifier_path.clone();

    // Best-effort bootstrap: missing downloads fall through to stub mode or
    // disabled sensitivity rather than aborting startup.
    if let Some(dir) = &config.auto_download_dir {
        match relevon::assets::ensure_bi_encoder(dir).await {
            Ok(path) => {
                model_path.get_or_insert(path);
            }
            Err(e) => tracing::warn!("Bi-encoder download failed: {e}. Continuing without it."),
        }

        match relevon::assets::ensure_classifier(dir).await {
            Ok(path) => {
                classifier_path.get_or_insert(path);
            }
            Err(e) => tracing::warn!("Classifier download failed: {e}. Continuing without it."),
        }
    }

    let encoder_config = if let Some(path) = &model_path {
        BiEncoderConfig::new(path.clone())
    } else {
        tracing::warn!("No RELEVON_MODEL_PATH configured, running embedder in stub mode");
        BiEncoderConfig::stub()
    };
    let embedder = BertBiEncoder::load(encoder_config)?;

    let classifier: Option<Arc<dyn SensitivityModel>> = match &classifier_path {
        Some(path) => match BertSensitivityClassifier::load(ClassifierConfig::new(path.clone())) {
            Ok(classifier) => {
                tracing::info!(path = %path.display(), "Sensitivity classifier loaded");
                Some(Arc::new(classifier))
            }
            Err(e) => {
                tracing::warn!("Failed to load sensitivity classifier: {e}. Disabling.");
                None
            }
        },
        None => None,
    };

    let params = ScoringParams {
        max_chunk_chars: config.max_chunk_chars,
        relevance_threshold: config.relevance_threshold,
        evidence_count: config.evidence_count,
        sensitivity_threshold: config.sensitivity_threshold,
        ..Default::default()
    };

    let mut scorer = TopicRelevanceScorer::new(Arc::new(embedder)).with_params(params);
    if let Some(classifier) = classifier {
        scorer = scorer.with_classifier(classifier);
    }

    let state = HandlerState::new(Arc::new(scorer));
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Relevon shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("RELEVON_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

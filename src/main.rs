//! Application entry point — research-paper assistant.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create the tokio runtime.
//! 4. Build the downstream clients ([`ApiSummarizer`], [`ApiPaperStore`],
//!    [`ApiSynthesizer`]) from config.
//! 5. Open audio playback (degrades to [`NullPlayback`] without a device).
//! 6. Spawn the orchestrator on the runtime.
//! 7. Serve the HTTP router — blocks until shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;

use paper_assistant::{
    config::AppConfig,
    orchestrator::{new_shared_state, Command, Orchestrator},
    papers::{ApiPaperStore, PaperStore},
    server::{router, AppContext},
    speech::{is_known_voice, ApiSynthesizer, NullPlayback, Playback, RodioPlayback,
        SpeechSynthesizer, VOICES},
    summary::{ApiSummarizer, Summarizer},
};

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("paper assistant starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(run(config))
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    // 4. Downstream clients
    let summarizer: Arc<dyn Summarizer> = Arc::new(ApiSummarizer::from_config(&config.llm));
    let store: Arc<dyn PaperStore> = Arc::new(ApiPaperStore::from_config(&config.backend));
    let synthesizer: Arc<dyn SpeechSynthesizer> =
        Arc::new(ApiSynthesizer::from_config(&config.speech));

    // 5. Audio playback — keep the app usable on headless machines.
    let playback: Arc<dyn Playback> = match RodioPlayback::spawn() {
        Ok(playback) => Arc::new(playback),
        Err(e) => {
            log::warn!("Audio output unavailable ({e}); speech will be discarded");
            Arc::new(NullPlayback)
        }
    };

    // Startup voice must come from the fixed catalog.
    let startup_voice = if is_known_voice(&config.speech.default_voice) {
        config.speech.default_voice.clone()
    } else {
        log::warn!(
            "Configured voice {:?} is not in the catalog; using {}",
            config.speech.default_voice,
            VOICES[0].name
        );
        VOICES[0].id.to_string()
    };

    // 6. Orchestrator
    let session = new_shared_state(startup_voice);
    let (command_tx, command_rx) = mpsc::channel::<Command>(16);

    let orchestrator = Orchestrator::new(
        Arc::clone(&session),
        Arc::clone(&store),
        Arc::clone(&summarizer),
        synthesizer,
        playback,
    );
    tokio::spawn(orchestrator.run(command_rx));

    // 7. HTTP server
    let ctx = AppContext {
        summarizer,
        store,
        session,
        commands: command_tx,
        recent_limit: config.backend.recent_limit,
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("listening on http://{addr}");

    axum::serve(listener, router(ctx))
        .await
        .context("server error")?;

    Ok(())
}

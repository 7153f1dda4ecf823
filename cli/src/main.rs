//! CLI entrypoint for nico
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use nico_application::{
    AskAssistantUseCase, AskInput, ConversationLogger, LlmGateway, NarrationMode, Narrator,
    SpeechEngine,
};
use nico_domain::{GeminiModel, Question};
use nico_infrastructure::{
    ConfigLoader, DirectoryVideoLibrary, DuckDuckGoSearch, EspeakEngine, FileConfig,
    GeminiGateway, GeminiSettings, JsonlConversationLogger, Severity,
};
use nico_presentation::{AppState, ChatRepl, Cli, ConsoleSurface, start_server};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    let _log_guard = init_logging(cli.verbose, &config);
    info!("Starting nico v{}", env!("CARGO_PKG_VERSION"));

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue),
            Severity::Warning => warn!("{}", issue),
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration, see the errors above");
    }

    // === Dependency Injection ===
    let gateway = Arc::new(build_gateway(&config)?);
    let use_case = Arc::new(build_use_case(&config, gateway.clone())?);
    let settings = config.assistant_settings();

    // Web mode
    if cli.serve {
        let shutdown = CancellationToken::new();
        let on_ctrl_c = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_ctrl_c.cancel();
            }
        });

        let state = AppState::new(use_case, settings)
            .with_title(config.web.title.clone())
            .with_models(gateway.available_models())
            .with_shutdown(shutdown);
        start_server(state, &config.web.bind_address())
            .await
            .with_context(|| format!("Web server on {} failed", config.web.bind_address()))?;
        return Ok(ExitCode::SUCCESS);
    }

    // Chat mode
    if cli.chat {
        let history = config
            .repl
            .history_file
            .as_deref()
            .map(ConfigLoader::expand_home)
            .or_else(ConfigLoader::default_history_path);
        let mut repl = ChatRepl::new(use_case.clone(), settings)
            .with_progress(!cli.quiet && config.repl.show_progress)
            .with_models(gateway.available_models())
            .with_history_path(history);
        repl.run().await?;
        wait_for_narration(&use_case).await;
        return Ok(ExitCode::SUCCESS);
    }

    // Single question mode - question is required
    let question = match cli.question.as_deref().and_then(Question::try_new) {
        Some(q) => q,
        None => bail!("Question is required. Use --chat or --serve for interactive modes."),
    };

    let surface = ConsoleSurface::new().with_progress(!cli.quiet);
    let outcome = use_case
        .execute(AskInput::new(question, settings), &surface)
        .await?;
    wait_for_narration(&use_case).await;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Command-line flags win over every config source.
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.gemini.model = GeminiModel::from(model.as_str());
    }
    if let Some(temperature) = cli.temperature {
        config.generation.temperature = temperature;
    }
    if let Some(top_p) = cli.top_p {
        config.generation.top_p = top_p;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.generation.max_output_tokens = max_tokens;
    }
    if let Some(mode) = cli.narration_override() {
        config.speech.narration = mode;
    }
    if cli.no_search {
        config.search.enabled = false;
    }
    if cli.no_video {
        config.video.enabled = false;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
}

/// Console logging by verbosity, plus a daily file when `[logging] dir` is set.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match &config.logging.dir {
        Some(dir) => {
            let appender =
                tracing_appender::rolling::daily(ConfigLoader::expand_home(dir), "nico.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}

fn build_gateway(config: &FileConfig) -> Result<GeminiGateway> {
    let api_key = config.gemini.resolve_api_key().ok_or_else(|| {
        anyhow!(
            "Missing Gemini API key. Set the {} environment variable.",
            config.gemini.api_key_env
        )
    })?;

    let settings = GeminiSettings::new(api_key)
        .with_base_url(config.gemini.base_url.clone())
        .with_timeout(Duration::from_secs(config.gemini.timeout_secs))
        .with_stream(config.gemini.stream);
    Ok(GeminiGateway::new(settings)?)
}

fn build_use_case(config: &FileConfig, gateway: Arc<GeminiGateway>) -> Result<AskAssistantUseCase> {
    let mut use_case = AskAssistantUseCase::new(gateway);

    if config.search.enabled {
        let mut search = DuckDuckGoSearch::new(Duration::from_secs(config.search.timeout_secs))?
            .with_region(config.search.region.clone())
            .with_max_chars(config.search.max_chars);
        if let Some(base_url) = &config.search.base_url {
            search = search.with_base_url(base_url.clone());
        }
        use_case = use_case.with_search(Arc::new(search));
    }

    if config.video.enabled {
        let dir = ConfigLoader::expand_home(&config.video.dir);
        use_case = use_case.with_videos(Arc::new(DirectoryVideoLibrary::new(dir)));
    }

    if config.speech.narration != NarrationMode::Off {
        let engine = match &config.speech.program {
            Some(program) => Ok(EspeakEngine::with_program(ConfigLoader::expand_home(program))),
            None => EspeakEngine::detect(),
        };
        match engine {
            Ok(engine) => {
                let engine: Arc<dyn SpeechEngine> = Arc::new(engine);
                let narrator = Narrator::new(
                    engine,
                    &config.speech.voice_preference(),
                    config.speech.narration,
                );
                use_case = use_case.with_narrator(Arc::new(narrator));
            }
            Err(e) => warn!("Narration disabled: {}", e),
        }
    }

    if config.logging.transcript {
        let dir = config
            .logging
            .transcript_dir
            .as_deref()
            .or(config.logging.dir.as_deref())
            .map(ConfigLoader::expand_home)
            .or_else(ConfigLoader::default_transcript_dir);
        match dir.and_then(JsonlConversationLogger::in_dir) {
            Some(logger) => {
                info!("Writing transcript to {}", logger.path().display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                use_case = use_case.with_conversation_logger(logger);
            }
            None => warn!("Transcript disabled: no writable directory"),
        }
    }

    Ok(use_case)
}

/// Let queued speech finish before returning.
async fn wait_for_narration(use_case: &AskAssistantUseCase) {
    if let Some(narrator) = use_case.narrator().cloned() {
        let _ = tokio::task::spawn_blocking(move || narrator.wait_idle()).await;
    }
}

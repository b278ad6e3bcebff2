//! penwright - offline content generator CLI.
//!
//! Generates a blog-style text for a topic against a locally hosted model,
//! and optionally writes it out as a download artifact.

use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use penwright::config::Config;
use penwright::gateway::{GatewayStatus, ModelGateway, OllamaLoader};
use penwright::types::DEFAULT_WORD_COUNT;
use penwright::{BuildInfo, GenerationResult, GenerationService, PenwrightError, Style, artifact};

/// Offline content generator.
#[derive(Parser)]
#[command(name = "penwright")]
#[command(version = penwright::PKG_VERSION)]
#[command(long_version = penwright::version_string())]
#[command(about = "Generate blog content with a locally hosted model")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Model artifact path (overrides config).
    #[arg(long, env = "PENWRIGHT_MODEL_PATH", global = true)]
    model: Option<PathBuf>,

    /// Ollama base URL (overrides config).
    #[arg(long, env = "PENWRIGHT_OLLAMA_URL", global = true)]
    ollama_url: Option<String>,

    /// Log at info level (RUST_LOG still wins).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate content for a topic
    Generate {
        /// Topic (or omit to read from stdin)
        topic: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the available styles
    Styles,

    /// Load the model and report whether it is usable
    Check,

    /// Speak the topic instead of typing it
    #[cfg(feature = "microphone")]
    Listen {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Target word count (100-1000)
    #[arg(short, long, default_value_t = i64::from(DEFAULT_WORD_COUNT), allow_negative_numbers = true)]
    words: i64,

    /// Writing style (see `penwright styles`)
    #[arg(short, long, default_value = "technical")]
    style: String,

    /// Directory to write the artifact file into
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Print a JSON object instead of plain text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    let default_level = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(path) = args.model {
        config.model.path = path;
    }
    if let Some(url) = args.ollama_url {
        config.model.ollama_url = url;
    }

    match args.command {
        Command::Styles => {
            for style in Style::ALL {
                println!("{:<14}{}", style.label(), style.as_str());
            }
            Ok(())
        }

        Command::Check => {
            let build = BuildInfo::current();
            println!("penwright {build}");
            println!("built: {}", build.built_at);
            println!("model: {}", config.model.path.display());
            let gateway = load_gateway(&config).await;
            match gateway.status() {
                GatewayStatus::Ready { backend } => {
                    println!("status: ready ({backend})");
                    Ok(())
                }
                GatewayStatus::Unavailable { reason } => {
                    println!("status: unavailable");
                    Err(PenwrightError::ModelUnavailable(reason).into())
                }
            }
        }

        Command::Generate { topic, output } => {
            let topic = resolve_topic(topic)?;
            prepare_out_dir(&output)?;
            let service = build_service(&config).await?;
            let outcome = service.generate(&topic, output.words, &output.style).await;
            report(outcome, &output)
        }

        #[cfg(feature = "microphone")]
        Command::Listen { output } => {
            use penwright::VoiceCaptureAdapter;
            use penwright::voice::{CapturePhase, HttpTranscriber, MicrophoneRecorder};

            let url = config.voice.transcriber_url.clone().ok_or_else(|| {
                PenwrightError::Configuration(
                    "voice.transcriber_url must be set to use voice input".to_string(),
                )
            })?;
            let adapter = VoiceCaptureAdapter::new(
                MicrophoneRecorder::new(),
                HttpTranscriber::new(url),
                config.capture_config(),
            );

            let topic = adapter
                .capture_with_progress(|phase| match phase {
                    CapturePhase::Countdown { remaining_secs } => {
                        eprintln!("recording starts in {remaining_secs}...")
                    }
                    CapturePhase::Recording => eprintln!("recording... speak now"),
                    CapturePhase::Transcribing => eprintln!("processing your speech..."),
                })
                .await
                .map_err(PenwrightError::from)?;
            eprintln!("transcribed: {topic}");
            prepare_out_dir(&output)?;

            let service = build_service(&config).await?;
            let outcome = service.generate(&topic, output.words, &output.style).await;
            report(outcome, &output)
        }
    }
}

async fn load_gateway(config: &Config) -> ModelGateway {
    let mut loader =
        OllamaLoader::new(&config.model.ollama_url).timeout_secs(config.model.timeout_secs);
    if let Some(ref name) = config.model.name {
        loader = loader.model(name);
    }
    ModelGateway::load(config.gateway_config(), &loader).await
}

async fn build_service(config: &Config) -> penwright::Result<GenerationService> {
    let gateway = load_gateway(config).await;
    GenerationService::builder()
        .gateway(Arc::new(gateway))
        .cache(config.cache_config())
        .build()
}

/// Print the outcome and write the artifact if requested.
fn report(
    outcome: penwright::Result<GenerationResult>,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            if output.json {
                let body = serde_json::json!({
                    "error_kind": e.kind(),
                    "message": e.to_string(),
                });
                println!("{body}");
            }
            return Err(e.into());
        }
    };

    let download = artifact::package(&result)?;
    let written = match output.out {
        Some(ref dir) => Some(write_artifact(dir, &download)?),
        None => None,
    };

    if output.json {
        let body = serde_json::json!({
            "text": result.text(),
            "filename": download.filename,
            "written_to": written,
        });
        println!("{body}");
    } else {
        println!("{}", result.text());
        if let Some(path) = written {
            eprintln!("saved to {}", path.display());
        }
    }
    Ok(())
}

/// Fail before inference, not after, if `--out` cannot be created.
fn prepare_out_dir(output: &OutputArgs) -> io::Result<()> {
    match output.out {
        Some(ref dir) => std::fs::create_dir_all(dir),
        None => Ok(()),
    }
}

fn write_artifact(dir: &Path, download: &artifact::Artifact) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name_in_dir(&download.filename));
    std::fs::write(&path, &download.payload)?;
    info!(path = %path.display(), bytes = download.payload.len(), "artifact written");
    Ok(path)
}

/// Artifact filename reduced to a single path component, so the file always
/// lands directly inside the `--out` directory.
fn file_name_in_dir(filename: &str) -> String {
    let flat: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let dots = flat.len() - flat.trim_start_matches('.').len();
    format!("{}{}", "_".repeat(dots), &flat[dots..])
}

/// Topic from the argument, else from piped stdin, else empty (rejected downstream).
fn resolve_topic(arg: Option<String>) -> io::Result<String> {
    if let Some(topic) = arg {
        return Ok(topic);
    }
    if io::stdin().is_terminal() {
        return Ok(String::new());
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

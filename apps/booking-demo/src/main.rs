//! Garage Booking Assistant Demo
//!
//! Interactive text console for the hybrid booking pipeline:
//! utterance → classification → extraction or fallback → response.
//! Audio transport is out of scope here; type what the caller would say.

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use tracing::{info, warn};

use llm_gateway::{
    GenerationRequest, MockGenerator, OpenRouterGenerator, TextGenerator, APOLOGY_MESSAGE,
};
use speech_io::AssetCatalog;
use turn_handler::{
    record_best_effort, JsonFileRecorder, SessionStore, TurnError, TurnOptions, TurnOutcome,
    FALLBACK_TOKEN_BUDGET,
};

#[derive(Parser)]
#[command(name = "booking-demo")]
#[command(about = "Garage Booking Assistant Demo")]
struct Args {
    /// Use the scripted mock generator instead of OpenRouter
    #[arg(long)]
    mock: bool,

    /// Stream fallback replies token by token
    #[arg(long)]
    stream: bool,

    /// Directory for per-turn JSON records (disabled when omitted)
    #[arg(long)]
    record_dir: Option<String>,

    /// Directory holding the pre-recorded audio files
    #[arg(long, default_value = "audio_files")]
    audio_dir: String,

    /// Process a single utterance and exit
    #[arg(long)]
    utterance: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let args = Args::parse();

    info!("Starting Garage Booking Assistant demo");

    let generator: Box<dyn TextGenerator> = if args.mock {
        info!("Generator: mock");
        Box::new(MockGenerator::new())
    } else {
        match std::env::var("OPENROUTER_API_KEY") {
            Ok(key) => {
                info!("Generator: OpenRouter");
                Box::new(OpenRouterGenerator::new(key)?)
            }
            Err(_) => {
                warn!("OPENROUTER_API_KEY not set, falling back to the mock generator");
                Box::new(MockGenerator::new())
            }
        }
    };

    let recorder = match &args.record_dir {
        Some(dir) => Some(JsonFileRecorder::new(dir)?),
        None => None,
    };
    let catalog = AssetCatalog::new(&args.audio_dir);

    let mut store = SessionStore::new();
    let session_key = SessionStore::generate_key();
    store.get_or_create(&session_key);

    if let Some(utterance) = args.utterance {
        run_turn(
            &mut store,
            &session_key,
            &utterance,
            generator.as_ref(),
            recorder.as_ref(),
            &catalog,
            args.stream,
        )
        .await?;
        return Ok(());
    }

    println!("Garage Booking Assistant (type 'quit' to exit, 'state' to inspect)");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("You: ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        let utterance = input.trim();

        if utterance.eq_ignore_ascii_case("quit") || utterance.eq_ignore_ascii_case("exit") {
            break;
        }
        if utterance.eq_ignore_ascii_case("state") {
            if let Some(handler) = store.get_mut(&session_key) {
                println!("{}", handler.engine().summary());
            }
            continue;
        }
        if utterance.is_empty() {
            continue;
        }

        run_turn(
            &mut store,
            &session_key,
            utterance,
            generator.as_ref(),
            recorder.as_ref(),
            &catalog,
            args.stream,
        )
        .await?;
        println!();
    }

    store.evict(&session_key);
    info!("Demo finished");
    Ok(())
}

async fn run_turn(
    store: &mut SessionStore,
    session_key: &str,
    utterance: &str,
    generator: &dyn TextGenerator,
    recorder: Option<&JsonFileRecorder>,
    catalog: &AssetCatalog,
    stream: bool,
) -> Result<()> {
    let options = TurnOptions {
        prefer_streaming: stream,
    };
    let handler = store.get_or_create(session_key);

    let outcome = match handler.process_turn(utterance, generator, options).await {
        Ok(outcome) => outcome,
        Err(TurnError::Generation(err)) => {
            warn!("generation failed: {err}");
            println!("Bot: {APOLOGY_MESSAGE}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let bot_text = if outcome.streaming {
        pump_stream(handler, utterance, generator, &outcome).await?
    } else {
        outcome.bot_response.clone().unwrap_or_default()
    };

    if !outcome.streaming {
        println!("Bot: {bot_text}");
    }
    print_turn_details(&outcome, catalog);

    if let Some(recorder) = recorder {
        record_best_effort(recorder, session_key, utterance, &bot_text, &outcome.latency);
    }
    Ok(())
}

/// Pump the token stream to stdout and hand the assembled reply back to
/// the session history.
async fn pump_stream(
    handler: &mut turn_handler::HybridTurnHandler,
    utterance: &str,
    generator: &dyn TextGenerator,
    outcome: &TurnOutcome,
) -> Result<String> {
    let prompt = outcome.fallback_prompt.clone().unwrap_or_default();
    let request = GenerationRequest::new(utterance, prompt, FALLBACK_TOKEN_BUDGET);

    print!("Bot: ");
    io::stdout().flush()?;

    let mut assembled = String::new();
    match generator.generate_stream(&request).await {
        Ok(mut rx) => {
            while let Some(fragment) = rx.recv().await {
                print!("{fragment}");
                io::stdout().flush()?;
                assembled.push_str(&fragment);
            }
            println!();
        }
        Err(err) => {
            warn!("streaming failed, falling back to sync generation: {err}");
            assembled = match generator.generate(&request).await {
                Ok(reply) => reply,
                Err(err) => {
                    warn!("generation failed: {err}");
                    APOLOGY_MESSAGE.to_string()
                }
            };
            println!("{assembled}");
        }
    }

    handler.finish_streamed_turn(assembled.clone());
    Ok(assembled)
}

fn print_turn_details(outcome: &TurnOutcome, catalog: &AssetCatalog) {
    let mode = serde_json::to_string(&outcome.mode).unwrap_or_default();
    let mut details = format!(
        "  [mode {} | total {:.1}ms",
        mode.trim_matches('"'),
        outcome.latency.total_ms
    );
    if let Some(parser_ms) = outcome.latency.parser_ms {
        details.push_str(&format!(" | parser {parser_ms:.1}ms"));
    }
    if let Some(fallback_ms) = outcome.latency.fallback_ms {
        details.push_str(&format!(" | fallback {fallback_ms:.1}ms"));
    }
    if outcome.use_prerecorded {
        if let Some(path) = outcome.audio_asset.and_then(|key| catalog.path(key)) {
            details.push_str(&format!(" | audio {}", path.display()));
        }
    }
    details.push(']');
    println!("{details}");

    if outcome.is_complete {
        println!("  Booking complete: {}", outcome.state);
    }
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

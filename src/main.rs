use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vaani_assistant::dispatch::Assistant;
use vaani_assistant::speech::{self, GoogleTranslateTts, Speaker, SpeechPipeline};
use vaani_assistant::{api, Config};

/// Vaani - Hindi-speaking voice command assistant
#[derive(Parser)]
#[command(name = "vaani", version, about)]
struct Cli {
    /// Ollama generate endpoint URL
    #[arg(long, env = "VAANI_OLLAMA_URL")]
    ollama_url: Option<String>,

    /// Ollama model identifier
    #[arg(long, env = "VAANI_OLLAMA_MODEL")]
    model: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP command endpoint instead of the interactive prompt
    Serve {
        /// Port to listen on
        #[arg(long, env = "VAANI_PORT", default_value = "3000")]
        port: u16,
    },
    /// Speak a line of text through the output pipeline
    Speak {
        /// Text to speak
        #[arg(default_value = "नमस्ते। यह एक परीक्षण है।")]
        text: String,
    },
    /// Remove stale speech artifacts and exit
    Cleanup,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,vaani_assistant=info",
        1 => "info,vaani_assistant=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = cli.ollama_url {
        config.inference.endpoint = url;
    }
    if let Some(model) = cli.model {
        config.inference.model = model;
    }
    config.ensure_artifact_dir()?;

    match cli.command {
        Some(Command::Serve { port }) => {
            config.server.port = port;
            tracing::info!(port, model = %config.inference.model, "starting command server");
            let assistant = Assistant::from_config(&config);
            api::serve(assistant, &config.server).await?;
        }
        Some(Command::Speak { text }) => {
            speak_once(&config, &text).await?;
        }
        Some(Command::Cleanup) => {
            speech::janitor::cleanup(&config.artifact_dir);
            println!("Artifact directory swept: {}", config.artifact_dir.display());
        }
        None => {
            tracing::info!(model = %config.inference.model, "starting interactive assistant");
            println!("Listening... (Type your command)");
            let mut assistant = Assistant::from_config(&config);
            assistant.run().await?;
        }
    }

    Ok(())
}

/// Exercise the speech pipeline once
async fn speak_once(config: &Config, text: &str) -> anyhow::Result<()> {
    let synth = GoogleTranslateTts::new(&config.speech.language);
    let pipeline = SpeechPipeline::new(config, synth);
    pipeline.say(text).await?;
    println!("\n---");
    println!("If you heard the line, the speech pipeline is working!");
    Ok(())
}

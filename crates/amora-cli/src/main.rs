//! amora CLI — voice-chat gateway server and client commands.
//!
//! ```text
//! amora serve [--port 5000] [--host 127.0.0.1] [--voice <id>]
//! amora chat "hello there" [--session s1] [--server http://localhost:5000]
//! amora say "read this aloud" [--out reply.mp3] [--server ...]
//! amora health / clear-memory [--server ...]
//! ```
//!
//! `serve` reads `GEMINI_API_KEY` and `ELEVENLABS_API_KEY` from the
//! environment; missing keys are reported at call time, not startup.

use clap::{Parser, Subcommand};

use amora_lib::config::GatewayConfig;
use amora_lib::server::{router, AppState};

/// amora — chat relay with speech synthesis
#[derive(Parser)]
#[command(name = "amora", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the gateway server
    Serve {
        /// Listen port
        #[arg(long, default_value = "5000")]
        port: u16,
        /// Listen host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Speech voice id
        #[arg(long)]
        voice: Option<String>,
    },
    /// Send a chat message to a running server
    Chat {
        /// Message text
        message: String,
        /// Session id for conversation memory
        #[arg(long, default_value = "default")]
        session: String,
        /// Server URL
        #[arg(long, default_value = "http://localhost:5000")]
        server: String,
    },
    /// Synthesize speech for text and save the audio
    Say {
        /// Text to speak
        text: String,
        /// Output file for the mp3 audio
        #[arg(long, default_value = "speech.mp3")]
        out: String,
        #[arg(long, default_value = "http://localhost:5000")]
        server: String,
    },
    /// Check server health
    Health {
        #[arg(long, default_value = "http://localhost:5000")]
        server: String,
    },
    /// Wipe server-side conversation memory
    ClearMemory {
        #[arg(long, default_value = "http://localhost:5000")]
        server: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, host, voice } => {
            let mut config = GatewayConfig::from_env();
            if let Some(voice) = voice {
                config.voice_id = voice;
            }
            if config.gemini_api_key.is_none() {
                eprintln!("warning: GEMINI_API_KEY not set, chat will serve fallback replies");
            }
            if config.elevenlabs_api_key.is_none() {
                eprintln!("warning: ELEVENLABS_API_KEY not set, /generate-speech will fail");
            }

            let app = router(AppState::new(config));

            let addr = format!("{host}:{port}");
            eprintln!("amora listening on {addr}");

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .expect("failed to bind");

            axum::serve(listener, app).await.expect("server error");
        }

        Command::Chat {
            message,
            session,
            server,
        } => {
            let resp = reqwest::Client::new()
                .post(format!("{server}/chat"))
                .json(&serde_json::json!({ "message": message, "session_id": session }))
                .send()
                .await
                .expect("request failed");
            println!("{}", resp.text().await.unwrap_or_default());
        }

        Command::Say { text, out, server } => {
            let resp = reqwest::Client::new()
                .post(format!("{server}/generate-speech"))
                .json(&serde_json::json!({ "text": text }))
                .send()
                .await
                .expect("request failed");

            if resp.status().is_success() {
                let bytes = resp.bytes().await.expect("failed to read audio");
                std::fs::write(&out, &bytes).expect("failed to write audio file");
                println!("wrote {} bytes to {out}", bytes.len());
            } else {
                eprintln!("{}", resp.text().await.unwrap_or_default());
            }
        }

        Command::Health { server } => {
            let resp = reqwest::Client::new()
                .get(format!("{server}/health"))
                .send()
                .await
                .expect("request failed");
            println!("{}", resp.text().await.unwrap_or_default());
        }

        Command::ClearMemory { server } => {
            let resp = reqwest::Client::new()
                .post(format!("{server}/clear-memory"))
                .send()
                .await
                .expect("request failed");
            println!("{}", resp.text().await.unwrap_or_default());
        }
    }
}

//! Askdesk terminal front end
//!
//! A line-oriented view over one session: typed lines are questions,
//! slash commands pick suggested prompts or upload documents.

use askdesk::answer::{AnswerService, AskParams, HttpAnswerService, LoggingService};
use askdesk::ingest::IngestClient;
use askdesk::prompts::SUGGESTED_PROMPTS;
use askdesk::scroll::{AutoScroller, ScrollError, ScrollTarget};
use askdesk::session::{Message, Role};
use askdesk::{SessionHandle, ViewEvent, WidgetConfig};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging; stdout belongs to the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "askdesk=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Configuration
    let config = WidgetConfig::from_env()?;
    tracing::info!(api = %config.api_base, timeout_secs = config.timeout.as_secs(), "Configuration loaded");

    let answer_service: Arc<dyn AnswerService> = Arc::new(HttpAnswerService::new(&config)?);
    let handle = SessionHandle::spawn(LoggingService::new(answer_service), AskParams::default());
    let ingest = IngestClient::new(&config)?;

    let renderer = tokio::spawn(render(handle.subscribe()));

    print_prompts();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "/quit" | "/exit" => break,
            "/prompts" => print_prompts(),
            _ if line.starts_with("/upload") => {
                let paths: Vec<PathBuf> = line
                    .trim_start_matches("/upload")
                    .split_whitespace()
                    .map(PathBuf::from)
                    .collect();
                match ingest.upload(&paths).await {
                    Ok(response) => println!("Indexed {} document(s).", response.count),
                    Err(e) => println!("Upload failed: {e}"),
                }
            }
            _ if line.starts_with('/') => match line.trim_start_matches('/').parse::<usize>() {
                Ok(n) if n >= 1 => {
                    if handle.activate_prompt(n - 1).await?.is_none() {
                        println!("No suggestion #{n}.");
                    }
                }
                _ => println!("Unknown command. Try /prompts, /N, /upload <files>, /quit."),
            },
            _ => {
                if handle.snapshot().awaiting_response {
                    println!("Still waiting for the previous answer...");
                }
                handle.submit(line).await?;
            }
        }
    }

    drop(handle);
    let _ = renderer.await;
    Ok(())
}

fn print_prompts() {
    println!("Suggestions:");
    for (i, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
        println!("  /{} {} {}", i + 1, prompt.glyph, prompt.text);
    }
}

/// Terminal end anchor: flushing stdout brings the last line into view
struct Terminal;

impl ScrollTarget for Terminal {
    fn scroll_to_end(&mut self) -> Result<(), ScrollError> {
        std::io::stdout()
            .flush()
            .map_err(|e| ScrollError(e.to_string()))
    }
}

async fn render(mut rx: broadcast::Receiver<ViewEvent>) {
    let mut rendered = 0;
    let mut scroller = AutoScroller::new();
    let mut terminal = Terminal;

    loop {
        match rx.recv().await {
            Ok(ViewEvent::TranscriptChanged { transcript }) => {
                for message in transcript.iter().skip(rendered) {
                    print_message(message);
                }
                rendered = transcript.len();
                scroller.observe(&transcript, &mut terminal);
            }
            Ok(ViewEvent::StateChanged { awaiting_response }) => {
                if awaiting_response {
                    println!("  … thinking");
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Renderer fell behind");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn print_message(message: &Message) {
    let time = message.timestamp.format("%H:%M:%S");
    match message.role {
        Role::User => println!("[{time}] you: {}", message.content),
        Role::Assistant => {
            println!("[{time}] assistant: {}", message.content);
            for (i, source) in message.sources.iter().enumerate() {
                let url = source.url.as_deref().unwrap_or("");
                println!("    [{}] {} {url}", i + 1, source.title);
                if let Some(snippet) = &source.snippet {
                    println!("        \"{snippet}\"");
                }
            }
            if let Some(total) = message.usage.as_ref().and_then(|u| u.total_tokens) {
                println!("    ({total} tokens)");
            }
        }
    }
}

//! UgcLab Player - console runner.
//!
//! Drives the participant flow from stdin so a session can be walked
//! through without the museum tablet UI.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ugclab_domain::{ChatMessage, InputKind, MessageKind, ModeType};
use ugclab_player::application::services::{
    ContentRepository, ExperimentSession, LeaveOutcome, ModeEntry, TourSession,
};
use ugclab_player::infrastructure::{clock::SystemClock, load_content_or_empty, HttpCollectorClient};
use ugclab_player::ports::outbound::ClockPort;
use ugclab_player::PlayerConfig;

const HELP: &str = "commands: mode <comment_board|follow_me|crowd_chat|collective_story>, \
open <artifact>, say <text>, voice, next, back, logs, quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ugclab_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting UgcLab Player");

    let config = PlayerConfig::from_env();
    let content = Arc::new(ContentRepository::new(
        load_content_or_empty(&config.content_path).await,
    ));
    let collector = Arc::new(HttpCollectorClient::new(
        &config.collector_url,
        config.collector_timeout,
    ));
    if !collector.check_health().await {
        tracing::warn!(url = %collector.base_url(), "Collector unreachable, submissions will be dropped");
    }
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Participant number:");
    let mut session = loop {
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        match ExperimentSession::begin(
            &line,
            content.clone(),
            collector.clone(),
            clock.clone(),
            config.task_lock,
        )
        .await
        {
            Ok(session) => break session,
            Err(e) => println!("{e}"),
        }
    };
    if let Some(mode) = session.main_mode().await {
        println!("{} - main mode: {}", session.participant_id(), mode);
    }
    println!("{HELP}");

    let mut tour: Option<TourSession> = None;
    let mut shown = 0;

    while let Some(line) = lines.next_line().await? {
        let (command, arg) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
        match command {
            "mode" => match arg.parse::<ModeType>() {
                Ok(mode) => match session.select_mode(mode).await {
                    Ok(ModeEntry::ArtifactList(artifacts)) => {
                        for artifact in artifacts {
                            println!("  {} - {}", artifact.id, artifact.name);
                        }
                    }
                    Ok(ModeEntry::Tour(mut opened)) => {
                        opened.run_until_idle().await;
                        shown = print_transcript(opened.tour().history(), 0);
                        println!("[{}]", opened.tour().control().label());
                        tour = Some(opened);
                    }
                    Err(e) => println!("{e}, use back"),
                },
                Err(e) => println!("{e}"),
            },
            "open" => match session.select_artifact(arg.into()).await {
                Ok(items) => {
                    for item in items {
                        println!("  {}: {}", item.speaker, item.content);
                    }
                }
                Err(e) => println!("{e}, use back"),
            },
            "say" | "voice" => {
                let input = if command == "voice" {
                    InputKind::Audio
                } else {
                    InputKind::Text
                };
                match tour.as_mut() {
                    Some(active) => {
                        active.reply(arg).await;
                        shown = print_transcript(active.tour().history(), shown);
                    }
                    None => {
                        if let Some(item) = session.submit(input, arg).await {
                            println!("  {}: {}", item.speaker, item.content);
                        }
                    }
                }
            }
            "next" => {
                if let Some(active) = tour.as_mut() {
                    active.primary_action().await;
                    if let Some(reminder) = active.tour().reminder() {
                        println!("  ({reminder})");
                    }
                    active.run_until_idle().await;
                    shown = print_transcript(active.tour().history(), shown);
                    println!("[{}]", active.tour().control().label());
                }
            }
            "back" => {
                let outcome = match tour.as_mut() {
                    Some(active) => session.leave_tour(active).await,
                    None => session.back().await,
                };
                match outcome {
                    LeaveOutcome::Allowed => {
                        if session.current_mode().is_none() {
                            tour = None;
                        }
                        println!("ok");
                    }
                    LeaveOutcome::Blocked { remaining } => {
                        println!("Please keep looking ({}s left)", remaining.as_secs());
                    }
                }
            }
            "logs" => {
                let logs = session.telemetry().export_logs().await;
                println!("{}", serde_json::to_string_pretty(&logs)?);
            }
            "quit" => break,
            _ => println!("{HELP}"),
        }
    }

    if let Some(mut active) = tour {
        active.close().await;
    }
    Ok(())
}

/// Prints messages from `from` onwards and returns the new count.
fn print_transcript(history: &[ChatMessage], from: usize) -> usize {
    for message in history.iter().skip(from) {
        match message.kind {
            MessageKind::Divider => println!("  ----"),
            MessageKind::IntroBubble => {
                if let Some(artifact) = &message.artifact {
                    println!("  [{}] {}", artifact.id, artifact.name);
                }
            }
            MessageKind::GuideText | MessageKind::UserText => println!(
                "  {}: {}",
                message.speaker.as_deref().unwrap_or_default(),
                message.text().unwrap_or_default()
            ),
        }
    }
    history.len()
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

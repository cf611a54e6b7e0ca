use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use giron_client::{ClientConfig, DiscussionApiClient};
use giron_core::discussion::{
    DiscussionService, Message, SessionController, SessionEvent,
};
use giron_core::export;

use super::TermSink;

/// Runs one discussion session: start, stream turns until Ctrl-C or a
/// failed turn, then export the transcript.
pub async fn execute(
    file: Option<PathBuf>,
    interval: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = ClientConfig::load()?;
    let turn_interval = interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.turn_interval());

    let client = Arc::new(DiscussionApiClient::new(&config)?);
    let document = read_document(file)?;

    // Roster is display-only here; a fetch failure should not block the run.
    let icons: HashMap<String, String> = match client.get_personas().await {
        Ok(personas) => personas
            .iter()
            .map(|p| (p.name.clone(), p.display_icon().to_string()))
            .collect(),
        Err(err) => {
            tracing::warn!("persona roster unavailable: {err}");
            HashMap::new()
        }
    };

    let (controller, mut events) =
        SessionController::new(client, Arc::new(TermSink), turn_interval);

    if controller.start(&document).await.is_err() {
        // The sink already reported the reason.
        bail!("議論を開始できませんでした");
    }
    println!("{}", "議論を開始しました (Ctrl-C で終了)".bright_green());

    // The start response may carry a seeded first turn; later turns
    // arrive as events.
    if let Some(discussion) = controller.discussion().await {
        for message in &discussion.messages {
            print_message(message, &icons);
        }
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("{}", "議論を終了します...".bright_yellow());
                controller.stop().await;
                break;
            }
            event = events.recv() => match event {
                Some(SessionEvent::MessageAppended { message }) => {
                    print_message(&message, &icons);
                }
                Some(SessionEvent::TurnFailed { .. }) => break,
                Some(SessionEvent::Stopped) | None => break,
                Some(SessionEvent::Started { .. }) => {}
            },
        }
    }

    if let Some(discussion) = controller.reset().await
        && !discussion.messages.is_empty()
    {
        let path = output.unwrap_or_else(|| PathBuf::from("discussion.txt"));
        export::export_to_file(&discussion, &path)?;
        println!(
            "議事録を書き出しました: {} ({}件)",
            path.display(),
            discussion.message_count()
        );
    }

    Ok(())
}

fn read_document(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("戦略文書を読み込めませんでした: {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("標準入力から戦略文書を読み込めませんでした")?;
            Ok(buffer)
        }
    }
}

fn print_message(message: &Message, icons: &HashMap<String, String>) {
    let icon = icons
        .get(&message.persona_name)
        .map(String::as_str)
        .unwrap_or("👤");
    println!(
        "\n{} {} {}",
        icon,
        message.persona_name.bold().bright_cyan(),
        message.timestamp.dimmed()
    );
    println!("{}", message.content);
}

use std::fmt::Write as _;
use std::time::Duration;

use rpsls::prelude::*;
use rpsls::round::unix_millis;
use rpsls::telemetry;
use tokio::io::{AsyncBufReadExt, BufReader};

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play(Choice),
    Reset,
    Rules,
    Score,
    History,
    Json,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, RpslsError> {
    let cmd = match line.trim().to_ascii_lowercase().as_str() {
        "reset" | "again" | "a" => Command::Reset,
        "rules" => Command::Rules,
        "score" => Command::Score,
        "history" | "h" => Command::History,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Play(other.parse()?),
    };
    Ok(cmd)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

const HELP: &str = "commands: rock (r) | paper (p) | scissors (s) | lizard (l) | spock (k) \
                    | again | rules | score | history | json | quit";

fn render(s: &Snapshot) -> String {
    let (Some(player), Some(computer)) = (s.player_choice, s.computer_choice) else {
        return "Make your choice: rock, paper, scissors, lizard, spock".to_string();
    };

    let mut out = format!("You: {:<9} CPU: {}", player.label(), computer.label());
    match s.outcome {
        None => {
            let _ = write!(out, "\n{PENDING_HEADLINE}");
        }
        Some(outcome) => {
            if let Some(rule) = rule_between(player, computer) {
                let _ = write!(out, "\n{rule}");
            }
            let _ = write!(out, "\n{}  {}", outcome.headline(), render_score(&s.score));
            out.push_str("\n(type 'again' to play another round)");
        }
    }
    out
}

fn render_score(score: &Score) -> String {
    format!("[you {} - {} computer]", score.player, score.computer)
}

fn render_rules() -> String {
    let mut out = String::from("Rules:");
    for rule in rules() {
        let _ = write!(out, "\n  {rule}");
    }
    out
}

/// `started_ms` is the session start; each row shows its reveal time
/// relative to it.
fn render_history(history: &[RoundRecord], started_ms: u64) -> String {
    if history.is_empty() {
        return "No games played yet. Make your first choice!".to_string();
    }
    let mut out = String::new();
    for record in history {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{:<9} {:<5} You: {:<9} CPU: {:<9} {}",
            record.round.to_string(),
            record.outcome.short_label(),
            record.player_choice.label(),
            record.computer_choice.label(),
            render_elapsed(record.timestamp_ms, started_ms),
        );
    }
    out
}

fn render_elapsed(timestamp_ms: u64, started_ms: u64) -> String {
    let elapsed = timestamp_ms.saturating_sub(started_ms);
    format!("+{}.{}s", elapsed / 1000, (elapsed % 1000) / 100)
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Builds the game from `RPSLS_SETTLE_MS` / `RPSLS_SEED` values.
/// Unparsable values are logged and ignored.
fn builder_from(settle_ms: Option<String>, seed: Option<String>) -> GameBuilder {
    let mut builder = GameBuilder::new();
    if let Some(raw) = settle_ms {
        match raw.trim().parse::<u64>() {
            Ok(ms) => builder = builder.settle_delay(Duration::from_millis(ms)),
            Err(e) => tracing::warn!(%raw, error = %e, "ignoring RPSLS_SETTLE_MS"),
        }
    }
    if let Some(raw) = seed {
        match raw.trim().parse::<u64>() {
            Ok(seed) => builder = builder.seed(seed),
            Err(e) => tracing::warn!(%raw, error = %e, "ignoring RPSLS_SEED"),
        }
    }
    builder
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing("warn");
    let started_ms = unix_millis();

    let game = builder_from(
        std::env::var("RPSLS_SETTLE_MS").ok(),
        std::env::var("RPSLS_SEED").ok(),
    )
    .spawn();

    println!("Rock, Paper, Scissors, Lizard, Spock");
    println!("{HELP}");
    println!("{}", render(&game.latest()));

    // Renderer: redraw on every published snapshot.
    let mut updates = game.subscribe();
    let renderer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            println!("{}", render(&snapshot));
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Play(choice)) => {
                if !game.latest().phase.accepts_input() {
                    println!("Round in progress. Type 'again' to play another round.");
                }
                game.submit_choice(choice).await?;
            }
            Ok(Command::Reset) => game.reset_round().await?,
            Ok(Command::Rules) => println!("{}", render_rules()),
            Ok(Command::Score) => println!("{}", render_score(&game.snapshot().await?.score)),
            Ok(Command::History) => println!("{}", render_history(&game.snapshot().await?.history, started_ms)),
            Ok(Command::Json) => println!("{}", serde_json::to_string_pretty(&game.snapshot().await?)?),
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => break,
            Err(e) => println!("{e}"),
        }
    }

    game.shutdown().await?;
    renderer.abort();
    Ok(())
}

//! End-to-end tests through the facade: builder → controller → snapshots.

use std::time::Duration;

use rpsls::prelude::*;

/// Waits for the current round's outcome.
///
/// The snapshot round trip first guarantees every earlier command (reset,
/// submit) was applied, so a previous round's outcome is never mistaken
/// for this one's.
async fn reveal(game: &RoundController) -> Snapshot {
    game.snapshot().await.unwrap();
    let mut rx = game.subscribe();
    rx.wait_for(|s| s.outcome.is_some()).await.unwrap().clone()
}

#[tokio::test(start_paused = true)]
async fn test_scripted_session_plays_known_matchups() {
    let game = GameBuilder::new()
        .source(ScriptedSource::new([Choice::Rock, Choice::Spock, Choice::Spock]).unwrap())
        .spawn();

    // Paper covers rock.
    game.submit_choice(Choice::Paper).await.unwrap();
    let s = reveal(&game).await;
    assert_eq!(s.outcome, Some(Outcome::Win));
    assert_eq!(s.history[0].player_choice, Choice::Paper);
    game.reset_round().await.unwrap();

    // Lizard poisons Spock.
    game.submit_choice(Choice::Lizard).await.unwrap();
    let s = reveal(&game).await;
    assert_eq!(s.outcome, Some(Outcome::Win));
    game.reset_round().await.unwrap();

    // Spock vaporizes rock.
    game.submit_choice(Choice::Rock).await.unwrap();
    let s = reveal(&game).await;
    assert_eq!(s.outcome, Some(Outcome::Lose));
    assert_eq!(s.score, Score { player: 2, computer: 1 });

    let rule = rule_between(Choice::Rock, Choice::Spock).unwrap();
    assert_eq!(rule.to_string(), "Spock vaporizes Rock");
}

#[tokio::test(start_paused = true)]
async fn test_seeded_sessions_draw_identically() {
    async fn draws(seed: u64) -> Vec<Choice> {
        let game = GameBuilder::new()
            .seed(seed)
            .settle_delay(Duration::ZERO)
            .spawn();
        let mut out = Vec::new();
        for _ in 0..8 {
            game.submit_choice(Choice::Rock).await.unwrap();
            let s = reveal(&game).await;
            out.push(s.computer_choice.unwrap());
            game.reset_round().await.unwrap();
        }
        out
    }

    assert_eq!(draws(9).await, draws(9).await);
}

#[tokio::test(start_paused = true)]
async fn test_every_recorded_outcome_matches_the_rules() {
    let game = GameBuilder::new()
        .seed(1234)
        .settle_delay(Duration::from_millis(10))
        .spawn();

    for player in Choice::ALL.iter().cycle().take(25) {
        game.submit_choice(*player).await.unwrap();
        let s = reveal(&game).await;
        let latest = &s.history[0];
        assert_eq!(latest.player_choice, *player);
        assert_eq!(latest.outcome, resolve(*player, latest.computer_choice));
        assert!(s.history.len() <= 10);
        game.reset_round().await.unwrap();
    }

    let s = game.snapshot().await.unwrap();
    assert_eq!(s.history.len(), 10);
    let wins = s.score.player + s.score.computer;
    assert!(wins <= 25);
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_serializes_for_a_browser_front_end() {
    let game = GameBuilder::new()
        .source(ScriptedSource::always(Choice::Paper))
        .spawn();
    game.submit_choice(Choice::Scissors).await.unwrap();

    let pending = serde_json::to_value(game.snapshot().await.unwrap()).unwrap();
    assert_eq!(pending["phase"], "result");
    assert!(pending["outcome"].is_null());

    let settled = serde_json::to_value(reveal(&game).await).unwrap();
    assert_eq!(settled["outcome"], "win");
    assert_eq!(settled["history"][0]["player_choice"], "scissors");
}

#[tokio::test(start_paused = true)]
async fn test_history_stays_at_ten_when_builder_asks_for_more() {
    let game = GameBuilder::new()
        .history_capacity(50)
        .settle_delay(Duration::ZERO)
        .source(ScriptedSource::always(Choice::Rock))
        .spawn();

    for _ in 0..15 {
        game.submit_choice(Choice::Paper).await.unwrap();
        let s = reveal(&game).await;
        assert!(s.history.len() <= 10, "history len {}", s.history.len());
        game.reset_round().await.unwrap();
    }

    let s = game.snapshot().await.unwrap();
    assert_eq!(s.history.len(), 10);
    assert_eq!(s.score.player, 15);
}

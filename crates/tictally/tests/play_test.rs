//! Integration tests for the front ends: scripted play and the delayed reply.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::io::Write;
use std::time::Duration;
use tictally::{App, GameArgs, Settings, play, render_text};
use tictally_engine::{Mode, Player, Session};
use tokio::sync::mpsc;

fn strings(moves: &[&str]) -> Vec<String> {
    moves.iter().map(|m| m.to_string()).collect()
}

fn press(app: &mut App, c: char) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
}

#[test]
fn test_settings_file_drives_scripted_game() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "mode = \"vs_computer\"\nseed = 7").unwrap();

    let settings = Settings::load(file.path()).unwrap();
    let report = play(&settings, &strings(&["0", "8"])).unwrap();

    // Both of X's moves are kept and O answered each one.
    assert_eq!(report.board[4], Some(Player::O));
    assert!(report.rejected.is_empty());
    assert_eq!(report.board.iter().flatten().count(), 4);
    assert_eq!(report.turn, Player::X);
}

#[test]
fn test_json_report_shape() {
    let report = play(&Settings::default(), &strings(&["0", "1", "3", "4", "6"])).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["mode"], "multiplayer");
    assert_eq!(value["status"], "Player X wins!");
    assert_eq!(value["score"]["x_wins"], 1);
    assert_eq!(value["board"][0], "X");
    assert!(value["board"][2].is_null());
}

#[test]
fn test_tie_renders_as_text() {
    let report = play(
        &Settings::default(),
        &strings(&["0", "1", "2", "4", "3", "5", "7", "6", "8"]),
    )
    .unwrap();
    let text = render_text(&report);
    assert!(text.contains("Game ended in a tie!"));
    assert!(text.contains("Ties: 1"));
}

#[test]
fn test_moves_after_the_round_are_listed() {
    let report = play(&Settings::default(), &strings(&["0", "3", "1", "4", "2", "8"])).unwrap();
    assert_eq!(report.rejected.len(), 1);
    assert!(render_text(&report).contains("ignored 8"));
}

#[test]
fn test_computer_opens_when_it_plays_x() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "mode = \"computer\"\ncomputer = \"X\"\nseed = 2").unwrap();

    let settings = Settings::load(file.path()).unwrap();
    let report = play(&settings, &strings(&["0"])).unwrap();
    // X takes the center before the human's first move.
    assert_eq!(report.board[4], Some(Player::X));
    assert_eq!(report.board[0], Some(Player::O));
}

#[tokio::test]
async fn test_delayed_reply_lands_through_channel() {
    let game = GameArgs {
        mode: Some(Mode::VsComputer),
        seed: Some(5),
    };
    let settings = Settings::default().with_overrides(&game, Some(10));
    let mut app = App::new(settings.session());
    let (tx, mut rx) = mpsc::unbounded_channel();

    press(&mut app, '5');
    let ticket = app.next_reply().expect("computer owes a move");
    let delay = settings.reply_delay();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        tx.send(ticket).unwrap();
    });

    let arrived = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap()
        .unwrap();
    app.handle_reply(arrived);

    assert_eq!(app.session().board().filled(), 2);
    assert_eq!(app.session().turn(), Player::X);
}

#[tokio::test]
async fn test_reply_after_reset_is_dropped() {
    let mut app = App::new(Session::with_seed(5).with_mode(Mode::VsComputer));
    let (tx, mut rx) = mpsc::unbounded_channel();

    press(&mut app, '1');
    let ticket = app.next_reply().unwrap();
    tx.send(ticket).unwrap();

    press(&mut app, 'r');
    app.handle_reply(rx.recv().await.unwrap());

    assert_eq!(app.session().board().filled(), 0);
    assert_eq!(app.session().turn(), Player::X);
    assert_eq!(app.session().score().rounds(), 0);
}

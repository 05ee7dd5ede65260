mod common;

use common::{RecordingCanvas, ScriptedInput};

use getforce_shooter::clock::{Clock, ManualClock};
use getforce_shooter::config::GameConfig;
use getforce_shooter::entities::GameStatus;
use getforce_shooter::input::{FrameInput, Key};
use getforce_shooter::session::{Phase, Session};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Every tick spawns an enemy that falls straight past the bottom edge,
/// so each tick of play costs exactly one escape.
fn doomed_config() -> GameConfig {
    GameConfig {
        enemy_speed: 700,
        spawn_delay_ms: 0,
        min_spawn_delay_ms: 0,
        auto_fire: false,
        ..GameConfig::default()
    }
}

fn any_key() -> FrameInput {
    FrameInput::default().pressing(Key::Other)
}

fn idle() -> FrameInput {
    FrameInput::default()
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[test]
fn session_starts_on_menu() {
    let s = Session::new(GameConfig::default(), seeded_rng());
    assert_eq!(s.phase(), Phase::Menu);
    assert_eq!(s.games_played(), 0);
}

#[test]
fn menu_waits_for_a_key() {
    let mut s = Session::new(GameConfig::default(), seeded_rng());
    assert_eq!(s.step(&idle(), 16), Phase::Menu);
    assert_eq!(s.step(&FrameInput::default().holding(Key::Left), 16), Phase::Menu);
    assert_eq!(s.step(&any_key(), 16), Phase::Playing);
    assert_eq!(s.games_played(), 1);
}

#[test]
fn fire_key_also_starts_a_game() {
    let mut s = Session::new(GameConfig::default(), seeded_rng());
    assert_eq!(s.step(&FrameInput::default().pressing(Key::Fire), 16), Phase::Playing);
}

#[test]
fn quit_from_every_phase() {
    let quit = FrameInput::quitting();

    let mut s = Session::new(doomed_config(), seeded_rng());
    assert_eq!(s.step(&quit, 16), Phase::Quit);

    let mut s = Session::new(doomed_config(), seeded_rng());
    s.step(&any_key(), 16);
    assert_eq!(s.step(&quit, 16), Phase::Quit);

    let mut s = Session::new(doomed_config(), seeded_rng());
    s.step(&any_key(), 16);
    for _ in 0..5 {
        s.step(&idle(), 16);
    }
    assert_eq!(s.phase(), Phase::GameOver);
    assert_eq!(s.step(&quit, 16), Phase::Quit);
}

#[test]
fn quitting_tick_is_still_simulated() {
    let mut s = Session::new(doomed_config(), seeded_rng());
    s.step(&any_key(), 16);
    let x = s.world().player.rect.x;

    let quit = FrameInput {
        quit: true,
        ..FrameInput::default().holding(Key::Right)
    };
    assert_eq!(s.step(&quit, 16), Phase::Quit);
    assert_eq!(s.world().player.rect.x, x + 5);
    assert_eq!(s.world().elapsed_ms, 16);
    assert_eq!(s.world().player.health, 80);
}

#[test]
fn quit_is_terminal() {
    let mut s = Session::new(GameConfig::default(), seeded_rng());
    s.step(&FrameInput::quitting(), 16);
    assert_eq!(s.step(&any_key(), 16), Phase::Quit);
}

#[test]
fn five_escapes_end_the_round() {
    let mut s = Session::new(doomed_config(), seeded_rng());
    s.step(&any_key(), 16);

    for expected in [80, 60, 40] {
        assert_eq!(s.step(&idle(), 16), Phase::Playing);
        assert_eq!(s.world().player.health, expected);
    }
    assert_eq!(s.step(&idle(), 16), Phase::Playing);
    assert_eq!(s.world().player.health, 20);

    assert_eq!(s.step(&idle(), 16), Phase::GameOver);
    assert_eq!(s.world().player.health, 0);
    assert_eq!(s.world().status, GameStatus::GameOver);
}

#[test]
fn game_over_waits_for_a_key_then_returns_to_menu() {
    let mut s = Session::new(doomed_config(), seeded_rng());
    s.step(&any_key(), 16);
    for _ in 0..5 {
        s.step(&idle(), 16);
    }
    assert_eq!(s.step(&idle(), 16), Phase::GameOver);
    assert_eq!(s.step(&any_key(), 16), Phase::Menu);
}

#[test]
fn round_trip_starts_a_fresh_world() {
    let mut s = Session::new(doomed_config(), seeded_rng());
    s.step(&any_key(), 16);
    for _ in 0..5 {
        s.step(&idle(), 16);
    }
    s.step(&any_key(), 16); // game over → menu
    assert_eq!(s.phase(), Phase::Menu);

    s.step(&any_key(), 16); // menu → playing
    let w = s.world();
    assert_eq!(s.phase(), Phase::Playing);
    assert_eq!(s.games_played(), 2);
    assert_eq!(w.score, 0);
    assert_eq!(w.player.health, 100);
    assert_eq!(w.elapsed_ms, 0);
    assert_eq!(w.status, GameStatus::Playing);
    assert!(w.enemies.is_empty());
    assert!(w.projectiles.is_empty());
    assert!(w.pickups.is_empty());
}

// ── run() with fake collaborators ─────────────────────────────────────────────

#[test]
fn run_drives_the_full_cycle() {
    let mut script = vec![any_key()];
    script.extend(std::iter::repeat_with(idle).take(5));
    script.push(any_key());
    script.push(FrameInput::quitting());

    let mut input = ScriptedInput::new(script);
    let mut canvas = RecordingCanvas::default();
    let mut clock = ManualClock::new(16);
    let mut s = Session::new(doomed_config(), seeded_rng());

    s.run(&mut input, &mut canvas, &mut clock).unwrap();

    assert_eq!(s.phase(), Phase::Quit);
    assert_eq!(input.polled, 8);
    assert_eq!(clock.now_ms(), 8 * 16);
    // the quitting tick is not drawn
    assert_eq!(canvas.frames.len(), 7);

    let first = RecordingCanvas::texts(&canvas.frames[0]);
    assert!(first.contains(&"Health: 100".to_string()));

    let over = RecordingCanvas::texts(&canvas.frames[5]);
    assert_eq!(over, vec!["Game Over! Score: 0".to_string()]);

    let menu = RecordingCanvas::texts(&canvas.frames[6]);
    assert_eq!(menu, vec!["Press Any Key to Start".to_string()]);
}

#[test]
fn run_returns_immediately_after_quit() {
    let mut input = ScriptedInput::new(vec![FrameInput::quitting()]);
    let mut canvas = RecordingCanvas::default();
    let mut clock = ManualClock::new(16);
    let mut s = Session::new(GameConfig::default(), seeded_rng());

    s.run(&mut input, &mut canvas, &mut clock).unwrap();
    assert_eq!(input.polled, 1);
    assert!(canvas.frames.is_empty());
}

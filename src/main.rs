mod display;

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::ThreadRng;
use rand::thread_rng;
use tracing::{debug, info, warn};

use dodge_arena::compute::{new_game, restart, return_to_menu, start_game, tick};
use dodge_arena::config::Tunables;
use dodge_arena::entities::{GameState, GameStatus, SoundCue, TickInput};
use dodge_arena::logging;

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

const DEFAULT_LOG_FILE: &str = "dodge_arena.log";

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn read_env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .filter(|value| *value > 0.0)
        .unwrap_or(default)
}

fn read_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn read_env_bool(name: &str, default: bool) -> bool {
    match env::var(name).ok().as_deref() {
        Some("1") | Some("true") | Some("on") => true,
        Some("0") | Some("false") | Some("off") => false,
        _ => default,
    }
}

/// Defaults plus `DODGE_*` overrides. An inconsistent combination is
/// rejected as a whole and the defaults are used instead.
fn load_tunables() -> Tunables {
    let defaults = Tunables::default();
    let tunables = Tunables {
        fps: read_env_u32("DODGE_FPS", defaults.fps),
        player_speed: read_env_f32("DODGE_PLAYER_SPEED", defaults.player_speed),
        shoot_cooldown_ms: read_env_u64("DODGE_SHOOT_COOLDOWN_MS", defaults.shoot_cooldown_ms),
        powerup_interval_ms: read_env_u64(
            "DODGE_POWERUP_INTERVAL_MS",
            defaults.powerup_interval_ms,
        ),
        attack_range: read_env_f32("DODGE_ATTACK_RANGE", defaults.attack_range),
        disengage_range: read_env_f32("DODGE_DISENGAGE_RANGE", defaults.disengage_range),
        ..defaults.clone()
    };

    match tunables.validate() {
        Ok(()) => tunables,
        Err(err) => {
            warn!("invalid DODGE_* configuration ({}). Falling back to defaults.", err);
            defaults
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to a file: stdout is the raw-mode game screen.
fn init_logging() -> anyhow::Result<()> {
    let path = env::var("DODGE_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(logging::env_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Audio cues ────────────────────────────────────────────────────────────────

/// Plays cues as the terminal bell. Disabled or failing output is a no-op.
struct CuePlayer {
    enabled: bool,
}

impl CuePlayer {
    fn play<W: Write>(&self, out: &mut W, cue: SoundCue) {
        debug!(cue = cue.name(), "sound cue");
        if !self.enabled {
            return;
        }
        if let Err(err) = out.write_all(b"\x07") {
            debug!(cue = cue.name(), %err, "cue playback failed");
        }
    }
}

// ── Key handling ──────────────────────────────────────────────────────────────

enum Control {
    Continue,
    Quit,
}

/// One-shot key actions, dispatched on the top-level status.
fn on_key_press(
    state: &mut GameState,
    code: KeyCode,
    modifiers: KeyModifiers,
    now: u64,
    rng: &mut ThreadRng,
) -> Control {
    if let KeyCode::Char('c') = code {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return Control::Quit;
        }
    }
    match (state.status, code) {
        (_, KeyCode::Char('q') | KeyCode::Char('Q')) => return Control::Quit,

        (GameStatus::Menu, KeyCode::Esc) => return Control::Quit,
        (GameStatus::Menu, KeyCode::Char(c @ '1'..='3')) => {
            let level = c.to_digit(10).unwrap_or(1);
            start_game(state, level, now, rng);
        }

        (GameStatus::Playing, KeyCode::Esc) => return_to_menu(state),

        (GameStatus::GameOver | GameStatus::Victory, KeyCode::Esc) => return Control::Quit,
        (GameStatus::GameOver | GameStatus::Victory, KeyCode::Char('r') | KeyCode::Char('R')) => {
            restart(state, now, rng);
        }
        (GameStatus::GameOver | GameStatus::Victory, KeyCode::Char('m') | KeyCode::Char('M')) => {
            return_to_menu(state);
        }
        _ => {}
    }
    Control::Continue
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key. Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and fold them into one `TickInput`, so
/// diagonal movement and sprint combine freely.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    cues: &CuePlayer,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let clock = Instant::now();
    let frame_time = Duration::from_secs(1) / state.tunables.fps.max(1);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        let now = clock.elapsed().as_millis() as u64;
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if let Control::Quit = on_key_press(state, code, modifiers, now, &mut rng) {
                        return Ok(());
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Fold held keys into this tick's input ─────────────────────────────
        let up = any_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame);
        let down = any_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame);
        let left = any_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame);
        let right = any_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame);
        let input = TickInput {
            dx: right as i8 - left as i8,
            dy: down as i8 - up as i8,
            sprint: is_held(&key_frame, &KeyCode::Char(' '), frame),
        };

        let report = tick(state, input, now, &mut rng);
        for cue in &report.cues {
            cues.play(out, *cue);
        }
        if report.level_cleared {
            info!(level = report.level, status = ?state.status, "level cleared");
        }

        display::render(out, state, now)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let tunables = load_tunables();
    let cues = CuePlayer {
        enabled: read_env_bool("DODGE_SOUND", true),
    };
    info!(?tunables, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut state = new_game(tunables);
    let result = game_loop(&mut out, &mut state, &rx, &cues);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting");
    result.context("game loop failed")
}

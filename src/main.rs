mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use display::MenuAction;
use space_invaders::audio::{AudioSink, BellAudio, NullAudio};
use space_invaders::entities::{Controls, FrameOutcome};
use space_invaders::persistence::JsonScoreStore;
use space_invaders::session::{FrameClock, Session, FRAME};
use space_invaders::settings::Settings;

/// Logical pixels per terminal cell when the field size comes from the
/// terminal.
const CELL_W: i32 = 16;
const CELL_H: i32 = 24;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that never send key-release events:
/// OS key repeat runs at 15 Hz or more, so 8 frames at 60 FPS (~133 ms) is
/// refreshed before it expires.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "space_invaders", about = "Terminal Space Invaders")]
struct Args {
    /// JSON file with settings; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Logical field width (defaults to the terminal width).
    #[arg(long)]
    width: Option<i32>,
    /// Logical field height (defaults to the terminal height).
    #[arg(long)]
    height: Option<i32>,
    /// Name written to the leaderboard.
    #[arg(long)]
    name: Option<String>,
    /// Where high_score.json and high_scores.json live.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs here (the terminal itself is taken by the game).
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Ring the terminal bell on explosions.
    #[arg(long)]
    bell: bool,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn held_any(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn init_logging(path: &PathBuf) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

fn load_settings(args: &Args, cols: u16, rows: u16) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings {
            screen_width: cols as i32 * CELL_W,
            screen_height: (rows as i32 - 2).max(1) * CELL_H,
            ..Settings::default()
        },
    };
    if let Some(w) = args.width {
        settings.screen_width = w;
    }
    if let Some(h) = args.height {
        settings.screen_height = h;
    }
    if let Some(name) = &args.name {
        settings.player_name = name.clone();
    }
    settings.validate()?;
    Ok(settings)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One loop for every screen. Each frame: drain input into `Controls`,
/// tick the session, forward cues, render, then honour any pause the frame
/// asked for.
///
/// Movement keys use a `key_frame` map recording the frame of the last
/// press/repeat per key, so Space and the arrows can be held together.
/// Terminals with keyboard enhancement send releases and drop keys at once;
/// classic terminals let keys expire after `HOLD_WINDOW` frames of silence.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: &mut Session<JsonScoreStore>,
    audio: &mut dyn AudioSink,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let (mut cols, mut rows) = terminal::size()?;
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut clock = FrameClock::start();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut controls = Controls::default();
        let mut menu: Option<MenuAction> = None;

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                controls.quit = true;
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                controls.quit = true;
                            }
                            KeyCode::Char(' ') => controls.fire = true,
                            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Enter => {
                                if session.is_active() {
                                    session.toggle_pause();
                                } else {
                                    menu = Some(MenuAction::Play);
                                }
                            }
                            KeyCode::Char('h') | KeyCode::Char('H') => {
                                menu = Some(MenuAction::HighScores)
                            }
                            KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Backspace => {
                                menu = Some(MenuAction::Back)
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    menu = display::hit_test(session.screen, cols, rows, column, row).or(menu);
                }
                Event::Resize(c, r) => {
                    cols = c;
                    rows = r;
                }
                _ => {}
            }
        }

        if !session.is_active() {
            match menu {
                Some(MenuAction::Play) => session.start_round(),
                Some(MenuAction::HighScores) => session.show_high_scores(),
                Some(MenuAction::Back) => session.show_launch(),
                None => {}
            }
        }

        controls.left = held_any(&key_frame, &[KeyCode::Left, KeyCode::Char('a')], frame);
        controls.right = held_any(&key_frame, &[KeyCode::Right, KeyCode::Char('d')], frame);
        controls.up = held_any(&key_frame, &[KeyCode::Up, KeyCode::Char('w')], frame);
        controls.down = held_any(&key_frame, &[KeyCode::Down, KeyCode::Char('s')], frame);

        let report = session.tick(&controls, clock.lap(), rng);
        for cue in &report.cues {
            audio.play(*cue);
        }
        for e in &report.errors {
            error!("save failed, continuing: {}", e);
        }

        display::render(out, session, cols, rows)?;

        match report.outcome {
            FrameOutcome::Quit => return Ok(()),
            FrameOutcome::RoundOver { score } => info!(score, "back to menu"),
            FrameOutcome::Continue => {}
        }

        if let Some(pause) = report.pause {
            thread::sleep(pause);
        }
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let (cols, rows) = terminal::size().context("reading terminal size")?;
    let settings = load_settings(&args, cols, rows)?;
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(JsonScoreStore::default_dir);
    let store = JsonScoreStore::new(data_dir);
    let mut session = Session::new(settings, store);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut audio: Box<dyn AudioSink> = if args.bell {
        Box::new(BellAudio::new(stdout()))
    } else {
        Box::new(NullAudio)
    };

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Ask for key-release and repeat events; terminals without the kitty
    // protocol fall back to press-only.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the frame loop never waits.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &mut session, audio.as_mut(), &mut rng);

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("terminal i/o")
}

mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tide_runner::config::LevelCatalogue;
use tide_runner::host::{AudioSink, InputState, SoundCue};
use tide_runner::level::Level;
use tide_runner::session::Session;
use tide_runner::settings::MAX_HEALTH;

use display::Hud;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

const DEFAULT_CATALOGUE: &str = "levels/levels.ron";
const SEED_ENV_VAR: &str = "TIDE_RUNNER_SEED";
const LOG_FILE: &str = "tide_runner.log";

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 frames (≈133 ms) is refreshed
/// before it expires.
const HOLD_WINDOW: u64 = 8;

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

/// No audio device in the terminal; cues go to the log.
struct LoggedAudio;

impl AudioSink for LoggedAudio {
    fn play(&mut self, cue: SoundCue) {
        debug!("sound: {:?}", cue);
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Each frame, keys still "fresh" are
/// turned into one `InputState`, so Space and a direction can be held
/// together.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut level = Level::from_catalogue(&session.catalogue, 0, rng).map_err(std::io::Error::other)?;
    let mut audio = LoggedAudio;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame_no: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame_no += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame_no);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame_no);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = InputState {
            left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame_no,
            ),
            right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame_no,
            ),
            jump: any_held(
                &key_frame,
                &[KeyCode::Char(' '), KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
                frame_no,
            ),
        };

        let frame = level.run(input, session, &mut audio);

        let hud = Hud {
            level_name: &session.catalogue.levels[level.current_level].name,
            coins: session.coins,
            health: session.health,
            max_health: MAX_HEALTH,
        };
        display::render(out, &frame, &hud)?;

        if let Some(transition) = session.pending.take() {
            let next = session.next_level(transition);
            info!("leaving level {} for level {}", transition.from, next);
            level = Level::from_catalogue(&session.catalogue, next, rng)
                .map_err(std::io::Error::other)?;
            key_frame.clear();
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging() {
    let Ok(file) = std::fs::File::create(LOG_FILE) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn main() -> std::io::Result<()> {
    init_logging();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOGUE));
    let catalogue = match LevelCatalogue::load(&path) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let seed = std::env::var(SEED_ENV_VAR)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| rand::thread_rng().gen());
    info!("loaded {} levels from {}, seed {}", catalogue.len(), path.display(), seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = Session::new(catalogue);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the frame loop
    // never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut session, &mut rng, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("exiting with error: {e}");
    }
    info!("final coins {}", session.coins);
    result
}

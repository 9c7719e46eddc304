mod display;

use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use tracing::{error, info};

use board_shooter::compute::{init_state, move_shooter, press, resize_board, tick, Step};
use board_shooter::config::GameConfig;
use board_shooter::entities::{EntityId, GameState};
use board_shooter::render::{layout_constants, Presenter};
use board_shooter::scheduler::{FrameClock, FRAME};
use board_shooter::viewport;

use display::TerminalPresenter;

#[derive(Parser, Debug)]
#[command(about = "Mouse-driven shooting board in the terminal")]
struct Args {
    /// TOML file overriding tick interval, sizes and bullet speed.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where log lines go; the terminal itself belongs to the game.
    #[arg(long, default_value = "board_shooter.log")]
    log_file: PathBuf,
}

fn init_tracing(log_file: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("open log file {}", log_file.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        error!(%info, ?backtrace, "panic");
    }));
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fold a transition into the running state, forwarding its commands.
fn apply(state: &mut GameState, presenter: &mut TerminalPresenter, step: Step) {
    presenter.present_all(&step.commands);
    *state = step.state;
}

/// Returns on quit.  Input is drained and the screen redrawn every `FRAME`;
/// the simulation advances by however many fixed ticks the clock says are due.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    presenter: &mut TerminalPresenter,
    shooter: EntityId,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let mut clock = FrameClock::new(state.scheduler.interval());
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    let pointer = viewport::cell_to_absolute(column, row);
                    match kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            let step = move_shooter(state, shooter, pointer);
                            apply(state, presenter, step);
                        }
                        MouseEventKind::Down(_) => {
                            let step = press(state, shooter, pointer);
                            apply(state, presenter, step);
                        }
                        _ => {}
                    }
                }
                Event::Resize(columns, rows) => {
                    let bounds = viewport::measure_board(state.board.size(), columns, rows);
                    let step = resize_board(state, bounds);
                    apply(state, presenter, step);
                }
                _ => {}
            }
        }

        // ── Fixed-step simulation ─────────────────────────────────────────────
        let now = Instant::now();
        for _ in 0..clock.advance(now - last) {
            let step = tick(state);
            apply(state, presenter, step);
        }
        last = now;

        display::render(out, presenter, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_file)?;

    let config = GameConfig::load(args.config.as_deref())?;
    info!(?config, "configuration loaded");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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

    let result = run(&mut out, config, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!(error = %e, "game aborted");
    }
    result
}

fn run<W: Write>(out: &mut W, config: GameConfig, rx: &mpsc::Receiver<Event>) -> anyhow::Result<()> {
    let mut presenter = TerminalPresenter::new();
    presenter.layout(&layout_constants(&config));

    let Step { mut state, commands } = init_state(config);
    presenter.present_all(&commands);

    let shooter = *state
        .board
        .shooters()
        .first()
        .context("board started without a shooter")?;

    let (columns, rows) = terminal::size().context("query terminal size")?;
    let bounds = viewport::measure_board(state.board.size(), columns, rows);
    let step = resize_board(&state, bounds);
    apply(&mut state, &mut presenter, step);

    game_loop(out, &mut state, &mut presenter, shooter, rx)?;
    info!(ticks = state.tick_count, "quit");
    Ok(())
}

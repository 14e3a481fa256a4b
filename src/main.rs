mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use beetlemorph::compute::{init_game, resize, start, tick};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  One iteration per display frame: drain all
/// pending input events, advance the session by the measured elapsed
/// milliseconds, render.  The session itself starts in the idle overlay and
/// is (re)started by Enter / R at any time.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = thread_rng();

    let (cols, rows) = terminal::size()?;
    let (width, height) = display::playfield_size(cols, rows);
    let mut game = init_game(width, height);

    let mut last_time = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) if kind == KeyEventKind::Press => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(());
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                        start(&mut game, &mut rng);
                    }
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    let (x, y) = display::cell_to_logical(column, row);
                    match kind {
                        // A fresh press re-arms the one-shot `fired` gate.
                        MouseEventKind::Down(MouseButton::Left) => {
                            game.mouse.x = x;
                            game.mouse.y = y;
                            game.mouse.pressed = true;
                            game.mouse.fired = false;
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            game.mouse.x = x;
                            game.mouse.y = y;
                            game.mouse.pressed = false;
                        }
                        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                            game.mouse.x = x;
                            game.mouse.y = y;
                        }
                        _ => {}
                    }
                }
                Event::Resize(new_cols, new_rows) => {
                    let (w, h) = display::playfield_size(new_cols, new_rows);
                    resize(&mut game, w, h);
                }
                _ => {}
            }
        }

        // Delta is wall-clock time between frame starts, in milliseconds,
        // matching what the spawn and sprite timers accumulate.
        let delta_ms = frame_start.duration_since(last_time).as_secs_f32() * 1000.0;
        last_time = frame_start;

        tick(&mut game, delta_ms, &mut rng);
        display::render(out, &game)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
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

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

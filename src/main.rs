use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::env;
use std::io::{stdout, BufRead, BufWriter, IsTerminal};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use scoreburst::canvas::{surface_size, Canvas};
use scoreburst::message::{self, ScoreMessage};
use scoreburst::scoreboard::{RenderMode, Scoreboard, DEFAULT_FIREWORK_COUNT, IDLE_BACKGROUND};

fn print_usage() {
    eprintln!("scoreburst - terminal score readout with celebratory fireworks");
    eprintln!();
    eprintln!("Usage: scoreburst [OPTIONS]");
    eprintln!();
    eprintln!("Reads JSON score messages from stdin, one object per line:");
    eprintln!("  {{\"type\": \"H5P_SCORE_RESULT\", \"score\": 10, \"maxScore\": 10}}");
    eprintln!("A perfect score launches the fireworks display.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bg-color RRGGBB  Idle background color as hex (e.g., --bg-color ffffff)");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  f                  Launch fireworks on demand");
    eprintln!("  q, ESC, Ctrl+C     Exit");
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Read score messages off stdin on a separate thread. Returns `None` when
/// stdin is a terminal (crossterm owns it for key input then); with a piped
/// stdin, key events still arrive via the controlling tty.
fn spawn_intake() -> Option<Receiver<ScoreMessage>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if let Some(msg) = message::parse_line(&line) {
                if tx.send(msg).is_err() {
                    break;
                }
            }
        }
    });
    Some(rx)
}

fn run(background: (u8, u8, u8)) -> std::io::Result<()> {
    let out = stdout();
    let mut out = BufWriter::with_capacity(1024 * 64, out);

    terminal::enable_raw_mode()?;
    execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let (cols, rows) = terminal::size().unwrap_or((80, 24));
    let (width, height) = surface_size(cols, rows);
    let mut canvas = Canvas::new(width, height);
    let mut board = Scoreboard::new(width, height, background);
    let intake = spawn_intake();

    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;
    const FIXED_DT: f32 = 1.0 / 60.0;

    'outer: loop {
        // Drain pending messages first so their effects are fully applied
        // before this iteration's ticks observe them.
        if let Some(rx) = &intake {
            while let Ok(msg) = rx.try_recv() {
                board.handle_message(msg);
            }
        }

        let poll_timeout = match board.mode() {
            RenderMode::Continuous => Duration::from_millis(1),
            RenderMode::Idle => Duration::from_millis(30),
        };
        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.code == KeyCode::Char('q')
                        || key.code == KeyCode::Esc
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL))
                    {
                        break 'outer;
                    }
                    if key.code == KeyCode::Char('f') {
                        board.trigger_fireworks(DEFAULT_FIREWORK_COUNT);
                    }
                }
                Event::Resize(cols, rows) => {
                    let (w, h) = surface_size(cols, rows);
                    canvas.resize(w, h);
                    board.resize(w, h);
                    execute!(out, Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        accumulator += now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        if accumulator > FIXED_DT * 3.0 {
            accumulator = FIXED_DT * 3.0;
        }

        let mut rendered = false;
        while accumulator >= FIXED_DT {
            accumulator -= FIXED_DT;
            if board.mode() == RenderMode::Continuous {
                board.frame(&mut canvas);
                rendered = true;
            }
        }
        // Idle mode renders on demand only: startup, a non-perfect score,
        // a resize, or the final pass after the field drains.
        if board.take_redraw() {
            board.frame(&mut canvas);
            rendered = true;
        }

        if rendered {
            canvas.present(&mut out)?;
        }
    }

    execute!(out, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    Ok(())
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut background = IDLE_BACKGROUND;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bg-color" => {
                if i + 1 < args.len() {
                    if let Some(color) = parse_hex_color(&args[i + 1]) {
                        background = color;
                        i += 2;
                    } else {
                        eprintln!("Invalid hex color: {}", args[i + 1]);
                        eprintln!("Expected format: RRGGBB (e.g., ffffff)");
                        std::process::exit(1);
                    }
                } else {
                    eprintln!("--bg-color requires a hex color value");
                    std::process::exit(1);
                }
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            arg => {
                eprintln!("Unknown option: {}", arg);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }

    run(background)
}

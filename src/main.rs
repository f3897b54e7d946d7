//! Collect Object entry point
//!
//! Terminal frontend: draws the arena with half-block characters, forwards key
//! presses and feeds wall-clock time to the session.

use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{self, Color};
use crossterm::{cursor, execute, queue, terminal};
use glam::IVec2;

use collect_object::consts::{ARENA_SIZE, MARKER_SIZE, STEP, TARGET_SIZE};
use collect_object::platform::{Command, command_for_key};
use collect_object::sim::GameEvent;
use collect_object::ui::{Frame, LayoutOracle, Modal, View};
use collect_object::{Session, Settings};

/// Arena pixels per terminal column (and per half row)
const CELL: i32 = STEP;
const COLS: usize = (ARENA_SIZE / CELL) as usize;
const PIXEL_ROWS: usize = COLS;

const ARENA_BG: Color = Color::Rgb { r: 24, g: 26, b: 38 };
const MARKER: Color = Color::Rgb { r: 60, g: 110, b: 240 };
const TARGET: Color = Color::Rgb { r: 250, g: 165, b: 0 };
const BORDER: Color = Color::Rgb { r: 120, g: 120, b: 140 };

/// Wait this long for input when no timer is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Collect Object starting...");

    let settings = Settings::load();
    let mut session = Session::new(&settings);
    let mut layout = LayoutOracle::new(IVec2::ZERO);

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let result = run(&mut out, &mut session, &mut layout, &settings);

    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;

    log::info!("Final score {}", session.state().score);
    result
}

fn run(
    out: &mut Stdout,
    session: &mut Session,
    layout: &mut LayoutOracle,
    settings: &Settings,
) -> io::Result<()> {
    let started = Instant::now();
    let elapsed_ms = || started.elapsed().as_millis() as u64;

    loop {
        let frame = session.frame();
        draw(out, &frame, settings)?;
        layout.record(&frame);

        let wait = session
            .next_deadline()
            .map(|due| Duration::from_millis(due.saturating_sub(elapsed_ms())))
            .unwrap_or(IDLE_POLL);

        if event::poll(wait)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let quit = key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c');
                    let command = key_name(key.code).and_then(|name| command_for_key(&name));
                    match command {
                        _ if quit => return Ok(()),
                        Some(Command::Quit) => return Ok(()),
                        Some(command) => {
                            session.handle(elapsed_ms(), command, &*layout);
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => queue!(out, terminal::Clear(terminal::ClearType::All))?,
                _ => {}
            }
        }

        session.advance_to(elapsed_ms(), &*layout);

        for event in session.drain_events() {
            match event {
                GameEvent::Lost { score } => log::info!("Lost with {} points", score),
                GameEvent::Collected { score } => log::debug!("Score {}", score),
                other => log::trace!("{:?}", other),
            }
        }
    }
}

/// DOM-style name for a terminal key
fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Up => "ArrowUp".to_string(),
        KeyCode::Down => "ArrowDown".to_string(),
        KeyCode::Left => "ArrowLeft".to_string(),
        KeyCode::Right => "ArrowRight".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::Char(c) => c.to_string(),
        _ => return None,
    };
    Some(name)
}

/// Arena as a grid of colored cells, one per 10px
fn paint(frame: &Frame) -> Vec<Color> {
    let mut px = vec![ARENA_BG; COLS * PIXEL_ROWS];
    if frame.view == View::PlayField {
        fill(&mut px, frame.target, TARGET_SIZE, TARGET);
        fill(&mut px, frame.position, MARKER_SIZE, MARKER);
    }
    px
}

fn fill(px: &mut [Color], origin: IVec2, size: i32, color: Color) {
    let cells = size / CELL;
    for dy in 0..cells {
        for dx in 0..cells {
            let x = origin.x / CELL + dx;
            let y = origin.y / CELL + dy;
            // Marker may hang past the arena edge at the clamp limit
            if (0..COLS as i32).contains(&x) && (0..PIXEL_ROWS as i32).contains(&y) {
                px[y as usize * COLS + x as usize] = color;
            }
        }
    }
}

fn draw(out: &mut impl Write, frame: &Frame, settings: &Settings) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0), style::ResetColor)?;

    if settings.show_hud {
        queue!(
            out,
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(frame.score_card()),
            style::Print("\r\n")
        )?;
    }

    let horizontal = "─".repeat(COLS);
    queue!(
        out,
        style::SetForegroundColor(BORDER),
        style::Print(format!("┌{horizontal}┐\r\n"))
    )?;

    let px = paint(frame);
    for row in 0..PIXEL_ROWS / 2 {
        queue!(out, style::SetForegroundColor(BORDER), style::Print('│'))?;
        for col in 0..COLS {
            let top = px[row * 2 * COLS + col];
            let bottom = px[(row * 2 + 1) * COLS + col];
            queue!(
                out,
                style::SetForegroundColor(top),
                style::SetBackgroundColor(bottom),
                style::Print('▀')
            )?;
        }
        queue!(
            out,
            style::ResetColor,
            style::SetForegroundColor(BORDER),
            style::Print("│\r\n")
        )?;
    }
    queue!(
        out,
        style::SetForegroundColor(BORDER),
        style::Print(format!("└{horizontal}┘\r\n")),
        style::ResetColor,
        style::Print("arrows steer · m manual/auto · q quit")
    )?;

    if let Some(modal) = frame.modal() {
        draw_modal(out, &modal, settings)?;
    }

    out.flush()
}

fn draw_modal(out: &mut impl Write, modal: &Modal, settings: &Settings) -> io::Result<()> {
    let width = COLS - 4;
    let mut lines = vec![Modal::TITLE.to_string(), modal.score_line(), String::new()];
    lines.extend(wrap(Modal::INSTRUCTIONS, width - 2));
    lines.push(String::new());
    lines.push(format!("[ {} ]  (Enter)", modal.button));

    let hud_rows = u16::from(settings.show_hud);
    let top = hud_rows + 1 + ((PIXEL_ROWS / 2).saturating_sub(lines.len() + 2) / 2) as u16;
    let left = 3u16;

    queue!(out, style::SetForegroundColor(Color::White), style::SetBackgroundColor(Color::Black))?;
    queue!(out, cursor::MoveTo(left, top), style::Print(format!("╭{}╮", "─".repeat(width))))?;
    for (i, line) in lines.iter().enumerate() {
        queue!(
            out,
            cursor::MoveTo(left, top + 1 + i as u16),
            style::Print(format!("│{:^width$}│", line))
        )?;
    }
    queue!(
        out,
        cursor::MoveTo(left, top + 1 + lines.len() as u16),
        style::Print(format!("╰{}╯", "─".repeat(width))),
        style::ResetColor
    )
}

/// Greedy word wrap
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        let lines = wrap(Modal::INSTRUCTIONS, 42);
        assert!(lines.iter().all(|l| l.len() <= 42));
        assert_eq!(lines.join(" "), Modal::INSTRUCTIONS);
    }

    #[test]
    fn test_paint_clips_marker_at_clamp_limit() {
        let frame = Frame {
            view: View::PlayField,
            score: 0,
            position: IVec2::new(480, 480),
            target: IVec2::new(0, 0),
        };
        let px = paint(&frame);
        assert_eq!(px[0], TARGET);
        assert_eq!(px[COLS * PIXEL_ROWS - 1], ARENA_BG);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(KeyCode::Up).as_deref(), Some("ArrowUp"));
        assert_eq!(key_name(KeyCode::Char('m')).as_deref(), Some("m"));
        assert_eq!(key_name(KeyCode::Tab), None);
    }
}

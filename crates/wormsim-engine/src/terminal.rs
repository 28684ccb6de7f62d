//! Crossterm display and keyboard strategy.
//!
//! The board occupies the top of the alternate screen and a five-row
//! message area sits below it for the status lines and the end-of-run
//! prompt. The terminal is put back the way it was when the strategy is
//! dropped, even if the session ends with an error.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing::info;
use wormsim_core::{DisplayStrategy, StrategyError};
use wormsim_types::Attr;
use wormsim_world::{Arena, PopulationStats};

use crate::keys::Command;
use crate::pacer::Pacer;

/// Rows below the board reserved for status and prompts.
pub const MESSAGE_ROWS: u16 = 5;

/// How one cell attribute is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    /// Foreground colour.
    pub fg: Color,
    /// Background colour, or the terminal default.
    pub bg: Option<Color>,
    /// Swap foreground and background.
    pub reverse: bool,
}

/// Drawing style for `attr`. Living worms stand out in reverse video.
pub const fn cell_style(attr: Attr) -> CellStyle {
    match attr {
        Attr::Ground | Attr::Remains => CellStyle {
            fg: Color::Yellow,
            bg: None,
            reverse: false,
        },
        Attr::Vegetarian => CellStyle {
            fg: Color::Green,
            bg: None,
            reverse: true,
        },
        Attr::Scissorhead => CellStyle {
            fg: Color::Red,
            bg: None,
            reverse: true,
        },
        Attr::Cannibal => CellStyle {
            fg: Color::Black,
            bg: Some(Color::White),
            reverse: true,
        },
        Attr::Highlight => CellStyle {
            fg: Color::Magenta,
            bg: None,
            reverse: true,
        },
    }
}

/// The three status lines shown under the board.
pub fn status_lines(stats: &PopulationStats, pacer: &Pacer) -> [String; 3] {
    let space = if pacer.is_paused() { "resumes" } else { "pauses" };
    [
        format!("SPC {space}, ESC ends the run, k kills, w creates, s selects a worm"),
        format!(
            "{:2} vegetarians, {:2} cannibals, {:2} scissorheads, {:2} high-water mark",
            stats.vegetarians, stats.cannibals, stats.scissorheads, stats.high_water_mark
        ),
        format!(
            "{:04} slowness, - increases, + reduces, f full speed",
            pacer.slowness_ms()
        ),
    ]
}

/// Columns and rows left for the board once the message area is taken.
pub fn available_area() -> io::Result<(u16, u16)> {
    let (cols, rows) = terminal::size()?;
    Ok((cols, rows.saturating_sub(MESSAGE_ROWS)))
}

/// A [`DisplayStrategy`] drawing to the terminal with crossterm.
pub struct TerminalStrategy {
    out: Stdout,
    pacer: Pacer,
}

impl TerminalStrategy {
    /// Switch the terminal to raw mode on the alternate screen.
    pub fn enter(pacer: Pacer) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut strategy = Self {
            out: io::stdout(),
            pacer,
        };
        execute!(strategy.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(strategy)
    }

    fn show_status(&mut self, arena: &Arena) -> io::Result<()> {
        let top = arena.size().height.saturating_add(1);
        let lines = status_lines(&arena.stats(), &self.pacer);
        for (offset, line) in (0_u16..).zip(lines) {
            queue!(
                self.out,
                MoveTo(0, top.saturating_add(offset)),
                Clear(ClearType::CurrentLine),
                Print(line)
            )?;
        }
        self.out.flush()
    }
}

impl DisplayStrategy for TerminalStrategy {
    fn redraw(&mut self, arena: &Arena) -> Result<(), StrategyError> {
        let mut current = None;
        for (y, row) in (0_u16..).zip(arena.screen().rows()) {
            queue!(self.out, MoveTo(0, y))?;
            for cell in row {
                if current != Some(cell.attr) {
                    apply_style(&mut self.out, cell_style(cell.attr))?;
                    current = Some(cell.attr);
                }
                queue!(self.out, Print(cell.glyph))?;
            }
        }
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn process_input(&mut self, arena: &mut Arena) -> Result<bool, StrategyError> {
        self.show_status(arena)?;
        let mut remaining = self.pacer.step_budget_ms();
        while remaining > 0 {
            if let Some(command) = next_command(self.pacer.quantum())? {
                if command.apply(&mut self.pacer, arena) {
                    return Ok(true);
                }
                self.redraw(arena)?;
                self.show_status(arena)?;
            }
            remaining = self.pacer.after_quantum(remaining);
        }
        Ok(false)
    }

    fn confirm_exit(&mut self, arena: &Arena) -> Result<bool, StrategyError> {
        let top = arena.size().height.saturating_add(1);
        queue!(
            self.out,
            MoveTo(0, top),
            Clear(ClearType::FromCursorDown),
            Print("press Esc to quit, or any other key to re-run")
        )?;
        self.out.flush()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let quit = key.code == KeyCode::Esc;
            info!(quit, "end of run answered");
            return Ok(quit);
        }
    }
}

impl Drop for TerminalStrategy {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Show,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn apply_style(out: &mut impl Write, style: CellStyle) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), SetForegroundColor(style.fg))?;
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(bg))?;
    }
    if style.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

/// Wait up to `timeout` for a key press and map it to a command.
fn next_command(timeout: Duration) -> io::Result<Option<Command>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Command::from_key(key.code)),
        _ => Ok(None),
    }
}

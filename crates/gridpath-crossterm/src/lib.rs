//! Crossterm terminal driver for gridpath.
//!
//! Provides a [`TerminalDriver`] that draws a [`Board`] with one colored
//! glyph per cell and paces an animation, polling the keyboard between
//! steps so the user can stop a run early.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{self, Color as CtColor, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_editor::{Board, CellClass};

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const DEFAULT: Rgb = Rgb(0, 0, 0);
}

/// Maps an [`Rgb`] to a [`crossterm::style::Color`]. Black is the terminal
/// default.
fn to_ct_color(c: Rgb) -> CtColor {
    if c == Rgb::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.0,
            g: c.1,
            b: c.2,
        }
    }
}

/// How one cell class is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Glyph {
    pub const fn new(ch: char, fg: Rgb, bg: Rgb) -> Self {
        Self { ch, fg, bg }
    }
}

/// Glyphs for every [`CellClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub free: Glyph,
    pub obstacle: Glyph,
    pub source: Glyph,
    pub target: Glyph,
    pub path: Glyph,
    pub visited: Glyph,
    pub current: Glyph,
}

impl Palette {
    pub fn glyph(&self, class: CellClass) -> Glyph {
        match class {
            CellClass::Free => self.free,
            CellClass::Obstacle => self.obstacle,
            CellClass::Source => self.source,
            CellClass::Target => self.target,
            CellClass::Path => self.path,
            CellClass::Visited => self.visited,
            CellClass::Current => self.current,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        let fg = Rgb(0xe0, 0xe0, 0xe0);
        Self {
            free: Glyph::new('·', Rgb(0x60, 0x60, 0x60), Rgb::DEFAULT),
            obstacle: Glyph::new('#', fg, Rgb(0x40, 0x40, 0x40)),
            source: Glyph::new('S', fg, Rgb(0x20, 0x80, 0x20)),
            target: Glyph::new('T', fg, Rgb(0xa0, 0x20, 0x20)),
            path: Glyph::new('*', Rgb(0x10, 0x10, 0x10), Rgb(0xe0, 0xc0, 0x30)),
            visited: Glyph::new(' ', fg, Rgb(0x20, 0x40, 0x70)),
            current: Glyph::new('@', fg, Rgb(0x30, 0x90, 0xd0)),
        }
    }
}

/// What the caller should do after a step delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    Continue,
    Stop,
}

/// Maps a key press to [`StepControl::Stop`] when it is a quit key:
/// `q`, `Esc` or Ctrl-C.
fn to_control(key: KeyEvent) -> Option<StepControl> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(StepControl::Stop),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(StepControl::Stop)
        }
        _ => None,
    }
}

/// A terminal front end for boards using crossterm.
pub struct TerminalDriver {
    palette: Palette,
    active: bool,
}

impl TerminalDriver {
    /// Create a new driver with the default palette.
    pub fn new() -> Self {
        Self {
            palette: Palette::default(),
            active: false,
        }
    }

    /// Replace the palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Enter raw mode and the alternate screen, hiding the cursor.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        let mut stdout = io::stdout();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        stdout.flush()?;
        log::debug!("terminal initialized");
        Ok(())
    }

    /// Draw `board` from the top-left corner, followed by a status line.
    ///
    /// Each cell takes two columns so the grid looks roughly square.
    pub fn draw(&mut self, board: &Board, status: &str) -> io::Result<()> {
        let mut stdout = io::stdout();

        for y in 0..board.height() {
            queue!(stdout, cursor::MoveTo(0, y as u16))?;
            for &class in board.row(y) {
                let g = self.palette.glyph(class);
                queue!(
                    stdout,
                    SetForegroundColor(to_ct_color(g.fg)),
                    SetBackgroundColor(to_ct_color(g.bg)),
                    Print(g.ch),
                    Print(' ')
                )?;
            }
        }

        queue!(
            stdout,
            style::ResetColor,
            cursor::MoveTo(0, board.height() as u16),
            terminal::Clear(ClearType::CurrentLine),
            Print(status)
        )?;
        stdout.flush()
    }

    /// Wait for `delay`, returning early with [`StepControl::Stop`] if a
    /// quit key is pressed.
    pub fn wait_step(&mut self, delay: Duration) -> io::Result<StepControl> {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(StepControl::Continue);
            }
            if let Event::Key(key) = event::read()? {
                if let Some(control) = to_control(key) {
                    log::debug!("stop requested from keyboard");
                    return Ok(control);
                }
            }
            if remaining.is_zero() {
                return Ok(StepControl::Continue);
            }
        }
    }

    /// Block until any key is pressed.
    pub fn wait_key(&mut self) -> io::Result<()> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        let _ = queue!(
            stdout,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}

impl Default for TerminalDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.close();
    }
}

#![forbid(unsafe_code)]

//! Terminal front end: half-block render sink and input producer.
//!
//! The sink downsamples the pixel surface to the terminal grid and draws
//! two pixels per cell with the upper-half-block glyph. It runs on the
//! execution loop thread and only writes to stdout, so it returns promptly
//! as the sink contract requires. The input loop runs on the main thread
//! and is a pure producer: every interaction becomes a posted operation.

use std::io::{self, Stdout, Write};

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEventKind,
};
use crossterm::style::{Color, Colors, Print, ResetColor, SetColors};
use crossterm::{cursor, event, execute, queue, terminal};
use easel_render::color::Rgba;
use easel_render::surface::PixelSurface;
use easel_render::Surface;
use easel_runtime::exec::{Poster, RenderSink};
use easel_runtime::op::Op;
use tracing::warn;

/// Presents surfaces as colored half-block cells on stdout.
pub struct TtySink {
    out: Stdout,
}

impl TtySink {
    pub fn new() -> Self {
        TtySink { out: io::stdout() }
    }

    fn draw(&mut self, surface: &PixelSurface) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let cols = cols.max(1);
        let rows = rows.max(1);

        for row in 0..rows {
            queue!(self.out, cursor::MoveTo(0, row))?;
            for col in 0..cols {
                let top = sample(surface, col, cols, u32::from(row) * 2, u32::from(rows) * 2);
                let bottom =
                    sample(surface, col, cols, u32::from(row) * 2 + 1, u32::from(rows) * 2);
                queue!(
                    self.out,
                    SetColors(Colors::new(term_color(top), term_color(bottom))),
                    Print('\u{2580}')
                )?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

impl Default for TtySink {
    fn default() -> Self {
        TtySink::new()
    }
}

impl RenderSink<PixelSurface> for TtySink {
    fn present(&mut self, surface: &PixelSurface) {
        if let Err(e) = self.draw(surface) {
            warn!(error = %e, "terminal present failed");
        }
    }
}

/// Nearest-neighbor sample of the surface at a terminal grid position.
fn sample(surface: &PixelSurface, col: u16, cols: u16, row: u32, rows: u32) -> Rgba {
    let x = (u64::from(col) * u64::from(surface.width()) / u64::from(cols)) as u32;
    let y = (u64::from(row) * u64::from(surface.height()) / u64::from(rows)) as u32;
    surface.pixel(
        x.min(surface.width().saturating_sub(1)),
        y.min(surface.height().saturating_sub(1)),
    )
}

fn term_color(c: Rgba) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// RAII guard for raw mode, the alternate screen, and mouse capture.
pub struct TerminalSession;

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(TerminalSession)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Blocks on terminal events until the user quits. A left click adds a
/// figure at the click position (scaled to the unit interval) and requests
/// a refresh, as one batch.
pub fn run_input(poster: &Poster) -> io::Result<()> {
    loop {
        match event::read()? {
            Event::Key(key) if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) => {
                return Ok(());
            }
            Event::Mouse(mouse)
                if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) =>
            {
                let (cols, rows) = terminal::size()?;
                let x = f64::from(mouse.column) / f64::from(cols.max(1));
                let y = f64::from(mouse.row) / f64::from(rows.max(1));
                poster.post(Op::Batch(vec![
                    Op::AddFigure { x: x.clamp(0.0, 1.0), y: y.clamp(0.0, 1.0) },
                    Op::Refresh,
                ]));
            }
            _ => {}
        }
    }
}

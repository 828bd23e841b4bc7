//! TerminalRenderer: pushes framebuffers to the real terminal.
//!
//! A frame after `enter`, a resize or `invalidate` is painted in full.
//! Later frames only repaint the horizontal runs of cells that differ from
//! the frame before. All commands for one frame go into a byte buffer and
//! reach stdout in a single write.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};
use log::debug;

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows; `None` forces a full paint.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor and mouse capture for swipes.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?
            .queue(event::EnableMouseCapture)?;
        self.shown = None;
        self.flush()
    }

    /// Undo everything `enter` did. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(event::DisableMouseCapture)?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force a full repaint on the next draw (after a resize, for example).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Paint `fb`, then swap it with the renderer's copy of the screen.
    ///
    /// On return `fb` holds the previous frame. Callers render over it
    /// in place for the next frame, so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();

        let mut shown = match self.shown.take() {
            Some(shown) if same_size(&shown, fb) => {
                encode_diff_into(&shown, fb, &mut self.out)?;
                shown
            }
            stale => {
                debug!("full repaint at {}x{}", fb.width(), fb.height());
                encode_full_into(fb, &mut self.out)?;
                let mut shown = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                shown.resize(fb.width(), fb.height());
                shown
            }
        };
        self.flush()?;

        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Emits glyphs, only switching colours when the style changes.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn paint(&mut self, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                apply_style(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full repaint of `fb` into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut painter = Painter::new(out);
    for (y, row) in rows(fb).enumerate() {
        painter.move_to(0, y as u16)?;
        painter.paint(row)?;
    }
    painter.finish()
}

/// Encode only the cells of `next` that differ from `prev`.
///
/// Frames of different sizes are repainted row by row.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);

    if !same_size(prev, next) {
        for (y, row) in rows(next).enumerate() {
            painter.move_to(0, y as u16)?;
            painter.paint(row)?;
        }
        return painter.finish();
    }

    for (y, (old, new)) in rows(prev).zip(rows(next)).enumerate() {
        for (start, end) in changed_runs(old, new) {
            painter.move_to(start as u16, y as u16)?;
            painter.paint(&new[start..end])?;
        }
    }
    painter.finish()
}

fn rows(fb: &FrameBuffer) -> impl Iterator<Item = &[Cell]> {
    (0..fb.height()).filter_map(move |y| fb.row(y))
}

/// Half-open `[start, end)` column ranges where two rows differ.
fn changed_runs<'a>(old: &'a [Cell], new: &'a [Cell]) -> impl Iterator<Item = (usize, usize)> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        let differs = |i: usize| old.get(i) != new.get(i);
        while x < new.len() && !differs(x) {
            x += 1;
        }
        if x >= new.len() {
            return None;
        }
        let start = x;
        while x < new.len() && differs(x) {
            x += 1;
        }
        Some((start, x))
    })
}

fn apply_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(to_color(style.fg)))?
        .queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(text: &str) -> Vec<Cell> {
        text.chars().map(|ch| CellStyle::default().into_cell(ch)).collect()
    }

    #[test]
    fn rgb_maps_to_truecolor() {
        assert_eq!(to_color(Rgb::new(237, 194, 46)), Color::Rgb { r: 237, g: 194, b: 46 });
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let old = cells("     ");
        let new = cells(" 128 ");
        assert_eq!(changed_runs(&old, &new).collect::<Vec<_>>(), vec![(1, 4)]);
    }

    #[test]
    fn changed_runs_split_on_unchanged_cells() {
        let old = cells("2 4 8");
        let new = cells("4 4 16");
        let runs: Vec<_> = changed_runs(&old[..5], &new[..5]).collect();
        assert_eq!(runs, vec![(0, 1), (4, 5)]);
    }

    #[test]
    fn identical_frames_encode_only_reset() {
        let a = FrameBuffer::new(4, 2);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();

        let mut reset_only = Vec::new();
        reset_only.queue(ResetColor).unwrap();
        reset_only.queue(SetAttribute(Attribute::Reset)).unwrap();
        assert_eq!(out, reset_only);
    }

    #[test]
    fn diff_encodes_only_changed_glyphs() {
        let a = FrameBuffer::new(6, 1);
        let mut b = a.clone();
        b.put_str(2, 0, "64", CellStyle::default());

        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("64"));
    }

    #[test]
    fn full_encode_contains_every_glyph() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "2048", CellStyle::default());
        fb.put_str(0, 1, "512", CellStyle::default());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("2048"));
        assert!(text.contains("512"));
    }
}

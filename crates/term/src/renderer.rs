//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Each frame is compared row by row with the one before it. Only the dirty
//! spans are written, and colors are only re-sent when they change, so an
//! idle grid writes nothing at all.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Horizontal run of glyphs that must be repainted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Double-buffered renderer over any writer; stdout by default.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Raw mode plus the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.send(|buf| {
            buf.queue(terminal::EnterAlternateScreen)?
                .queue(cursor::Hide)?
                .queue(terminal::DisableLineWrap)?;
            Ok(())
        })
    }

    /// Undo [`enter`](Self::enter). Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.send(|buf| {
            buf.queue(ResetColor)?
                .queue(SetAttribute(Attribute::Reset))?
                .queue(terminal::EnableLineWrap)?
                .queue(cursor::Show)?
                .queue(terminal::LeaveAlternateScreen)?;
            Ok(())
        })?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(8 * 1024),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Repaint everything on the next draw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then hand the previous frame back through it.
    ///
    /// Keep one `FrameBuffer` and render into it every frame; the renderer
    /// retains the frame just drawn for the next diff.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.last.as_ref(), fb, &mut self.buf)?;
        if !self.buf.is_empty() {
            self.out.write_all(&self.buf)?;
            self.out.flush()?;
        }

        let prev = self.last.get_or_insert_with(|| FrameBuffer::new(0, 0));
        std::mem::swap(prev, fb);
        Ok(())
    }

    fn send(&mut self, build: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> Result<()> {
        self.buf.clear();
        build(&mut self.buf)?;
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `prev` into `next` on screen.
///
/// Without a previous frame of the same size the screen is cleared and every
/// row repainted. Identical frames encode to nothing.
pub fn encode_frame(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut pen = Pen::default();
    for span in dirty_spans(prev, next) {
        out.queue(cursor::MoveTo(span.x, span.y))?;
        for dx in 0..span.len {
            let glyph = next.get(span.x + dx, span.y).unwrap_or_default();
            pen.apply(out, glyph.style)?;
            out.queue(Print(glyph.ch))?;
        }
    }

    if pen.current.is_some() {
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// Spans of `next` that differ from `prev`, row by row. With no previous
/// frame of the same size, every row is one span.
pub fn dirty_spans(prev: Option<&FrameBuffer>, next: &FrameBuffer) -> Vec<Span> {
    let width = next.width();
    if width == 0 || next.height() == 0 {
        return Vec::new();
    }
    let same_size = prev.filter(|p| p.width() == width && p.height() == next.height());
    let Some(prev) = same_size else {
        return (0..next.height())
            .map(|y| Span { x: 0, y, len: width })
            .collect();
    };

    let mut spans = Vec::new();
    let rows = prev
        .glyphs()
        .chunks(width as usize)
        .zip(next.glyphs().chunks(width as usize));
    for (y, (old, new)) in rows.enumerate() {
        push_row_spans(&mut spans, y as u16, old, new);
    }
    spans
}

fn push_row_spans(spans: &mut Vec<Span>, y: u16, old: &[Glyph], new: &[Glyph]) {
    let mut start: Option<usize> = None;
    for (x, (a, b)) in old.iter().zip(new).enumerate() {
        match (start, a == b) {
            (None, false) => start = Some(x),
            (Some(s), true) => {
                spans.push(Span {
                    x: s as u16,
                    y,
                    len: (x - s) as u16,
                });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push(Span {
            x: s as u16,
            y,
            len: (new.len() - s) as u16,
        });
    }
}

/// Tracks the terminal's active style so unchanged colors are not re-sent.
#[derive(Debug, Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.current.replace(style);
        // An attribute reset also drops the colors, so both are re-sent.
        let attrs_changed = prev.map_or(true, |p| (p.bold, p.dim) != (style.bold, style.dim));
        if attrs_changed {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(style.fg.into()))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(style.bg.into()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: &str = "\x1b[2J";
    const FG: &str = "\x1b[38;2;";

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn frame(rows: &[&str]) -> FrameBuffer {
        let width = rows.first().map_or(0, |r| r.chars().count()) as u16;
        let mut fb = FrameBuffer::new(width, rows.len() as u16);
        for (y, row) in rows.iter().enumerate() {
            fb.put_str(0, y as u16, row, CellStyle::default());
        }
        fb
    }

    #[test]
    fn dirty_spans_coalesce_adjacent_glyphs() {
        let before = frame(&["CATSQZ", "XZTKQX"]);
        let after = frame(&["CDOGQZ", "XZTKQY"]);

        assert_eq!(
            dirty_spans(Some(&before), &after),
            vec![Span { x: 1, y: 0, len: 3 }, Span { x: 5, y: 1, len: 1 }]
        );
        assert!(dirty_spans(Some(&after), &after).is_empty());
    }

    #[test]
    fn missing_frame_marks_every_row() {
        let fb = frame(&["ABCD", "EFGH"]);
        assert_eq!(
            dirty_spans(None, &fb),
            vec![Span { x: 0, y: 0, len: 4 }, Span { x: 0, y: 1, len: 4 }]
        );
        assert!(dirty_spans(None, &FrameBuffer::new(0, 0)).is_empty());
    }

    #[test]
    fn size_change_repaints_from_a_cleared_screen() {
        let mut out = Vec::new();
        encode_frame(Some(&frame(&["ABC"])), &frame(&["ABCD"]), &mut out).unwrap();
        let out = text(&out);
        assert!(out.starts_with(CLEAR));
        assert!(out.contains("ABCD"));
    }

    #[test]
    fn unchanged_style_is_sent_once() {
        let mut out = Vec::new();
        encode_frame(None, &frame(&["WORD", "GAME"]), &mut out).unwrap();
        assert_eq!(text(&out).matches(FG).count(), 1);
    }

    #[test]
    fn draw_swap_writes_only_what_changed() {
        let mut term = TerminalRenderer::with_writer(Vec::new());
        let mut fb = frame(&["CAT"]);
        term.draw_swap(&mut fb).unwrap();
        let first = term.get_ref().len();
        assert!(text(term.get_ref()).contains("CAT"));

        // The caller's buffer now holds the previous frame; redrawing the same
        // content writes nothing.
        fb = frame(&["CAT"]);
        term.draw_swap(&mut fb).unwrap();
        assert_eq!(term.get_ref().len(), first);

        fb = frame(&["COT"]);
        term.draw_swap(&mut fb).unwrap();
        let tail = text(&term.get_ref()[first..]);
        assert!(!tail.contains(CLEAR));
        assert!(tail.contains('O'));
        assert!(!tail.contains("COT"));

        term.invalidate();
        fb = frame(&["COT"]);
        term.draw_swap(&mut fb).unwrap();
        assert!(text(term.get_ref()).matches(CLEAR).count() == 2);
    }
}

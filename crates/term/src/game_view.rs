//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::scoring::letter_value;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Letter, Position, GRID_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BG: Rgb = Rgb::new(0, 0, 0);
const TILE_BG: Rgb = Rgb::new(35, 35, 50);
const SELECTED_BG: Rgb = Rgb::new(150, 120, 30);
const HINT_BG: Rgb = Rgb::new(40, 110, 60);

/// Terminal renderer for the letter grid and session panel.
pub struct GameView {
    /// Tile width in terminal columns: bracket, letter, two value digits, bracket.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 5,
            cell_h: 2,
        }
    }
}

impl GameView {
    /// `cell_w` below 5 leaves no room for two-digit values and is raised.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(5),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer.
    ///
    /// `cursor` is the input cursor, which lives outside the game state.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().glyph(' '));

        let grid_w = GRID_SIZE as u16 * self.cell_w;
        let grid_h = GRID_SIZE as u16 * self.cell_h;
        let frame_w = grid_w + 2;
        let frame_h = grid_h + 2;

        // One header row above the frame.
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h + 1) / 2 + 1;

        self.draw_header(fb, snap, start_x, start_y - 1);

        let border = CellStyle::new(Rgb::new(200, 200, 200), BG);
        fb.fill_rect(start_x + 1, start_y + 1, grid_w, grid_h, ' ', CellStyle::new(BG, TILE_BG));
        fb.draw_box(start_x, start_y, frame_w, frame_h, border);

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let pos = Position::new(row, col);
                self.draw_tile(fb, snap, pos, cursor == Some(pos), start_x, start_y);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            let title = CellStyle::new(Rgb::new(255, 255, 255), BG).bold();
            let mid_y = start_y + frame_h / 2;
            fb.put_str_centered(start_x, mid_y - 1, frame_w, " GAME OVER ", title);
            fb.put_str_centered(
                start_x,
                mid_y,
                frame_w,
                " r: new game ",
                CellStyle::new(Rgb::new(200, 200, 200), BG),
            );
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = CellStyle::new(Rgb::new(160, 160, 170), BG);
        let value = CellStyle::new(Rgb::new(240, 240, 240), BG).bold();
        let low = CellStyle::new(Rgb::new(240, 90, 80), BG).bold();

        let secs = snap.time_left_ms.div_ceil(1000);
        let time_style = if secs <= 10 { low } else { value };
        let mut cx = fb.put_str(x, y, "TIME ", label);
        cx = fb.put_u32(cx, y, secs / 60, time_style);
        cx = fb.put_str(cx, y, ":", time_style);
        if secs % 60 < 10 {
            cx = fb.put_str(cx, y, "0", time_style);
        }
        cx = fb.put_u32(cx, y, secs % 60, time_style);
        if snap.clock_paused {
            cx = fb.put_str(cx, y, "⏸", label);
        }

        let moves_style = if snap.moves_left <= 2 { low } else { value };
        cx = fb.put_str(cx + 2, y, "MOVES ", label);
        cx = fb.put_u32(cx, y, snap.moves_left, moves_style);

        cx = fb.put_str(cx + 2, y, "SCORE ", label);
        fb.put_u32(cx, y, snap.score, value);
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        pos: Position,
        under_cursor: bool,
        start_x: u16,
        start_y: u16,
    ) {
        let px = start_x + 1 + pos.col as u16 * self.cell_w;
        let py = start_y + 1 + pos.row as u16 * self.cell_h;

        let bg = if snap.selected == Some(pos) {
            SELECTED_BG
        } else if snap.is_hinted(pos) {
            HINT_BG
        } else {
            TILE_BG
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::new(BG, bg));

        let Some(ch) = snap.letter_at(pos) else {
            fb.put_char(px + 1, py, '·', CellStyle::new(Rgb::new(90, 90, 100), bg).dim());
            return;
        };
        let letter_style = CellStyle::new(Rgb::new(245, 245, 245), bg).bold();
        fb.put_char(px + 1, py, ch, letter_style);
        if let Some(letter) = Letter::from_char(ch) {
            let value_style = CellStyle::new(value_color(letter), bg).dim();
            fb.put_u32(px + 2, py, letter_value(letter), value_style);
        }

        if under_cursor {
            let bracket = CellStyle::new(Rgb::new(255, 230, 120), bg).bold();
            fb.put_char(px, py, '[', bracket);
            fb.put_char(px + self.cell_w - 1, py, ']', bracket);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BG);
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "HINTS", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.hints_left, value);
        if let Some(hint) = snap.hint {
            let cx = fb.put_str(panel_x + 3, y, "+", dim);
            fb.put_u32(cx, y, hint.gain, dim);
        }
        y += 2;

        fb.put_str(panel_x, y, "LAST", label);
        y += 1;
        let mut cx = fb.put_str(panel_x, y, "+", value);
        cx = fb.put_u32(cx, y, snap.last_delta, value);
        if snap.last_rounds > 1 {
            cx = fb.put_str(cx + 1, y, "x", dim);
            fb.put_u32(cx, y, snap.last_rounds, dim);
        }
        y += 1;
        for word in &snap.last_words {
            if y >= viewport.height {
                break;
            }
            let cx = fb.put_str(panel_x, y, word.word.as_str(), value);
            fb.put_u32(cx + 1, y, word.score, dim);
            y += 1;
        }

        y += 1;
        for line in ["arrows move", "space select", "? hint", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }
    }
}

/// Rarer letters get warmer colors
fn value_color(letter: Letter) -> Rgb {
    match letter_value(letter) {
        0..=1 => Rgb::new(150, 150, 160),
        2..=3 => Rgb::new(120, 180, 230),
        4..=5 => Rgb::new(200, 140, 230),
        _ => Rgb::new(240, 160, 80),
    }
}

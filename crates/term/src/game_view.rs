//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board is sized from the snapshot, so the frame grows and shrinks as the grid
//! swaps its dimensions on every rotation.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::BubbleColor;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// A lightweight terminal renderer for the rotating board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Top-left corner and outer size of the bordered board.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the terminal
    /// size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_status(snap, None, viewport, fb);
    }

    /// Same as [`GameView::render_into`], with a one-line status message in the side panel.
    pub fn render_into_with_status(
        &self,
        snap: &GameSnapshot,
        status: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = snap.width.saturating_mul(self.cell_w);
        let board_px_h = snap.height.saturating_mul(self.cell_h);
        let w = board_px_w.saturating_add(2);
        let h = board_px_h.saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        let bg = CellStyle::plain(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, border);

        for row in 0..snap.height {
            for col in 0..snap.width {
                match snap.cell(row as i16, col as i16) {
                    Some(color) => self.draw_bubble(fb, frame, row, col, color, false),
                    None => self.draw_empty_cell(fb, frame, row, col),
                }
            }
        }

        if let Some(power_up) = snap.power_up {
            if let Some((row, col)) = in_board(snap, power_up.row, power_up.col) {
                let style = CellStyle::plain(Rgb::new(255, 230, 120), BOARD_BG).bold();
                self.fill_cell_rect(fb, frame, row, col, power_up.kind.glyph(), style);
            }
        }

        if let Some(active) = &snap.active {
            for block in &active.blocks {
                if let Some((row, col)) = in_board(snap, block.row, block.col) {
                    self.draw_bubble(fb, frame, row, col, active.color, true);
                }
            }
        }

        self.draw_side_panel(fb, snap, status, viewport, frame);

        if snap.paused {
            self.draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over {
            self.draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_status(
        &self,
        snap: &GameSnapshot,
        status: Option<&str>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_status(snap, status, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, row: u16, col: u16) {
        let style = CellStyle::plain(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, frame, row, col, '·', style);
    }

    /// Locked bubbles use their palette color; the active piece is drawn brighter and bold.
    fn draw_bubble(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        row: u16,
        col: u16,
        color: BubbleColor,
        active: bool,
    ) {
        let base = Rgb::from(color);
        let style = if active {
            CellStyle::plain(base.scaled(5, 4), BOARD_BG).bold()
        } else {
            CellStyle::plain(base, BOARD_BG)
        };
        self.fill_cell_rect(fb, frame, row, col, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        row: u16,
        col: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + col * self.cell_w;
        let py = frame.y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        status: Option<&str>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);
        let dim = value.dim();

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "GRAVITY", label);
        y = y.saturating_add(1);
        fb.put_char(panel_x, y, snap.orientation.arrow(), value.bold());
        fb.put_str(panel_x + 2, y, snap.orientation.as_str(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "POWER-UP", label);
        y = y.saturating_add(1);
        match snap.power_up {
            Some(p) => {
                fb.put_char(panel_x, y, p.kind.glyph(), value.bold());
                let end = fb.put_str(panel_x + 2, y, p.kind.as_str(), value);
                if panel_w >= 20 {
                    fb.put_u32(end.saturating_add(1), y, p.ticks_remaining, dim);
                }
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
            }
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        fb.put_u32(panel_x, y.saturating_add(1), snap.pieces_locked, value);
        y = y.saturating_add(3);

        if let Some(msg) = status {
            if y < viewport.height {
                fb.put_str(panel_x, y, "STATUS", label);
                fb.put_str(panel_x, y.saturating_add(1), msg, dim);
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn in_board(snap: &GameSnapshot, row: i16, col: i16) -> Option<(u16, u16)> {
    (row >= 0 && col >= 0 && (row as u16) < snap.height && (col as u16) < snap.width)
        .then_some((row as u16, col as u16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActiveSnapshot, Block, Piece, PowerUpSnapshot};
    use crate::types::{Orientation, PowerUpKind, ShapeKind};

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        fb.row(y).iter().map(|c| c.ch).collect()
    }

    fn contains(fb: &FrameBuffer, needle: &str) -> bool {
        (0..fb.height()).any(|y| row_text(fb, y).contains(needle))
    }

    #[test]
    fn board_frame_follows_snapshot_size() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let mut snap = GameSnapshot::default();
        snap.width = 8;
        snap.height = 10;
        snap.cells = vec![None; 80];

        let fb = view.render(&snap, Viewport::new(18, 12));
        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(17, 0).map(|c| c.ch), Some('┐'));
        assert_eq!(fb.get(0, 11).map(|c| c.ch), Some('└'));
        assert_eq!(fb.get(1, 1).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn locked_and_active_bubbles_use_palette() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let mut snap = GameSnapshot::default();
        snap.cells[0] = Some(BubbleColor::Coral);
        let piece = Piece::spawn(ShapeKind::Bar1, Block::new(5, 3));
        snap.active = Some(ActiveSnapshot::from(&piece));

        let fb = view.render(&snap, Viewport::new(26, 24));
        let locked = fb.get(1, 1).unwrap();
        assert_eq!(locked.ch, '█');
        assert_eq!(locked.style.fg, Rgb::from(BubbleColor::Coral));
        assert!(!locked.style.bold);

        let active = fb.get(1 + 3 * 2, 1 + 5).unwrap();
        assert_eq!(active.ch, '█');
        assert!(active.style.bold);
    }

    #[test]
    fn power_up_glyph_and_panel() {
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let mut snap = GameSnapshot::default();
        snap.orientation = Orientation::Left;
        snap.power_up = Some(PowerUpSnapshot {
            kind: PowerUpKind::ExtraPoints,
            row: 2,
            col: 4,
            ticks_remaining: 12,
        });

        // 26-wide frame centered in 80 columns starts at x = 27.
        let fb = view.render_with_status(&snap, Some("locked"), Viewport::new(80, 24));
        assert_eq!(fb.get(27 + 1 + 4 * 2, 1 + 2).map(|c| c.ch), Some('$'));
        assert!(contains(&fb, "GRAVITY"));
        assert!(contains(&fb, "← LEFT"));
        assert!(contains(&fb, "$ extraPoints 12"));
        assert!(contains(&fb, "locked"));
    }

    #[test]
    fn overlays() {
        let view = GameView::default();
        let mut snap = GameSnapshot::default();
        snap.paused = true;
        assert!(contains(&view.render(&snap, Viewport::new(40, 26)), "PAUSED"));

        snap.paused = false;
        snap.game_over = true;
        assert!(contains(&view.render(&snap, Viewport::new(40, 26)), "GAME OVER"));
    }
}

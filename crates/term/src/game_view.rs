//! GameboyView: rasterizes a draw list into a terminal framebuffer.
//!
//! The view draws the handheld shell, the screen (board plus side panel),
//! and the on-screen buttons. Button positions are published into a
//! [`HitMap`] so mouse clicks can be resolved by the input crate.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{DrawOp, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::input::{Button, HitMap, HitRegion};
use crate::types::{ColorId, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Board cell width in terminal columns (2x1 keeps cells roughly square).
pub const CELL_W: u16 = 2;

const BOARD_FRAME_W: u16 = BOARD_WIDTH as u16 * CELL_W + 2;
const BOARD_FRAME_H: u16 = BOARD_HEIGHT as u16 + 2;
const PANEL_W: u16 = 10;

/// Outer size of the handheld shell.
pub const SHELL_W: u16 = 2 + BOARD_FRAME_W + 1 + PANEL_W + 2;
pub const SHELL_H: u16 = 1 + BOARD_FRAME_H + 1 + 5 + 2;

// Gameboy palette.
const SHELL: Rgb = Rgb::new(190, 190, 180);
const SHELL_INK: Rgb = Rgb::new(60, 60, 90);
const SCREEN_BG: Rgb = Rgb::new(155, 188, 15);
const SCREEN_INK: Rgb = Rgb::new(15, 56, 15);
const SCREEN_MID: Rgb = Rgb::new(48, 98, 48);
const BUTTON_AB: Rgb = Rgb::new(160, 30, 80);

/// Piece colors, tinted toward the screen ink, indexed by color id.
const PIECE_COLORS: [Rgb; 8] = [
    SCREEN_BG,
    Rgb::new(20, 120, 120),
    Rgb::new(130, 110, 10),
    Rgb::new(110, 40, 120),
    Rgb::new(30, 110, 40),
    Rgb::new(140, 30, 30),
    Rgb::new(30, 50, 130),
    Rgb::new(150, 70, 10),
];

fn piece_color(color: ColorId) -> Rgb {
    PIECE_COLORS
        .get(color.get() as usize)
        .copied()
        .unwrap_or(SCREEN_INK)
}

/// Where the shell parts landed for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub origin_x: u16,
    pub origin_y: u16,
    pub board_x: u16,
    pub board_y: u16,
    pub panel_x: u16,
    pub controls_y: u16,
}

impl ShellLayout {
    pub fn for_viewport(viewport: Viewport) -> Self {
        let origin_x = viewport.width.saturating_sub(SHELL_W) / 2;
        let origin_y = viewport.height.saturating_sub(SHELL_H) / 2;
        let board_x = origin_x + 2;
        let board_y = origin_y + 1;
        Self {
            origin_x,
            origin_y,
            board_x,
            board_y,
            panel_x: board_x + BOARD_FRAME_W + 1,
            controls_y: board_y + BOARD_FRAME_H + 1,
        }
    }

    /// Terminal position of the top-left corner of board cell (x, y).
    pub fn cell_origin(&self, x: u8, y: u8) -> (u16, u16) {
        (
            self.board_x + 1 + x as u16 * CELL_W,
            self.board_y + 1 + y as u16,
        )
    }

    fn button_regions(&self) -> [HitRegion; 8] {
        let (x, y) = (self.origin_x, self.controls_y);
        let region = |button, dx: u16, dy: u16, w: u16| HitRegion {
            button,
            x: x + dx,
            y: y + dy,
            w,
            h: 1,
        };
        [
            region(Button::Up, 6, 0, 3),
            region(Button::Left, 3, 1, 3),
            region(Button::Right, 9, 1, 3),
            region(Button::Down, 6, 2, 3),
            region(Button::B, 24, 1, 3),
            region(Button::A, 29, 0, 3),
            region(Button::Select, 10, 4, 6),
            region(Button::Start, 19, 4, 5),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render `ops` into an existing framebuffer and refresh `hits`.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    /// Buttons that do not fit in the viewport get no hit region.
    pub fn render_into(
        &self,
        ops: &[DrawOp],
        viewport: Viewport,
        fb: &mut FrameBuffer,
        hits: &mut HitMap,
    ) -> ShellLayout {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = ShellLayout::for_viewport(viewport);
        self.draw_shell(fb, &layout);
        self.draw_board_background(fb, &layout);

        let mut stat_row = 0u16;
        let mut overlay = None;
        for op in ops {
            match *op {
                DrawOp::Cell { x, y, color } => {
                    let style = CellStyle::new(piece_color(color), SCREEN_BG);
                    self.fill_cell(fb, &layout, x, y, '█', style);
                }
                DrawOp::Ghost { x, y } => {
                    let style = CellStyle::new(SCREEN_MID, SCREEN_BG).dim();
                    self.fill_cell(fb, &layout, x, y, '░', style);
                }
                DrawOp::Active { x, y, color } => {
                    let style = CellStyle::new(piece_color(color), SCREEN_BG).bold();
                    self.fill_cell(fb, &layout, x, y, '█', style);
                }
                DrawOp::Next { dx, dy, color } => {
                    let style = CellStyle::new(piece_color(color), SCREEN_BG);
                    let px = layout.panel_x + 1 + dx as u16 * CELL_W;
                    let py = layout.board_y + 10 + dy as u16;
                    fb.fill_rect(px, py, CELL_W, 1, '█', style);
                }
                DrawOp::Stat { label, value } => {
                    let y = layout.board_y + stat_row * 3;
                    let ink = CellStyle::new(SCREEN_INK, SCREEN_BG);
                    fb.put_str(layout.panel_x, y, label, ink.bold());
                    fb.put_u32(layout.panel_x, y + 1, value, ink);
                    stat_row += 1;
                }
                DrawOp::Overlay { text } => overlay = Some(text),
            }
        }

        fb.put_str(
            layout.panel_x,
            layout.board_y + 9,
            "NEXT",
            CellStyle::new(SCREEN_INK, SCREEN_BG).bold(),
        );

        if let Some(text) = overlay {
            let style = CellStyle::new(SCREEN_BG, SCREEN_INK).bold();
            let y = layout.board_y + BOARD_FRAME_H / 2;
            let w = text.chars().count() as u16 + 2;
            let x = layout.board_x + BOARD_FRAME_W.saturating_sub(w) / 2;
            fb.fill_rect(x, y, w, 1, ' ', style);
            fb.put_str(x + 1, y, text, style);
        }

        self.draw_buttons(fb, &layout, viewport, hits);
        layout
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, ops: &[DrawOp], viewport: Viewport) -> (FrameBuffer, HitMap) {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let mut hits = HitMap::new();
        self.render_into(ops, viewport, &mut fb, &mut hits);
        (fb, hits)
    }

    /// Render a snapshot straight through the core draw list.
    pub fn render_snapshot(&self, snap: &GameSnapshot, viewport: Viewport) -> (FrameBuffer, HitMap) {
        self.render(&crate::core::draw_list(snap), viewport)
    }

    fn draw_shell(&self, fb: &mut FrameBuffer, layout: &ShellLayout) {
        let body = CellStyle::new(SHELL_INK, SHELL);
        fb.fill_rect(layout.origin_x, layout.origin_y, SHELL_W, SHELL_H, ' ', body);
        fb.draw_box(layout.origin_x, layout.origin_y, SHELL_W, SHELL_H, body);

        // Screen glass: board frame plus side panel.
        let glass = CellStyle::new(SCREEN_INK, SCREEN_BG);
        let glass_w = BOARD_FRAME_W + 1 + PANEL_W;
        fb.fill_rect(layout.board_x, layout.board_y, glass_w, BOARD_FRAME_H, ' ', glass);
        fb.draw_box(layout.board_x, layout.board_y, BOARD_FRAME_W, BOARD_FRAME_H, glass);
    }

    fn draw_board_background(&self, fb: &mut FrameBuffer, layout: &ShellLayout) {
        let dot = CellStyle::new(SCREEN_MID, SCREEN_BG).dim();
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                self.fill_cell(fb, layout, x, y, '·', dot);
            }
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: &ShellLayout, x: u8, y: u8, ch: char, style: CellStyle) {
        if x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
            return;
        }
        let (px, py) = layout.cell_origin(x, y);
        fb.fill_rect(px, py, CELL_W, 1, ch, style);
    }

    fn draw_buttons(&self, fb: &mut FrameBuffer, layout: &ShellLayout, viewport: Viewport, hits: &mut HitMap) {
        hits.clear();
        for region in layout.button_regions() {
            let (open, close, color) = match region.button {
                Button::A | Button::B => ('(', ')', BUTTON_AB),
                Button::Start | Button::Select => (' ', ' ', SHELL_INK),
                _ => ('[', ']', SHELL_INK),
            };
            let style = CellStyle::new(color, SHELL).bold();
            let label = region.button.label();
            if region.w as usize > label.chars().count() {
                fb.put_char(region.x, region.y, open, style);
                fb.put_str(region.x + 1, region.y, label, style);
                fb.put_char(region.x + region.w - 1, region.y, close, style);
            } else {
                fb.put_str(region.x, region.y, label, style);
            }

            let fits = u32::from(region.x) + u32::from(region.w) <= u32::from(viewport.width)
                && u32::from(region.y) + u32::from(region.h) <= u32::from(viewport.height);
            if fits {
                hits.insert(region);
            }
        }
    }
}

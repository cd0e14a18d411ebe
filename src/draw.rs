// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the image you are tracing.
// 2) Red dots at your clicks and the green closed curve through them.
// 3) A tiny 5x7 bitmap font for the status line on top.

use crate::error::Error;
use crate::session::Command;
use crate::types::{AnchorPoint, CurveMode, CurveSample, FrameBuffer};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub const CURVE_COLOR: u32 = 0x00_00_FF_00;  // green
pub const ANCHOR_COLOR: u32 = 0x00_FF_00_00; // red
pub const HUD_COLOR: u32 = 0x00_FF_FF_FF;    // white

pub struct Drawer {
    window: Window,  // the on-screen window you see
    was_down: bool,  // left button state at the previous poll (click = press edge)
}

impl Drawer {
    /// Create a window sized to the working canvas.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window, was_down: false })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new preview.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Pump window events without changing what's shown.
    pub fn idle(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Translate this poll's input into session commands, in a fixed order:
    /// exit, click, undo, mode, commit.
    pub fn poll_commands(&mut self) -> Vec<Command> {
        let mut out = Vec::new();

        if !self.is_open() || self.window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            out.push(Command::Exit);
            return out;
        }

        // A click is the moment the button goes down, not every frame it stays down.
        let down = self.window.get_mouse_down(MouseButton::Left);
        if down && !self.was_down {
            if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Discard) {
                out.push(Command::Click(AnchorPoint::new(x as i32, y as i32)));
            }
        }
        self.was_down = down;

        if self.window.is_key_pressed(Key::Z, KeyRepeat::No) {
            out.push(Command::Undo);
        }
        if self.window.is_key_pressed(Key::M, KeyRepeat::No) {
            out.push(Command::ToggleMode);
        }
        if self.window.is_key_pressed(Key::Enter, KeyRepeat::No) {
            out.push(Command::Commit);
        }
        out
    }
}

/// Build the frame to show: background, then curve, then anchors, then HUD.
pub fn compose_preview(
    background: &FrameBuffer,
    anchors: &[AnchorPoint],
    curve: &[CurveSample],
    mode: CurveMode,
    saved: bool,
    anchor_radius: i32,
    stroke_width: i32,
) -> FrameBuffer {
    let mut fb = background.clone();

    // Curve as a closed polyline (last sample joins the first).
    if curve.len() >= 2 {
        for i in 0..curve.len() {
            let a = curve[i];
            let b = curve[(i + 1) % curve.len()];
            draw_thick_line(&mut fb, a.x, a.y, b.x, b.y, stroke_width, CURVE_COLOR);
        }
    }

    for p in anchors {
        draw_disc(&mut fb, p.x, p.y, anchor_radius, ANCHOR_COLOR);
    }

    let status = if saved { "SAVED" } else { "Z UNDO  ENTER SAVE  M MODE" };
    let hud = format!("PTS: {} | {} | {}", anchors.len(), mode.label(), status);
    draw_text_5x7(&mut fb, 8, 8, &hud, HUD_COLOR);
    fb
}

/* ---------- Software drawing: pixels, lines, discs, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Bresenham line where every step stamps a `width`-sized square.
/// Visual: a straight line `width` pixels thick.
fn draw_thick_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, width: i32, color: u32) {
    let lo = -(width.max(1) - 1) / 2;
    let hi = lo + width.max(1) - 1;
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        for oy in lo..=hi {
            for ox in lo..=hi {
                put_pixel(fb, x0 + ox, y0 + oy, color);
            }
        }
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Filled circle centred at (cx,cy).
/// Visual: the red dot marking one of your clicks.
fn draw_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    let r2 = radius * radius;
    for y in -radius..=radius {
        for x in -radius..=radius {
            if x * x + y * y <= r2 {
                put_pixel(fb, cx + x, cy + y, color);
            }
        }
    }
}

/* ---------- 5x7 bitmap font (upper-case subset the status line needs) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters used by the status line and mode names
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation: space, vertical bar, colon
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny white glyph appears with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass first, then the glyph itself on top
        for (offset, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx as i32 + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string appears; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

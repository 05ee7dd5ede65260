/// Rasterising `Canvas` for the terminal.
///
/// World coordinates are scaled onto the character grid.  Each cell holds
/// two vertical pixels drawn with an upper half block (`▀`): the foreground
/// colour is the top pixel, the background colour the bottom one.  Text
/// labels are kept in a separate glyph layer that wins over pixels.

use std::io::{self, stdout, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::entities::Rect;
use crate::render::{Anchor, Canvas, Rgb, BLACK};

const HALF_BLOCK: char = '▀';

pub struct TerminalCanvas<W: Write> {
    out: W,
    world_w: i32,
    world_h: i32,
    cols: u16,
    rows: u16,
    /// `cols` × `rows * 2`, row-major.
    pixels: Vec<Rgb>,
    /// `cols` × `rows`, row-major.
    glyphs: Vec<Option<(char, Rgb)>>,
    /// Follow the real terminal size on every `clear`.
    track_terminal: bool,
    needs_full_clear: bool,
}

impl TerminalCanvas<BufWriter<Stdout>> {
    /// Canvas on stdout, sized to the terminal and following resizes.
    pub fn stdout(world_w: i32, world_h: i32) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut canvas = TerminalCanvas::new(BufWriter::new(stdout()), world_w, world_h, cols, rows);
        canvas.track_terminal = true;
        Ok(canvas)
    }
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, world_w: i32, world_h: i32, cols: u16, rows: u16) -> Self {
        let mut canvas = TerminalCanvas {
            out,
            world_w: world_w.max(1),
            world_h: world_h.max(1),
            cols: 0,
            rows: 0,
            pixels: Vec::new(),
            glyphs: Vec::new(),
            track_terminal: false,
            needs_full_clear: true,
        };
        canvas.resize(cols, rows);
        canvas
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.pixels = vec![BLACK; cols as usize * rows as usize * 2];
        self.glyphs = vec![None; cols as usize * rows as usize];
        self.needs_full_clear = true;
    }

    fn px_w(&self) -> i32 {
        i32::from(self.cols)
    }

    fn px_h(&self) -> i32 {
        i32::from(self.rows) * 2
    }

    /// World-space centre of pixel (`i`, `j`).
    fn pixel_center(&self, i: i32, j: i32) -> (f32, f32) {
        (
            (i as f32 + 0.5) * self.world_w as f32 / self.px_w() as f32,
            (j as f32 + 0.5) * self.world_h as f32 / self.px_h() as f32,
        )
    }

    /// Pixel containing world point (`x`, `y`), if it is on screen.
    fn pixel_at(&self, x: f32, y: f32) -> Option<(i32, i32)> {
        let i = (x * self.px_w() as f32 / self.world_w as f32).floor() as i32;
        let j = (y * self.px_h() as f32 / self.world_h as f32).floor() as i32;
        if (0..self.px_w()).contains(&i) && (0..self.px_h()).contains(&j) {
            Some((i, j))
        } else {
            None
        }
    }

    fn set_pixel(&mut self, i: i32, j: i32, color: Rgb) {
        let idx = j as usize * self.cols as usize + i as usize;
        if let Some(px) = self.pixels.get_mut(idx) {
            *px = color;
        }
    }

    /// Paint every pixel inside `bbox` whose centre satisfies `inside`.
    /// Shapes smaller than a pixel still show up as one pixel at their centre.
    fn fill_where(&mut self, bbox: Rect, color: Rgb, inside: impl Fn(f32, f32) -> bool) {
        if bbox.w <= 0 || bbox.h <= 0 {
            return;
        }
        let (pw, ph) = (self.px_w(), self.px_h());
        let scale_x = pw as f32 / self.world_w as f32;
        let scale_y = ph as f32 / self.world_h as f32;
        let i0 = ((bbox.left() as f32 * scale_x).floor() as i32).clamp(0, pw);
        let i1 = ((bbox.right() as f32 * scale_x).ceil() as i32).clamp(0, pw);
        let j0 = ((bbox.top() as f32 * scale_y).floor() as i32).clamp(0, ph);
        let j1 = ((bbox.bottom() as f32 * scale_y).ceil() as i32).clamp(0, ph);

        let mut painted = false;
        for j in j0..j1 {
            for i in i0..i1 {
                let (x, y) = self.pixel_center(i, j);
                if inside(x, y) {
                    self.set_pixel(i, j, color);
                    painted = true;
                }
            }
        }

        if !painted {
            let (cx, cy) = bbox.center();
            if let Some((i, j)) = self.pixel_at(cx as f32, cy as f32) {
                self.set_pixel(i, j, color);
            }
        }
    }

    fn to_color(rgb: Rgb) -> Color {
        Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
    }
}

fn point_in_polygon(points: &[(i32, i32)], x: f32, y: f32) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = (points[i].0 as f32, points[i].1 as f32);
        let (xj, yj) = (points[j].0 as f32, points[j].1 as f32);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self, color: Rgb) {
        if self.track_terminal {
            if let Ok((cols, rows)) = terminal::size() {
                if (cols, rows) != (self.cols, self.rows) {
                    self.resize(cols, rows);
                }
            }
        }
        self.pixels.fill(color);
        self.glyphs.fill(None);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let (l, r) = (rect.left() as f32, rect.right() as f32);
        let (t, b) = (rect.top() as f32, rect.bottom() as f32);
        self.fill_where(rect, color, |x, y| x >= l && x < r && y >= t && y < b);
    }

    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Rgb) {
        let Some(min_x) = points.iter().map(|p| p.0).min() else {
            return;
        };
        let max_x = points.iter().map(|p| p.0).max().unwrap_or(min_x);
        let min_y = points.iter().map(|p| p.1).min().unwrap_or(0);
        let max_y = points.iter().map(|p| p.1).max().unwrap_or(min_y);
        let bbox = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);
        self.fill_where(bbox, color, |x, y| point_in_polygon(points, x, y));
    }

    fn fill_circle(&mut self, center: (i32, i32), radius: i32, color: Rgb) {
        let (cx, cy) = (center.0 as f32, center.1 as f32);
        let r2 = (radius * radius) as f32;
        let bbox = Rect::new(center.0 - radius, center.1 - radius, radius * 2, radius * 2);
        self.fill_where(bbox, color, |x, y| (x - cx).powi(2) + (y - cy).powi(2) <= r2);
    }

    fn text(&mut self, pos: (i32, i32), anchor: Anchor, text: &str, color: Rgb) {
        let col = (pos.0 as i64 * i64::from(self.cols) / i64::from(self.world_w)) as i32;
        let row = (pos.1 as i64 * i64::from(self.rows) / i64::from(self.world_h)) as i32;
        if !(0..i32::from(self.rows)).contains(&row) {
            return;
        }
        let len = text.chars().count() as i32;
        let start = match anchor {
            Anchor::TopLeft => col,
            Anchor::TopRight => col - len,
            Anchor::Center => col - len / 2,
        };
        for (k, ch) in text.chars().enumerate() {
            let c = start + k as i32;
            if (0..i32::from(self.cols)).contains(&c) {
                let idx = row as usize * self.cols as usize + c as usize;
                self.glyphs[idx] = Some((ch, color));
            }
        }
    }

    fn present(&mut self) -> io::Result<()> {
        if self.needs_full_clear {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.needs_full_clear = false;
        }

        let cols = self.cols as usize;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;
        for row in 0..self.rows as usize {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..cols {
                let top = self.pixels[row * 2 * cols + col];
                let bottom = self.pixels[(row * 2 + 1) * cols + col];
                let (ch, f, b) = match self.glyphs[row * cols + col] {
                    Some((ch, color)) => (ch, color, top),
                    None => (HALF_BLOCK, top, bottom),
                };
                if fg != Some(f) {
                    self.out.queue(style::SetForegroundColor(Self::to_color(f)))?;
                    fg = Some(f);
                }
                if bg != Some(b) {
                    self.out.queue(style::SetBackgroundColor(Self::to_color(b)))?;
                    bg = Some(b);
                }
                self.out.queue(Print(ch))?;
            }
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RED, WHITE, YELLOW};

    // 80×30 cells over an 800×600 world: one pixel = 10×10 world units.
    fn canvas() -> TerminalCanvas<Vec<u8>> {
        let mut c = TerminalCanvas::new(Vec::new(), 800, 600, 80, 30);
        c.clear(BLACK);
        c
    }

    fn pixel(c: &TerminalCanvas<Vec<u8>>, i: usize, j: usize) -> Rgb {
        c.pixels[j * c.cols as usize + i]
    }

    #[test]
    fn rect_covers_scaled_pixels() {
        let mut c = canvas();
        c.fill_rect(Rect::new(0, 0, 100, 100), RED);
        assert_eq!(pixel(&c, 0, 0), RED);
        assert_eq!(pixel(&c, 9, 9), RED);
        assert_eq!(pixel(&c, 10, 9), BLACK);
        assert_eq!(pixel(&c, 9, 10), BLACK);
    }

    #[test]
    fn sub_pixel_shape_still_shows_one_pixel() {
        let mut c = canvas();
        c.fill_rect(Rect::new(401, 401, 2, 2), YELLOW);
        assert_eq!(pixel(&c, 40, 40), YELLOW);
    }

    #[test]
    fn offscreen_shapes_are_clipped() {
        let mut c = canvas();
        c.fill_rect(Rect::new(-50, -50, 20, 20), RED);
        c.fill_circle((900, 700), 3, RED);
        assert!(c.pixels.iter().all(|&p| p == BLACK));
    }

    #[test]
    fn diamond_fills_centre_but_not_corners() {
        let mut c = canvas();
        c.fill_polygon(&[(100, 0), (200, 100), (100, 200), (0, 100)], RED);
        assert_eq!(pixel(&c, 10, 10), RED);
        assert_eq!(pixel(&c, 0, 0), BLACK);
        assert_eq!(pixel(&c, 19, 19), BLACK);
    }

    #[test]
    fn text_anchors_to_the_right() {
        let mut c = canvas();
        c.text((790, 10), Anchor::TopRight, "Score: 0", WHITE);
        // col 79 minus 8 characters
        assert_eq!(c.glyphs[71], Some(('S', WHITE)));
        assert_eq!(c.glyphs[78], Some(('0', WHITE)));
        assert_eq!(c.glyphs[79], None);
    }

    #[test]
    fn present_writes_half_blocks() {
        let mut c = canvas();
        c.fill_rect(Rect::new(0, 0, 800, 600), RED);
        c.present().unwrap();
        let written = String::from_utf8_lossy(&c.out);
        assert!(written.contains(HALF_BLOCK));
    }
}

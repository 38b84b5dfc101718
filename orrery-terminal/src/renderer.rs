/// Cell-buffer canvas for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use orrery_core::frame::{front_facing, within_depth_range};
use orrery_core::{Polygon, Rgb, ScreenPoint};

/// Glyph painted for every covered cell; empty cells stay blank.
const FILL_GLYPH: char = '█';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    color: Color,
}

const EMPTY: Cell = Cell {
    glyph: ' ',
    color: Color::Reset,
};

/// Paints polygons into a character grid and flushes the grid to a
/// writer with crossterm styling. Callers hand polygons over in
/// back-to-front order; later paints simply overwrite earlier ones.
pub struct CanvasRenderer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CanvasRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = EMPTY;
        }
    }

    /// Draw one polygon if it survives the depth and facing gates: fill
    /// the fan first, then stroke the edges in the outline color.
    pub fn draw_polygon(&mut self, polygon: &Polygon, near: f64, far: f64, outline: Rgb) {
        if !within_depth_range(polygon, near, far) || !front_facing(polygon) {
            return;
        }

        let fill = to_color(polygon.fill);
        let points = &polygon.points;
        for i in 1..points.len() - 1 {
            self.fill_triangle(&points[0], &points[i], &points[i + 1], fill);
        }

        let stroke = to_color(outline);
        for i in 0..points.len() {
            let a = &points[i];
            let b = &points[(i + 1) % points.len()];
            self.stroke_line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, stroke);
        }
    }

    fn fill_triangle(&mut self, v0: &ScreenPoint, v1: &ScreenPoint, v2: &ScreenPoint, color: Color) {
        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32;

        // Clip to canvas bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let idx = y as usize * self.width + x as usize;
                        self.cells[idx] = Cell {
                            glyph: FILL_GLYPH,
                            color,
                        };
                    }
                }
            }
        }
    }

    /// Bresenham line between two cells, clipped at the canvas edge.
    fn stroke_line(&mut self, mut x0: i32, mut y0: i32, mut x1: i32, mut y1: i32, color: Color) {
        let mut steep = false;
        if (x0 - x1).abs() < (y0 - y1).abs() {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
            steep = true;
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let derror = (dy * 2).abs();
        let mut error = 0;
        let mut y = y0;
        for x in x0..=x1 {
            if steep {
                self.set_cell(y, x, color);
            } else {
                self.set_cell(x, y, color);
            }
            error += derror;
            if error > dx {
                y += if y1 > y0 { 1 } else { -1 };
                error -= dx * 2;
            }
        }
    }

    fn set_cell(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = Cell {
            glyph: FILL_GLYPH,
            color,
        };
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                writer.queue(SetForegroundColor(cell.color))?;
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

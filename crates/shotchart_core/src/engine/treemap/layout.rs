//! Squarified treemap layout.
//!
//! Weighted rectangular subdivision that keeps cell aspect ratios close to
//! square. Items are laid out in the order given (callers pass them sorted
//! descending by weight); each output rect corresponds positionally to its
//! input weight.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Inset all four sides by `pad`, clamping to a degenerate rect at the
    /// center rather than going negative.
    pub fn inset(&self, pad: f32) -> Rect {
        let w = (self.w - 2.0 * pad).max(0.0);
        let h = (self.h - 2.0 * pad).max(0.0);
        Rect { x: self.x + (self.w - w) / 2.0, y: self.y + (self.h - h) / 2.0, w, h }
    }

    /// Affine remap of `self` from the `from` frame into the `to` frame,
    /// rescaling both axes independently. Used to derive drill-down
    /// animation start rectangles from cached overview positions.
    pub fn remap(&self, from: &Rect, to: &Rect) -> Rect {
        let sx = to.w / from.w;
        let sy = to.h / from.h;
        Rect {
            x: to.x + (self.x - from.x) * sx,
            y: to.y + (self.y - from.y) * sy,
            w: self.w * sx,
            h: self.h * sy,
        }
    }
}

/// Worst (largest) aspect ratio a row of cells would have when laid along a
/// strip of length `side`.
fn worst_ratio(areas: &[f32], side: f32) -> f32 {
    let sum: f32 = areas.iter().sum();
    if sum <= 0.0 || side <= 0.0 {
        return f32::INFINITY;
    }
    let mut max = f32::MIN;
    let mut min = f32::MAX;
    for &a in areas {
        max = max.max(a);
        min = min.min(a);
    }
    let sum2 = sum * sum;
    let side2 = side * side;
    (side2 * max / sum2).max(sum2 / (side2 * min))
}

/// Position one finished row along the shorter side of `free`, consuming the
/// strip from the free rect.
fn layout_row(areas: &[f32], free: &mut Rect, out: &mut Vec<Rect>) {
    let sum: f32 = areas.iter().sum();
    if sum <= 0.0 {
        return;
    }

    if free.w >= free.h {
        // Vertical strip on the left edge.
        let strip_w = sum / free.h;
        let mut y = free.y;
        for &a in areas {
            let cell_h = a / strip_w;
            out.push(Rect::new(free.x, y, strip_w, cell_h));
            y += cell_h;
        }
        free.x += strip_w;
        free.w -= strip_w;
    } else {
        // Horizontal strip on the top edge.
        let strip_h = sum / free.w;
        let mut x = free.x;
        for &a in areas {
            let cell_w = a / strip_h;
            out.push(Rect::new(x, free.y, cell_w, strip_h));
            x += cell_w;
        }
        free.y += strip_h;
        free.h -= strip_h;
    }
}

/// Subdivide `rect` into one cell per weight, preserving input order.
///
/// Weights must be positive (callers omit zero-weight nodes entirely); a
/// non-positive total or degenerate rect yields an empty layout.
pub fn squarify(weights: &[f32], rect: Rect) -> Vec<Rect> {
    let total: f32 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 || rect.w <= 0.0 || rect.h <= 0.0 {
        return Vec::new();
    }

    // Scale weights so their areas tile the rect exactly.
    let scale = rect.area() / total;
    let areas: Vec<f32> = weights.iter().map(|w| w * scale).collect();

    let mut out: Vec<Rect> = Vec::with_capacity(areas.len());
    let mut free = rect;
    let mut row: Vec<f32> = Vec::new();

    for &area in &areas {
        let side = free.w.min(free.h);
        if !row.is_empty() {
            let current = worst_ratio(&row, side);
            row.push(area);
            let with_next = worst_ratio(&row, side);
            if with_next > current {
                // Adding this cell made the row worse; flush without it.
                row.pop();
                layout_row(&row, &mut free, &mut out);
                row.clear();
            }
        }
        if row.is_empty() {
            row.push(area);
        }
    }
    layout_row(&row, &mut free, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{} != {}", a, b);
    }

    #[test]
    fn test_single_weight_fills_rect() {
        let rects = squarify(&[5.0], Rect::new(0.0, 0.0, 100.0, 80.0));
        assert_eq!(rects.len(), 1);
        assert_close(rects[0].area(), 8000.0);
    }

    #[test]
    fn test_areas_proportional_to_weights() {
        let rect = Rect::new(0.0, 0.0, 200.0, 100.0);
        let weights = [6.0, 3.0, 1.0];
        let rects = squarify(&weights, rect);
        assert_eq!(rects.len(), 3);

        let total_area: f32 = rects.iter().map(Rect::area).sum();
        assert_close(total_area, rect.area());
        assert_close(rects[0].area(), rect.area() * 0.6);
        assert_close(rects[1].area(), rect.area() * 0.3);
        assert_close(rects[2].area(), rect.area() * 0.1);
    }

    #[test]
    fn test_cells_stay_inside_rect() {
        let rect = Rect::new(10.0, 20.0, 260.0, 256.0);
        let weights = [13.0, 8.0, 8.0, 5.0, 3.0, 2.0, 1.0];
        for r in squarify(&weights, rect) {
            assert!(r.x >= rect.x - 1e-3);
            assert!(r.y >= rect.y - 1e-3);
            assert!(r.x + r.w <= rect.x + rect.w + 1e-3);
            assert!(r.y + r.h <= rect.y + rect.h + 1e-3);
            assert!(r.w > 0.0 && r.h > 0.0);
        }
    }

    #[test]
    fn test_empty_and_degenerate_inputs() {
        assert!(squarify(&[], Rect::new(0.0, 0.0, 100.0, 100.0)).is_empty());
        assert!(squarify(&[1.0], Rect::new(0.0, 0.0, 0.0, 100.0)).is_empty());
    }

    #[test]
    fn test_inset_clamps() {
        let r = Rect::new(0.0, 0.0, 10.0, 3.0).inset(2.0);
        assert_close(r.w, 6.0);
        assert_close(r.h, 0.0);
    }

    #[test]
    fn test_remap_identity_and_scale() {
        let frame_a = Rect::new(10.0, 10.0, 100.0, 50.0);
        let cell = Rect::new(20.0, 15.0, 30.0, 10.0);
        let same = cell.remap(&frame_a, &frame_a);
        assert_close(same.x, cell.x);
        assert_close(same.w, cell.w);

        let frame_b = Rect::new(0.0, 24.0, 280.0, 256.0);
        let mapped = cell.remap(&frame_a, &frame_b);
        // x: (20-10)/100 * 280 = 28
        assert_close(mapped.x, 28.0);
        // y: 24 + (15-10)/50 * 256 = 49.6
        assert_close(mapped.y, 49.6);
        assert_close(mapped.w, 30.0 / 100.0 * 280.0);
        assert_close(mapped.h, 10.0 / 50.0 * 256.0);
    }
}

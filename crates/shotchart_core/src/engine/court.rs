//! Court-to-canvas projection.
//!
//! ## Coordinate systems
//!
//! **Stats coordinates** (raw shot records):
//! - X: -250..250, left sideline to right sideline (tenths of feet)
//! - Y: -47.5..422.5, baseline behind the hoop toward half court
//!
//! **Canvas coordinates** (heatmap grid):
//! - X: 0..532 px, Y: 0..~500 px; the canvas carries a small margin so
//!   court geometry renders inside the frame
//!
//! Both axes are independent linear scales. The spatial grid floors canvas
//! coordinates by a fixed cell size (canvas width / 15).

/// Aspect correction applied to the court artwork.
pub const SCALE_FACTOR: f32 = 532.0 / 506.0;

pub const CANVAS_WIDTH: f32 = 532.0;
pub const CANVAS_HEIGHT: f32 = 476.0 * SCALE_FACTOR;

/// Side length of one heatmap grid cell.
pub const BIN_SIZE: f32 = CANVAS_WIDTH / 15.0;

const X_DOMAIN: (f32, f32) = (-250.0, 250.0);
const Y_DOMAIN: (f32, f32) = (-47.5, 422.5);

const X_MARGIN: f32 = 3.0 * SCALE_FACTOR;
const Y_MARGIN: f32 = 4.5 * SCALE_FACTOR;

fn scale_linear(domain: (f32, f32), range: (f32, f32), v: f32) -> f32 {
    let t = (v - domain.0) / (domain.1 - domain.0);
    range.0 + t * (range.1 - range.0)
}

/// Project stats coordinates onto the canvas.
pub fn project(loc_x: f32, loc_y: f32) -> (f32, f32) {
    let x = scale_linear(X_DOMAIN, (X_MARGIN, CANVAS_WIDTH - X_MARGIN), loc_x);
    let y = scale_linear(Y_DOMAIN, (Y_MARGIN, CANVAS_HEIGHT - Y_MARGIN), loc_y);
    (x, y)
}

/// Grid cell for a projected canvas position.
pub fn cell_of(canvas_x: f32, canvas_y: f32) -> (i32, i32) {
    ((canvas_x / BIN_SIZE).floor() as i32, (canvas_y / BIN_SIZE).floor() as i32)
}

/// Canvas-space center of a grid cell.
pub fn cell_center(bx: i32, by: i32) -> (f32, f32) {
    (bx as f32 * BIN_SIZE + BIN_SIZE / 2.0, by as f32 * BIN_SIZE + BIN_SIZE / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_endpoints_project_to_margins() {
        let (x, _) = project(-250.0, 0.0);
        assert!((x - X_MARGIN).abs() < 1e-3, "got {}", x);
        let (x, _) = project(250.0, 0.0);
        assert!((x - (CANVAS_WIDTH - X_MARGIN)).abs() < 1e-3);

        let (_, y) = project(0.0, -47.5);
        assert!((y - Y_MARGIN).abs() < 1e-3);
        let (_, y) = project(0.0, 422.5);
        assert!((y - (CANVAS_HEIGHT - Y_MARGIN)).abs() < 1e-3);
    }

    #[test]
    fn test_center_court_x_projects_to_canvas_middle() {
        let (x, _) = project(0.0, 0.0);
        assert!((x - CANVAS_WIDTH / 2.0).abs() < 1e-3, "got {}", x);
    }

    #[test]
    fn test_cell_of_floors() {
        assert_eq!(cell_of(0.0, 0.0), (0, 0));
        assert_eq!(cell_of(BIN_SIZE - 0.01, BIN_SIZE - 0.01), (0, 0));
        assert_eq!(cell_of(BIN_SIZE, BIN_SIZE), (1, 1));
        // Out-of-domain projections floor to negative cells instead of wrapping.
        assert_eq!(cell_of(-0.5, 10.0), (-1, 0));
    }

    #[test]
    fn test_cell_center_round_trips() {
        let (cx, cy) = cell_center(3, 4);
        assert_eq!(cell_of(cx, cy), (3, 4));
    }
}

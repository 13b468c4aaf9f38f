//! Generators for coordinate samples.
//!
//! These produce predictable point sets for round-trip and placement tests.

/// Evenly spaced (x, y) points covering a box, corners included.
///
/// `nx` and `ny` are the number of samples along each axis and must be at
/// least 2.
///
/// # Example
///
/// ```
/// use test_utils::coordinate_grid;
///
/// let points = coordinate_grid((-10.0, -5.0, 10.0, 5.0), 3, 2);
/// assert_eq!(points.len(), 6);
/// assert_eq!(points[0], (-10.0, -5.0));
/// assert_eq!(points[5], (10.0, 5.0));
/// ```
pub fn coordinate_grid(bbox: (f64, f64, f64, f64), nx: usize, ny: usize) -> Vec<(f64, f64)> {
    let (min_x, min_y, max_x, max_y) = bbox;
    let dx = (max_x - min_x) / (nx - 1) as f64;
    let dy = (max_y - min_y) / (ny - 1) as f64;
    let mut points = Vec::with_capacity(nx * ny);
    for row in 0..ny {
        for col in 0..nx {
            let x = if col == nx - 1 { max_x } else { min_x + col as f64 * dx };
            let y = if row == ny - 1 { max_y } else { min_y + row as f64 * dy };
            points.push((x, y));
        }
    }
    points
}

/// The same grid shrunk towards its center by `margin` on every side.
///
/// Handy for keeping samples off projection edges.
pub fn interior_grid(
    bbox: (f64, f64, f64, f64),
    margin: f64,
    nx: usize,
    ny: usize,
) -> Vec<(f64, f64)> {
    let (min_x, min_y, max_x, max_y) = bbox;
    coordinate_grid(
        (min_x + margin, min_y + margin, max_x - margin, max_y - margin),
        nx,
        ny,
    )
}

/// Local-space points with exactly representable components.
///
/// Halves and quarters keep additions exact, so local/world round trips can
/// be compared with `==`.
pub fn dyadic_points() -> Vec<(f64, f64, f64)> {
    vec![
        (0.0, 0.0, 0.0),
        (0.5, -0.25, 12.0),
        (-256.0, 128.5, -3.75),
        (1024.0, -2048.0, 0.125),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_grid_hits_corners() {
        let points = coordinate_grid((0.0, 0.0, 1.0, 1.0), 4, 4);
        assert_eq!(points.len(), 16);
        assert_eq!(points[0], (0.0, 0.0));
        assert_eq!(points[3], (1.0, 0.0));
        assert_eq!(points[15], (1.0, 1.0));
    }

    #[test]
    fn test_interior_grid_respects_margin() {
        let points = interior_grid((-10.0, -10.0, 10.0, 10.0), 1.0, 3, 3);
        assert!(points.iter().all(|(x, y)| x.abs() <= 9.0 && y.abs() <= 9.0));
    }
}

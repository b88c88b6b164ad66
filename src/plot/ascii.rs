//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed values: `o`
//! - fitted trend: `-` line

use crate::domain::{SeriesPoint, TrendFile, TrendFit, date_ordinal};

/// Render a plot for an in-memory fit.
pub fn render_ascii_plot(fit: &TrendFit, width: usize, height: usize) -> String {
    render_plot(&fit.points, &fit.curve, width, height)
}

/// Render a plot from a saved trend file.
pub fn render_ascii_plot_from_trend_file(trend: &TrendFile, width: usize, height: usize) -> String {
    render_plot(&trend.points, &trend.curve, width, height)
}

fn render_plot(points: &[SeriesPoint], curve: &[f64], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return "Plot: no data\n".to_string();
    };
    let x_min = f64::from(date_ordinal(first.date));
    let x_max = f64::from(date_ordinal(last.date)).max(x_min + 1.0);

    let (y_min, y_max) = y_range(points, curve).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw the trend first (so points can overlay).
    let trend: Vec<(f64, f64)> = points
        .iter()
        .zip(curve)
        .map(|(p, &y)| (f64::from(date_ordinal(p.date)), y))
        .collect();
    draw_curve(&mut grid, &trend, x_min, x_max, y_min, y_max);

    for p in points {
        let x = map_x(f64::from(date_ordinal(p.date)), x_min, x_max, width);
        let y = map_y(p.value, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: date=[{}, {}] | y=[{y_min:.2}, {y_max:.2}]\n",
        first.date, last.date
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn y_range(points: &[SeriesPoint], curve: &[f64]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for v in points.iter().map(|p| p.value).chain(curve.iter().copied()) {
        min_y = min_y.min(v);
        max_y = max_y.max(v);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else if min_y.is_finite() && max_y.is_finite() {
        // Flat series: give it some height.
        Some((min_y - 0.5, max_y + 0.5))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let xx = map_x(x, x_min, x_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, xx, yy, '-');
        } else {
            grid[yy][xx] = '-';
        }
        prev = Some((xx, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn plot_golden_snapshot_small() {
        let points = vec![
            SeriesPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                value: 100.0,
            },
            SeriesPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                value: 110.0,
            },
        ];
        let curve = vec![100.0, 100.0];

        let txt = render_plot(&points, &curve, 10, 5);
        let expected = concat!(
            "Plot: date=[2024-01-01, 2024-01-10] | y=[99.50, 110.50]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_plot_says_so() {
        assert_eq!(render_plot(&[], &[], 20, 8), "Plot: no data\n");
    }
}

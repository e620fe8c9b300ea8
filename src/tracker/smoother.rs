//! Sliding-window path smoothing.

use crate::tracker::history::Centroid;

/// Default number of points averaged around each path point.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Smooth a path with a centered moving average.
///
/// Paths shorter than `window` are returned unchanged. Otherwise point `i`
/// becomes the mean of `path[i - window/2 ..= i + window/2]`, clipped to the
/// path bounds, with each coordinate truncated toward zero. The output
/// always has the same length as the input.
pub fn smooth_path(path: &[Centroid], window: usize) -> Vec<Centroid> {
    if path.len() < window {
        return path.to_vec();
    }

    let half = window / 2;
    (0..path.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(path.len());
            mean(&path[start..end])
        })
        .collect()
}

fn mean(points: &[Centroid]) -> Centroid {
    let n = points.len() as f64;
    let (sum_x, sum_y) = points.iter().fold((0i64, 0i64), |(sx, sy), p| {
        (sx + i64::from(p.x), sy + i64::from(p.y))
    });
    Centroid::new((sum_x as f64 / n) as i32, (sum_y as f64 / n) as i32)
}

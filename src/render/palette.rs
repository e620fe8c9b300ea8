use image::Rgb;

/// Color of the oldest path segment.
pub const PATH_OLDEST: Rgb<u8> = Rgb([0, 0, 0]);
/// Color of the most recent path segment.
pub const PATH_RECENT: Rgb<u8> = Rgb([255, 0, 0]);
/// Bounding box and label color.
pub const BOX_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
/// Point counter color.
pub const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Linear blend from `from` (t = 0) to `to` (t = 1), per channel.
///
/// Channels are truncated, so the midpoint between 0 and 255 is 127.
pub fn lerp_color(from: Rgb<u8>, to: Rgb<u8>, t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for (c, (a, b)) in out.iter_mut().zip(from.0.into_iter().zip(to.0)) {
        *c = (f64::from(a) * (1.0 - t) + f64::from(b) * t) as u8;
    }
    Rgb(out)
}

/// Color of segment `index` (1-based) in a path of `len` points.
pub fn segment_color(from: Rgb<u8>, to: Rgb<u8>, index: usize, len: usize) -> Rgb<u8> {
    let t = if len > 1 {
        index as f64 / (len - 1) as f64
    } else {
        1.0
    };
    lerp_color(from, to, t)
}

//! 2D geometry helpers for joint angles and segment lengths.

/// 頂点 `b` における a-b-c の角度（度, 0〜180）
///
/// b から見た a, c の偏角の差を取り、180 を超える場合は 360 から引いて折り返す。
pub fn angle(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    let radians = f64::atan2(c[1] - b[1], c[0] - b[0]) - f64::atan2(a[1] - b[1], a[0] - b[0]);
    let degrees = radians.to_degrees().abs();
    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// ユークリッド距離
pub fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

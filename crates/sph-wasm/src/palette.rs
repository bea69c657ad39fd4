/// Speed gradient stops (sRGB): blue, green, yellow, red.
const STOPS: [[u8; 3]; 4] = [
    [0x29, 0x80, 0xb9],
    [0x27, 0xae, 0x60],
    [0xf1, 0xc4, 0x0f],
    [0xc0, 0x39, 0x2b],
];

/// Map a particle speed to an RGBA color in `[0, 1]`.
///
/// Speed is scaled as `|v| / 6` onto the gradient, so anything at or above a
/// speed of 6 px per substep is drawn fully red.
pub fn speed_color(speed: f32) -> [f32; 4] {
    let t = (speed / 2.0 / 3.0).clamp(0.0, 1.0);
    let [r, g, b] = gradient(if t.is_nan() { 0.0 } else { t });
    [r, g, b, 1.0]
}

/// Sample the gradient at `t` in `[0, 1]`, blending in linear RGB.
fn gradient(t: f32) -> [f32; 3] {
    let segments = (STOPS.len() - 1) as f32;
    let scaled = t * segments;
    let idx = (scaled.floor() as usize).min(STOPS.len() - 2);
    let local = scaled - idx as f32;

    let a = STOPS[idx];
    let b = STOPS[idx + 1];
    let mut out = [0.0; 3];
    for c in 0..3 {
        let la = channel(a[c]);
        let lb = channel(b[c]);
        // lrgb blend: mix squared channels, then take the root
        out[c] = (la * la * (1.0 - local) + lb * lb * local).sqrt();
    }
    out
}

#[inline]
fn channel(v: u8) -> f32 {
    v as f32 / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 4], b: [f32; 3]) -> bool {
        (0..3).all(|i| (a[i] - b[i]).abs() < 1e-5)
    }

    #[test]
    fn rest_is_first_stop() {
        let c = speed_color(0.0);
        assert!(approx(c, [0x29 as f32 / 255.0, 0x80 as f32 / 255.0, 0xb9 as f32 / 255.0]));
        assert_eq!(c[3], 1.0);
    }

    #[test]
    fn fast_is_last_stop() {
        let c = speed_color(100.0);
        assert!(approx(c, [0xc0 as f32 / 255.0, 0x39 as f32 / 255.0, 0x2b as f32 / 255.0]));
    }

    #[test]
    fn channels_stay_in_unit_range() {
        for i in 0..=120 {
            let c = speed_color(i as f32 * 0.05);
            assert!(c.iter().all(|&v| (0.0..=1.0).contains(&v)), "{c:?}");
        }
    }

    #[test]
    fn nan_speed_is_treated_as_rest() {
        assert_eq!(speed_color(f32::NAN), speed_color(0.0));
    }
}

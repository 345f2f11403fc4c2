//! CIELAB color space conversion and response-wheel construction
//!
//! Continuous-report experiments draw their colors from a circle in
//! CIELAB at fixed lightness; the circle is sampled into a 360-entry
//! wheel so trial data can reference colors by 1-based index.

/// D65 reference white point
const D65_WHITE: [f64; 3] = [0.950_47, 1.0, 1.088_83];

/// Convert a CIELAB color to XYZ under D65
fn lab_to_xyz(l_star: f64, a_star: f64, b_star: f64) -> [f64; 3] {
    let fy = (l_star + 16.0) / 116.0;
    let fx = fy + a_star / 500.0;
    let fz = fy - b_star / 200.0;

    let delta = 6.0 / 29.0;
    let f_inv = |t: f64| {
        if t > delta {
            t.powi(3)
        } else {
            3.0 * delta * delta * (t - 4.0 / 29.0)
        }
    };

    [
        D65_WHITE[0] * f_inv(fx),
        D65_WHITE[1] * f_inv(fy),
        D65_WHITE[2] * f_inv(fz),
    ]
}

/// Convert XYZ to gamma-encoded sRGB, clamped to the display gamut
fn xyz_to_srgb(xyz: [f64; 3]) -> [f64; 3] {
    let [x, y, z] = xyz;
    let r_lin = 3.2406_f64.mul_add(x, (-1.5372_f64).mul_add(y, -0.4986 * z));
    let g_lin = (-0.9689_f64).mul_add(x, 1.8758_f64.mul_add(y, 0.0415 * z));
    let b_lin = 0.0557_f64.mul_add(x, (-0.2040_f64).mul_add(y, 1.0570 * z));

    let gamma = |u: f64| {
        let u = u.max(0.0);
        if u <= 0.003_130_8 {
            12.92 * u
        } else {
            1.055_f64.mul_add(u.powf(1.0 / 2.4), -0.055)
        }
    };

    [
        gamma(r_lin).clamp(0.0, 1.0),
        gamma(g_lin).clamp(0.0, 1.0),
        gamma(b_lin).clamp(0.0, 1.0),
    ]
}

/// Convert a CIELAB color directly to 8-bit sRGB
pub fn lab_to_srgb(l_star: f64, a_star: f64, b_star: f64) -> [u8; 3] {
    let rgb = xyz_to_srgb(lab_to_xyz(l_star, a_star, b_star));
    [
        (rgb[0] * 255.0).round() as u8,
        (rgb[1] * 255.0).round() as u8,
        (rgb[2] * 255.0).round() as u8,
    ]
}

/// Sample `count` colors from a circle in CIELAB
///
/// The circle sits at lightness `l_star`, centered on (`a_center`,
/// `b_center`) with the given radius. Entry 0 corresponds to hue angle
/// 0°, proceeding counter-clockwise.
pub fn color_wheel(
    count: usize,
    l_star: f64,
    a_center: f64,
    b_center: f64,
    radius: f64,
) -> Vec<[u8; 3]> {
    let mut colors = Vec::with_capacity(count);
    for index in 0..count {
        let theta = std::f64::consts::TAU * index as f64 / count as f64;
        let a_star = radius.mul_add(theta.cos(), a_center);
        let b_star = radius.mul_add(theta.sin(), b_center);
        colors.push(lab_to_srgb(l_star, a_star, b_star));
    }
    colors
}

//! A plain shift-and-add CORDIC engine driven by the provider, as a consumer would write it

use approx::assert_abs_diff_eq;
use embcordic::{gain, gain_raw, ArctanLookupProvider, FixedPointAngle, QFormat};

/// Rotation mode: drives the residual angle to zero, returns (cos, sin)
fn cos_sin(provider: &ArctanLookupProvider, theta: f64) -> (f64, f64) {
    let format = provider.format();
    let mut x = gain_raw(format, provider.depth()) as i64;
    let mut y = 0i64;
    let mut z = FixedPointAngle::from_radians(theta, format);

    for i in 0..provider.depth() {
        let angle = provider.angle_at(i).unwrap();
        let (dx, dy) = (y >> i, x >> i);
        if z.is_negative() {
            (x, y, z) = (x + dx, y - dy, z + angle);
        } else {
            (x, y, z) = (x - dx, y + dy, z - angle);
        }
    }
    (format.decode(x as i32), format.decode(y as i32))
}

/// Vectoring mode: drives y to zero, returns (magnitude, atan2(y, x))
fn magnitude_atan2(provider: &ArctanLookupProvider, x: f64, y: f64) -> (f64, f64) {
    let format = provider.format();
    let mut x = format.encode(x) as i64;
    let mut y = format.encode(y) as i64;
    let mut z = FixedPointAngle::zero(format);

    for (i, angle) in provider.angles().enumerate() {
        let (dx, dy) = (y >> i, x >> i);
        if y > 0 {
            (x, y, z) = (x + dx, y - dy, z + angle);
        } else {
            (x, y, z) = (x - dx, y + dy, z - angle);
        }
    }
    (format.decode(x as i32) * gain(provider.depth()), z.to_radians())
}

#[test]
fn test_rotation() {
    let provider = ArctanLookupProvider::REFERENCE;
    for step in -170..=170 {
        let theta = step as f64 / 100.0;
        let (cos, sin) = cos_sin(&provider, theta);
        assert_abs_diff_eq!(cos, theta.cos(), epsilon = 1e-7);
        assert_abs_diff_eq!(sin, theta.sin(), epsilon = 1e-7);
    }
}

#[test]
fn test_vectoring() {
    let provider = ArctanLookupProvider::REFERENCE;
    for step in -155..=155 {
        let theta = step as f64 / 100.0;
        let (r, z) = magnitude_atan2(&provider, 0.5 * theta.cos(), 0.5 * theta.sin());
        assert_abs_diff_eq!(z, theta, epsilon = 1e-7);
        assert_abs_diff_eq!(r, 0.5, epsilon = 1e-7);
    }
}

#[test]
fn test_narrow_format() {
    let format = QFormat::new(16).unwrap();
    let provider = ArctanLookupProvider::new(format);
    let (cos, sin) = cos_sin(&provider, 1.0);
    assert_abs_diff_eq!(cos, 1.0f64.cos(), epsilon = 32.0 * format.ulp());
    assert_abs_diff_eq!(sin, 1.0f64.sin(), epsilon = 32.0 * format.ulp());
}

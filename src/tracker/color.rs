//! Colour model: sRGB samples to CIE Lab, and CIEDE2000 distance between Lab colours.

use std::f64::consts::PI;
use std::sync::LazyLock;

use nalgebra::{Matrix3, Vector3};

/// An averaged RGB sample, each channel in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// CIE L*a*b* colour relative to the sRGB D65 white point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

/// Palette colour in OpenCV channel order, used only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bgr {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Bgr {
    pub fn new(b: u8, g: u8, r: u8) -> Self {
        Self { b, g, r }
    }
}

/// 2-degree observer D65 reference white.
const WHITE_D65: [f64; 3] = [0.95047, 1.0, 1.08883];

const CIE_E: f64 = 216.0 / 24389.0;

static SRGB_TO_XYZ: LazyLock<Matrix3<f64>> = LazyLock::new(|| {
    Matrix3::new(
        0.412424, 0.357579, 0.180464, //
        0.212656, 0.715158, 0.0721856, //
        0.0193324, 0.119193, 0.950444,
    )
});

#[inline]
fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > CIE_E {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Convert an RGB sample (channels in `[0, 255]`) to Lab.
///
/// The sample is normalised to sRGB, linearised and projected to XYZ. Lab is taken
/// against the same D65 white, without chromatic adaptation.
pub fn to_lab(rgb: Rgb) -> Lab {
    let linear = Vector3::new(
        srgb_to_linear(rgb.r / 255.0),
        srgb_to_linear(rgb.g / 255.0),
        srgb_to_linear(rgb.b / 255.0),
    );
    let xyz = *SRGB_TO_XYZ * linear;

    let fx = lab_f(xyz.x / WHITE_D65[0]);
    let fy = lab_f(xyz.y / WHITE_D65[1]);
    let fz = lab_f(xyz.z / WHITE_D65[2]);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

#[inline]
fn hue_angle(b: f64, a_prime: f64) -> f64 {
    if b == 0.0 && a_prime == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a_prime);
    if h < 0.0 { h + 2.0 * PI } else { h }
}

/// CIEDE2000 colour difference between two Lab colours.
///
/// The association thresholds are calibrated against this exact formulation, including
/// the hue wraparound handling and the blue-region rotation term.
pub fn delta_e_2000(lab1: &Lab, lab2: &Lab) -> f64 {
    const POW25_7: f64 = 6_103_515_625.0;

    let c1 = lab1.a.hypot(lab1.b);
    let c2 = lab2.a.hypot(lab2.b);
    let c_mean = (c1 + c2) / 2.0;

    let c_mean7 = c_mean.powi(7);
    let g = 0.5 * (1.0 - (c_mean7 / (c_mean7 + POW25_7)).sqrt());

    let a1_prime = (1.0 + g) * lab1.a;
    let a2_prime = (1.0 + g) * lab2.a;

    let c1_prime = a1_prime.hypot(lab1.b);
    let c2_prime = a2_prime.hypot(lab2.b);

    let h1_prime = hue_angle(lab1.b, a1_prime);
    let h2_prime = hue_angle(lab2.b, a2_prime);

    let delta_l_prime = lab2.l - lab1.l;
    let delta_c_prime = c2_prime - c1_prime;

    let wraps = (h1_prime - h2_prime).abs() > PI;

    let mut delta_h_prime = h2_prime - h1_prime;
    if wraps {
        if h2_prime <= h1_prime {
            delta_h_prime += 2.0 * PI;
        } else {
            delta_h_prime -= 2.0 * PI;
        }
    }
    let delta_big_h_prime = 2.0 * (c1_prime * c2_prime).sqrt() * (delta_h_prime / 2.0).sin();

    let l_mean_prime = (lab1.l + lab2.l) / 2.0;
    let c_mean_prime = (c1_prime + c2_prime) / 2.0;

    let mut h_mean_prime = (h1_prime + h2_prime) / 2.0;
    if wraps {
        h_mean_prime += PI;
    }
    if h_mean_prime >= 2.0 * PI {
        h_mean_prime -= 2.0 * PI;
    }

    let t = 1.0 - 0.17 * (h_mean_prime - 30f64.to_radians()).cos()
        + 0.24 * (2.0 * h_mean_prime).cos()
        + 0.32 * (3.0 * h_mean_prime + 6f64.to_radians()).cos()
        - 0.20 * (4.0 * h_mean_prime - 63f64.to_radians()).cos();

    let l_offset2 = (l_mean_prime - 50.0).powi(2);
    let sl = 1.0 + (0.015 * l_offset2) / (20.0 + l_offset2).sqrt();
    let sc = 1.0 + 0.045 * c_mean_prime;
    let sh = 1.0 + 0.015 * c_mean_prime * t;

    let delta_theta = 30f64.to_radians()
        * (-((h_mean_prime - 275f64.to_radians()) / 25f64.to_radians()).powi(2)).exp();
    let c_mean_prime7 = c_mean_prime.powi(7);
    let rc = 2.0 * (c_mean_prime7 / (c_mean_prime7 + POW25_7)).sqrt();
    let rt = -(2.0 * delta_theta).sin() * rc;

    let dl = delta_l_prime / sl;
    let dc = delta_c_prime / sc;
    let dh = delta_big_h_prime / sh;

    (dl * dl + dc * dc + dh * dh + rt * dc * dh).max(0.0).sqrt()
}

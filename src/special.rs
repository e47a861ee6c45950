//! Cylindrical Hankel functions used by the 2D Helmholtz kernels.
//!
//! The 2D free-space Green's function is `G = (i/4) H0^(1)(kr)` and its radial
//! derivative brings in `H1^(1)`. Both are assembled from the real Bessel
//! functions J and Y, so only real wavenumbers are supported in 2D.

use num_complex::Complex64;
use spec_math::Bessel;

/// Cylindrical Bessel function of the first kind, order `n`
pub fn bessel_j(n: i64, x: f64) -> f64 {
    x.bessel_jv(n as f64)
}

/// Cylindrical Bessel function of the second kind (Neumann), order `n`
pub fn bessel_y(n: i64, x: f64) -> f64 {
    x.bessel_yv(n as f64)
}

/// Hankel function of the first kind, order 0: `H0^(1)(x) = J0(x) + i Y0(x)`
pub fn hankel1_0(x: f64) -> Complex64 {
    Complex64::new(bessel_j(0, x), bessel_y(0, x))
}

/// Hankel function of the first kind, order 1: `H1^(1)(x) = J1(x) + i Y1(x)`
pub fn hankel1_1(x: f64) -> Complex64 {
    Complex64::new(bessel_j(1, x), bessel_y(1, x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_bessel_reference_values() {
        // Abramowitz & Stegun tables 9.1
        assert_abs_diff_eq!(bessel_j(0, 1.0), 0.7651976865579666, epsilon = 1e-10);
        assert_abs_diff_eq!(bessel_j(1, 1.0), 0.4400505857449335, epsilon = 1e-10);
        assert_abs_diff_eq!(bessel_y(0, 1.0), 0.0882569642156769, epsilon = 1e-10);
        assert_abs_diff_eq!(bessel_y(1, 1.0), -0.7812128213002887, epsilon = 1e-10);
    }

    #[test]
    fn test_hankel_small_argument() {
        // H1(x) ~ -2i/(πx) as x -> 0
        let x = 1e-4;
        let h1 = hankel1_1(x);
        assert_abs_diff_eq!(h1.im, -2.0 / (PI * x), epsilon = 1e-4 * 2.0 / (PI * x));
        assert!(h1.re.abs() < 1e-3);
    }

    #[test]
    fn test_hankel_wronskian() {
        // J1(x) Y0(x) - J0(x) Y1(x) = 2/(πx)
        for &x in &[0.5, 1.0, 2.0, 5.0] {
            let w = bessel_j(1, x) * bessel_y(0, x) - bessel_j(0, x) * bessel_y(1, x);
            assert_abs_diff_eq!(w, 2.0 / (PI * x), epsilon = 1e-10);
        }
    }
}

//! Mathematical utilities for laminate calculations

use nalgebra::{Matrix3, Matrix6, Vector3, Vector6};

use crate::error::{LaminateError, LaminateResult};

pub type Mat3 = Matrix3<f64>;
pub type Mat6 = Matrix6<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec6 = Vector6<f64>;

/// Stress transformation matrix for a rotation of `theta` radians.
///
/// Maps laminate-frame stress to the frame rotated by `theta`:
/// `sigma_rotated = T_sigma(theta) * sigma`. The inverse rotation is
/// `stress_transformation(-theta)`.
pub fn stress_transformation(theta: f64) -> Mat3 {
    let m = theta.cos();
    let n = theta.sin();

    Mat3::new(
        m * m,
        n * n,
        2.0 * m * n,
        n * n,
        m * m,
        -2.0 * m * n,
        -m * n,
        m * n,
        m * m - n * n,
    )
}

/// Engineering-strain transformation matrix for a rotation of `theta` radians.
///
/// Maps laminate-frame engineering strain (with gamma shear) to the frame
/// rotated by `theta`: `eps_rotated = T_eps(theta) * eps`. Differs from the
/// stress transformation by the Reuter factor on the shear row/column.
pub fn strain_transformation(theta: f64) -> Mat3 {
    let m = theta.cos();
    let n = theta.sin();

    Mat3::new(
        m * m,
        n * n,
        m * n,
        n * n,
        m * m,
        -m * n,
        -2.0 * m * n,
        2.0 * m * n,
        m * m - n * n,
    )
}

/// Hadamard-style magnitude bound on a 6x6 determinant: the product of each
/// row's largest absolute entry.
///
/// The rows of a coupled stiffness relation carry different units (N/m for
/// the extensional block, N*m for the bending block), so a single `amax`
/// raised to the matrix order overstates the determinant scale by many
/// orders of magnitude. Scaling row by row keeps the singularity test
/// relative for mixed-unit matrices.
pub fn determinant_scale(a: &Mat6) -> f64 {
    (0..6).map(|i| a.row(i).amax()).product()
}

/// Solve a 6x6 linear system `a * x = b` with a relative singularity guard.
///
/// `tol` is interpreted relative to the row scales of the matrix (see
/// [`determinant_scale`]), so a stiffness relation assembled in Pa and one
/// assembled in GPa fail the same way. Returns `SingularLaminate` instead of
/// letting NaN/inf propagate.
pub fn solve_6x6(a: &Mat6, b: &Vec6, tol: f64) -> LaminateResult<Vec6> {
    let scale = determinant_scale(a);
    if !scale.is_finite() || scale == 0.0 {
        return Err(LaminateError::SingularLaminate);
    }

    let det = a.determinant();
    if !det.is_finite() || det.abs() < tol * scale {
        return Err(LaminateError::SingularLaminate);
    }

    a.lu().solve(b).ok_or(LaminateError::SingularLaminate)
}

/// Piecewise-linear interpolation through a digitized design chart.
///
/// `xs` must be strictly increasing. Queries outside the tabulated range are
/// an error: the Bruhn charts have no defined value there and extrapolating
/// a buckling coefficient silently would be unconservative.
pub fn interp1(xs: &[f64], ys: &[f64], x: f64) -> LaminateResult<f64> {
    debug_assert_eq!(xs.len(), ys.len());
    debug_assert!(xs.len() >= 2);

    if x < xs[0] || x > xs[xs.len() - 1] {
        return Err(LaminateError::InvalidInput(format!(
            "abscissa {x} outside tabulated range [{}, {}]",
            xs[0],
            xs[xs.len() - 1]
        )));
    }

    let i = match xs.partition_point(|&v| v <= x) {
        0 => 0,
        p if p >= xs.len() => xs.len() - 2,
        p => p - 1,
    };

    let frac = (x - xs[i]) / (xs[i + 1] - xs[i]);
    Ok(ys[i] + frac * (ys[i + 1] - ys[i]))
}

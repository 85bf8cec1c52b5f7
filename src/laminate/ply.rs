//! Single ply of fiber-reinforced material

use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::math::{self, Mat3};

use super::OrthotropicMaterial;

/// A single layer of the laminate: thickness, fiber orientation, and a
/// reference into the model's material table.
///
/// The orientation angle is the offset of the fiber (material 1-axis) from
/// the laminate reference axis, in degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ply {
    /// Ply thickness in m
    pub thickness: f64,
    /// Fiber orientation in degrees from the laminate x-axis
    pub angle_deg: f64,
    /// Material name
    pub material: String,
}

impl Ply {
    /// Create a new ply
    pub fn new(thickness: f64, angle_deg: f64, material: &str) -> Self {
        Self {
            thickness,
            angle_deg,
            material: material.to_string(),
        }
    }

    /// Validate geometry.
    ///
    /// Negative or non-finite thickness is rejected here. A zero thickness is
    /// representable (a degenerate stack surfaces as `SingularLaminate` at
    /// solve time instead).
    pub fn validate(&self) -> LaminateResult<()> {
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(LaminateError::InvalidInput(format!(
                "ply thickness must be non-negative, got {}",
                self.thickness
            )));
        }
        if !self.angle_deg.is_finite() {
            return Err(LaminateError::InvalidInput(format!(
                "ply angle must be finite, got {}",
                self.angle_deg
            )));
        }
        Ok(())
    }

    /// Orientation in radians
    pub fn angle_rad(&self) -> f64 {
        self.angle_deg.to_radians()
    }

    /// Transformed reduced stiffness Q-bar in the laminate frame.
    ///
    /// Q_bar = T_sigma(-theta) * Q * T_eps(theta): local stress from local
    /// strain, with strain rotated into the material frame and the resulting
    /// stress rotated back out.
    pub fn transformed_stiffness(&self, material: &OrthotropicMaterial) -> LaminateResult<Mat3> {
        let q = material.reduced_stiffness()?;
        let theta = self.angle_rad();
        Ok(math::stress_transformation(-theta) * q * math::strain_transformation(theta))
    }
}

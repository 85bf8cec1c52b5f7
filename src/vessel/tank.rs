//! Propellant tank stress and sizing
//!
//! Conceptual-design numbers for a pressurized propellant tank: membrane and
//! bending stresses on the cylindrical wall, an axial-buckling screen from
//! the Bruhn fig. 8.9 curve fit, and shell/content masses for a fuel tank
//! with a matched oxidizer tank of the same diameter and wall. All
//! quantities are SI (m, N, Pa, kg).

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::vessel::metal::MetallicMaterial;

/// Bruhn fig. 8.9 quadratic fit Kc = a Z^2 + b Z + c.
/// Valid for Z > 100 and 100 < r/t < 500.
const BRUHN_8_9_A: f64 = 5.6224767e-8;
const BRUHN_8_9_B: f64 = 0.2028736;
const BRUHN_8_9_C: f64 = -2.7833319;

/// Plasticity correction, saturates near 0.9 above Fcr = 20 MPa
const BRUHN_ETA: f64 = 0.9;

/// Input description of a fuel tank and its propellant budget.
///
/// The oxidizer tank is derived, not specified: same diameter, wall and dome
/// shape, with its parallel length set by the mixture ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankSpec {
    /// Outer diameter [m]
    pub diameter: f64,
    /// Wall thickness [m]
    pub thickness: f64,
    /// Internal pressure [Pa]
    pub pressure: f64,
    /// Parallel-section length of the fuel tank [m]
    pub cylinder_length: f64,
    /// Dome height over radius (1.0 for hemispherical heads)
    pub dome_aspect: f64,
    /// Wall material
    pub material: MetallicMaterial,
    /// Fuel density [kg/m^3]
    pub fuel_density: f64,
    /// Oxidizer density [kg/m^3]
    pub oxidizer_density: f64,
    /// Oxidizer-to-fuel mass ratio
    pub mixture_ratio: f64,
    /// Total propellant mass flow rate [kg/s]
    pub propellant_flow_rate: f64,
    /// Applied bending moment at the tank section [N m]
    pub bending_moment: f64,
}

impl TankSpec {
    fn validate(&self) -> LaminateResult<()> {
        for (value, label) in [
            (self.diameter, "diameter"),
            (self.thickness, "thickness"),
            (self.cylinder_length, "cylinder length"),
            (self.dome_aspect, "dome aspect"),
            (self.fuel_density, "fuel density"),
            (self.oxidizer_density, "oxidizer density"),
            (self.mixture_ratio, "mixture ratio"),
            (self.propellant_flow_rate, "propellant flow rate"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LaminateError::InvalidInput(format!(
                    "tank {label} must be positive, got {value}"
                )));
            }
        }
        if self.thickness >= self.diameter / 2.0 {
            return Err(LaminateError::InvalidInput(format!(
                "wall thickness {} not smaller than tank radius",
                self.thickness
            )));
        }
        if self.pressure < 0.0 || !self.pressure.is_finite() {
            return Err(LaminateError::InvalidInput(format!(
                "tank pressure must be non-negative, got {}",
                self.pressure
            )));
        }
        self.material.validate()
    }

    /// Evaluate stresses, the buckling screen, and the mass budget.
    pub fn design(&self) -> LaminateResult<TankDesign> {
        self.validate()?;

        let r = self.diameter / 2.0;
        let t = self.thickness;
        let ri = r - t;

        // membrane state of the pressurized cylinder
        let hoop_stress = self.pressure * r / t;
        let longitudinal_stress = 0.5 * hoop_stress;
        let mises_stress = plane_mises(hoop_stress, longitudinal_stress);

        // bending about the tube section
        let d_outer = self.diameter;
        let d_inner = self.diameter - 2.0 * t;
        let second_moment =
            std::f64::consts::PI / 64.0 * (d_outer.powi(4) - d_inner.powi(4));
        let bending_stress = self.bending_moment * r / second_moment;
        let fiber = longitudinal_stress + bending_stress;
        let combined_tension = plane_mises(hoop_stress, fiber);
        let combined_compression =
            (0.5 * (hoop_stress.powi(2) + fiber.powi(2) + (hoop_stress + fiber).powi(2))).sqrt();

        // Bruhn fig. 8.9 axial-buckling screen
        let nu = self.material.nu;
        let buckling_z =
            self.cylinder_length.powi(2) / (r * t) * (1.0 - nu.powi(2)).sqrt();
        let buckling_kc = BRUHN_8_9_A * buckling_z.powi(2) + BRUHN_8_9_B * buckling_z + BRUHN_8_9_C;
        let critical_stress = BRUHN_ETA * std::f64::consts::PI.powi(2) * self.material.e
            * buckling_kc
            / (12.0 * (1.0 - nu.powi(2)))
            * (t / self.cylinder_length).powi(2);
        let wall_area =
            std::f64::consts::PI / 4.0 * (d_outer.powi(2) - d_inner.powi(2));
        let critical_axial_force = critical_stress * wall_area;

        // shell volumes: two elliptical heads counted as one closed dome
        // pair, plus the parallel section
        let dome_shell_volume = 4.0 / 3.0 * std::f64::consts::PI
            * (r.powi(3) * self.dome_aspect - ri.powi(2) * (r * self.dome_aspect - t));
        let cylinder_shell_volume =
            std::f64::consts::PI * (r.powi(2) - ri.powi(2)) * self.cylinder_length;
        let fuel_tank_mass = self.material.density * (dome_shell_volume + cylinder_shell_volume);

        // contents
        let head_volume = 4.0 / 3.0 * std::f64::consts::PI * ri.powi(3) * self.dome_aspect;
        let body_volume = std::f64::consts::PI * ri.powi(2) * self.cylinder_length;
        let fuel_volume = head_volume + body_volume;
        let fuel_mass = fuel_volume * self.fuel_density;

        // oxidizer tank shares diameter, wall and heads
        let oxidizer_mass = fuel_mass * self.mixture_ratio;
        let oxidizer_volume = oxidizer_mass / self.oxidizer_density;
        let oxidizer_body_volume = oxidizer_volume - head_volume;
        if oxidizer_body_volume <= 0.0 {
            return Err(LaminateError::InvalidInput(format!(
                "oxidizer volume {oxidizer_volume:.3} m^3 does not fill the heads; \
                 no parallel section exists at this mixture ratio"
            )));
        }
        let oxidizer_cylinder_length =
            oxidizer_body_volume / (std::f64::consts::PI * ri.powi(2));
        let oxidizer_tank_mass = self.material.density
            * (dome_shell_volume
                + std::f64::consts::PI * (r.powi(2) - ri.powi(2)) * oxidizer_cylinder_length);

        let tank_mass_total = fuel_tank_mass + oxidizer_tank_mass;
        let propellant_mass_total = fuel_mass + oxidizer_mass;
        let burn_time = propellant_mass_total / self.propellant_flow_rate;

        info!(
            "tank design: {:.0} kg propellant, {:.0} kg shells, burn {:.1} s",
            propellant_mass_total, tank_mass_total, burn_time
        );

        Ok(TankDesign {
            hoop_stress,
            longitudinal_stress,
            mises_stress,
            second_moment,
            bending_stress,
            combined_tension,
            combined_compression,
            buckling_z,
            buckling_kc,
            critical_stress,
            critical_axial_force,
            dome_shell_volume,
            cylinder_shell_volume,
            fuel_tank_mass,
            fuel_volume,
            fuel_mass,
            oxidizer_mass,
            oxidizer_volume,
            oxidizer_cylinder_length,
            oxidizer_tank_mass,
            tank_mass_total,
            propellant_mass_total,
            burn_time,
        })
    }
}

/// Evaluated tank state: wall stresses, buckling screen, and mass budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankDesign {
    /// Hoop membrane stress [Pa]
    pub hoop_stress: f64,
    /// Longitudinal membrane stress, half the hoop value [Pa]
    pub longitudinal_stress: f64,
    /// Von Mises stress of the membrane state [Pa]
    pub mises_stress: f64,
    /// Second moment of the tube section [m^4]
    pub second_moment: f64,
    /// Outer-fiber bending stress [Pa]
    pub bending_stress: f64,
    /// Von Mises stress on the tension fiber [Pa]
    pub combined_tension: f64,
    /// Von Mises stress on the compression fiber [Pa]
    pub combined_compression: f64,
    /// Geometry coefficient Z of the buckling screen
    pub buckling_z: f64,
    /// Fitted buckling coefficient Kc
    pub buckling_kc: f64,
    /// Critical axial buckling stress, 90 % probability [Pa]
    pub critical_stress: f64,
    /// Critical axial force over the wall annulus [N]
    pub critical_axial_force: f64,
    /// Shell material volume of one closed dome pair [m^3]
    pub dome_shell_volume: f64,
    /// Shell material volume of the fuel parallel section [m^3]
    pub cylinder_shell_volume: f64,
    /// Fuel tank structural mass [kg]
    pub fuel_tank_mass: f64,
    /// Fuel content volume [m^3]
    pub fuel_volume: f64,
    /// Fuel mass [kg]
    pub fuel_mass: f64,
    /// Oxidizer mass from the mixture ratio [kg]
    pub oxidizer_mass: f64,
    /// Oxidizer content volume [m^3]
    pub oxidizer_volume: f64,
    /// Derived oxidizer parallel-section length [m]
    pub oxidizer_cylinder_length: f64,
    /// Oxidizer tank structural mass [kg]
    pub oxidizer_tank_mass: f64,
    /// Combined structural mass of both tanks [kg]
    pub tank_mass_total: f64,
    /// Combined propellant mass [kg]
    pub propellant_mass_total: f64,
    /// Burn time at the specified flow rate [s]
    pub burn_time: f64,
}

fn plane_mises(s1: f64, s2: f64) -> f64 {
    (0.5 * (s1.powi(2) + s2.powi(2) + (s1 - s2).powi(2))).sqrt()
}

/// Rough flight bending-moment envelope from the normal-force coefficient
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MomentEstimate {
    /// Aerodynamic normal force [N]
    pub normal_force: f64,
    /// Moment with the whole force at the tip [N m]
    pub moment_max: f64,
    /// Moment with the center of gravity at mid-length [N m]
    pub moment_nominal: f64,
}

/// Estimate the flight bending moment on the airframe.
///
/// N = 1/2 rho v^2 A CN with A the frontal area; the tip-loaded moment
/// bounds the real distribution from above, half of it is the nominal
/// mid-CG estimate.
pub fn flight_bending_moment(
    velocity: f64,
    air_density: f64,
    diameter: f64,
    vehicle_length: f64,
    normal_force_coefficient: f64,
) -> MomentEstimate {
    let area = diameter.powi(2) * std::f64::consts::PI / 4.0;
    let normal_force = 0.5 * air_density * velocity.powi(2) * area * normal_force_coefficient;
    let moment_max = vehicle_length * normal_force;
    MomentEstimate {
        normal_force,
        moment_max,
        moment_nominal: moment_max / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spec() -> TankSpec {
        TankSpec {
            diameter: 1.4,
            thickness: 2e-3,
            pressure: 0.5e6,
            cylinder_length: 3.0,
            dome_aspect: 1.0,
            material: MetallicMaterial::sus304(),
            fuel_density: 850.0,
            oxidizer_density: 1140.0,
            mixture_ratio: 2.4,
            propellant_flow_rate: 25.0,
            bending_moment: 100e3,
        }
    }

    #[test]
    fn test_hoop_is_twice_longitudinal() {
        let design = spec().design().unwrap();
        assert_relative_eq!(design.hoop_stress, 0.5e6 * 0.7 / 2e-3, max_relative = 1e-12);
        assert_relative_eq!(
            design.hoop_stress,
            2.0 * design.longitudinal_stress,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_membrane_mises_closed_form() {
        // for s2 = s1/2 the von Mises stress is sqrt(3)/2 * s1
        let design = spec().design().unwrap();
        assert_relative_eq!(
            design.mises_stress,
            design.hoop_stress * 0.75f64.sqrt(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_bending_stress_from_tube_section() {
        let design = spec().design().unwrap();
        let i = std::f64::consts::PI / 64.0 * (1.4f64.powi(4) - 1.396f64.powi(4));
        assert_relative_eq!(design.second_moment, i, max_relative = 1e-12);
        assert_relative_eq!(design.bending_stress, 100e3 * 0.7 / i, max_relative = 1e-12);
        assert!(design.combined_tension > design.mises_stress);
    }

    #[test]
    fn test_oxidizer_mass_follows_mixture_ratio() {
        let design = spec().design().unwrap();
        assert_relative_eq!(
            design.oxidizer_mass,
            design.fuel_mass * 2.4,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            design.burn_time,
            (design.fuel_mass + design.oxidizer_mass) / 25.0,
            max_relative = 1e-12
        );
        assert!(design.oxidizer_cylinder_length > 0.0);
    }

    #[test]
    fn test_shell_mass_positive_and_consistent() {
        let design = spec().design().unwrap();
        assert!(design.dome_shell_volume > 0.0);
        assert!(design.fuel_tank_mass > 0.0);
        assert_relative_eq!(
            design.tank_mass_total,
            design.fuel_tank_mass + design.oxidizer_tank_mass,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_buckling_screen_produces_positive_capacity() {
        let design = spec().design().unwrap();
        assert!(design.buckling_z > 100.0);
        assert!(design.buckling_kc > 0.0);
        assert!(design.critical_stress > 0.0);
        assert!(design.critical_axial_force > 0.0);
    }

    #[test]
    fn test_wall_thicker_than_radius_rejected() {
        let mut bad = spec();
        bad.thickness = 0.8;
        assert!(matches!(
            bad.design(),
            Err(LaminateError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_tiny_mixture_ratio_cannot_fill_heads() {
        let mut bad = spec();
        bad.mixture_ratio = 1e-3;
        assert!(matches!(
            bad.design(),
            Err(LaminateError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_flight_moment_estimate() {
        let est = flight_bending_moment(420.0, 0.4, 1.4, 14.0, 0.4);
        let area = 1.4f64.powi(2) * std::f64::consts::PI / 4.0;
        assert_relative_eq!(
            est.normal_force,
            0.5 * 0.4 * 420.0f64.powi(2) * area * 0.4,
            max_relative = 1e-12
        );
        assert_relative_eq!(est.moment_max, 14.0 * est.normal_force, max_relative = 1e-12);
        assert_relative_eq!(
            est.moment_nominal,
            est.moment_max / 2.0,
            max_relative = 1e-12
        );
    }
}

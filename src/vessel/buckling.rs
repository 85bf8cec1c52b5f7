//! Monocoque cylinder and cone buckling sizing
//!
//! Critical-load formulas for thin-walled monocoque sections under
//! compressive axial force and external pressure, following the design
//! charts in Bruhn, "Analysis and Design of Flight Vehicle Structures"
//! (C8.2 to C8.4, C8.25, C8.28) and NASA SP-8019 "Buckling of thin-walled
//! truncated cones". Chart curves are digitized as tables and linearly
//! interpolated. All quantities are SI (m, N, Pa).

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{LaminateError, LaminateResult};
use crate::math;
use crate::vessel::metal::MetallicMaterial;

/// Bruhn fig. C8.2, 90 % probability Kc vs Z, r/t < 500
const BRUHN_C8_2_Z: [f64; 36] = [
    0.0, 3.0, 4.0, 5.0, 8.0, 10.0, 13.0, 19.0, 27.0, 35.0, 48.0, 70.0, 94.0, 126.0, 179.0, 232.0,
    303.0, 414.0, 556.0, 814.0, 1069.0, 1535.0, 1970.0, 2274.0, 2850.0, 4043.0, 5716.0, 7796.0,
    10789.0, 14034.0, 19567.0, 25361.0, 28111.0, 36171.0, 43765.0, 50126.0,
];
const BRUHN_C8_2_KC: [f64; 36] = [
    1.0, 1.0, 1.1, 1.2, 1.5, 2.0, 2.6, 3.8, 5.3, 7.0, 9.4, 14.0, 18.0, 25.0, 35.0, 46.0, 60.0,
    81.0, 110.0, 163.0, 210.0, 306.0, 393.0, 450.0, 572.0, 815.0, 1168.0, 1579.0, 2153.0, 2850.0,
    3999.0, 5163.0, 5788.0, 7396.0, 8997.0, 10296.0,
];

/// Bruhn fig. C8.3, 500 <= r/t < 1000
const BRUHN_C8_3_Z: [f64; 9] = [1.0, 10.0, 28.0, 30.0, 40.0, 100.0, 1000.0, 10000.0, 20000.0];
const BRUHN_C8_3_KC: [f64; 9] = [4.0, 4.0, 5.0, 5.2, 6.0, 15.0, 150.0, 1500.0, 3000.0];

/// Bruhn fig. C8.4, 1000 <= r/t <= 2000
const BRUHN_C8_4_Z: [f64; 10] =
    [1.0, 10.0, 20.0, 30.0, 50.0, 60.0, 100.0, 1000.0, 10000.0, 20000.0];
const BRUHN_C8_4_KC: [f64; 10] = [4.0, 4.0, 4.1, 4.7, 6.0, 6.7, 10.0, 100.0, 1000.0, 2000.0];

/// Bruhn fig. C8.28, external-pressure coefficient Ky vs Z
const BRUHN_C8_28_Z: [f64; 37] = [
    2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0,
    100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0, 1000.0, 2000.0, 4000.0, 8000.0,
    10000.0, 20000.0, 40000.0, 80000.0, 100000.0, 200000.0, 400000.0, 1000000.0,
];
const BRUHN_C8_28_KY: [f64; 37] = [
    4.2, 4.35, 4.45, 4.6, 4.75, 4.8, 4.95, 5.05, 5.25, 6.2, 7.1, 7.9, 8.6, 9.25, 9.85, 10.5, 11.0,
    11.5, 15.75, 19.0, 21.75, 24.0, 26.0, 28.0, 29.5, 32.2, 42.2, 55.3, 72.5, 79.2, 103.8, 136.1,
    178.4, 194.7, 255.3, 334.7, 478.8,
];

/// Geometry coefficient Z for a curved panel or shell
fn geometry_z(length: f64, radius: f64, thickness: f64, nu: f64) -> f64 {
    length.powi(2) / (radius * thickness) * (1.0 - nu.powi(2)).sqrt()
}

/// Axial buckling load of a monocoque cylinder, Bruhn 90 % probability
/// curves.
///
/// The Kc chart is picked by the r/t band; the C8.2 curve is also used below
/// r/t = 100 (conservative). Z beyond the charts means the wall is far too
/// thin, which is reported as a vanishing critical load rather than an error
/// so sizing loops can keep thickening.
pub fn cylinder_axial_buckling_load(
    thickness: f64,
    radius: f64,
    length: f64,
    material: &MetallicMaterial,
) -> LaminateResult<f64> {
    let z = geometry_z(length, radius, thickness, material.nu);
    if z > 20000.0 {
        return Ok(1e-8);
    }
    let rt = radius / thickness;
    let kc = if rt < 500.0 {
        math::interp1(&BRUHN_C8_2_Z, &BRUHN_C8_2_KC, z)?
    } else if rt < 1000.0 {
        math::interp1(&BRUHN_C8_3_Z, &BRUHN_C8_3_KC, z)?
    } else if rt <= 2000.0 {
        math::interp1(&BRUHN_C8_4_Z, &BRUHN_C8_4_KC, z)?
    } else {
        return Err(LaminateError::InvalidInput(format!(
            "r/t = {rt:.0} outside the tabulated range (max 2000)"
        )));
    };
    let fcr = kc * std::f64::consts::PI.powi(2) * material.e / (12.0 * (1.0 - material.nu.powi(2)))
        * (thickness / length).powi(2);
    let area = std::f64::consts::PI * ((radius + thickness).powi(2) - radius.powi(2));
    debug!("cylinder buckling: Z = {z:.1}, Kc = {kc:.1}, Fcr = {:.2} MPa", fcr / 1e6);
    Ok(fcr * area)
}

/// Slope/intercept of the Bruhn C8.25 log-log curves, by L/rho band
fn cone_log_fit(l_rho: f64) -> LaminateResult<(f64, f64)> {
    if l_rho <= 0.0 || l_rho >= 4.0 {
        return Err(LaminateError::InvalidInput(format!(
            "L/rho = {l_rho:.2} outside the tabulated range (0, 4)"
        )));
    }
    if l_rho > 2.0 {
        Ok((-1.589, 8.71))
    } else if l_rho > 1.0 {
        Ok((-1.571, 8.75))
    } else if l_rho > 0.5 {
        Ok((-1.564, 8.85))
    } else {
        Ok((-1.541, 8.861))
    }
}

/// Axial buckling load of a thin conical wall, Bruhn C8.25.
///
/// `length` is the station length along the vehicle axis, not the slant
/// length; `half_angle_rad` is the cone half angle.
pub fn cone_axial_buckling_load_bruhn(
    thickness: f64,
    length: f64,
    half_angle_rad: f64,
    radius_start: f64,
    radius_end: f64,
    material: &MetallicMaterial,
) -> LaminateResult<f64> {
    let slant = length / half_angle_rad.cos();
    let radius_min = radius_start.min(radius_end);
    let rho = radius_min / half_angle_rad.cos();
    let (a, c) = cone_log_fit(slant / rho)?;
    let fcr = c.exp() * (rho / thickness).powf(a) * material.e / 1000.0;
    Ok(fcr * 2.0 * std::f64::consts::PI * radius_min * thickness)
}

/// External-pressure buckling of a thin conical wall, Bruhn C8.28
pub fn cone_external_pressure_bruhn(
    thickness: f64,
    length: f64,
    half_angle_rad: f64,
    radius_start: f64,
    radius_end: f64,
    material: &MetallicMaterial,
) -> LaminateResult<f64> {
    let slant = length / half_angle_rad.cos();
    let rho_ave = (radius_start + radius_end) / 2.0 / half_angle_rad.cos();
    let z = geometry_z(slant, rho_ave, thickness, material.nu);
    let ky = math::interp1(&BRUHN_C8_28_Z, &BRUHN_C8_28_KY, z)?;
    Ok(ky * material.e * thickness.powi(3) * std::f64::consts::PI.powi(2)
        / (rho_ave * slant.powi(2) * 12.0 * (1.0 - material.nu.powi(2))))
}

/// Axial buckling load of a truncated cone, NASA SP-8019 section 4.2.
///
/// The knockdown factor gamma = 0.33 is only published for half angles
/// between 10 and 75 degrees.
pub fn cone_axial_buckling_load_sp8019(
    thickness: f64,
    half_angle_rad: f64,
    radius_start: f64,
    radius_end: f64,
    material: &MetallicMaterial,
) -> LaminateResult<f64> {
    let gamma = 0.33;
    let pcr = 2.0 * std::f64::consts::PI * material.e * thickness.powi(2)
        * half_angle_rad.cos().powi(2)
        / (3.0 * (1.0 - material.nu.powi(2))).sqrt()
        * gamma;
    Ok(pcr * 2.0 * std::f64::consts::PI * radius_start.min(radius_end) * thickness)
}

/// Critical uniform hydrostatic pressure of a truncated cone, NASA SP-8019
/// section 4.2.3 (gamma = 0.75)
pub fn cone_hydrostatic_pressure_sp8019(
    thickness: f64,
    length: f64,
    half_angle_rad: f64,
    radius_start: f64,
    radius_end: f64,
    material: &MetallicMaterial,
) -> LaminateResult<f64> {
    let slant = length / half_angle_rad.cos();
    let rho_ave = (radius_start + radius_end) / 2.0 / half_angle_rad.cos();
    let gamma = 0.75;
    Ok(0.92 * material.e * gamma / ((slant / rho_ave) * (rho_ave / thickness).powf(2.5)))
}

/// One load-rating section of the vehicle: a station interval with its end
/// diameters and wall material. Equal diameters mean a cylindrical
/// monocoque, unequal a conical one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Component name used in margin rows
    pub name: String,
    /// Station of the forward end [m]
    pub station_start: f64,
    /// Station of the aft end [m]
    pub station_end: f64,
    /// Vehicle diameter at the forward end [m]
    pub dia_start: f64,
    /// Vehicle diameter at the aft end [m]
    pub dia_end: f64,
    /// Wall material, by name
    pub material: String,
}

impl SectionSpec {
    pub fn new(
        name: &str,
        station_start: f64,
        station_end: f64,
        dia_start: f64,
        dia_end: f64,
        material: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            station_start,
            station_end,
            dia_start,
            dia_end,
            material: material.to_string(),
        }
    }

    /// Station length along the vehicle axis
    pub fn length(&self) -> f64 {
        self.station_end - self.station_start
    }

    /// Cone half angle
    pub fn half_angle_rad(&self) -> f64 {
        ((self.dia_end - self.dia_start).abs() / 2.0).atan2(self.length())
    }

    fn validate(&self) -> LaminateResult<()> {
        if !(self.length() > 0.0) || !(self.dia_start > 0.0) || !(self.dia_end > 0.0) {
            return Err(LaminateError::InvalidInput(format!(
                "section {} needs positive length and diameters",
                self.name
            )));
        }
        Ok(())
    }
}

/// One margin-of-safety row of the buckling report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucklingMargin {
    /// Component name plus the governing mode
    pub label: String,
    /// As-built wall thickness, weld allowance included [m]
    pub thickness: f64,
    /// Applied load [N] or pressure [Pa]
    pub applied: f64,
    /// Critical load [N] or pressure [Pa]
    pub critical: f64,
    /// Margin of safety, critical/applied - 1
    pub margin: f64,
}

impl BucklingMargin {
    fn new(label: String, thickness: f64, applied: f64, critical: f64) -> Self {
        Self {
            label,
            thickness,
            applied,
            critical,
            margin: critical / applied - 1.0,
        }
    }
}

/// Plate stock is ordered in whole millimeters; the welded joint loses up to
/// this much of the nominal wall.
const WELD_ALLOWANCE: f64 = 0.6e-3;
const SIZING_STEP: f64 = 0.1e-3;
const SIZING_START: f64 = 1.0e-3;
const SIZING_MAX_STEPS: usize = 1000;

fn ceil_to_mm(thickness: f64) -> f64 {
    // the small bias keeps accumulated step noise from bumping a whole
    // millimeter up to the next one
    ((thickness * 1e3 - 1e-9).ceil()) / 1e3
}

enum SectionKind {
    Cylinder,
    ShallowCone,
    SteepCone,
}

fn classify(section: &SectionSpec) -> LaminateResult<SectionKind> {
    let angle_deg = section.half_angle_rad().to_degrees();
    if angle_deg == 0.0 {
        Ok(SectionKind::Cylinder)
    } else if angle_deg <= 10.0 {
        Ok(SectionKind::ShallowCone)
    } else if angle_deg < 75.0 {
        Ok(SectionKind::SteepCone)
    } else {
        Err(LaminateError::InvalidInput(format!(
            "section {}: half angle {angle_deg:.1} deg outside (0, 75)",
            section.name
        )))
    }
}

/// Monocoque wall sizing over a set of rated sections.
///
/// Materials are registered by name, mirroring the laminate model; sections
/// reference them. `size_thickness` finds the minimum manufacturable wall,
/// `margins` reports the margins of safety at a given as-built wall.
#[derive(Debug, Clone, Default)]
pub struct MonocoqueSizer {
    materials: HashMap<String, MetallicMaterial>,
}

impl MonocoqueSizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material(&mut self, name: &str, material: MetallicMaterial) -> LaminateResult<()> {
        if self.materials.contains_key(name) {
            return Err(LaminateError::DuplicateName(name.to_string()));
        }
        material.validate()?;
        self.materials.insert(name.to_string(), material);
        Ok(())
    }

    fn material(&self, name: &str) -> LaminateResult<&MetallicMaterial> {
        self.materials
            .get(name)
            .ok_or_else(|| LaminateError::MaterialNotFound(name.to_string()))
    }

    /// Interaction value for one candidate wall; converged when <= 1.
    ///
    /// Cylinder: F/Pcr. Shallow cone (<= 10 deg): Bruhn C8.26,
    /// (F/Pcr)^1.2 + (q/qcr)^1.2. Steep cone: NASA SP-8019 4.2.5.4 eq. 19,
    /// F/Pcr + q/pcr.
    fn interaction(
        &self,
        section: &SectionSpec,
        kind: &SectionKind,
        thickness: f64,
        rated_force: f64,
        rated_pressure: f64,
    ) -> LaminateResult<f64> {
        let material = self.material(&section.material)?;
        let length = section.length();
        let angle = section.half_angle_rad();
        let r_start = section.dia_start / 2.0;
        let r_end = section.dia_end / 2.0;
        match kind {
            SectionKind::Cylinder => {
                let pcr = cylinder_axial_buckling_load(thickness, r_start, length, material)?;
                Ok(rated_force / pcr)
            }
            SectionKind::ShallowCone => {
                let pcr = cone_axial_buckling_load_bruhn(
                    thickness, length, angle, r_start, r_end, material,
                )?;
                let qcr = cone_external_pressure_bruhn(
                    thickness, length, angle, r_start, r_end, material,
                )?;
                Ok((rated_force / pcr).powf(1.2) + (rated_pressure / qcr).powf(1.2))
            }
            SectionKind::SteepCone => {
                let pcr = cone_axial_buckling_load_sp8019(
                    thickness, angle, r_start, r_end, material,
                )?;
                let qcr = cone_hydrostatic_pressure_sp8019(
                    thickness, length, angle, r_start, r_end, material,
                )?;
                Ok(rated_force / pcr + rated_pressure / qcr)
            }
        }
    }

    /// Minimum manufacturable wall thickness for a section under its rated
    /// equivalent axial force and dynamic pressure.
    ///
    /// Grows the wall in 0.1 mm steps from 1.0 mm until the buckling
    /// interaction clears 1, then adds the weld allowance and rounds up to a
    /// whole millimeter. Sections that cannot converge within the sweep
    /// return `ConvergenceFailed`.
    pub fn size_thickness(
        &self,
        section: &SectionSpec,
        rated_force: f64,
        dynamic_pressure: f64,
    ) -> LaminateResult<f64> {
        section.validate()?;
        let kind = classify(section)?;
        let rated_pressure = dynamic_pressure * section.half_angle_rad().sin().powi(2);

        for step in 1..=SIZING_MAX_STEPS {
            let thickness = SIZING_START + SIZING_STEP * step as f64;
            let value =
                self.interaction(section, &kind, thickness, rated_force, rated_pressure)?;
            if value <= 1.0 {
                let sized = ceil_to_mm(thickness + WELD_ALLOWANCE);
                info!(
                    "section {}: converged at {:.1} mm ({:.1} mm with allowance)",
                    section.name,
                    thickness * 1e3,
                    sized * 1e3
                );
                return Ok(sized);
            }
        }
        Err(LaminateError::ConvergenceFailed(SIZING_MAX_STEPS))
    }

    /// Margin-of-safety rows for a section at a given as-built thickness.
    ///
    /// Critical loads are evaluated at the worst-tolerance wall, the as-built
    /// thickness minus the weld allowance. Cones report separate compression
    /// and external-pressure rows.
    pub fn margins(
        &self,
        section: &SectionSpec,
        rated_force: f64,
        dynamic_pressure: f64,
        thickness: f64,
    ) -> LaminateResult<Vec<BucklingMargin>> {
        section.validate()?;
        let kind = classify(section)?;
        let material = self.material(&section.material)?;
        let rated_pressure = dynamic_pressure * section.half_angle_rad().sin().powi(2);
        let wall = thickness - WELD_ALLOWANCE;
        if !(wall > 0.0) {
            return Err(LaminateError::InvalidInput(format!(
                "section {}: thickness {thickness} below the weld allowance",
                section.name
            )));
        }

        let length = section.length();
        let angle = section.half_angle_rad();
        let r_start = section.dia_start / 2.0;
        let r_end = section.dia_end / 2.0;

        let rows = match kind {
            SectionKind::Cylinder => {
                let pcr = cylinder_axial_buckling_load(wall, r_start, length, material)?;
                vec![BucklingMargin::new(
                    section.name.clone(),
                    thickness,
                    rated_force,
                    pcr,
                )]
            }
            SectionKind::ShallowCone => {
                let pcr =
                    cone_axial_buckling_load_bruhn(wall, length, angle, r_start, r_end, material)?;
                let qcr =
                    cone_external_pressure_bruhn(wall, length, angle, r_start, r_end, material)?;
                vec![
                    BucklingMargin::new(
                        format!("{} compression", section.name),
                        thickness,
                        rated_force,
                        pcr,
                    ),
                    BucklingMargin::new(
                        format!("{} external pressure", section.name),
                        thickness,
                        rated_pressure,
                        qcr,
                    ),
                ]
            }
            SectionKind::SteepCone => {
                let pcr =
                    cone_axial_buckling_load_sp8019(wall, angle, r_start, r_end, material)?;
                let qcr = cone_hydrostatic_pressure_sp8019(
                    wall, length, angle, r_start, r_end, material,
                )?;
                vec![
                    BucklingMargin::new(
                        format!("{} compression", section.name),
                        thickness,
                        rated_force,
                        pcr,
                    ),
                    BucklingMargin::new(
                        format!("{} external pressure", section.name),
                        thickness,
                        rated_pressure,
                        qcr,
                    ),
                ]
            }
        };
        Ok(rows)
    }
}

//! Ply failure criteria and margin evaluation

use serde::{Deserialize, Serialize};

use crate::laminate::StrengthLimits;
use crate::math::Vec3;
use crate::recovery::{PlyFace, PlyResult};

/// Selectable failure criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FailureCriterionKind {
    /// Independent check of each local stress component against its limit
    #[default]
    MaxStress,
    /// Tsai-Wu quadratic interaction of all three stress components
    TsaiWu,
}

/// Governing failure direction/mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureMode {
    LongitudinalTension,
    LongitudinalCompression,
    TransverseTension,
    TransverseCompression,
    InPlaneShear,
    /// Combined-stress failure index (Tsai-Wu)
    Interactive,
}

impl FailureMode {
    pub fn label(&self) -> &'static str {
        match self {
            FailureMode::LongitudinalTension => "longitudinal tension",
            FailureMode::LongitudinalCompression => "longitudinal compression",
            FailureMode::TransverseTension => "transverse tension",
            FailureMode::TransverseCompression => "transverse compression",
            FailureMode::InPlaneShear => "in-plane shear",
            FailureMode::Interactive => "interactive",
        }
    }
}

/// Margin of safety of one ply: allowable over applied at the governing
/// location. Below 1.0 the ply fails at or under the applied load - a
/// reportable result, not an engine error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlyMargin {
    /// Index of the ply in stack order
    pub ply_index: usize,
    /// Minimum margin across the sampled through-thickness locations
    pub margin: f64,
    /// Governing failure mode
    pub mode: FailureMode,
    /// Face at which the governing margin occurs
    pub face: PlyFace,
    /// Through-thickness coordinate of the governing sample in m
    pub z: f64,
}

/// Evaluate the margin of one sampled stress state.
///
/// Returns the strength ratio: the factor by which the stress state can be
/// scaled before the criterion is reached. Unstressed states report an
/// infinite margin.
pub fn sample_margin(
    stress: &Vec3,
    strengths: &StrengthLimits,
    criterion: FailureCriterionKind,
) -> (f64, FailureMode) {
    match criterion {
        FailureCriterionKind::MaxStress => max_stress_margin(stress, strengths),
        FailureCriterionKind::TsaiWu => tsai_wu_margin(stress, strengths),
    }
}

fn max_stress_margin(stress: &Vec3, strengths: &StrengthLimits) -> (f64, FailureMode) {
    let (s1, s2, t12) = (stress[0], stress[1], stress[2]);

    let checks = [
        if s1 >= 0.0 {
            (margin_of(strengths.xt, s1), FailureMode::LongitudinalTension)
        } else {
            (
                margin_of(strengths.xc, s1),
                FailureMode::LongitudinalCompression,
            )
        },
        if s2 >= 0.0 {
            (margin_of(strengths.yt, s2), FailureMode::TransverseTension)
        } else {
            (
                margin_of(strengths.yc, s2),
                FailureMode::TransverseCompression,
            )
        },
        (margin_of(strengths.s, t12), FailureMode::InPlaneShear),
    ];

    checks
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap_or((f64::INFINITY, FailureMode::LongitudinalTension))
}

fn margin_of(limit: f64, applied: f64) -> f64 {
    if applied == 0.0 {
        f64::INFINITY
    } else {
        limit / applied.abs()
    }
}

/// Tsai-Wu strength ratio: the positive root R of a*R^2 + b*R = 1, where R
/// scales the applied stress state to the failure envelope.
fn tsai_wu_margin(stress: &Vec3, strengths: &StrengthLimits) -> (f64, FailureMode) {
    let (s1, s2, t12) = (stress[0], stress[1], stress[2]);

    let f1 = 1.0 / strengths.xt - 1.0 / strengths.xc;
    let f2 = 1.0 / strengths.yt - 1.0 / strengths.yc;
    let f11 = 1.0 / (strengths.xt * strengths.xc);
    let f22 = 1.0 / (strengths.yt * strengths.yc);
    let f66 = 1.0 / (strengths.s * strengths.s);
    let f12 = -0.5 * (f11 * f22).sqrt();

    let a = f11 * s1 * s1 + f22 * s2 * s2 + f66 * t12 * t12 + 2.0 * f12 * s1 * s2;
    let b = f1 * s1 + f2 * s2;

    let margin = if a.abs() < f64::EPSILON {
        if b > 0.0 {
            1.0 / b
        } else {
            f64::INFINITY
        }
    } else {
        let disc = b * b + 4.0 * a;
        if disc < 0.0 || a < 0.0 {
            f64::INFINITY
        } else {
            (-b + disc.sqrt()) / (2.0 * a)
        }
    };

    (margin, FailureMode::Interactive)
}

/// Reduce sampled ply results to one margin per ply: the minimum across the
/// sampled through-thickness locations, with the governing mode and face.
///
/// `strengths_for` resolves the strength limits of a ply index; the caller
/// owns the material lookup.
pub fn ply_margins(
    results: &[PlyResult],
    strengths_for: impl Fn(usize) -> StrengthLimits,
    criterion: FailureCriterionKind,
) -> Vec<PlyMargin> {
    let mut margins: Vec<PlyMargin> = Vec::new();

    for result in results {
        let strengths = strengths_for(result.ply_index);
        let (margin, mode) = sample_margin(&result.local_stress, &strengths, criterion);

        match margins.iter_mut().find(|m| m.ply_index == result.ply_index) {
            Some(existing) if margin < existing.margin => {
                existing.margin = margin;
                existing.mode = mode;
                existing.face = result.face;
                existing.z = result.z;
            }
            Some(_) => {}
            None => margins.push(PlyMargin {
                ply_index: result.ply_index,
                margin,
                mode,
                face: result.face,
                z: result.z,
            }),
        }
    }

    margins
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn strengths() -> StrengthLimits {
        StrengthLimits::new(1500e6, 1200e6, 50e6, 250e6, 70e6)
    }

    #[test]
    fn test_max_stress_margin_exactly_one_at_limit() {
        let stress = Vec3::new(1500e6, 0.0, 0.0);
        let (margin, mode) = sample_margin(&stress, &strengths(), FailureCriterionKind::MaxStress);
        assert_relative_eq!(margin, 1.0, max_relative = 1e-12);
        assert_eq!(mode, FailureMode::LongitudinalTension);
    }

    #[test]
    fn test_max_stress_selects_compression_limit() {
        let stress = Vec3::new(-600e6, 0.0, 0.0);
        let (margin, mode) = sample_margin(&stress, &strengths(), FailureCriterionKind::MaxStress);
        assert_relative_eq!(margin, 2.0, max_relative = 1e-12);
        assert_eq!(mode, FailureMode::LongitudinalCompression);
    }

    #[test]
    fn test_max_stress_governing_is_minimum() {
        // transverse direction is far weaker than longitudinal
        let stress = Vec3::new(100e6, 25e6, 0.0);
        let (margin, mode) = sample_margin(&stress, &strengths(), FailureCriterionKind::MaxStress);
        assert_relative_eq!(margin, 2.0, max_relative = 1e-12);
        assert_eq!(mode, FailureMode::TransverseTension);
    }

    #[test]
    fn test_max_stress_shear_sign_independent() {
        let (m_pos, _) = sample_margin(
            &Vec3::new(0.0, 0.0, 35e6),
            &strengths(),
            FailureCriterionKind::MaxStress,
        );
        let (m_neg, _) = sample_margin(
            &Vec3::new(0.0, 0.0, -35e6),
            &strengths(),
            FailureCriterionKind::MaxStress,
        );
        assert_relative_eq!(m_pos, 2.0, max_relative = 1e-12);
        assert_relative_eq!(m_pos, m_neg);
    }

    #[test]
    fn test_unstressed_ply_has_infinite_margin() {
        let stress = Vec3::zeros();
        let (margin, _) = sample_margin(&stress, &strengths(), FailureCriterionKind::MaxStress);
        assert!(margin.is_infinite());
        let (margin, _) = sample_margin(&stress, &strengths(), FailureCriterionKind::TsaiWu);
        assert!(margin.is_infinite());
    }

    #[test]
    fn test_tsai_wu_margin_one_at_uniaxial_limit() {
        // pure longitudinal tension at exactly Xt lies on the envelope
        let stress = Vec3::new(1500e6, 0.0, 0.0);
        let (margin, mode) = sample_margin(&stress, &strengths(), FailureCriterionKind::TsaiWu);
        assert_relative_eq!(margin, 1.0, max_relative = 1e-9);
        assert_eq!(mode, FailureMode::Interactive);
    }

    #[test]
    fn test_tsai_wu_pure_shear() {
        let stress = Vec3::new(0.0, 0.0, 35e6);
        let (margin, _) = sample_margin(&stress, &strengths(), FailureCriterionKind::TsaiWu);
        assert_relative_eq!(margin, 2.0, max_relative = 1e-9);
    }

    #[test]
    fn test_tsai_wu_interaction_below_uniaxial_margins() {
        // combined transverse tension and shear fails earlier than either alone
        let combined = Vec3::new(0.0, 30e6, 42e6);
        let (m_combined, _) =
            sample_margin(&combined, &strengths(), FailureCriterionKind::TsaiWu);
        let (m_transverse, _) = sample_margin(
            &Vec3::new(0.0, 30e6, 0.0),
            &strengths(),
            FailureCriterionKind::TsaiWu,
        );
        let (m_shear, _) = sample_margin(
            &Vec3::new(0.0, 0.0, 42e6),
            &strengths(),
            FailureCriterionKind::TsaiWu,
        );
        assert!(m_combined < m_transverse);
        assert!(m_combined < m_shear);
    }
}

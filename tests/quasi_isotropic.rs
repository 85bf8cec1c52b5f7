use clt_solver::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Quasi-isotropic layup with the given ply thickness, symmetric about the
/// mid-plane: [0/45/-45/90]s
fn build_symmetric_qi_model(ply_thickness: f64) -> LaminateModel {
    init_logging();
    let mut model = LaminateModel::new();
    model
        .add_material("CFRP", OrthotropicMaterial::carbon_epoxy())
        .unwrap();
    for angle in [0.0, 45.0, -45.0, 90.0, 90.0, -45.0, 45.0, 0.0] {
        model
            .add_ply(Ply::new(ply_thickness, angle, "CFRP"))
            .unwrap();
    }
    model
}

/// Unsymmetric 4-ply quasi-isotropic layup, [0/45/-45/90]
fn build_thin_qi_model(ply_thickness: f64) -> LaminateModel {
    let mut model = LaminateModel::new();
    model
        .add_material("CFRP", OrthotropicMaterial::carbon_epoxy())
        .unwrap();
    for angle in [0.0, 45.0, -45.0, 90.0] {
        model
            .add_ply(Ply::new(ply_thickness, angle, "CFRP"))
            .unwrap();
    }
    model
}

#[test]
fn quasi_isotropic_effective_modulus_matches_invariants() {
    // The in-plane modulus of a symmetric quasi-isotropic laminate has a
    // closed form in the stiffness invariants:
    //   U1 = (3 Q11 + 3 Q22 + 2 Q12 + 4 Q66) / 8
    //   U4 = (Q11 + Q22 + 6 Q12 - 4 Q66) / 8
    //   E  = (U1^2 - U4^2) / U1,  nu = U4 / U1
    let material = OrthotropicMaterial::carbon_epoxy();
    let nu21 = material.nu21();
    let denom = 1.0 - material.nu12 * nu21;
    let q11 = material.e1 / denom;
    let q22 = material.e2 / denom;
    let q12 = material.nu12 * material.e2 / denom;
    let q66 = material.g12;

    let u1 = (3.0 * q11 + 3.0 * q22 + 2.0 * q12 + 4.0 * q66) / 8.0;
    let u4 = (q11 + q22 + 6.0 * q12 - 4.0 * q66) / 8.0;
    let e_expected = (u1 * u1 - u4 * u4) / u1;
    let nu_expected = u4 / u1;

    let model = build_symmetric_qi_model(0.125e-3);
    let moduli = model
        .effective_moduli(&AnalysisOptions::default())
        .unwrap();

    eprintln!("Quasi-isotropic effective moduli");
    eprintln!("  Ex:    {:.3} GPa (invariant {:.3} GPa)", moduli.ex / 1e9, e_expected / 1e9);
    eprintln!("  Ey:    {:.3} GPa", moduli.ey / 1e9);
    eprintln!("  nu_xy: {:.4} (invariant {:.4})", moduli.nu_xy, nu_expected);

    assert!((moduli.ex - e_expected).abs() / e_expected < 0.01);
    assert!((moduli.ey - e_expected).abs() / e_expected < 0.01);
    assert!((moduli.nu_xy - nu_expected).abs() / nu_expected < 0.01);
}

#[test]
fn quasi_isotropic_membrane_stiffness_is_isotropic() {
    // Four equally spaced ply angles make the A matrix exactly isotropic
    // even though the thin layup is unsymmetric (B != 0)
    let model = build_thin_qi_model(0.125e-3);
    let stiffness = model.stiffness().unwrap();
    let a = &stiffness.a;

    let scale = a[(0, 0)];
    assert!((a[(0, 0)] - a[(1, 1)]).abs() / scale < 1e-10);
    assert!(a[(0, 2)].abs() / scale < 1e-10);
    assert!(a[(1, 2)].abs() / scale < 1e-10);
    // shear term of an isotropic membrane: A66 = (A11 - A12) / 2
    assert!((a[(2, 2)] - (a[(0, 0)] - a[(0, 1)]) / 2.0).abs() / scale < 1e-10);

    assert!(!stiffness.coupling_is_negligible(1e-9));
}

#[test]
fn quasi_isotropic_first_ply_failure_scenario() {
    let model = build_symmetric_qi_model(0.125e-3);

    let load = LoadCase::axial(200e3);
    let report = model
        .analyze(&load, &AnalysisOptions::tsai_wu())
        .unwrap();

    // Helpful output for checking against hand calculation.
    // Run with: cargo test quasi_isotropic_first_ply_failure_scenario -- --nocapture
    eprintln!("Quasi-isotropic first-ply-failure scenario");
    eprintln!("  layup: [0/45/-45/90]s, Nx = 200 kN/m");
    eprintln!("  mid-plane strain ex: {:.6e}", report.deformation.ex);
    eprintln!("  coupling negligible: {}", report.coupling_negligible);
    for margin in &report.ply_margins {
        eprintln!(
            "  ply {}: margin {:.3} ({})",
            margin.ply_index,
            margin.margin,
            margin.mode.label()
        );
    }
    eprintln!(
        "  min margin {:.3} at ply {:?}",
        report.min_margin, report.critical_ply
    );

    assert!(report.coupling_negligible);
    assert_eq!(report.ply_margins.len(), 8);
    assert!(report.min_margin.is_finite() && report.min_margin > 0.0);
    assert!(report.critical_ply.is_some());

    // symmetric layup under membrane load: no curvature develops
    assert!(report.deformation.kx.abs() < 1e-9 * report.deformation.ex.abs());

    // mirrored plies carry identical margins
    let margins: Vec<f64> = report.ply_margins.iter().map(|m| m.margin).collect();
    for (lower, upper) in (0..4).map(|i| (i, 7 - i)) {
        assert!((margins[lower] - margins[upper]).abs() / margins[lower] < 1e-9);
    }
}

#[test]
fn analysis_report_serializes_to_json() {
    let model = build_thin_qi_model(0.125e-3);
    let report = model
        .analyze(&LoadCase::axial(50e3), &AnalysisOptions::default())
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    let restored: AnalysisReport = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.ply_margins.len(), report.ply_margins.len());
    assert_eq!(restored.critical_ply, report.critical_ply);
    assert!((restored.min_margin - report.min_margin).abs() < 1e-12);
    assert!((restored.deformation.ex - report.deformation.ex).abs() < 1e-18);
}

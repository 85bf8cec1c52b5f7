//! Benchmarks for the laminate engine and sizing loops

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use clt_solver::prelude::*;

fn create_qi_model(plies_per_angle: usize) -> LaminateModel {
    let mut model = LaminateModel::new();

    model
        .add_material("CFRP", OrthotropicMaterial::carbon_epoxy())
        .unwrap();

    for _ in 0..plies_per_angle {
        for angle in [0.0, 45.0, -45.0, 90.0] {
            model.add_ply(Ply::new(0.125e-3, angle, "CFRP")).unwrap();
        }
    }

    model
}

fn create_sizer() -> MonocoqueSizer {
    let mut sizer = MonocoqueSizer::new();
    sizer
        .add_material("AL5056", MetallicMaterial::al5056())
        .unwrap();
    sizer
}

fn benchmark_analyze_thin(c: &mut Criterion) {
    let model = create_qi_model(1);
    let load = LoadCase::axial(100e3);
    let options = AnalysisOptions::default();
    c.bench_function("analyze_qi_4ply", |b| {
        b.iter(|| {
            let report = model.analyze(&load, &options).unwrap();
            black_box(report);
        })
    });
}

fn benchmark_analyze_thick(c: &mut Criterion) {
    let model = create_qi_model(16);
    let load = LoadCase::new(100e3, 20e3, 5e3, 200.0, 50.0, 0.0);
    let options = AnalysisOptions::tsai_wu();
    c.bench_function("analyze_qi_64ply_tsai_wu", |b| {
        b.iter(|| {
            let report = model.analyze(&load, &options).unwrap();
            black_box(report);
        })
    });
}

fn benchmark_effective_moduli(c: &mut Criterion) {
    let model = create_qi_model(4);
    let options = AnalysisOptions::default();
    c.bench_function("effective_moduli_qi_16ply", |b| {
        b.iter(|| {
            let moduli = model.effective_moduli(&options).unwrap();
            black_box(moduli);
        })
    });
}

fn benchmark_monocoque_sizing(c: &mut Criterion) {
    let sizer = create_sizer();
    let section = SectionSpec::new("intertank", 1.0, 3.0, 1.4, 1.4, "AL5056");
    c.bench_function("size_cylinder_thickness", |b| {
        b.iter(|| {
            let thickness = sizer.size_thickness(&section, 100e3, 0.0).unwrap();
            black_box(thickness);
        })
    });
}

criterion_group!(
    benches,
    benchmark_analyze_thin,
    benchmark_analyze_thick,
    benchmark_effective_moduli,
    benchmark_monocoque_sizing,
);

criterion_main!(benches);

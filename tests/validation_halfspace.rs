//! Half-space validation: baffled piston against the Rayleigh closed form.

use std::f64::consts::PI;

use num_complex::Complex64;

use acoustic_bem::analytical::piston_on_axis_pressure;
use acoustic_bem::core::mesh::generators::disk_mesh;
use acoustic_bem::{
    BemError, BoundaryCondition, HelmholtzProblem, HelmholtzSolver, Orientation, PhysicsParams,
};

fn frequency_for_k(k: f64) -> f64 {
    k * 343.0 / (2.0 * PI)
}

fn solve_piston(k: f64, radius: f64) -> acoustic_bem::BemSolution {
    let mesh = disk_mesh(radius, 6, 24).unwrap();
    let n = mesh.num_elements();
    let problem = HelmholtzProblem {
        mesh,
        physics: PhysicsParams::new(frequency_for_k(k), 343.0, 1.21),
        orientation: Orientation::Exterior,
        boundary_conditions: vec![BoundaryCondition::Velocity(Complex64::new(1.0, 0.0)); n],
        incident: None,
    };
    HelmholtzSolver::new().solve(&problem).unwrap()
}

#[test]
fn test_piston_on_axis_pressure() {
    let k = 10.0;
    let a = 0.1;
    let solution = solve_piston(k, a);
    let v0 = Complex64::new(1.0, 0.0);

    for z in [0.3, 0.5, 1.0] {
        let expected = piston_on_axis_pressure(a, z, &solution.physics, v0);
        let fp = solution.evaluate_pressure([0.0, 0.0, z]);
        let rel = (fp.p_total - expected).norm() / expected.norm();
        println!(
            "piston z={}: p = {:.4} expected {:.4} (rel err {:.2e})",
            z, fp.p_total, expected, rel
        );
        assert!(rel < 0.03);
    }
}

#[test]
fn test_piston_pressure_vanishes_behind_baffle() {
    let solution = solve_piston(10.0, 0.1);
    let fp = solution.evaluate_pressure([0.2, 0.0, -0.5]);
    assert_eq!(fp.p_total, Complex64::new(0.0, 0.0));
    assert_eq!(fp.p_scattered, Complex64::new(0.0, 0.0));
}

#[test]
fn test_piston_surface_pressure_matches_representation() {
    // The boundary pressures solved from p + L_hs q = 0 must be consistent
    // with the closed form in the near field too: at z -> 0 the on-axis
    // pressure tends to ρc v0 (1 - exp(ika)), the piston surface value
    let k = 10.0;
    let a = 0.1;
    let solution = solve_piston(k, a);
    let rho_c = 1.21 * 343.0;
    let i = Complex64::new(0.0, 1.0);
    let expected = rho_c * (Complex64::new(1.0, 0.0) - (i * k * a).exp());
    // Center element of the disk fan
    let p_center = solution.pressures[0];
    let rel = (p_center - expected).norm() / expected.norm();
    println!(
        "piston surface: p = {:.4} expected {:.4} (rel err {:.2e})",
        p_center, expected, rel
    );
    assert!(rel < 0.05);
}

#[test]
fn test_sub_region_piston_in_larger_patch() {
    // Piston occupying the inner half of the meshed patch, rest at rest:
    // the field must match a piston of the inner radius alone
    let k = 10.0;
    let a_patch = 0.2;
    let a_piston = 0.1;
    let mesh = disk_mesh(a_patch, 8, 24).unwrap();
    let physics = PhysicsParams::new(frequency_for_k(k), 343.0, 1.21);
    let v0 = Complex64::new(1.0, 0.0);
    let conditions: Vec<BoundaryCondition> = mesh
        .elements
        .iter()
        .map(|e| {
            let r = (e.center[0] * e.center[0] + e.center[1] * e.center[1]).sqrt();
            if r < a_piston {
                BoundaryCondition::Velocity(v0)
            } else {
                BoundaryCondition::Velocity(Complex64::new(0.0, 0.0))
            }
        })
        .collect();
    let problem = HelmholtzProblem {
        mesh,
        physics: physics.clone(),
        orientation: Orientation::Exterior,
        boundary_conditions: conditions,
        incident: None,
    };
    let solution = HelmholtzSolver::new().solve(&problem).unwrap();

    let z = 0.5;
    let expected = piston_on_axis_pressure(a_piston, z, &physics, v0);
    let fp = solution.evaluate_pressure([0.0, 0.0, z]);
    let rel = (fp.p_total - expected).norm() / expected.norm();
    println!(
        "sub-region piston: p = {:.4} expected {:.4} (rel err {:.2e})",
        fp.p_total, expected, rel
    );
    assert!(rel < 0.05);

    // Rigid-wall condition: nothing radiates into z < 0
    let behind = solution.evaluate_pressure([0.1, 0.1, -0.2]);
    assert_eq!(behind.p_total, Complex64::new(0.0, 0.0));
}

#[test]
fn test_half_space_rejects_interior_orientation() {
    let mesh = disk_mesh(0.1, 3, 12).unwrap();
    let n = mesh.num_elements();
    let problem = HelmholtzProblem {
        mesh,
        physics: PhysicsParams::new(500.0, 343.0, 1.21),
        orientation: Orientation::Interior,
        boundary_conditions: vec![BoundaryCondition::Velocity(Complex64::new(1.0, 0.0)); n],
        incident: None,
    };
    let err = HelmholtzSolver::new().solve(&problem).unwrap_err();
    assert!(matches!(err, BemError::UnsupportedOrientation { .. }));
}

#[test]
fn test_piston_radiated_power_increases_with_ka() {
    // Well below coincidence the radiation resistance grows with ka, so the
    // surface pressure magnitude must too
    let a = 0.1;
    let low = solve_piston(2.0, a);
    let high = solve_piston(10.0, a);
    let mean = |s: &acoustic_bem::BemSolution| {
        s.pressures.iter().map(|p| p.norm()).sum::<f64>() / s.pressures.len() as f64
    };
    let p_low = mean(&low);
    let p_high = mean(&high);
    println!("piston |p|: ka=0.2 -> {:.4}, ka=1.0 -> {:.4}", p_low, p_high);
    assert!(p_high > 2.0 * p_low);
}

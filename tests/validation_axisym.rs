//! Axisymmetric validation: sphere of revolution against the closed form.

use std::f64::consts::PI;

use num_complex::Complex64;

use acoustic_bem::analytical::pulsating_sphere_pressure;
use acoustic_bem::core::mesh::generators::sphere_generator_mesh;
use acoustic_bem::{
    BoundaryCondition, HelmholtzProblem, HelmholtzSolver, IncidentField, Orientation,
    PhysicsParams,
};

fn frequency_for_k(k: f64) -> f64 {
    k * 343.0 / (2.0 * PI)
}

#[test]
fn test_axisymmetric_pulsating_sphere() {
    let k = 1.0;
    let mesh = sphere_generator_mesh(1.0, 32).unwrap();
    let n = mesh.num_elements();
    let physics = PhysicsParams::new(frequency_for_k(k), 343.0, 1.21);
    let v0 = Complex64::new(1.0, 0.0);
    let problem = HelmholtzProblem {
        mesh,
        physics: physics.clone(),
        orientation: Orientation::Exterior,
        boundary_conditions: vec![BoundaryCondition::Velocity(v0); n],
        incident: None,
    };
    let solution = HelmholtzSolver::new().solve(&problem).unwrap();

    let expected = pulsating_sphere_pressure(1.0, 1.0, &physics, v0);
    // Skip the pole-adjacent rings: their small radius makes the ring
    // quadrature coarsest there
    for i in 2..n - 2 {
        let p = solution.pressures[i];
        let rel = (p - expected).norm() / expected.norm();
        assert!(rel < 0.05, "element {}: rel err {:.2e}", i, rel);
    }
    let p_mid = solution.pressures[n / 2];
    println!(
        "axisym sphere: p = {:.4} expected {:.4} (rel err {:.2e})",
        p_mid,
        expected,
        (p_mid - expected).norm() / expected.norm()
    );
}

#[test]
fn test_axisymmetric_field_on_axis() {
    let k = 1.0;
    let mesh = sphere_generator_mesh(1.0, 32).unwrap();
    let n = mesh.num_elements();
    let physics = PhysicsParams::new(frequency_for_k(k), 343.0, 1.21);
    let v0 = Complex64::new(1.0, 0.0);
    let problem = HelmholtzProblem {
        mesh,
        physics: physics.clone(),
        orientation: Orientation::Exterior,
        boundary_conditions: vec![BoundaryCondition::Velocity(v0); n],
        incident: None,
    };
    let solution = HelmholtzSolver::new().solve(&problem).unwrap();

    // Evaluation points are (r, z) padded; probe on and off the axis
    let expected = pulsating_sphere_pressure(1.0, 3.0, &physics, v0);
    let on_axis = solution.evaluate_pressure([0.0, 3.0, 0.0]);
    let radial = solution.evaluate_pressure([3.0, 0.0, 0.0]);
    for fp in [&on_axis, &radial] {
        let rel = (fp.p_total - expected).norm() / expected.norm();
        assert!(rel < 0.05, "rel err {:.2e}", rel);
    }
    println!(
        "axisym field r=3: p = {:.4} expected {:.4}",
        on_axis.p_total, expected
    );
}

#[test]
fn test_axisymmetric_incident_field_validation() {
    let mesh = sphere_generator_mesh(1.0, 16).unwrap();
    let n = mesh.num_elements();
    let problem = HelmholtzProblem {
        mesh,
        physics: PhysicsParams::new(frequency_for_k(1.0), 343.0, 1.21),
        orientation: Orientation::Exterior,
        boundary_conditions: vec![BoundaryCondition::Velocity(Complex64::new(0.0, 0.0)); n],
        // Oblique plane waves break the rotational symmetry
        incident: Some(IncidentField::plane_wave(
            [1.0, 1.0, 0.0],
            Complex64::new(1.0, 0.0),
        )),
    };
    assert!(HelmholtzSolver::new().solve(&problem).is_err());
}

#[test]
fn test_axisymmetric_scattering_axial_plane_wave() {
    // Rigid sphere in an axial plane wave: solvable and finite everywhere;
    // pressure must differ between the upstream and downstream poles
    let k = 1.0;
    let mesh = sphere_generator_mesh(1.0, 32).unwrap();
    let n = mesh.num_elements();
    let problem = HelmholtzProblem {
        mesh,
        physics: PhysicsParams::new(frequency_for_k(k), 343.0, 1.21),
        orientation: Orientation::Exterior,
        boundary_conditions: vec![BoundaryCondition::Velocity(Complex64::new(0.0, 0.0)); n],
        incident: Some(IncidentField::plane_wave(
            [0.0, 1.0, 0.0],
            Complex64::new(1.0, 0.0),
        )),
    };
    let solution = HelmholtzSolver::new().solve(&problem).unwrap();
    for p in solution.pressures.iter() {
        assert!(p.norm().is_finite());
    }
    // Generator runs from the +z pole (element 0) to the -z pole
    let north = solution.pressures[0].norm();
    let south = solution.pressures[n - 1].norm();
    println!("axisym scattering: |p| north {:.4}, south {:.4}", north, south);
    assert!((north - south).abs() > 0.01);
}

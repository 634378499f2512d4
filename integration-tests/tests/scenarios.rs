use approx::assert_relative_eq;

use gauge_core::units::{LengthUnit, VolumeUnit, gallons_to_liters, inches_to_cm};
use gauge_profiles::{
    DataError, DomainError, GaugeError, Measurement, Query, RawProfile, Registry, load,
    reference::{TANK_A, TANK_B, TANK_C},
};
use gauge_solvers::equation::brent::Config;
use integration_tests::sample_table;

#[test]
fn table_lookup_both_directions() {
    let profile = load(&sample_table()).expect("valid table");

    assert_eq!(profile.evaluate(0.5).expect("finite"), 47.0);
    assert_eq!(profile.solve(47.0).expect("finite"), 0.5);
    assert_relative_eq!(profile.evaluate(0.375).expect("finite"), 35.0);
}

#[test]
fn polynomial_volume_above_range() {
    let registry = Registry::reference().expect("reference tanks");
    let tank = registry.get(TANK_B).expect("known tank");

    match tank.solve(20_000.0) {
        Err(GaugeError::Domain(DomainError::OutOfRange { target, min, max })) => {
            assert_relative_eq!(target, 20_000.0);
            assert_relative_eq!(min, 0.0);
            assert_relative_eq!(max, 10_000.0);
        }
        other => panic!("expected OutOfRange, got {other:?}"),
    }
}

#[test]
fn polynomial_volume_below_range() {
    let registry = Registry::reference().expect("reference tanks");
    let err = registry
        .get(TANK_B)
        .and_then(|tank| tank.solve(-5.0))
        .expect_err("negative volume");
    assert!(matches!(
        err,
        GaugeError::Domain(DomainError::OutOfRange { .. })
    ));
}

#[test]
fn linear_tank_solves_exactly() {
    let registry = Registry::reference().expect("reference tanks");
    let tank = registry.get(TANK_B).expect("known tank");

    assert_relative_eq!(tank.solve(5_000.0).expect("in range"), 50.0, epsilon = 1e-9);
    assert_relative_eq!(tank.solve(0.0).expect("in range"), 0.0, epsilon = 1e-9);
}

#[test]
fn three_field_line_is_malformed() {
    let raw = RawProfile::table("Bad", ["0.25,23", "0.50,47,9", "0.75,72"]);
    assert!(matches!(load(&raw), Err(DataError::Malformed { .. })));
}

#[test]
fn non_numeric_line_is_malformed() {
    let raw = RawProfile::table("Bad", ["0.25,23", "half,47"]);
    assert!(matches!(load(&raw), Err(DataError::Malformed { .. })));
}

#[test]
fn iteration_cap_is_a_convergence_error() {
    let registry = Registry::reference().expect("reference tanks");
    let tank = registry.get(TANK_A).expect("known tank");
    let config = Config::new(0, 1e-12, 1e-12, 1e-12).expect("valid config");

    let volume = tank.evaluate(40.0).expect("finite");
    match tank.solve_with(volume, &config) {
        Err(GaugeError::Convergence { iters, height, .. }) => {
            assert_eq!(iters, 0);
            assert!((0.0..=100.0).contains(&height));
        }
        other => panic!("expected Convergence, got {other:?}"),
    }
}

#[test]
fn query_in_metric_units() {
    let registry = Registry::reference().expect("reference tanks");

    let query = Query::new(
        TANK_B,
        Measurement::height(inches_to_cm(25.0), LengthUnit::Centimeter),
    )
    .with_volume_unit(VolumeUnit::Liter);

    let volume = registry.query(&query).expect("valid query");
    assert!(matches!(volume, Measurement::Volume { unit: VolumeUnit::Liter, .. }));
    assert_relative_eq!(volume.value(), gallons_to_liters(2_500.0), max_relative = 1e-12);

    let back = Query::new(TANK_B, volume).with_length_unit(LengthUnit::Centimeter);
    let height = registry.query(&back).expect("valid query");
    assert_relative_eq!(height.value(), inches_to_cm(25.0), max_relative = 1e-9);
}

#[test]
fn height_reading_reports_gallons_and_liters() {
    let registry = Registry::reference().expect("reference tanks");
    let tank = registry.get(TANK_C).expect("known tank");
    let gallons = tank.evaluate(60.0).expect("finite");

    let volumes = registry
        .query_all(TANK_C, Measurement::height(60.0, LengthUnit::Inch))
        .expect("valid reading");

    assert_eq!(
        volumes,
        [
            Measurement::volume(gallons, VolumeUnit::Gallon),
            Measurement::volume(gallons_to_liters(gallons), VolumeUnit::Liter),
        ]
    );
}

#[test]
fn volume_reading_reports_inches_and_centimeters() {
    let registry = Registry::reference().expect("reference tanks");
    let heights = registry
        .query_all(TANK_B, Measurement::volume(5_000.0, VolumeUnit::Gallon))
        .expect("valid reading");

    assert_eq!(heights.len(), 2);
    assert_relative_eq!(heights[0].value(), 50.0, epsilon = 1e-9);
    assert_relative_eq!(heights[1].value(), inches_to_cm(50.0), epsilon = 1e-8);
}

#[test]
fn query_names_unknown_profile() {
    let registry = Registry::reference().expect("reference tanks");
    let query = Query::new("Tank D", Measurement::height(10.0, LengthUnit::Inch));
    assert!(matches!(
        registry.query(&query),
        Err(GaugeError::UnknownProfile(name)) if name == "Tank D"
    ));
}

#[test]
fn query_rejects_non_finite_reading() {
    let registry = Registry::reference().expect("reference tanks");
    let query = Query::new(TANK_C, Measurement::volume(f64::NAN, VolumeUnit::Gallon));
    assert!(matches!(
        registry.query(&query),
        Err(GaugeError::Data(DataError::InvalidInput { .. }))
    ));
}

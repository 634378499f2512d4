use approx::assert_relative_eq;

use gauge_core::units::{LengthUnit, VolumeUnit};
use gauge_profiles::{Curve, GaugeProfile, Registry, load};
use integration_tests::{sample_table, strapping_table};

fn strapping() -> GaugeProfile {
    load(&strapping_table()).expect("valid table")
}

/// Evenly spaced heights across `[lo, hi]`, endpoints included.
fn grid(lo: f64, hi: f64, steps: u32) -> impl Iterator<Item = f64> {
    (0..=steps).map(move |i| lo + (hi - lo) * f64::from(i) / f64::from(steps))
}

#[test]
fn table_round_trips_height() {
    for profile in [strapping(), load(&sample_table()).expect("valid table")] {
        let Curve::Table(table) = profile.curve() else {
            panic!("expected a table profile");
        };
        let (lo, hi) = (table.heights()[0], profile.max_height());

        for height in grid(lo, hi, 500) {
            let volume = profile.evaluate(height).expect("finite");
            let solved = profile.solve(volume).expect("finite");
            assert_relative_eq!(solved, height, epsilon = 1e-6);
        }
    }
}

#[test]
fn table_is_strictly_increasing() {
    let profile = strapping();
    let volumes: Vec<f64> = grid(-8.0, 80.0, 880)
        .map(|height| profile.evaluate(height).expect("finite"))
        .collect();

    assert!(volumes.windows(2).all(|pair| pair[1] > pair[0]));
}

#[test]
fn table_knots_are_exact() {
    let profile = strapping();
    let Curve::Table(table) = profile.curve() else {
        panic!("expected a table profile");
    };

    for (height, volume) in table.points() {
        assert_eq!(profile.evaluate(height).expect("finite"), volume);
        assert_eq!(profile.solve(volume).expect("finite"), height);
    }
}

#[test]
fn table_follows_segment_formula_both_ways() {
    let profile = strapping();
    let Curve::Table(table) = profile.curve() else {
        panic!("expected a table profile");
    };
    let (heights, volumes) = (table.heights(), table.volumes());

    for i in 0..heights.len() - 1 {
        let (h0, h1) = (heights[i], heights[i + 1]);
        let (v0, v1) = (volumes[i], volumes[i + 1]);

        for t in [0.1, 0.25, 0.5, 0.9] {
            let height = h0 + t * (h1 - h0);
            let volume = v0 + t * (v1 - v0);
            let evaluated = profile.evaluate(height).expect("finite");
            assert_relative_eq!(evaluated, volume, max_relative = 1e-12);

            let solved = profile.solve(volume).expect("finite");
            assert_relative_eq!(solved, height, max_relative = 1e-12);
        }
    }
}

#[test]
fn table_extrapolates_linearly() {
    let profile = strapping();
    // Last segment: 64 in -> 6499.6 gal, 72 in -> 7328.2 gal.
    let slope = (7328.2 - 6499.6) / 8.0;

    for extra in [1.0, 10.0, 50.0] {
        let volume = profile.evaluate(72.0 + extra).expect("finite");
        assert_relative_eq!(volume, 7328.2 + slope * extra, max_relative = 1e-12);
    }

    // First segment continues below zero.
    assert_relative_eq!(
        profile.evaluate(-4.0).expect("finite"),
        -610.5 / 2.0,
        max_relative = 1e-12
    );
}

#[test]
fn reference_polynomials_round_trip() {
    let registry = Registry::reference().expect("reference tanks");

    for profile in registry.profiles() {
        for height in grid(0.0, profile.max_height(), 40) {
            let volume = profile.evaluate(height).expect("finite");
            let solved = profile.solve(volume).expect("reachable");
            assert_relative_eq!(solved, height, epsilon = 1e-6);
        }
    }
}

#[test]
fn units_round_trip() {
    for value in [0.0, 1e-3, 0.375, 47.0, 12_345.678, -3.5] {
        for unit in [LengthUnit::Centimeter, LengthUnit::Inch] {
            assert_relative_eq!(
                unit.from_inches(unit.to_inches(value)),
                value,
                max_relative = 1e-9
            );
        }
        for unit in [VolumeUnit::Gallon, VolumeUnit::Liter] {
            assert_relative_eq!(
                unit.from_gallons(unit.to_gallons(value)),
                value,
                max_relative = 1e-9
            );
        }
    }
}

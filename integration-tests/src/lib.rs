//! Shared fixtures for the gauge integration tests.

use gauge_profiles::RawProfile;

/// Calibration samples used throughout the scenario tests.
pub const SAMPLE_LINES: [&str; 3] = ["0.25,23", "0.50,47", "0.75,72"];

/// A larger strapping table, 0 to 72 inches in 8 inch steps, with noise lines.
pub const STRAPPING_LINES: [&str; 13] = [
    "# height (in), volume (gal)",
    "0, 0",
    "8, 610.5",
    "16, 1290.2",
    "24, 2051.8",
    "32, 2880.4",
    "",
    "40, 3765.9",
    "48, 4690.0",
    "// upper half",
    "56, 5614.1",
    "64, 6499.6",
    "72, 7328.2",
];

#[must_use]
pub fn sample_table() -> RawProfile {
    RawProfile::table("Sample", SAMPLE_LINES)
}

#[must_use]
pub fn strapping_table() -> RawProfile {
    RawProfile::table("Strapping", STRAPPING_LINES)
}

/// A catalog holding one of each profile kind and tightened solver settings.
pub const CATALOG: &str = r#"
[solver]
max_iters = 200
residual_tol = 1e-9

[[profile]]
name = "Tank B"
kind = "polynomial"
coefficients = [0, 0, 0, 0, 100, 0]
domain_max = 100.0

[[profile]]
name = "Sample"
kind = "table"
data = """
# height, volume
0.25,23
0.50,47
0.75,72
"""
"#;

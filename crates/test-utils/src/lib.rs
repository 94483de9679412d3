//! Fixtures and helpers for testing the price heatmap crates.
//!
//! - [`fixtures`]: reference configurations and input documents
//! - [`generators`]: deterministic sample layouts
//! - [`assert_approx_eq!`]: float comparison for estimates and coordinates
//!
//! Pull it in as a dev-dependency with a relative path:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::*;
pub use generators::*;

/// Default tolerance for [`assert_approx_eq!`] when none is given.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Asserts that two floats differ by at most an absolute tolerance.
///
/// ```
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(0.1 + 0.2, 0.3);
/// assert_approx_eq!(25000.000001, 25000.0, 1e-3);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, $crate::DEFAULT_EPSILON)
    };
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon): (f64, f64, f64) = ($left, $right, $epsilon);
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "values not within {:e}: left `{}`, right `{}` (diff {:e})",
                epsilon, left, right, diff
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_within_tolerance() {
        assert_approx_eq!(59.3300001, 59.33, 1e-6);
        assert_approx_eq!(0.0, -0.0);
    }

    #[test]
    #[should_panic(expected = "values not within")]
    fn test_outside_tolerance() {
        assert_approx_eq!(40000.0, 40001.0, 0.5);
    }

    #[test]
    #[should_panic(expected = "values not within")]
    fn test_nan_never_matches() {
        assert_approx_eq!(f64::NAN, 1.0);
    }
}

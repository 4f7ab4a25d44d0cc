//! Property tests for the scope arithmetic and tolerance checks.

use gw_unit_tests::compare::{assert_close, close};
use gw_unit_tests::num_test_itrs;
use proptest::prelude::*;

proptest! {
    #[test]
    fn iterations_fill_the_widest_pack(width in 1usize..=16) {
        let itrs = num_test_itrs(16, width);
        prop_assert!(itrs >= 1);
        prop_assert!(itrs * width <= 16);
        prop_assert!((itrs + 1) * width > 16);
    }

    #[test]
    fn close_is_symmetric(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6, tol in 1.0e-15f64..1.0e-1) {
        prop_assert_eq!(close(a, b, tol), close(b, a, tol));
        prop_assert!(close(a, a, tol));
    }

    #[test]
    fn relative_perturbation_within_tolerance_passes(
        values in prop::collection::vec(1.0f64..1.0e5, 1..32),
        scale in -0.5f64..0.5,
    ) {
        let tol = 1.0e-9;
        let perturbed: Vec<f64> = values.iter().map(|v| v * (1.0 + scale * tol)).collect();
        prop_assert!(assert_close("values", &values, &perturbed, tol).is_ok());
    }
}

//! Scalar type selection

/// Floating-point type the physics kernels are instantiated with.
#[cfg(not(feature = "single-precision"))]
pub type Real = f64;

/// Floating-point type the physics kernels are instantiated with.
#[cfg(feature = "single-precision")]
pub type Real = f32;

include!(concat!(env!("OUT_DIR"), "/pack_config.rs"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_pack_size_is_positive() {
        assert!(SMALL_PACK_SIZE >= 1);
    }

    #[test]
    fn real_matches_precision_feature() {
        let expected = if cfg!(feature = "single-precision") { 4 } else { 8 };
        assert_eq!(std::mem::size_of::<Real>(), expected);
    }
}

//! Comparisons between kernel output and reference values.

use crate::HarnessError;
use gw_pack::Scalar;

fn check_len(field: &str, expected: usize, actual: usize) -> Result<(), HarnessError> {
    if expected != actual {
        return Err(HarnessError::LengthMismatch { field: field.to_owned(), expected, actual });
    }
    Ok(())
}

/// Whether `a` is within `tolerance` of `b`, relative to the larger
/// magnitude (absolute below 1).
pub fn close(a: f64, b: f64, tolerance: f64) -> bool {
    a == b || (a - b).abs() <= tolerance * a.abs().max(b.abs()).max(1.0)
}

/// Element-wise [`close`] comparison; the error names the first offender.
pub fn assert_close<S: Scalar>(
    field: &str,
    expected: &[S],
    actual: &[S],
    tolerance: f64,
) -> Result<(), HarnessError> {
    check_len(field, expected.len(), actual.len())?;
    match expected
        .iter()
        .zip(actual)
        .position(|(e, a)| !close(e.to_f64(), a.to_f64(), tolerance))
    {
        Some(index) => Err(HarnessError::Mismatch {
            field: field.to_owned(),
            index,
            expected: expected[index].to_f64(),
            actual: actual[index].to_f64(),
            tolerance,
        }),
        None => Ok(()),
    }
}

/// Bit-for-bit comparison.
pub fn assert_bfb<S: Scalar>(field: &str, expected: &[S], actual: &[S]) -> Result<(), HarnessError> {
    check_len(field, expected.len(), actual.len())?;
    match expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e.to_f64().to_bits() != a.to_f64().to_bits())
    {
        Some(index) => Err(HarnessError::Mismatch {
            field: field.to_owned(),
            index,
            expected: expected[index].to_f64(),
            actual: actual[index].to_f64(),
            tolerance: 0.0,
        }),
        None => Ok(()),
    }
}

/// Exact comparison of level indices.
pub fn assert_indices(field: &str, expected: &[usize], actual: &[usize]) -> Result<(), HarnessError> {
    check_len(field, expected.len(), actual.len())?;
    match expected.iter().zip(actual).position(|(e, a)| e != a) {
        Some(index) => Err(HarnessError::IndexMismatch {
            field: field.to_owned(),
            index,
            expected: expected[index],
            actual: actual[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_tolerance_scales_with_magnitude() {
        assert!(close(1.0e6, 1.0e6 + 0.5, 1e-6));
        assert!(!close(1.0, 1.1, 1e-6));
        assert!(close(1e-20, 2e-20, 1e-12));
    }

    #[test]
    fn first_offender_is_reported() {
        let err = assert_close("ni", &[1.0, 2.0, 3.0], &[1.0, 2.5, 9.0], 1e-12).unwrap_err();
        match err {
            HarnessError::Mismatch { field, index, expected, actual, .. } => {
                assert_eq!((field.as_str(), index, expected, actual), ("ni", 1, 2.0, 2.5));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bfb_distinguishes_signed_zero() {
        assert!(assert_bfb("us", &[0.0f64], &[-0.0]).is_err());
        assert!(assert_bfb("us", &[1.5f32], &[1.5]).is_ok());
    }

    #[test]
    fn length_and_index_mismatches() {
        assert!(matches!(
            assert_close::<f64>("t", &[1.0], &[], 1.0),
            Err(HarnessError::LengthMismatch { expected: 1, actual: 0, .. })
        ));
        assert!(matches!(
            assert_indices("maxi", &[3, 4], &[3, 5]),
            Err(HarnessError::IndexMismatch { index: 1, expected: 4, actual: 5, .. })
        ));
    }
}

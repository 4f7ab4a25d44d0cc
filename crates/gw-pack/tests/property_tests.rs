//! Pack operations agree with their scalar definitions lane by lane.

use gw_pack::{Mask, Pack, npack, pack_scalars, scalarize, unpack_scalars, valid_lanes};
use proptest::prelude::*;

const W: usize = 4;
type P = Pack<f64, W>;

fn lanes() -> impl Strategy<Value = [f64; W]> {
    prop::array::uniform4(-1.0e6f64..1.0e6)
}

proptest! {
    #[test]
    fn arithmetic_matches_scalar(a in lanes(), b in lanes()) {
        let (pa, pb) = (P::from_array(a), P::from_array(b));
        let sum = pa + pb;
        let prod = pa * pb;
        let diff = pa - pb;
        for i in 0..W {
            prop_assert_eq!(sum[i], a[i] + b[i]);
            prop_assert_eq!(prod[i], a[i] * b[i]);
            prop_assert_eq!(diff[i], a[i] - b[i]);
        }
    }

    #[test]
    fn comparison_masks_match_scalar(a in lanes(), b in lanes()) {
        let (pa, pb) = (P::from_array(a), P::from_array(b));
        let lt = pa.lt(pb);
        let ge = pa.ge(pb);
        for i in 0..W {
            prop_assert_eq!(lt.get(i), a[i] < b[i]);
            prop_assert_eq!(ge.get(i), !lt.get(i));
        }
    }

    #[test]
    fn select_partitions_lanes(a in lanes(), b in lanes(), bits in prop::array::uniform4(any::<bool>())) {
        let mask = Mask::from_array(bits);
        let picked = P::select(mask, P::from_array(a), P::from_array(b));
        for i in 0..W {
            prop_assert_eq!(picked[i], if bits[i] { a[i] } else { b[i] });
        }
    }

    #[test]
    fn masked_max_ignores_clear_lanes(a in lanes(), n in 0usize..=W) {
        let p = P::from_array(a);
        let expected = a[..n].iter().copied().fold(f64::MIN, f64::max);
        prop_assert_eq!(p.masked_reduce_max(Mask::first_n(n), f64::MIN), expected);
    }

    #[test]
    fn pack_then_unpack_preserves_prefix(values in prop::collection::vec(-1.0e3f64..1.0e3, 1..64)) {
        let packs = pack_scalars::<f64, W>(&values, f64::NAN);
        prop_assert_eq!(packs.len(), npack::<W>(values.len()));
        prop_assert_eq!(scalarize(&packs).len(), packs.len() * W);
        prop_assert_eq!(unpack_scalars(&packs, values.len()), values.clone());

        let valid: usize = (0..packs.len()).map(|p| valid_lanes::<W>(values.len(), p).count()).sum();
        prop_assert_eq!(valid, values.len());
    }
}

//! Enumeration of ordered factorizations `P = N1 * N2 * N3 * N4`.
//!
//! Each factor lies in `[2, limit)`. The per-factor upper bounds come from the
//! remaining factors all being at least 2: after fixing `N1`, the quotient still
//! has to absorb three factors, so `N1 <= P >> 3`, and so on down to `N3`.

use serde::{Deserialize, Serialize};

/// Shift amounts bounding `N1`, `N2`, `N3` respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorShifts(pub [u32; 3]);

impl Default for FactorShifts {
    fn default() -> Self {
        FactorShifts([3, 2, 1])
    }
}

/// All `[N1, N2, N3, N4]` with product exactly `p`, every factor in `[2, limit)`,
/// in lexicographic order.
pub fn factorizations(
    p: u64,
    limit: u64,
    shifts: FactorShifts,
) -> impl Iterator<Item = [u64; 4]> {
    let [s1, s2, s3] = shifts.0;
    let bound = move |q: u64, s: u32| limit.min(q.checked_shr(s).unwrap_or(0) + 1);
    (2..bound(p, s1)).flat_map(move |n1| {
        (2..bound(p / n1, s2)).flat_map(move |n2| {
            let n12 = n1 * n2;
            (2..bound(p / n12, s3)).filter_map(move |n3| {
                let n123 = n12 * n3;
                let n4 = p / n123;
                // inexact or out-of-range quotients are just not factorizations
                (n4 > 1 && n4 < limit && n123 * n4 == p).then_some([n1, n2, n3, n4])
            })
        })
    })
}

//! Deterministic batch ordering.
//!
//! Comparators only look at sizes that are already known, and every order is
//! built on a stable sort so equal keys keep their input order.

use crate::config::SortOrder;

/// Sorts `items` in place according to `order`. `size` returns the
/// `(width, height)` of an item.
pub fn sort_batch<T>(items: &mut [T], order: SortOrder, size: impl Fn(&T) -> (u32, u32)) {
    match order {
        SortOrder::None => {}
        SortOrder::HeightDesc => items.sort_by(|a, b| size(b).1.cmp(&size(a).1)),
        SortOrder::AreaDesc => items.sort_by(|a, b| {
            let (aw, ah) = size(a);
            let (bw, bh) = size(b);
            (bw as u64 * bh as u64).cmp(&(aw as u64 * ah as u64))
        }),
        SortOrder::MaxSideDesc => items.sort_by(|a, b| {
            let (aw, ah) = size(a);
            let (bw, bh) = size(b);
            bw.max(bh).cmp(&aw.max(ah))
        }),
    }
}

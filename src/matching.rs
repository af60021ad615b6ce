//! Matching-size computation - greedy size-prioritized allocation.
//!
//! Not a price-time order book: there is no price and nothing executes.
//! The allocator answers one question - how much quantity could cross
//! for a security if buys and sells were paired largest-first, with
//! orders of the same company never pairing against each other.

use std::cmp::Reverse;

/// One side's view of a resident order during a matching pass:
/// remaining quantity plus the owning company for the self-trade check.
/// Borrows the company from the pool; nothing stored is touched.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ticket<'a> {
    pub(crate) quantity: u32,
    pub(crate) company: &'a str,
}

/// Total quantity a greedy largest-first pairing of `buys` against
/// `sells` could satisfy.
///
/// Both lists are sorted by descending quantity (ties in unspecified
/// order - only the aggregate is reported). Each buy scans the sell list
/// largest-first, skipping exhausted sells and sells from its own
/// company, and takes `min` of the two remainders. Decrements persist
/// across the whole pass, so no pair is counted twice; a same-company
/// skip leaves the sell available for later buys. Worst case O(n*m),
/// paid to honor the company exclusion: one excluded sell must not end
/// the scan.
pub(crate) fn match_size(mut buys: Vec<Ticket<'_>>, mut sells: Vec<Ticket<'_>>) -> u64 {
    if buys.is_empty() || sells.is_empty() {
        return 0;
    }

    buys.sort_unstable_by_key(|t| Reverse(t.quantity));
    sells.sort_unstable_by_key(|t| Reverse(t.quantity));

    let mut total: u64 = 0;
    for buy in &mut buys {
        if buy.quantity == 0 {
            continue;
        }
        for sell in &mut sells {
            if sell.quantity == 0 {
                continue;
            }
            if sell.company == buy.company {
                continue;
            }

            let crossed = buy.quantity.min(sell.quantity);
            total += u64::from(crossed);
            buy.quantity -= crossed;
            sell.quantity -= crossed;

            if buy.quantity == 0 {
                break;
            }
        }
    }

    total
}

//! Order cache - the indexed store behind every operation.
//!
//! One arena owns the records; three indices give the lookups their
//! cost profile: id -> slot for cancels, user -> slots for per-user
//! sweeps, security -> slots for minimum-quantity sweeps and the
//! matching-size query. Every mutation keeps the three views agreeing
//! with each other, and a bucket that empties is deleted outright.
//!
//! Rejected input is a silent no-op across the board: a malformed or
//! duplicate order, an unknown id, user or security - the cache stays
//! usable and unchanged. Callers that need to observe an admission
//! compare store contents before and after.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::arena::{OrderArena, SlotIndex};
use crate::matching::{self, Ticket};
use crate::order::{Order, Side};

/// In-memory repository of resident orders.
pub struct OrderCache {
    /// Primary storage; exclusively owns every record.
    arena: OrderArena,
    /// order_id -> slot
    by_id: FxHashMap<String, SlotIndex>,
    /// user -> slots, set semantics (ids are unique, so no duplicates)
    by_user: FxHashMap<String, FxHashSet<SlotIndex>>,
    /// security_id -> slots, list semantics (matching sorts by quantity,
    /// so intra-bucket order carries no meaning)
    by_security: FxHashMap<String, Vec<SlotIndex>>,
}

impl OrderCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            arena: OrderArena::new(),
            by_id: FxHashMap::default(),
            by_user: FxHashMap::default(),
            by_security: FxHashMap::default(),
        }
    }

    /// Create a cache pre-sized for an expected population.
    pub fn with_capacity(orders: usize, users: usize, securities: usize) -> Self {
        Self {
            arena: OrderArena::with_capacity(orders),
            by_id: FxHashMap::with_capacity_and_hasher(orders, Default::default()),
            by_user: FxHashMap::with_capacity_and_hasher(users, Default::default()),
            by_security: FxHashMap::with_capacity_and_hasher(securities, Default::default()),
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Admit an order.
    ///
    /// Silent no-op when any required field is empty, the quantity is
    /// zero, the side token is not exactly `"Buy"`/`"Sell"`, or the id
    /// is already resident (the existing order is left untouched).
    pub fn insert(&mut self, order: Order) {
        if !order.is_well_formed() {
            return;
        }
        if self.by_id.contains_key(order.order_id()) {
            return;
        }

        let order_id = order.order_id().to_owned();
        let user = order.user().to_owned();
        let security = order.security_id().to_owned();

        let slot = self.arena.insert(order);
        self.by_id.insert(order_id, slot);
        self.by_user.entry(user).or_default().insert(slot);
        self.by_security.entry(security).or_default().push(slot);
    }

    /// Remove one order by id. Unknown id: no-op.
    pub fn cancel(&mut self, order_id: &str) {
        let Some(&slot) = self.by_id.get(order_id) else {
            return;
        };
        self.unlink(slot);
    }

    /// Remove every order owned by `user`. Unknown user: no-op.
    pub fn cancel_for_user(&mut self, user: &str) {
        let Some(bucket) = self.by_user.get(user) else {
            return;
        };
        // Snapshot first: each cancellation mutates the bucket being read.
        let doomed: Vec<SlotIndex> = bucket.iter().copied().collect();
        for slot in doomed {
            self.unlink(slot);
        }
    }

    /// Remove every order for `security_id` whose quantity is at least
    /// `min_qty` (inclusive). A zero `min_qty` or unknown security
    /// selects nothing.
    pub fn cancel_for_security_with_minimum_quantity(&mut self, security_id: &str, min_qty: u32) {
        if min_qty == 0 {
            return;
        }
        let Some(bucket) = self.by_security.get(security_id) else {
            return;
        };
        // Collect fully before cancelling; see cancel_for_user.
        let doomed: Vec<SlotIndex> = bucket
            .iter()
            .copied()
            .filter(|&slot| {
                self.arena
                    .get(slot)
                    .map_or(false, |order| order.quantity() >= min_qty)
            })
            .collect();
        for slot in doomed {
            self.unlink(slot);
        }
    }

    /// Detach a record from all three views. The slot's order carries
    /// the keys needed to find its index entries.
    fn unlink(&mut self, slot: SlotIndex) {
        let Some(order) = self.arena.remove(slot) else {
            return;
        };
        self.by_id.remove(order.order_id());

        let mut drop_bucket = false;
        if let Some(bucket) = self.by_user.get_mut(order.user()) {
            bucket.remove(&slot);
            drop_bucket = bucket.is_empty();
        }
        if drop_bucket {
            self.by_user.remove(order.user());
        }

        let mut drop_bucket = false;
        if let Some(bucket) = self.by_security.get_mut(order.security_id()) {
            bucket.retain(|&s| s != slot);
            drop_bucket = bucket.is_empty();
        }
        if drop_bucket {
            self.by_security.remove(order.security_id());
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Total quantity that could cross for `security_id` under greedy
    /// largest-first pairing with the same-company exclusion.
    ///
    /// Returns 0 for an unknown security or one holding fewer than two
    /// orders. Pure: works on a transient snapshot of quantities and
    /// never touches the stored records, so consecutive calls with no
    /// intervening mutation return identical totals.
    pub fn matching_quantity(&self, security_id: &str) -> u64 {
        let Some(bucket) = self.by_security.get(security_id) else {
            return 0;
        };
        if bucket.len() < 2 {
            return 0;
        }

        let mut buys = Vec::new();
        let mut sells = Vec::new();
        for &slot in bucket {
            let Some(order) = self.arena.get(slot) else {
                continue;
            };
            let ticket = Ticket {
                quantity: order.quantity(),
                company: order.company(),
            };
            // Admission guarantees the token parses
            match order.side_token() {
                Some(Side::Buy) => buys.push(ticket),
                Some(Side::Sell) => sells.push(ticket),
                None => {}
            }
        }

        matching::match_size(buys, sells)
    }

    /// Every resident order, as independent clones, in unspecified order.
    pub fn all_orders(&self) -> Vec<Order> {
        self.arena.iter().map(|(_, order)| order.clone()).collect()
    }

    /// Number of resident orders.
    #[inline]
    pub fn order_count(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Digest of the resident population, independent of insertion and
    /// slot order. Two caches that went through equivalent histories
    /// hash identically; used by the determinism tests.
    pub fn state_hash(&self) -> u64 {
        let mut records: Vec<&Order> = self.arena.iter().map(|(_, order)| order).collect();
        records.sort_unstable_by_key(|order| order.order_id());

        let mut hasher = DefaultHasher::new();
        records.len().hash(&mut hasher);
        for order in records {
            order.order_id().hash(&mut hasher);
            order.security_id().hash(&mut hasher);
            order.side().hash(&mut hasher);
            order.quantity().hash(&mut hasher);
            order.user().hash(&mut hasher);
            order.company().hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl Default for OrderCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OrderCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderCache")
            .field("orders", &self.arena.len())
            .field("users", &self.by_user.len())
            .field("securities", &self.by_security.len())
            .finish()
    }
}

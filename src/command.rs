//! Commands for driving the cache from recorded order flows.
//!
//! One variant per mutation. Queries stay direct method calls - they
//! return values and a recorded flow has nowhere to put them.

use crate::cache::OrderCache;
use crate::order::Order;

/// A single mutation of the cache.
#[derive(Clone, Debug)]
pub enum Command {
    /// Admit an order
    Insert(Order),
    /// Remove one order by id
    Cancel { order_id: String },
    /// Remove every order owned by a user
    CancelForUser { user: String },
    /// Remove every order for a security at or above a quantity threshold
    CancelForSecurityWithMinimumQuantity { security_id: String, min_qty: u32 },
}

impl OrderCache {
    /// Apply one command. Rejected input is a silent no-op, exactly as
    /// with the direct calls.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Insert(order) => self.insert(order),
            Command::Cancel { order_id } => self.cancel(&order_id),
            Command::CancelForUser { user } => self.cancel_for_user(&user),
            Command::CancelForSecurityWithMinimumQuantity { security_id, min_qty } => {
                self.cancel_for_security_with_minimum_quantity(&security_id, min_qty)
            }
        }
    }
}

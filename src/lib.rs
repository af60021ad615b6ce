//! # Order-Cache
//!
//! An in-memory trade-order cache with indexed cancellation and a
//! matching-size query.
//!
//! ## Design Principles
//!
//! - **Single-Writer**: one logical owner mutates the cache (no locks)
//! - **One Source of Truth**: a slot pool owns every record; the id,
//!   user and security indices hold non-owning back-references
//! - **Silent Rejection**: invalid input never errors, it no-ops; the
//!   cache stays usable after any rejected call
//! - **Pure Queries**: the matching-size query reads a transient
//!   snapshot and never touches stored quantities
//!
//! ## Matching
//!
//! `matching_quantity` is a theoretical liquidity measure, not an
//! execution: buys and sells of one security pair greedily largest-first
//! and orders of the same company never pair against each other. Nothing
//! is filled and no price is involved.
//!
//! ## Example
//!
//! ```
//! use order_cache::{Order, OrderCache};
//!
//! let mut cache = OrderCache::new();
//! cache.insert(Order::new("OrdId1", "SecId1", "Buy", 1000, "User1", "CompanyA"));
//! cache.insert(Order::new("OrdId2", "SecId1", "Sell", 500, "User2", "CompanyB"));
//!
//! assert_eq!(cache.matching_quantity("SecId1"), 500);
//! assert_eq!(cache.all_orders().len(), 2);
//! ```

pub mod cache;
pub mod command;
pub mod order;
pub mod replay;

mod arena;
mod matching;

// Re-exports for convenience
pub use cache::OrderCache;
pub use command::Command;
pub use order::{Order, Side};
pub use replay::{replay, FlowRow};

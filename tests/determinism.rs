//! Determinism tests - golden master verification.
//!
//! The same seeded command stream must leave two caches in identical
//! states, and read-only queries must never perturb that state.

use order_cache::{Command, Order, OrderCache};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Generate a deterministic stream of mutation commands.
fn generate_commands(seed: u64, count: usize) -> Vec<Command> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut commands = Vec::with_capacity(count);
    let mut next_id = 1u64;
    let mut active: Vec<String> = Vec::new();

    for _ in 0..count {
        // 70% insert, 20% cancel, 10% cascades
        let roll: f64 = rng.gen();
        if active.is_empty() || roll < 0.7 {
            let order_id = format!("ORD{next_id}");
            next_id += 1;
            active.push(order_id.clone());
            commands.push(Command::Insert(Order::new(
                order_id,
                format!("SEC{}", rng.gen_range(0..8)),
                if rng.gen_bool(0.5) { "Buy" } else { "Sell" },
                rng.gen_range(1..2000),
                format!("USER{}", rng.gen_range(0..12)),
                format!("COMP{}", rng.gen_range(0..6)),
            )));
        } else if roll < 0.9 {
            let idx = rng.gen_range(0..active.len());
            let order_id = active.swap_remove(idx);
            commands.push(Command::Cancel { order_id });
        } else if roll < 0.95 {
            commands.push(Command::CancelForUser {
                user: format!("USER{}", rng.gen_range(0..12)),
            });
        } else {
            commands.push(Command::CancelForSecurityWithMinimumQuantity {
                security_id: format!("SEC{}", rng.gen_range(0..8)),
                min_qty: rng.gen_range(1..2000),
            });
        }
    }

    commands
}

#[test]
fn test_identical_streams_identical_states() {
    let commands = generate_commands(12345, 5_000);

    let mut a = OrderCache::new();
    let mut b = OrderCache::new();
    for command in &commands {
        a.apply(command.clone());
        b.apply(command.clone());
    }

    assert_eq!(a.order_count(), b.order_count());
    assert_eq!(a.state_hash(), b.state_hash());
    for s in 0..8 {
        let security = format!("SEC{s}");
        assert_eq!(a.matching_quantity(&security), b.matching_quantity(&security));
    }
}

#[test]
fn test_queries_leave_no_trace() {
    let commands = generate_commands(777, 2_000);

    let mut queried = OrderCache::new();
    let mut untouched = OrderCache::new();
    for command in &commands {
        queried.apply(command.clone());
        untouched.apply(command.clone());
        // Hammer the read-only surface on one of the two
        queried.matching_quantity("SEC0");
        queried.matching_quantity("SEC1");
        queried.all_orders();
    }

    assert_eq!(queried.state_hash(), untouched.state_hash());
}

#[test]
fn test_matching_is_stable_across_repeated_calls() {
    let commands = generate_commands(2024, 3_000);
    let mut cache = OrderCache::new();
    for command in commands {
        cache.apply(command);
    }

    for s in 0..8 {
        let security = format!("SEC{s}");
        let first = cache.matching_quantity(&security);
        for _ in 0..5 {
            assert_eq!(cache.matching_quantity(&security), first);
        }
    }
}

#[test]
fn test_state_hash_tracks_population_changes() {
    let mut cache = OrderCache::new();
    let empty = cache.state_hash();

    cache.insert(Order::new("Ord1", "SecA", "Buy", 100, "User1", "CompanyX"));
    let one = cache.state_hash();
    assert_ne!(empty, one);

    // Rejected input leaves the hash alone
    cache.insert(Order::new("Ord1", "SecB", "Sell", 999, "User2", "CompanyY"));
    cache.insert(Order::new("Ord2", "SecA", "hold", 100, "User1", "CompanyX"));
    cache.cancel("Ghost");
    assert_eq!(cache.state_hash(), one);

    cache.cancel("Ord1");
    assert_eq!(cache.state_hash(), empty);
}

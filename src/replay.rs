//! Recorded order-flow replay.
//!
//! Decodes CSV rows of captured cache traffic into typed commands and
//! feeds them through `OrderCache::apply`. Rows whose op tag is unknown
//! or missing its key field are skipped; insert rows are handed to the
//! cache as-is, where the usual admission checks decide.
//!
//! Expected columns:
//!
//! ```text
//! op,order_id,security_id,side,qty,user,company,min_qty
//! ```

use std::io;

use serde::Deserialize;

use crate::cache::OrderCache;
use crate::command::Command;
use crate::order::Order;

/// One raw row of a recorded flow. Every field beyond the op tag is
/// optional; which ones matter depends on the op.
#[derive(Debug, Deserialize)]
pub struct FlowRow {
    pub op: String,
    pub order_id: Option<String>,
    pub security_id: Option<String>,
    pub side: Option<String>,
    pub qty: Option<u32>,
    pub user: Option<String>,
    pub company: Option<String>,
    pub min_qty: Option<u32>,
}

impl FlowRow {
    /// Convert a raw row to a typed command.
    ///
    /// `insert` rows always convert - absent fields become empty/zero
    /// and the cache rejects them on admission. Cancel rows without
    /// their key field, and unknown op tags, convert to `None`.
    pub fn to_command(&self) -> Option<Command> {
        match self.op.as_str() {
            "insert" => Some(Command::Insert(Order::new(
                self.order_id.clone().unwrap_or_default(),
                self.security_id.clone().unwrap_or_default(),
                self.side.clone().unwrap_or_default(),
                self.qty.unwrap_or(0),
                self.user.clone().unwrap_or_default(),
                self.company.clone().unwrap_or_default(),
            ))),
            "cancel" => Some(Command::Cancel {
                order_id: self.order_id.clone()?,
            }),
            "cancel_user" => Some(Command::CancelForUser {
                user: self.user.clone()?,
            }),
            "cancel_security" => Some(Command::CancelForSecurityWithMinimumQuantity {
                security_id: self.security_id.clone()?,
                min_qty: self.min_qty.unwrap_or(0),
            }),
            _ => None,
        }
    }
}

/// Replay a recorded flow into the cache.
///
/// Returns the number of commands applied. Decoding problems at the CSV
/// layer surface as `csv::Error`; skipped rows are not an error.
pub fn replay<R: io::Read>(reader: R, cache: &mut OrderCache) -> Result<usize, csv::Error> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut applied = 0;
    for result in rdr.deserialize() {
        let row: FlowRow = result?;
        if let Some(command) = row.to_command() {
            cache.apply(command);
            applied += 1;
        }
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "op,order_id,security_id,side,qty,user,company,min_qty\n";

    fn run(rows: &str) -> (OrderCache, usize) {
        let mut cache = OrderCache::new();
        let csv = format!("{HEADER}{rows}");
        let applied = replay(csv.as_bytes(), &mut cache).unwrap();
        (cache, applied)
    }

    #[test]
    fn test_replay_inserts() {
        let (cache, applied) = run(
            "insert,Ord1,SecA,Buy,1000,User1,CompanyX,\n\
             insert,Ord2,SecA,Sell,500,User2,CompanyY,\n",
        );
        assert_eq!(applied, 2);
        assert_eq!(cache.order_count(), 2);
        assert_eq!(cache.matching_quantity("SecA"), 500);
    }

    #[test]
    fn test_replay_cancel_paths() {
        let (cache, applied) = run(
            "insert,Ord1,SecA,Buy,1000,User1,CompanyX,\n\
             insert,Ord2,SecA,Sell,500,User2,CompanyY,\n\
             insert,Ord3,SecB,Sell,800,User1,CompanyX,\n\
             cancel,Ord2,,,,,,\n\
             cancel_user,,,,,User1,,\n",
        );
        assert_eq!(applied, 5);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_replay_minimum_quantity_sweep() {
        let (cache, _) = run(
            "insert,Ord1,SecA,Buy,50,User1,CompanyX,\n\
             insert,Ord2,SecA,Sell,500,User2,CompanyY,\n\
             cancel_security,,SecA,,,,,100\n",
        );
        let orders = cache.all_orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id(), "Ord1");
    }

    #[test]
    fn test_malformed_insert_rows_fall_to_admission() {
        // Missing qty and side: the row converts, the cache rejects.
        let (cache, applied) = run("insert,Ord1,SecA,,,User1,CompanyX,\n");
        assert_eq!(applied, 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unknown_and_incomplete_rows_are_skipped() {
        let (cache, applied) = run(
            "noop,,,,,,,\n\
             cancel,,,,,,,\n\
             cancel_user,,,,,,,\n\
             insert,Ord1,SecA,Buy,100,User1,CompanyX,\n",
        );
        assert_eq!(applied, 1);
        assert_eq!(cache.order_count(), 1);
    }
}

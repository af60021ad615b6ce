//! Order record and side token.
//!
//! Orders are value records: all fields are fixed at construction and the
//! cache never hands out a mutable reference to a resident order. The
//! side is carried as the submitted token so that arbitrary caller input
//! stays representable; admission checks decide what is valid.

/// Order side (buy or sell), parsed from the exact-case wire token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Buy side
    Buy,
    /// Sell side
    Sell,
}

impl Side {
    /// Parse a side token. Exact match only: `"Buy"` and `"Sell"` are the
    /// sole admissible spellings; no trimming, no case folding.
    #[inline]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Buy" => Some(Side::Buy),
            "Sell" => Some(Side::Sell),
            _ => None,
        }
    }

    /// The canonical token for this side.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        }
    }
}

/// A trade order: an intent to buy or sell a quantity of a security,
/// attributed to a user and a company.
///
/// Immutable once constructed; the cache stores it as-is and returns
/// independent clones from queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    order_id: String,
    security_id: String,
    side: String,
    quantity: u32,
    user: String,
    company: String,
}

impl Order {
    /// Build an order from its six fields. No validation happens here;
    /// the cache applies the admission checks on insertion.
    pub fn new(
        order_id: impl Into<String>,
        security_id: impl Into<String>,
        side: impl Into<String>,
        quantity: u32,
        user: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            security_id: security_id.into(),
            side: side.into(),
            quantity,
            user: user.into(),
            company: company.into(),
        }
    }

    /// Unique order identifier.
    #[inline]
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Identifier of the traded security.
    #[inline]
    pub fn security_id(&self) -> &str {
        &self.security_id
    }

    /// The side token exactly as submitted.
    #[inline]
    pub fn side(&self) -> &str {
        &self.side
    }

    /// Order quantity.
    #[inline]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Submitting account.
    #[inline]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Owning firm; orders of the same company never match each other.
    #[inline]
    pub fn company(&self) -> &str {
        &self.company
    }

    /// The parsed side, or `None` when the token is not an exact
    /// `"Buy"`/`"Sell"`.
    #[inline]
    pub(crate) fn side_token(&self) -> Option<Side> {
        Side::parse(&self.side)
    }

    /// Admission checks, applied in order: non-empty fields, positive
    /// quantity, valid side token. Duplicate-id detection is the cache's
    /// job since it needs the resident set.
    pub(crate) fn is_well_formed(&self) -> bool {
        if self.order_id.is_empty()
            || self.security_id.is_empty()
            || self.side.is_empty()
            || self.user.is_empty()
            || self.company.is_empty()
        {
            return false;
        }
        if self.quantity == 0 {
            return false;
        }
        self.side_token().is_some()
    }
}

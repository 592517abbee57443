//! Pure pricing math for the swap engine.
//!
//! Two leaf functions with no I/O:
//! - `walk_book`: volume-weighted subtotal for a requested volume over a
//!   depth ladder, or insufficient liquidity
//! - `price_with_fees`: the fee/spread model applied on a subtotal
//!
//! Both are invoked from the quote path; `price_with_fees` runs a second
//! time at settlement against the venue's actual executed subtotal.

pub mod book;
pub mod fees;

pub use book::walk_book;
pub use fees::{price_with_fees, PricedAmount};

//! Depth-ladder walk.

use rust_decimal::Decimal;
use swap_core::{round8, BookLevel};

/// Volume-weighted subtotal to fill `volume` from a best-first ladder.
///
/// Walks level by level, taking each level's full quantity until the
/// level that crosses the requested volume, from which only the
/// remaining fraction is taken. Returns `None` when the ladder is
/// exhausted before the volume is reached (insufficient liquidity).
///
/// The ladder is consumed exactly as given: zero or negative level
/// quantities are accumulated, not filtered. A zero requested volume
/// is a defined zero-cost fill and does not touch the ladder.
///
/// The result is rounded to 8 decimal places, half away from zero.
pub fn walk_book(levels: &[BookLevel], volume: Decimal) -> Option<Decimal> {
    if volume.is_zero() {
        return Some(Decimal::ZERO);
    }

    let mut filled = Decimal::ZERO;
    let mut subtotal = Decimal::ZERO;

    for level in levels {
        if filled + level.quantity >= volume {
            let remaining = volume - filled;
            subtotal += level.price * remaining;
            filled = volume;
            break;
        }
        subtotal += level.price * level.quantity;
        filled += level.quantity;
    }

    if filled < volume {
        None
    } else {
        Some(round8(subtotal))
    }
}

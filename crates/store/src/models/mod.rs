//! Domain models persisted by the entity stores.
//!
//! Records serialize with camelCase keys. Each model comes with the input
//! types its repository accepts: `New*` for creation and either a patch
//! (every field optional) or a full `*Input` replacement for updates.

pub mod client;
pub mod product;
pub mod sell;
pub mod user;

use chrono::{DateTime, TimeDelta, Utc};

pub use client::{Client, ClientPatch, NewClient, SegmentCount};
pub use product::{Product, ProductInput};
pub use sell::{SaleInput, Sell};
pub(crate) use sell::SellData;
pub use user::{User, UserInput};

/// Next `updatedAt` value: now, but always strictly after `previous`.
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_timestamp_strictly_increases() {
        let future = Utc::now() + TimeDelta::hours(1);
        assert!(next_timestamp(future) > future);

        let past = Utc::now() - TimeDelta::hours(1);
        assert!(next_timestamp(past) > past);
    }
}

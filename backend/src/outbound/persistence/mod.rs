//! Persistence adapters for the record-store ports.
//!
//! The storage engine is an external collaborator: the domain only sees the
//! `GigStore`/`BidStore`/`UserStore` traits. The in-memory adapter is the
//! shipped implementation; swapping in a database-backed one is a matter of
//! implementing the same three traits.

pub mod memory;

//! `travelfund-core` — domain building blocks shared by the travel fund crates.
//!
//! Everything here is **pure domain** (no storage, no clocks, no IO).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod event;
pub mod id;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::{Entity, position_of};
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{ExpenseId, FundId, TopUpId};

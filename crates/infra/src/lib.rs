//! Infrastructure for the travel fund: snapshot stores, clock, configuration
//! and the [`LedgerEngine`] that ties them to the pure ledger domain.

pub mod clock;
pub mod config;
pub mod engine;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, StoreConfig};
pub use engine::{EngineError, EngineResult, LedgerEngine, NewExpense};
pub use store::{FundStore, InMemoryFundStore, JsonFileFundStore, StoreError};

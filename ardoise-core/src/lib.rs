//! Ardoise core - order accounting for a point-of-sale till
//!
//! Turns a mutable cart into an immutable, auditable order record and
//! reconciles a business day's paid orders into a closing report (日结,
//! the Z-report equivalent). Persistence, transport, and UI live outside;
//! the core exposes plain data and consumes storage through the
//! collaborator traits in [`store`].
//!
//! # Module structure
//!
//! ```text
//! ardoise-core/src/
//! ├── config/        # Business time zone configuration
//! ├── money/         # Decimal arithmetic, tax decomposition, tolerances
//! ├── pricing/       # Selection validation and effective unit prices
//! ├── cart/          # Line identity and merge-on-add
//! ├── orders/        # Order lifecycle engine and manager
//! ├── ledger/        # Day open/close lifecycle and aggregation
//! ├── report/        # Report sourcing (live/snapshot) and shaping
//! ├── store/         # Storage collaborator traits + in-memory store
//! └── time/          # Date parsing and business-day windows
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod ledger;
pub mod money;
pub mod orders;
pub mod pricing;
pub mod report;
pub mod store;
pub mod time;

// Re-export the engine surface
pub use cart::{line_key, merge_line, remove_line, set_quantity};
pub use config::CoreConfig;
pub use error::{CoreError, Result};
pub use ledger::LedgerManager;
pub use money::{decompose_tax_inclusive, money_eq, to_decimal, to_f64, TaxParts, MONEY_TOLERANCE};
pub use orders::{build_order, verify_total, OrderManager};
pub use pricing::{line_total, price_selection, unit_price};
pub use report::{parse_mode, ReportService};
pub use store::{LedgerStore, MemoryStore, OrderStore, Store, StoreError, TaxTypeStore};

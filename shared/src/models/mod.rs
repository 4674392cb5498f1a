//! Data models
//!
//! Shared between the accounting engines and embedding frontends.
//! All IDs are `String`; monetary fields are `f64` values exact at two
//! decimal places (arithmetic happens in `Decimal` inside `ardoise-core`).

pub mod cart;
pub mod category;
pub mod daily_report;
pub mod ledger;
pub mod order;
pub mod product;
pub mod tax_type;

// Re-exports
pub use cart::*;
pub use category::*;
pub use daily_report::*;
pub use ledger::*;
pub use order::*;
pub use product::*;
pub use tax_type::*;

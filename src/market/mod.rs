//! Market actors and price processes.

pub mod price_process;
pub mod arbitrageur;
pub mod retail;

pub use price_process::GBMPriceProcess;
pub use arbitrageur::Arbitrageur;
pub use retail::{RetailTrader, RetailOrder};

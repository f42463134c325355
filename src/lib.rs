pub mod config;
pub mod fxo;
pub mod report;
pub mod utils;
pub mod xbrl;

// Re-exports
pub use xbrl::FactStore;

pub mod concept;
pub mod error;
pub mod facts;
pub mod store;

pub use concept::Concept;
pub use error::XbrlError;
pub use facts::{FactValue, NormalizedFact, Period};
pub use store::FactStore;

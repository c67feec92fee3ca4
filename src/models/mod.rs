pub mod observation;

pub use observation::{NumericColumn, Observation, HEADER};

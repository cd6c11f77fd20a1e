mod aggregator;
mod api;
mod calendar;
mod capacity;
mod types;
mod week;

pub use aggregator::*;
pub use api::*;
pub use calendar::*;
pub use capacity::*;
pub use types::*;
pub use week::*;

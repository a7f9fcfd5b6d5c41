mod metrics;
mod pet;

pub use metrics::*;
pub use pet::*;

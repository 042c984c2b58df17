// Running accumulators for one comparison run

pub mod confusion;
pub mod duration;

pub use confusion::{Classification, ConfusionMatrix};
pub use duration::{DurationStats, DurationTable};

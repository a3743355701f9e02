/// Fixed-step simulation clock.
pub mod clock;
pub mod engine;
/// Sample accumulation for a single run.
pub mod recorder;
pub mod summary;
pub mod types;

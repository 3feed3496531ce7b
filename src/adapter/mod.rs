//! Adapters binding the ports to the outside world.

pub mod explorer;
pub mod store;
pub mod summarizer;
pub mod telegram;

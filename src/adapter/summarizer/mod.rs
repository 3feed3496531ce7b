//! Summarization adapters.

mod fireworks;

pub use fireworks::FireworksSummarizer;

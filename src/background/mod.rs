pub mod seed;

pub use seed::{default_examples, Delay, NoDelay, SeedLoader, SeedPixel, SeedReport, SeedSchedule};

#[cfg(feature = "tokio-runtime")]
pub use seed::{load_examples, TokioDelay};

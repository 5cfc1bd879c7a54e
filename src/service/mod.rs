pub mod initializer;
pub mod readiness;
pub mod retry;
pub mod visitors;

pub use initializer::Initializer;
pub use readiness::{Readiness, ReadinessState};
pub use retry::{RetryPolicy, retry_bounded};

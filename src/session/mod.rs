pub mod session;

pub use session::{ApplyOutcome, OrderingPolicy, Session};

pub mod bus;
pub mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};

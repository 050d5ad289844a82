//! Time tracking: the tick loop, window packaging and their ports

pub mod clock;
pub mod packaging;
pub mod ports;
pub mod session;

pub use clock::{RuntimeClock, SystemClock};
pub use packaging::package_window;
pub use ports::{Clock, ElapsedDisplay, SystemInfoProvider, TimeWindowSender};
pub use session::{SessionEvents, TrackingSession};

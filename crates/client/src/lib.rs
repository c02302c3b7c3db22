//! Headless arena client.
//!
//! The client is the composition root of a session: it loads content, builds
//! the runtime, and plays a scripted bout through the runtime handle while
//! standing in for the animation collaborator.
//!
//! ```text
//! Driver
//!   ├─→ Scenario (timed input and collision notifications)
//!   ├─→ RuntimeHandle (commands and snapshots)
//!   └─→ CueScheduler (animation completion cues)
//! ```

pub mod config;
pub mod cues;
pub mod driver;
pub mod logging;

pub use config::ClientConfig;
pub use cues::{ClipLengths, CueScheduler};
pub use driver::Driver;
pub use logging::{default_log_dir, setup_logging};

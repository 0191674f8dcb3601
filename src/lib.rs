//! advent - a date-unlocked advent calendar.
//!
//! Tiles unlock by calendar day in a configured timezone. A session renders
//! the grid, then refreshes it once at the next local midnight. The `embed`
//! module is the build-time step that inlines images into the day pages.

pub mod clock;
pub mod config;
pub mod embed;
pub mod error;
pub mod grid;
pub mod present;
pub mod scheduler;
pub mod session;
pub mod status;
pub mod unlock;
pub mod utils;

pub use clock::{fields_in, CalendarFields, Clock, FixedClock, SystemClock};
pub use config::{Config, ConfiguredWindow};
pub use error::{ConfigError, EmbedError, PresentError, StatusError};
pub use grid::{render, RenderedTile};
pub use session::{Session, SessionState};
pub use unlock::is_unlocked;

mod countdown;
mod live;
mod snapshot;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use live::LiveSession;
pub use snapshot::SessionSnapshot;

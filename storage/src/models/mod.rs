mod session;

pub use session::{Session, SessionMetadata};

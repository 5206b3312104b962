//! Core business logic for git-cp

pub mod commit;
pub mod config;
pub mod push;
pub mod sequence;
pub mod session;
pub mod summary;

pub use commit::Commit;
pub use config::{Config, PushPolicy};
pub use push::PushOutcome;
pub use session::{Session, SessionReport, SessionState};
pub use summary::Summary;

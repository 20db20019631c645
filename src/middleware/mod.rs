pub mod session;

pub use session::{AuthSession, SESSION_COOKIE};

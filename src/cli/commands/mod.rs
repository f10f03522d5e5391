//! CLI command implementations.

mod chat;
mod config;
mod doctor;
mod extract;
mod session;
mod study;

pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use extract::run_extract;
pub use session::run_session;
pub use study::run_study;

//! Infrastructure configuration modules.

pub mod logging;
pub mod retry;
pub mod settings;

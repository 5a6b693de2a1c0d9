//! Operator subcommands that run instead of the server.
//!
//! - `check-env` validates a `.env` file.
//! - `smoke` exercises a running server end to end.

pub mod check_env;
pub mod smoke;

//! Commit records and the annotations read from them
//!
//! - `record`: Commit type and `git log` record parsing
//! - `marker`: `Feature-Flag:` markers and change-request override blocks

pub mod marker;
pub mod record;

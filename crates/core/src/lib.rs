//! Domain types for the printq printing queue.
//!
//! Storage-free: this crate holds the job payload model, the collaborator
//! seams (document generation, printing), and shared error types. It has no
//! database or HTTP dependencies so it can be used by the API, the workers,
//! and any future CLI tooling alike.

pub mod error;
pub mod generate;
pub mod payload;
pub mod print;
pub mod sources;
pub mod types;

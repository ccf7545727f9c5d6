//! Submission API for the printing queue.
//!
//! A thin producer: it inserts PENDING generation jobs and READY upload
//! jobs, and exposes the job projection for polling. All actual work
//! happens in the worker binaries.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

//! Worker processes for the printing queue.
//!
//! Two long-lived binaries share this crate: the generation worker takes
//! PENDING shipping-docs jobs to rendered PDFs, and the print worker takes
//! READY jobs to the physical printer. Each runs a single-threaded polling
//! loop; scaling out means running more instances of the same binary,
//! coordinated only by the claim protocol in `printq-db`.

pub mod config;
pub mod generate;
pub mod print;
pub mod printer;
pub mod report;
pub mod shutdown;

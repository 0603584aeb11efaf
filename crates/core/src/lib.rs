//! Core library for wolfq
//!
//! This crate implements the **Functional Core** of the wolfq application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! - **`wolfq_core`** (this crate): pure transformation functions with zero I/O
//! - **`wolfq`**: I/O operations and orchestration (the Imperative Shell)
//!
//! Every step of the query pipeline that does not touch the network lives
//! here: building the request URL, decoding the XML payload into sections,
//! and selecting the best-fit answer. Each function is deterministic and
//! testable with fixture data alone; the shell contributes only the HTTP
//! round trip and the environment reads.

pub mod error;
pub mod wolfram;

pub use error::Error;

//! # Core Engine
//!
//! The fingerprinting, grouping, and batch-execution engine, UI-agnostic.
//!
//! - `scanner` - discovers image files in deterministic order
//! - `codec` - decode / resize / JPEG-encode collaborator
//! - `fingerprint` - content digest and 64-bit dHash
//! - `grouper` - exact and near-duplicate clustering
//! - `batch` - order-preserving serial / worker-pool scheduler
//! - `stats` - run statistics and serial-vs-parallel comparison
//! - `pipeline` - per-run orchestration

pub mod batch;
pub mod codec;
pub mod fingerprint;
pub mod grouper;
pub mod pipeline;
pub mod scanner;
pub mod stats;

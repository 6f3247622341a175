//! Discrete-event propagation over per-vertex distance sets (ScanNet).
//!
//! Purpose
//! - Treat each source's `Mapper` as outgoing edge weights and fire arrival events
//!   in time order until no event fits inside the radius.
//!
//! Design notes
//! - Event times are collapsed to an integer tick (`round(time / time_eps)`) when an
//!   `Entry` is built, so the live set uses an exact total order `(tick, vertex)`.
//!   Two entries landing on the same tick and vertex are one event.
//! - Progress reporting is a trait (`ScanObserver`) instead of printing; the
//!   run itself only returns counters.
//!
//! Split
//! - `types.rs` (entry, summary, observers), `scan.rs` (the event loop).

mod scan;
mod types;

pub use scan::ScanNet;
pub use types::{Entry, LogObserver, NoopObserver, ScanObserver, ScanSummary};

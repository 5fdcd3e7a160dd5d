//! Production planning for a 3D-printing post-processing floor.
//!
//! Jobs move through priming, painting, QC and holds. Hold time is tracked
//! per interval, completed jobs move to the dispatch log, and the dispatch
//! log feeds a seven-day output report.

pub mod analysis;
pub mod board;
pub mod cli;
pub mod config;
pub mod hold;
pub mod logging;
pub mod model;
pub mod storage;
pub mod weekly;

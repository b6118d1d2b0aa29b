//! Video-to-article conversion and article evaluation.
//!
//! Each bounded context is split into `domain` (types, ports, pure logic) and
//! `infrastructure` (adapters touching the filesystem, network or processes).
//! `pipeline` holds the use cases that wire them together.

pub mod dataset;
pub mod evaluation;
pub mod generation;
pub mod media;
pub mod metrics;
pub mod pipeline;
pub mod shared;
pub mod transcription;

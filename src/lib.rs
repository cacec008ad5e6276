//! # riffwalk
//!
//! Walks the nested chunk tree of RIFF files (WAV, AVI, WEBP, ...) as one
//! flat sequence of chunks, with notifications when a `LIST` starts and ends.
pub mod riff;

// Re-export the main types for convenience
pub use riff::{
    config::{Padding, ReaderConfig},
    events::{Event, Events},
    reader::{Chunk, FnObserver, Group, GroupObserver, RiffReader, Underflow},
    region::{Region, RiffHeader},
    tag::Tag,
    RiffError,
};

//! Resource Interchange File Format reader
//!
//! RIFF is the container used by WAV, AVI, WEBP and a handful of other
//! formats. It is a tree of length prefixed chunks, this module walks
//! that tree and hands it back as one flat sequence of leaf chunks while
//! reporting where each nested group begins and ends.
//!
//! # Top Level
//!
//! A file starts with a 12 byte header. Unless other wise noted everything
//! is stored in Little Endian format.
//!
//! | Type    | Name   | Description |
//! | ------: | ------ | ----------- |
//! | [u8; 4] | magic  | Always `RIFF` |
//! | u32     | size   | Size of everything after this field, informational only |
//! | [u8; 4] | format | The form type such as `WAVE`, `AVI ` or `WEBP` |
//!
//! The header is followed by a sequence of chunks (see: [`reader::Chunk`]).
//!
//! | Type    | Name  | Description |
//! | ------: | ----- | ----------- |
//! | [u8; 4] | id    | The type of the chunk, usually ASCII such as `fmt ` |
//! | u32     | size  | The length of the value section of a chunk, is allowed to be 0 bytes |
//! | [u8; N] | data  | The content of the chunk, interpret according to the chunk id |
//!
//! # Groups
//!
//! A chunk with the id `LIST` holds more chunks (see: [`reader::Group`]).
//! Groups can nest, up to [`config::ReaderConfig::max_depth`] levels deep.
//!
//! | Type    | Name  | Description |
//! | ------: | ----- | ----------- |
//! | [u8; 4] | id    | Always `LIST` |
//! | u32     | size  | Length of `type` plus every nested chunk |
//! | [u8; 4] | type  | The list type, such as `INFO`, `hdrl` or `movi` |
//! | [u8; N] | data  | Nested chunks and groups, `size - 4` bytes in total |
//!
//! Some list types are not worth descending into. AVI files store the
//! interleaved audio/video stream in a `movi` list which can be gigabytes
//! of tiny chunks, those are skipped over as one opaque blob.
//!
//! ## Padding
//!
//! The RIFF format asks for a pad byte after every odd sized chunk. Not every
//! writer honors that, so it is left to [`config::Padding`] to decide.
pub mod config;
pub mod events;
pub mod reader;
pub mod region;
pub mod tag;
mod raw;

#[cfg(test)]
pub mod builder;

pub use raw::RiffError;

use tag::Tag;

// Size of the RIFF file header (magic + size + format)
pub const HEADER_SIZE: usize = 12;

// Size of the id + size prefix on each chunk
pub const CHUNK_HEADER_SIZE: usize = 8;

pub const RIFF_MAGIC: Tag = Tag(*b"RIFF");
pub const LIST_MAGIC: Tag = Tag(*b"LIST");
pub const INFO_MAGIC: Tag = Tag(*b"INFO");

// AVI interleaved stream list
pub const MOVI_MAGIC: Tag = Tag(*b"movi");

// Max allowed nested LIST chunks
pub const MAX_DEPTH: usize = 10;

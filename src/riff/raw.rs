use std::path::PathBuf;

use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

use crate::riff::tag::Tag;
use crate::riff::CHUNK_HEADER_SIZE;

#[derive(Error, Debug)]
pub enum RiffError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("riff header too short, {len} bytes")]
    TooShort { len: usize },
    #[error("no valid riff header, id <{magic}> format <{format}> expected format <{expected}>")]
    FormatMismatch { magic: Tag, format: Tag, expected: Tag },
    #[error("LIST nesting depth {depth} exceeds permitted max of {max}")]
    NestingTooDeep { depth: usize, max: usize },
    #[error("truncated record at offset {offset}, needed {needed} bytes but {available} left")]
    Truncated { offset: usize, needed: usize, available: usize },
}

// Bounds checked view of `len` bytes at `offset`
pub(crate) fn slice_at(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], RiffError> {
    let available = buf.len().saturating_sub(offset);

    match offset.checked_add(len) {
        Some(end) if end <= buf.len() => Ok(&buf[offset..end]),
        _ => Err(RiffError::Truncated {
            offset,
            needed: len,
            available,
        }),
    }
}

pub(crate) fn read_tag(buf: &[u8], offset: usize) -> Result<Tag, RiffError> {
    let raw = slice_at(buf, offset, 4)?;
    let mut tag: [u8; 4] = [0; 4];
    tag.copy_from_slice(raw);
    Ok(Tag(tag))
}

pub(crate) fn read_u32(buf: &[u8], offset: usize) -> Result<u32, RiffError> {
    Ok(LittleEndian::read_u32(slice_at(buf, offset, 4)?))
}

// The 8 byte `id || size` prefix shared by chunks, groups and the file header
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct RawHeader {
    pub id: Tag,
    pub size: u32,
}

impl RawHeader {
    pub fn read(buf: &[u8], offset: usize) -> Result<Self, RiffError> {
        // Check the whole header up front so the error reports the full 8 bytes
        slice_at(buf, offset, CHUNK_HEADER_SIZE)?;

        Ok(RawHeader {
            id: read_tag(buf, offset)?,
            size: read_u32(buf, offset + 4)?,
        })
    }
}

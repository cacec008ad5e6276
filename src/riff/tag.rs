use std::fmt;
use std::str::FromStr;

use serde::de::{self, Unexpected, Visitor};
use serde::Deserialize;
use serde::Deserializer;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TagError {
    #[error("tag {0:?} is empty")]
    Empty(String),
    #[error("tag {0:?} is longer than 4 bytes")]
    TooLong(String),
    #[error("tag {0:?} is not ascii")]
    NotAscii(String),
}

/// A four character code, the identifier on every chunk, group and header.
#[derive(PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for Tag {
    fn from(bytes: [u8; 4]) -> Self {
        Tag(bytes)
    }
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

// Short tags get space padded, `AVI` is really `AVI `
impl FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TagError::Empty(s.to_string()));
        }
        if !s.is_ascii() {
            return Err(TagError::NotAscii(s.to_string()));
        }
        if s.len() > 4 {
            return Err(TagError::TooLong(s.to_string()));
        }

        let mut tag = [b' '; 4];
        tag[..s.len()].copy_from_slice(s.as_bytes());
        Ok(Tag(tag))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02x}", b)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self)
    }
}

// Serde impls
struct TagVisitor;

impl<'de> Visitor<'de> for TagVisitor {
    type Value = Tag;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a string of 1 to 4 ascii characters")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse()
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
        <[u8; 4]>::try_from(v)
            .map(Tag)
            .map_err(|_| de::Error::invalid_value(Unexpected::Bytes(v), &self))
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Tag, D::Error> {
        deserializer.deserialize_str(TagVisitor)
    }
}

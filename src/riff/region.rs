use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use log::debug;
use memmap2::Mmap;

use crate::riff::config::ReaderConfig;
use crate::riff::raw::{read_tag, read_u32, RiffError};
use crate::riff::reader::{GroupObserver, RiffReader};
use crate::riff::tag::Tag;
use crate::riff::{HEADER_SIZE, RIFF_MAGIC};

/// The validated top level header
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RiffHeader {
    /// Declared size of everything after the size field, not trusted for traversal
    pub size: u32,
    pub format: Tag,
}

#[derive(Debug)]
enum Backing {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Backing {
    fn as_bytes(&self) -> &[u8] {
        match self {
            Backing::Mapped(map) => &map[..],
            Backing::Owned(data) => &data[..],
        }
    }
}

/// An entire RIFF file, memory mapped from disk or held in a buffer.
///
/// Readers borrow the region, dropping it unmaps or frees the file content.
#[derive(Debug)]
pub struct Region {
    data: Backing,
    header: RiffHeader,
}

// Magic and format tag of the 12 byte file header
fn validate(data: &[u8], format: Tag) -> Result<RiffHeader, RiffError> {
    if data.len() < HEADER_SIZE {
        return Err(RiffError::TooShort { len: data.len() });
    }

    let magic = read_tag(data, 0)?;
    let size = read_u32(data, 4)?;
    let found = read_tag(data, 8)?;

    if magic != RIFF_MAGIC || found != format {
        return Err(RiffError::FormatMismatch {
            magic,
            format: found,
            expected: format,
        });
    }

    Ok(RiffHeader { size, format: found })
}

impl Region {
    /// Map `path` read-only and check its header against `format`
    pub fn open<P: AsRef<Path>>(path: P, format: Tag) -> Result<Self, RiffError> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RiffError::NotFound(path.to_path_buf()),
            _ => RiffError::Io(e),
        })?;

        let meta = file.metadata()?;
        if meta.is_dir() {
            return Err(RiffError::Io(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            )));
        }

        // Empty maps are rejected on some platforms, the header check fails anyway
        let len = meta.len() as usize;
        if len < HEADER_SIZE {
            return Err(RiffError::TooShort { len });
        }

        // SAFETY: read-only map, the file must not be truncated while the region is alive
        let map = unsafe { Mmap::map(&file)? };
        debug!("Mapped {} bytes from {}", map.len(), path.display());

        let header = validate(&map, format)?;
        Ok(Region {
            data: Backing::Mapped(map),
            header,
        })
    }

    pub fn from_bytes(data: Vec<u8>, format: Tag) -> Result<Self, RiffError> {
        let header = validate(&data, format)?;

        Ok(Region {
            data: Backing::Owned(data),
            header,
        })
    }

    pub fn header(&self) -> &RiffHeader {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// True when the content is a file mapping rather than an owned buffer
    pub fn is_mapped(&self) -> bool {
        matches!(self.data, Backing::Mapped(_))
    }

    /// Reader with the default configuration and no group callbacks
    pub fn reader(&self) -> RiffReader<'_, ()> {
        RiffReader::new(self, ())
    }

    pub fn reader_with<O: GroupObserver>(&self, config: ReaderConfig, observer: O) -> RiffReader<'_, O> {
        RiffReader::with_config(self, config, observer)
    }
}

#[cfg(test)]
mod test_region {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn wave() -> Tag {
        Tag(*b"WAVE")
    }

    #[test]
    fn valid_header() {
        let region = Region::from_bytes(b"RIFF\x04\x00\x00\x00WAVE".to_vec(), wave()).unwrap();

        assert_eq!(
            &RiffHeader {
                size: 4,
                format: wave(),
            },
            region.header()
        );
        assert_eq!(12, region.len());
    }

    #[test]
    fn too_short() {
        match Region::from_bytes(b"RIFF\x04\x00\x00\x00WAV".to_vec(), wave()) {
            Err(RiffError::TooShort { len: 11 }) => (),
            x => panic!("unexpected: {:?}", x),
        }
    }

    #[test]
    fn bad_magic() {
        match Region::from_bytes(b"RIFX\x04\x00\x00\x00WAVE".to_vec(), wave()) {
            Err(RiffError::FormatMismatch { magic, format, expected }) => {
                assert_eq!(Tag(*b"RIFX"), magic);
                assert_eq!(wave(), format);
                assert_eq!(wave(), expected);
            }
            x => panic!("unexpected: {:?}", x),
        }
    }

    #[test]
    fn bad_format() {
        match Region::from_bytes(b"RIFF\x04\x00\x00\x00AVI ".to_vec(), wave()) {
            Err(RiffError::FormatMismatch { format, .. }) => assert_eq!(Tag(*b"AVI "), format),
            x => panic!("unexpected: {:?}", x),
        }
    }

    #[test]
    fn open_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"RIFF\x0c\x00\x00\x00WAVEabcd\x00\x00\x00\x00").unwrap();
        file.flush().unwrap();

        let region = Region::open(file.path(), wave()).unwrap();
        assert!(region.is_mapped());
        assert_eq!(20, region.len());
        assert_eq!(b"abcd", &region.as_bytes()[12..16]);
        assert_eq!(
            &RiffHeader {
                size: 12,
                format: wave(),
            },
            region.header()
        );

        let chunk = region.reader().next().unwrap().unwrap();
        assert_eq!(Tag(*b"abcd"), chunk.id);
    }

    #[test]
    fn open_checks_header() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"RIFF\x04\x00\x00\x00AVI ").unwrap();
        file.flush().unwrap();

        match Region::open(file.path(), wave()) {
            Err(RiffError::FormatMismatch { format, .. }) => assert_eq!(Tag(*b"AVI "), format),
            x => panic!("unexpected: {:?}", x),
        }
    }

    #[test]
    fn open_empty_file() {
        let file = NamedTempFile::new().unwrap();

        match Region::open(file.path(), wave()) {
            Err(RiffError::TooShort { len: 0 }) => (),
            x => panic!("unexpected: {:?}", x),
        }
    }

    #[test]
    fn from_bytes_is_owned() {
        let region = Region::from_bytes(b"RIFF\x04\x00\x00\x00WAVE".to_vec(), wave()).unwrap();
        assert!(!region.is_mapped());
    }

    #[test]
    fn open_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.wav");

        match Region::open(&path, wave()) {
            Err(RiffError::NotFound(p)) => assert_eq!(path, p),
            x => panic!("unexpected: {:?}", x),
        }
    }

    #[test]
    fn open_directory() {
        let dir = tempfile::tempdir().unwrap();

        match Region::open(dir.path(), wave()) {
            Err(RiffError::Io(_)) => (),
            x => panic!("unexpected: {:?}", x),
        }
    }
}

//! Assembles RIFF byte streams for the tests
use crate::riff::tag::Tag;
use crate::riff::RIFF_MAGIC;

pub struct RiffBuilder {
    inner: Vec<u8>,
    // Offsets of the size field of each open LIST
    open: Vec<usize>,
    pad: bool,
}

impl RiffBuilder {
    pub fn new(format: Tag) -> Self {
        let mut inner = Vec::new();
        inner.extend_from_slice(RIFF_MAGIC.as_bytes());
        inner.extend_from_slice(&0u32.to_le_bytes());
        inner.extend_from_slice(format.as_bytes());

        RiffBuilder {
            inner,
            open: Vec::new(),
            pad: false,
        }
    }

    /// Write a pad byte after every odd sized chunk
    pub fn padded(mut self) -> Self {
        self.pad = true;
        self
    }

    pub fn write_raw(&mut self, data: &[u8]) {
        self.inner.extend_from_slice(data);
    }

    pub fn write_chunk(&mut self, id: &[u8; 4], data: &[u8]) {
        self.inner.extend_from_slice(id);
        self.inner.extend_from_slice(&(data.len() as u32).to_le_bytes());
        self.inner.extend_from_slice(data);

        if self.pad && data.len() % 2 == 1 {
            self.inner.push(0);
        }
    }

    pub fn begin_list(&mut self, typ: &[u8; 4]) {
        self.inner.extend_from_slice(b"LIST");
        self.open.push(self.inner.len());
        self.inner.extend_from_slice(&0u32.to_le_bytes());
        self.inner.extend_from_slice(typ);
    }

    pub fn end_list(&mut self) {
        let at = self.open.pop().expect("end_list without begin_list");
        self.patch_size(at);
    }

    pub fn finish(mut self) -> Vec<u8> {
        assert!(self.open.is_empty(), "unterminated LIST");
        self.patch_size(4);
        self.inner
    }

    // Size covers everything after the size field
    fn patch_size(&mut self, at: usize) {
        let size = (self.inner.len() - at - 4) as u32;
        self.inner[at..at + 4].copy_from_slice(&size.to_le_bytes());
    }
}

#[cfg(test)]
mod test_riff_builder {
    use super::*;

    #[test]
    fn header_only() {
        let data = RiffBuilder::new(Tag(*b"WAVE")).finish();
        assert_eq!(b"RIFF\x04\x00\x00\x00WAVE".to_vec(), data);
    }

    #[test]
    fn list_sizes() {
        let mut builder = RiffBuilder::new(Tag(*b"WAVE"));
        builder.begin_list(b"INFO");
        builder.write_chunk(b"INAM", b"ab");
        builder.end_list();

        let mut expected = b"RIFF\x1a\x00\x00\x00WAVE".to_vec();
        expected.extend_from_slice(b"LIST\x0e\x00\x00\x00INFO");
        expected.extend_from_slice(b"INAM\x02\x00\x00\x00ab");

        assert_eq!(expected, builder.finish());
    }

    #[test]
    fn padded_odd_chunk() {
        let mut builder = RiffBuilder::new(Tag(*b"WAVE")).padded();
        builder.write_chunk(b"odd ", b"x");

        let mut expected = b"RIFF\x0e\x00\x00\x00WAVE".to_vec();
        expected.extend_from_slice(b"odd \x01\x00\x00\x00x\x00");

        assert_eq!(expected, builder.finish());
    }
}

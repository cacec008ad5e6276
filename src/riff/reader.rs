use log::{debug, warn};

use crate::riff::config::{Padding, ReaderConfig};
use crate::riff::raw::{read_tag, slice_at, RawHeader, RiffError};
use crate::riff::region::Region;
use crate::riff::tag::Tag;
use crate::riff::{CHUNK_HEADER_SIZE, HEADER_SIZE};

/// A leaf chunk, borrowed out of the region
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Chunk<'a> {
    pub id: Tag,
    /// Declared payload size
    pub size: u32,
    /// Offset of the chunk header from the start of the file
    pub offset: usize,
    /// The payload, cut short if the file ends before `size` bytes
    pub data: &'a [u8],
}

/// A nested group (`LIST`) header
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Group {
    pub id: Tag,
    /// Size of the type tag plus every nested chunk
    pub size: u32,
    pub typ: Tag,
    pub offset: usize,
    /// Skipped as one blob, nothing will be reported from inside of it
    pub opaque: bool,
}

/// A level had less bytes left than a record claimed
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Underflow {
    pub level: usize,
    pub remaining: usize,
    pub requested: usize,
    /// Cursor position when the deduction was attempted
    pub offset: usize,
}

/// Notifications for group boundaries, all of them are no-op by default.
pub trait GroupObserver {
    fn group_start(&mut self, _depth: usize, _group: &Group) {}
    fn group_end(&mut self, _depth: usize) {}
    fn size_underflow(&mut self, _underflow: &Underflow) {}
}

impl GroupObserver for () {}

impl<O: GroupObserver + ?Sized> GroupObserver for &mut O {
    fn group_start(&mut self, depth: usize, group: &Group) {
        (**self).group_start(depth, group)
    }

    fn group_end(&mut self, depth: usize) {
        (**self).group_end(depth)
    }

    fn size_underflow(&mut self, underflow: &Underflow) {
        (**self).size_underflow(underflow)
    }
}

/// Adapts a pair of closures into a [`GroupObserver`]
pub struct FnObserver<S, E>
where
    S: FnMut(usize, &Group),
    E: FnMut(usize),
{
    start: S,
    end: E,
}

impl<S, E> FnObserver<S, E>
where
    S: FnMut(usize, &Group),
    E: FnMut(usize),
{
    pub fn new(start: S, end: E) -> Self {
        FnObserver { start, end }
    }
}

impl<S, E> GroupObserver for FnObserver<S, E>
where
    S: FnMut(usize, &Group),
    E: FnMut(usize),
{
    fn group_start(&mut self, depth: usize, group: &Group) {
        (self.start)(depth, group)
    }

    fn group_end(&mut self, depth: usize) {
        (self.end)(depth)
    }
}

fn report<O: GroupObserver>(observer: &mut O, underflow: &Underflow) {
    warn!(
        "LIST[{}] size underflow at offset {}, left {} len {}",
        underflow.level, underflow.offset, underflow.remaining, underflow.requested
    );
    observer.size_underflow(underflow);
}

// What the cursor is pointing at
enum Step<'a> {
    Continue,
    Chunk(Chunk<'a>),
}

/// Walks every leaf chunk in a region, descending into groups as it goes.
///
/// Each level keeps a budget of the bytes its group declared, every record
/// consumed is charged against all of the enclosing levels. A group ends when
/// its budget hits zero and the file ends when the top level one does.
pub struct RiffReader<'a, O: GroupObserver> {
    data: &'a [u8],
    config: ReaderConfig,
    observer: O,
    cursor: usize,
    // budgets[0] is the top level, depth is budgets.len() - 1
    budgets: Vec<usize>,
    done: bool,
}

impl<'a, O: GroupObserver> RiffReader<'a, O> {
    pub fn new(region: &'a Region, observer: O) -> Self {
        RiffReader::with_config(region, ReaderConfig::default(), observer)
    }

    pub fn with_config(region: &'a Region, config: ReaderConfig, observer: O) -> Self {
        let data = region.as_bytes();

        RiffReader {
            data,
            config,
            observer,
            cursor: HEADER_SIZE,
            budgets: vec![data.len().saturating_sub(HEADER_SIZE)],
            done: false,
        }
    }

    pub fn current_depth(&self) -> usize {
        self.budgets.len() - 1
    }

    /// Offset of the next record from the start of the file
    pub fn offset(&self) -> usize {
        self.cursor
    }

    /// Remaining bytes for each active level, top level first
    pub fn budgets(&self) -> &[usize] {
        &self.budgets
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    // Charge `len` bytes to the outermost `levels` budgets and move the cursor
    // along, never past the end of the region. Any level that can't cover it
    // is clamped to 0 and handed back.
    fn charge(&mut self, len: usize, levels: usize) -> Vec<Underflow> {
        let offset = self.cursor;
        let mut underflows = vec![];

        for (level, remaining) in self.budgets[..levels].iter_mut().enumerate() {
            if *remaining >= len {
                *remaining -= len;
            } else {
                underflows.push(Underflow {
                    level,
                    remaining: *remaining,
                    requested: len,
                    offset,
                });
                *remaining = 0;
            }
        }

        self.cursor = self.cursor.saturating_add(len).min(self.data.len());
        underflows
    }

    fn consume(&mut self, len: usize) {
        for underflow in self.charge(len, self.budgets.len()) {
            report(&mut self.observer, &underflow);
        }
    }

    // One pad byte after an odd payload, if the region still has it
    fn pad_len(&self, size: usize) -> usize {
        if self.config.padding == Padding::Even && size % 2 == 1 && self.cursor < self.data.len() {
            1
        } else {
            0
        }
    }

    fn close_groups(&mut self) {
        while self.budgets.len() > 1 && self.budgets[self.budgets.len() - 1] == 0 {
            let depth = self.current_depth();
            debug!("LIST.END[{}]", depth);

            self.observer.group_end(depth);
            self.budgets.pop();
        }
    }

    fn step(&mut self) -> Result<Step<'a>, RiffError> {
        let offset = self.cursor;
        let id = read_tag(self.data, offset)?;

        if self.config.is_group(&id) {
            let header = RawHeader::read(self.data, offset)?;
            let typ = read_tag(self.data, offset + CHUNK_HEADER_SIZE)?;

            let depth = self.current_depth() + 1;
            if depth > self.config.max_depth {
                return Err(RiffError::NestingTooDeep {
                    depth,
                    max: self.config.max_depth,
                });
            }

            // The group header counts against the enclosing levels only
            let mut underflows = self.charge(CHUNK_HEADER_SIZE, depth);
            let size = header.size as usize;
            self.budgets.push(size);

            let opaque = self.config.is_opaque(&typ);
            if opaque {
                underflows.extend(self.charge(size, depth + 1));

                // The pad byte sits after the blob, outside of its own level
                let pad = self.pad_len(size);
                underflows.extend(self.charge(pad, depth));
            } else {
                underflows.extend(self.charge(4, depth + 1));
            }

            let group = Group {
                id: header.id,
                size: header.size,
                typ,
                offset,
                opaque,
            };
            debug!("LIST.START[{}] <{}> size {} type <{}>", depth, group.id, group.size, group.typ);

            self.observer.group_start(depth, &group);
            for underflow in &underflows {
                report(&mut self.observer, underflow);
            }
            Ok(Step::Continue)
        } else if self.config.is_info(&id) {
            debug!("INFO marker at offset {}", offset);
            self.consume(4);
            Ok(Step::Continue)
        } else {
            let header = RawHeader::read(self.data, offset)?;
            let start = offset + CHUNK_HEADER_SIZE;
            let size = header.size as usize;

            // Cut the payload at the end of the region, the budget will flag it
            let avail = size.min(self.data.len() - start);
            let data = slice_at(self.data, start, avail)?;

            self.consume(CHUNK_HEADER_SIZE);
            self.consume(size);

            let pad = self.pad_len(size);
            self.consume(pad);

            Ok(Step::Chunk(Chunk {
                id: header.id,
                size: header.size,
                offset,
                data,
            }))
        }
    }
}

impl<'a, O: GroupObserver> Iterator for RiffReader<'a, O> {
    type Item = Result<Chunk<'a>, RiffError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.close_groups();

            if self.budgets.len() == 1 && self.budgets[0] == 0 {
                self.done = true;
                return None;
            }

            match self.step() {
                Ok(Step::Continue) => (),
                Ok(Step::Chunk(chunk)) => return Some(Ok(chunk)),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

use std::collections::VecDeque;

use crate::riff::config::ReaderConfig;
use crate::riff::raw::RiffError;
use crate::riff::reader::{Chunk, Group, GroupObserver, RiffReader, Underflow};
use crate::riff::region::Region;
use crate::riff::tag::Tag;
use crate::riff::LIST_MAGIC;

/// One step of a traversal, in file order
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Event<'a> {
    GroupStart { depth: usize, group: Group },
    Chunk { depth: usize, chunk: Chunk<'a> },
    /// `id` is the marker the group was opened with
    GroupEnd { depth: usize, id: Tag },
    Underflow(Underflow),
}

// Notifications queue up here while the reader is busy
#[derive(Default)]
struct Pending<'a> {
    queue: VecDeque<Event<'a>>,
    // Ids of the groups still open, innermost last
    open: Vec<Tag>,
}

impl<'a> GroupObserver for Pending<'a> {
    fn group_start(&mut self, depth: usize, group: &Group) {
        self.open.push(group.id);
        self.queue.push_back(Event::GroupStart { depth, group: *group });
    }

    fn group_end(&mut self, depth: usize) {
        let id = self.open.pop().unwrap_or(LIST_MAGIC);
        self.queue.push_back(Event::GroupEnd { depth, id });
    }

    fn size_underflow(&mut self, underflow: &Underflow) {
        self.queue.push_back(Event::Underflow(*underflow));
    }
}

/// Flattens the reader and its group notifications into a single stream.
pub struct Events<'a> {
    inner: RiffReader<'a, Pending<'a>>,
    finished: bool,
    // Held back until everything queued before it is handed out
    failure: Option<RiffError>,
}

impl<'a> Events<'a> {
    pub fn new(region: &'a Region, config: ReaderConfig) -> Self {
        Events {
            inner: RiffReader::with_config(region, config, Pending::default()),
            finished: false,
            failure: None,
        }
    }

    pub fn current_depth(&self) -> usize {
        self.inner.current_depth()
    }
}

impl<'a> Iterator for Events<'a> {
    type Item = Result<Event<'a>, RiffError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.inner.observer_mut().queue.pop_front() {
                return Some(Ok(event));
            }
            if self.finished {
                return self.failure.take().map(Err);
            }

            match self.inner.next() {
                // Group ends may have been queued on the way out
                None => self.finished = true,
                Some(Err(e)) => {
                    self.finished = true;
                    self.failure = Some(e);
                }
                Some(Ok(chunk)) => {
                    let depth = self.inner.current_depth();
                    self.inner.observer_mut().queue.push_back(Event::Chunk { depth, chunk });
                }
            }
        }
    }
}

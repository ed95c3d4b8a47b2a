//! Iterator
//!
//! Sequential walk over the record region `[DIRECTORY_SIZE, table_start)`,
//! in storage order and independent of hashing.

use crate::error::Result;
use crate::format::DIRECTORY_SIZE;

use super::{Reader, Record};

impl Reader {
    /// Position of the record following `prev`
    ///
    /// - `None` asks for the first record
    /// - `Ok(None)` means there is no further record (`prev` was the last, or
    ///   the database is empty)
    pub fn next_key(&self, prev: Option<u64>) -> Result<Option<u64>> {
        let candidate = match prev {
            None => DIRECTORY_SIZE,
            Some(position) => position + self.record_header(position)?.record_len(),
        };

        if candidate < self.directory.table_start {
            Ok(Some(candidate))
        } else {
            Ok(None)
        }
    }

    /// Whether the database holds no records
    pub fn is_empty(&self) -> bool {
        self.directory.table_start <= DIRECTORY_SIZE
    }

    /// Iterate over every record in storage order
    pub fn records(&self) -> Records<'_> {
        Records {
            reader: self,
            cursor: Cursor::Start,
        }
    }
}

/// Where the iterator stands
#[derive(Debug, Clone, Copy)]
enum Cursor {
    /// Nothing yielded yet
    Start,
    /// Last yielded record position
    After(u64),
    /// Exhausted, or stopped after an error
    Done,
}

/// Iterator over all records, yielding decoded keys and values
pub struct Records<'a> {
    reader: &'a Reader,
    cursor: Cursor,
}

impl<'a> Records<'a> {
    fn advance(&mut self) -> Result<Option<u64>> {
        let next = match self.cursor {
            Cursor::Start => self.reader.next_key(None)?,
            Cursor::After(position) => self.reader.next_key(Some(position))?,
            Cursor::Done => None,
        };
        self.cursor = next.map_or(Cursor::Done, Cursor::After);
        Ok(next)
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = match self.advance() {
            Ok(Some(position)) => position,
            Ok(None) => return None,
            Err(e) => {
                self.cursor = Cursor::Done;
                return Some(Err(e));
            }
        };

        match self.reader.record_at(position) {
            Ok(record) => Some(Ok(record)),
            Err(e) => {
                self.cursor = Cursor::Done;
                Some(Err(e))
            }
        }
    }
}

impl<'a> std::iter::FusedIterator for Records<'a> {}

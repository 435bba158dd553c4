//! Loading a JSONL message dump into memory.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::message::{Message, MessageId};

/// A parsed message together with the exact line it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub message: Message,
    /// Source line without its line terminator.
    pub line: String,
}

impl Record {
    pub fn parse(line: &str) -> Option<Self> {
        Message::parse(line).map(|message| Record {
            message,
            line: line.to_string(),
        })
    }

    /// Parses a raw line, dropping a trailing `\r`. Invalid UTF-8 is treated
    /// like any other malformed line.
    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        let line = std::str::from_utf8(bytes).ok()?;
        Self::parse(line)
    }

    pub fn id(&self) -> Option<&MessageId> {
        self.message.id()
    }
}

/// All successfully parsed records in file order, plus an id lookup.
///
/// Duplicate ids are all kept in [`Dataset::records`]; the lookup points at
/// the last occurrence.
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<Record>,
    by_id: HashMap<MessageId, usize>,
}

impl Dataset {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let read_err = |source: io::Error| Error::Read {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(read_err)?;
        let dataset = Self::from_reader(BufReader::new(file)).map_err(read_err)?;
        debug!(path = %path.display(), records = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    /// Reads records line by line. Lines that do not parse are skipped;
    /// only I/O errors are returned.
    ///
    /// Lines end at `\n` (optionally preceded by `\r`); a lone `\r` is not a
    /// line break.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut records = Vec::new();
        for line in reader.split(b'\n') {
            if let Some(record) = Record::from_bytes(&line?) {
                records.push(record);
            }
        }
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        let by_id = records
            .iter()
            .enumerate()
            .filter_map(|(pos, record)| record.id().map(|id| (id.clone(), pos)))
            .collect();

        Self { records, by_id }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.records.iter().map(|record| &record.message)
    }

    pub fn contains(&self, id: &MessageId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Parent id of `message`, but only if that parent was loaded.
    pub fn resolved_parent<'a>(&self, message: &'a Message) -> Option<&'a MessageId> {
        message.parent_id().filter(|pid| self.contains(pid))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up the last record carrying `id`.
    #[cfg(test)]
    fn get(&self, id: &str) -> Option<&Record> {
        self.by_id.get(&MessageId::from(id)).map(|&pos| &self.records[pos])
    }

    #[cfg(test)]
    fn indexed(&self) -> usize {
        self.by_id.len()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

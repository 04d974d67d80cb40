//! Binary form of hash values.
//!
//! A record is the kind discriminant (`u32`), the word count (`u64`) and the words
//! themselves, every integer fixed-width and big-endian.

use bincode::config::{self, BigEndian, Configuration, Fixint, Limit};
use bincode::{Decode, Encode};
use std::io::{Read, Write};

use super::{ExtImageHash, HashValue, ImageHash};
use crate::error::{Error, Result};
use crate::types::Kind;

// Upper bound on a decoded record; a 64×64 hash needs well under 1 KiB
const MAX_RECORD_BYTES: usize = 1 << 20;

type RecordConfig = Configuration<BigEndian, Fixint, Limit<MAX_RECORD_BYTES>>;

fn record_config() -> RecordConfig {
    config::standard()
        .with_big_endian()
        .with_fixed_int_encoding()
        .with_limit::<MAX_RECORD_BYTES>()
}

#[derive(Debug, Encode, Decode)]
struct HashRecord {
    kind: Kind,
    words: Vec<u64>,
}

fn write_record<W: Write>(kind: Kind, words: &[u64], sink: &mut W) -> Result<()> {
    let record = HashRecord {
        kind,
        words: words.to_vec(),
    };
    bincode::encode_into_std_write(record, sink, record_config())?;
    Ok(())
}

fn read_record<R: Read>(source: &mut R) -> Result<HashRecord> {
    bincode::decode_from_std_read(source, record_config())
        .map_err(|e| Error::Parse(format!("couldn't load hash: {}", e)))
}

impl ImageHash {
    /// Write the binary form of this hash to `sink`.
    pub fn dump<W: Write>(&self, sink: &mut W) -> Result<()> {
        write_record(self.kind(), self.words(), sink)
    }

    /// Read a hash written by [`dump`](Self::dump). The record must hold exactly one word.
    pub fn load<R: Read>(source: &mut R) -> Result<Self> {
        let record = read_record(source)?;
        match record.words.as_slice() {
            [word] => Ok(Self::new(*word, record.kind)),
            words => Err(Error::Parse(format!(
                "fixed hash record holds {} words, expected 1",
                words.len()
            ))),
        }
    }
}

impl ExtImageHash {
    /// Write the binary form of this hash to `sink`.
    pub fn dump<W: Write>(&self, sink: &mut W) -> Result<()> {
        write_record(self.kind(), self.words(), sink)
    }

    /// Read a hash written by [`dump`](Self::dump) or by [`ImageHash::dump`].
    pub fn load<R: Read>(source: &mut R) -> Result<Self> {
        let record = read_record(source)?;
        if record.words.is_empty() {
            return Err(Error::Parse("extended hash record holds no words".to_string()));
        }
        Self::new(record.words, record.kind)
    }
}

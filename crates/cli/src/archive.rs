// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming zip writer.
//!
//! Every entry is deflated with general-purpose flag bit 3 set: the local
//! header carries zero CRC and sizes, and the real values follow the data in
//! a data descriptor. Archives therefore start with
//! `PK\x03\x04\x14\x00\x08`. Only the classic (non-zip64) format is written.

use std::io::{self, Read};

use flate2::CrcReader;
use flate2::Compression;
use flate2::write::DeflateEncoder;

const LOCAL_HEADER_SIGNATURE: u32 = 0x0403_4b50;
const DATA_DESCRIPTOR_SIGNATURE: u32 = 0x0807_4b50;
const CENTRAL_HEADER_SIGNATURE: u32 = 0x0201_4b50;
const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;

/// Version needed to extract: 2.0 (deflate).
const VERSION_NEEDED: u16 = 20;
/// Version made by: unix, spec 2.0.
const VERSION_MADE_BY: u16 = (3 << 8) | 20;

const FLAG_DATA_DESCRIPTOR: u16 = 1 << 3;
const FLAG_UTF8_NAME: u16 = 1 << 11;

const METHOD_DEFLATE: u16 = 8;

/// DOS time 00:00:00.
const DOS_TIME: u16 = 0;
/// DOS date 1980-01-01.
const DOS_DATE: u16 = (1 << 5) | 1;

/// Unix mode `-rw-r--r--` stored in the external attributes.
const REGULAR_FILE_ATTRIBUTES: u32 = 0o100_644 << 16;

/// Central directory record of an entry already written.
struct Entry {
    name: String,
    flags: u16,
    crc: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    offset: u32,
}

/// In-memory zip archive built one entry at a time.
pub struct ZipStream {
    out: Vec<u8>,
    entries: Vec<Entry>,
}

impl Default for ZipStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ZipStream {
    pub fn new() -> Self {
        Self {
            out: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Number of entries written so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deflate everything `reader` yields into an entry called `name`.
    pub fn add_file(&mut self, name: &str, reader: impl Read) -> io::Result<()> {
        let offset = to_u32(self.out.len(), "archive offset")?;
        let name_len = to_u16(name.len(), "entry name")?;
        let flags = if name.is_ascii() {
            FLAG_DATA_DESCRIPTOR
        } else {
            FLAG_DATA_DESCRIPTOR | FLAG_UTF8_NAME
        };

        put_u32(&mut self.out, LOCAL_HEADER_SIGNATURE);
        put_u16(&mut self.out, VERSION_NEEDED);
        put_u16(&mut self.out, flags);
        put_u16(&mut self.out, METHOD_DEFLATE);
        put_u16(&mut self.out, DOS_TIME);
        put_u16(&mut self.out, DOS_DATE);
        put_u32(&mut self.out, 0); // crc
        put_u32(&mut self.out, 0); // compressed size
        put_u32(&mut self.out, 0); // uncompressed size
        put_u16(&mut self.out, name_len);
        put_u16(&mut self.out, 0); // extra field length
        self.out.extend_from_slice(name.as_bytes());

        let data_start = self.out.len();
        let mut source = CrcReader::new(reader);
        let mut encoder = DeflateEncoder::new(&mut self.out, Compression::default());
        let uncompressed = io::copy(&mut source, &mut encoder)?;
        encoder.finish()?;

        let crc = source.crc().sum();
        let compressed_size = to_u32(self.out.len() - data_start, "compressed size")?;
        let uncompressed_size = to_u32(uncompressed, "uncompressed size")?;

        put_u32(&mut self.out, DATA_DESCRIPTOR_SIGNATURE);
        put_u32(&mut self.out, crc);
        put_u32(&mut self.out, compressed_size);
        put_u32(&mut self.out, uncompressed_size);

        self.entries.push(Entry {
            name: name.to_string(),
            flags,
            crc,
            compressed_size,
            uncompressed_size,
            offset,
        });
        Ok(())
    }

    /// Write the central directory and return the archive bytes.
    pub fn finish(mut self) -> io::Result<Vec<u8>> {
        let directory_start = self.out.len();
        let directory_offset = to_u32(directory_start, "central directory offset")?;

        for entry in &self.entries {
            put_u32(&mut self.out, CENTRAL_HEADER_SIGNATURE);
            put_u16(&mut self.out, VERSION_MADE_BY);
            put_u16(&mut self.out, VERSION_NEEDED);
            put_u16(&mut self.out, entry.flags);
            put_u16(&mut self.out, METHOD_DEFLATE);
            put_u16(&mut self.out, DOS_TIME);
            put_u16(&mut self.out, DOS_DATE);
            put_u32(&mut self.out, entry.crc);
            put_u32(&mut self.out, entry.compressed_size);
            put_u32(&mut self.out, entry.uncompressed_size);
            put_u16(&mut self.out, to_u16(entry.name.len(), "entry name")?);
            put_u16(&mut self.out, 0); // extra field length
            put_u16(&mut self.out, 0); // comment length
            put_u16(&mut self.out, 0); // disk number
            put_u16(&mut self.out, 0); // internal attributes
            put_u32(&mut self.out, REGULAR_FILE_ATTRIBUTES);
            put_u32(&mut self.out, entry.offset);
            self.out.extend_from_slice(entry.name.as_bytes());
        }

        let directory_size = to_u32(self.out.len() - directory_start, "central directory size")?;
        let count = to_u16(self.entries.len(), "entry count")?;

        put_u32(&mut self.out, END_OF_CENTRAL_DIRECTORY_SIGNATURE);
        put_u16(&mut self.out, 0); // this disk
        put_u16(&mut self.out, 0); // disk with central directory
        put_u16(&mut self.out, count);
        put_u16(&mut self.out, count);
        put_u32(&mut self.out, directory_size);
        put_u32(&mut self.out, directory_offset);
        put_u16(&mut self.out, 0); // comment length

        Ok(self.out)
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn too_large(what: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{what} exceeds the zip format limit"),
    )
}

fn to_u32(value: impl TryInto<u32>, what: &str) -> io::Result<u32> {
    value.try_into().map_err(|_| too_large(what))
}

fn to_u16(value: usize, what: &str) -> io::Result<u16> {
    u16::try_from(value).map_err(|_| too_large(what))
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;

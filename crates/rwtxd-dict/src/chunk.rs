//! Chunk framing.
//!
//! Everything in a dictionary file is a chunk: a 12-byte header carrying a
//! type code, the payload length, and the library version, followed by the
//! payload itself. Containers nest child chunks inside their payload, so
//! walking a file means walking length windows.

use rwtxd_common::{BinaryReader, BinaryWriter};

use crate::Result;

/// Size of a chunk header on the wire.
pub const HEADER_SIZE: usize = 12;

/// A chunk type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkType(pub u32);

impl ChunkType {
    /// Binary struct payload.
    pub const STRUCT: Self = Self(0x01);
    /// String payload.
    pub const STRING: Self = Self(0x02);
    /// Plugin extension container.
    pub const EXTENSION: Self = Self(0x03);
    /// A platform-native texture.
    pub const TEXTURE_NATIVE: Self = Self(0x15);
    /// A texture dictionary.
    pub const TEX_DICTIONARY: Self = Self(0x16);
}

/// The 12-byte header preceding every chunk payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Type code of the chunk.
    pub chunk_type: ChunkType,
    /// Byte count of the payload following the header.
    pub length: u32,
    /// Library version word.
    pub version: u32,
}

impl ChunkHeader {
    /// Create a header.
    pub const fn new(chunk_type: ChunkType, length: u32, version: u32) -> Self {
        Self {
            chunk_type,
            length,
            version,
        }
    }

    /// Read a header, consuming exactly [`HEADER_SIZE`] bytes.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let chunk_type = ChunkType(reader.read_u32()?);
        let length = reader.read_u32()?;
        let version = reader.read_u32()?;
        Ok(Self {
            chunk_type,
            length,
            version,
        })
    }

    /// Write the header, producing exactly [`HEADER_SIZE`] bytes.
    pub fn write(&self, writer: &mut BinaryWriter) -> usize {
        writer.write_u32(self.chunk_type.0);
        writer.write_u32(self.length);
        writer.write_u32(self.version);
        HEADER_SIZE
    }
}

/// Cursor over the child chunks inside a parent's length window.
///
/// [`next`](Children::next) yields child headers until the window or the
/// data runs out; the caller decides whether to descend into a child's
/// payload or [`skip`](Children::skip) past it. Unknown child types are
/// skipped this way rather than treated as errors.
#[derive(Debug, Clone, Copy)]
pub struct Children {
    end: usize,
}

impl Children {
    /// Open the window of a parent whose header was just read.
    pub fn new(reader: &BinaryReader<'_>, parent_length: u32) -> Self {
        Self {
            end: reader.position() + parent_length as usize,
        }
    }

    /// Absolute position where the parent's payload ends.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Read the next child header, or `None` when the window is exhausted.
    pub fn next(&self, reader: &mut BinaryReader<'_>) -> Option<ChunkHeader> {
        if reader.position() + HEADER_SIZE > self.end {
            return None;
        }
        ChunkHeader::read(reader).ok()
    }

    /// Advance past a child's payload without reading it.
    pub fn skip(&self, reader: &mut BinaryReader<'_>, header: &ChunkHeader) {
        reader.advance(header.length as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_round_trip() {
        let header = ChunkHeader::new(ChunkType::TEX_DICTIONARY, 12345, 0x1803FFFF);

        let mut writer = BinaryWriter::new();
        assert_eq!(header.write(&mut writer), HEADER_SIZE);

        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), HEADER_SIZE);

        let mut reader = BinaryReader::new(&bytes);
        let back = ChunkHeader::read(&mut reader).unwrap();
        assert_eq!(back, header);
        assert_eq!(reader.position(), HEADER_SIZE);
    }

    #[test]
    fn test_header_round_trip_sweep() {
        // Writing and reading back yields the identical triple for a
        // spread of values in each field.
        let values = [0u32, 1, 0x15, 0x16, 0x0800FFFF, 0x1803FFFF, u32::MAX];
        for &t in &values {
            for &l in &values {
                for &v in &values {
                    let header = ChunkHeader::new(ChunkType(t), l, v);
                    let mut writer = BinaryWriter::new();
                    header.write(&mut writer);
                    let bytes = writer.into_bytes();
                    let back = ChunkHeader::read(&mut BinaryReader::new(&bytes)).unwrap();
                    assert_eq!(back, header);
                }
            }
        }
    }

    #[test]
    fn test_header_read_from_empty() {
        let mut reader = BinaryReader::new(&[]);
        assert!(ChunkHeader::read(&mut reader).is_err());
    }

    #[test]
    fn test_children_walk_and_skip() {
        let mut writer = BinaryWriter::new();
        ChunkHeader::new(ChunkType::STRUCT, 4, 0).write(&mut writer);
        writer.write_u32(0xAABBCCDD);
        ChunkHeader::new(ChunkType(0x99), 2, 0).write(&mut writer); // unknown
        writer.write_u16(0);
        ChunkHeader::new(ChunkType::EXTENSION, 0, 0).write(&mut writer);
        let bytes = writer.into_bytes();

        let mut reader = BinaryReader::new(&bytes);
        let children = Children::new(&reader, bytes.len() as u32);

        let mut seen = Vec::new();
        while let Some(child) = children.next(&mut reader) {
            seen.push(child.chunk_type);
            children.skip(&mut reader, &child);
        }

        assert_eq!(
            seen,
            vec![ChunkType::STRUCT, ChunkType(0x99), ChunkType::EXTENSION]
        );
        assert_eq!(reader.position(), children.end());
    }

    #[test]
    fn test_children_stop_at_window() {
        // A child past the parent window is never yielded.
        let mut writer = BinaryWriter::new();
        ChunkHeader::new(ChunkType::STRUCT, 0, 0).write(&mut writer);
        ChunkHeader::new(ChunkType::STRING, 0, 0).write(&mut writer);
        let bytes = writer.into_bytes();

        let mut reader = BinaryReader::new(&bytes);
        let children = Children::new(&reader, HEADER_SIZE as u32);

        assert_eq!(
            children.next(&mut reader).map(|c| c.chunk_type),
            Some(ChunkType::STRUCT)
        );
        assert!(children.next(&mut reader).is_none());
    }
}

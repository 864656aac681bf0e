//! Texture-dictionary codec and container.
//!
//! A dictionary file is one TEXDICTIONARY chunk: a STRUCT child with the
//! texture count, the TEXTURENATIVE children, and a trailing EXTENSION.
//! Loading is best-effort across children: unknown chunks are skipped and
//! a wrong texture count just means the walk stops when the length window
//! runs out. Saving is strict and builds the whole file in memory before
//! anything touches the filesystem.

use std::fs;
use std::hash::BuildHasherDefault;
use std::path::Path;

use hashbrown::HashMap as FastHashMap;
use rustc_hash::FxHasher;
use rwtxd_common::{BinaryReader, BinaryWriter};

use crate::chunk::{ChunkHeader, ChunkType, Children, HEADER_SIZE};
use crate::texture::Texture;
use crate::{Error, Result};

type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// Dictionary version word written for freshly created dictionaries.
pub const DEFAULT_VERSION: u32 = 0x1803FFFF;

/// Game release a dictionary's version word corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameVersion {
    /// GTA III, early version encodings.
    Gta3Early,
    /// GTA III, late encoding.
    Gta3,
    /// Vice City on PlayStation 2.
    ViceCityPs2,
    /// Vice City on PC.
    ViceCityPc,
    /// San Andreas.
    SanAndreas,
    /// Anything else; the dictionary still parses and the version word is
    /// preserved byte-for-byte.
    Unknown,
}

impl GameVersion {
    /// Classify a 32-bit library version word.
    pub const fn detect(version: u32) -> Self {
        match version {
            0x00000302 | 0x00000304 | 0x00000310 => GameVersion::Gta3Early,
            0x0800FFFF => GameVersion::Gta3,
            0x0C02FFFF => GameVersion::ViceCityPs2,
            0x1003FFFF => GameVersion::ViceCityPc,
            0x1803FFFF => GameVersion::SanAndreas,
            _ => GameVersion::Unknown,
        }
    }
}

impl std::fmt::Display for GameVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameVersion::Gta3Early | GameVersion::Gta3 => "GTA III",
            GameVersion::ViceCityPs2 => "Vice City (PS2)",
            GameVersion::ViceCityPc => "Vice City (PC)",
            GameVersion::SanAndreas => "San Andreas",
            GameVersion::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// The outcome of a best-effort load.
///
/// Holds every texture parsed before the failure point; `error` is `None`
/// when the whole dictionary parsed cleanly.
#[derive(Debug)]
pub struct PartialLoad {
    /// The dictionary with everything that parsed.
    pub dictionary: TextureDictionary,
    /// The error that stopped parsing, if any.
    pub error: Option<Error>,
}

/// An ordered collection of named textures.
#[derive(Debug)]
pub struct TextureDictionary {
    version: u32,
    textures: Vec<Texture>,
    name_index: FxHashMap<String, usize>,
}

impl Default for TextureDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureDictionary {
    /// Create an empty dictionary targeting San Andreas.
    pub fn new() -> Self {
        Self {
            version: DEFAULT_VERSION,
            textures: Vec::new(),
            name_index: FxHashMap::default(),
        }
    }

    /// The raw 32-bit version word.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Replace the version word.
    pub fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    /// Game release derived from the version word.
    pub fn game_version(&self) -> GameVersion {
        GameVersion::detect(self.version)
    }

    /// Number of textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// Whether the dictionary holds no textures.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Texture at a position, in insertion order.
    pub fn get(&self, index: usize) -> Option<&Texture> {
        self.textures.get(index)
    }

    /// Mutable texture at a position.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Texture> {
        self.textures.get_mut(index)
    }

    /// Iterate textures in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Texture> {
        self.textures.iter()
    }

    /// Position of a texture by case-insensitive name.
    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.name_index.get(&fold_name(name)).copied()
    }

    /// Texture by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&Texture> {
        self.find_index(name).and_then(|i| self.textures.get(i))
    }

    /// Mutable texture by case-insensitive name.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Texture> {
        self.find_index(name).and_then(|i| self.textures.get_mut(i))
    }

    /// Append a texture, rejecting case-insensitive name collisions.
    ///
    /// The collision is surfaced rather than resolved so an interactive
    /// caller can prompt before replacing.
    pub fn add(&mut self, texture: Texture) -> Result<usize> {
        let key = fold_name(&texture.name);
        if self.name_index.contains_key(&key) {
            return Err(Error::DuplicateName(texture.name.clone()));
        }
        let index = self.textures.len();
        self.name_index.insert(key, index);
        self.textures.push(texture);
        Ok(index)
    }

    /// Append a texture loaded from a file, where duplicate names are a
    /// fact of life; the index keeps the latest occurrence.
    fn push_loaded(&mut self, texture: Texture) {
        let key = fold_name(&texture.name);
        self.name_index.insert(key, self.textures.len());
        self.textures.push(texture);
    }

    /// Remove the texture at a position. Returns it, or `None` when the
    /// index is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<Texture> {
        if index >= self.textures.len() {
            return None;
        }
        let texture = self.textures.remove(index);
        self.rebuild_index();
        Some(texture)
    }

    /// Remove a texture by case-insensitive name.
    pub fn remove(&mut self, name: &str) -> Option<Texture> {
        let index = self.find_index(name)?;
        self.remove_at(index)
    }

    /// Drop all textures.
    pub fn clear(&mut self) {
        self.textures.clear();
        self.name_index.clear();
    }

    fn rebuild_index(&mut self) {
        self.name_index.clear();
        for (index, texture) in self.textures.iter().enumerate() {
            self.name_index.insert(fold_name(&texture.name), index);
        }
    }

    /// Parse a dictionary, keeping whatever loaded before any failure.
    ///
    /// The reader is left at the end of the dictionary's length window
    /// when the outer chunk itself was readable.
    pub fn read_partial(reader: &mut BinaryReader<'_>) -> PartialLoad {
        let mut dictionary = TextureDictionary::new();

        let header = match ChunkHeader::read(reader) {
            Ok(header) => header,
            Err(error) => {
                return PartialLoad {
                    dictionary,
                    error: Some(error),
                }
            }
        };
        if header.chunk_type != ChunkType::TEX_DICTIONARY {
            return PartialLoad {
                dictionary,
                error: Some(Error::NotADictionary {
                    found: header.chunk_type.0,
                }),
            };
        }

        dictionary.version = header.version;

        let window = Children::new(reader, header.length);
        let mut error = None;

        while let Some(child) = window.next(reader) {
            let payload_start = reader.position();
            match child.chunk_type {
                ChunkType::STRUCT => {
                    // {u16 texture_count, u16 device_id}; the count is
                    // advisory, the walk below is driven by the window.
                    if let Ok(count) = reader.clone().read_u16() {
                        dictionary.textures.reserve(count as usize);
                    }
                }
                ChunkType::TEXTURE_NATIVE => {
                    match Texture::read_body(reader, &child) {
                        Ok(texture) => dictionary.push_loaded(texture),
                        Err(e) => {
                            error = Some(e);
                            break;
                        }
                    }
                }
                _ => {}
            }
            reader.seek(payload_start + child.length as usize);
        }

        reader.seek(window.end());

        PartialLoad { dictionary, error }
    }

    /// Parse a dictionary from bytes, failing on any malformed child.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        Self::read_from(&mut reader)
    }

    /// Parse a dictionary from a reader, failing on any malformed child.
    pub fn read_from(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let PartialLoad { dictionary, error } = Self::read_partial(reader);
        match error {
            None => Ok(dictionary),
            Some(error) => Err(error),
        }
    }

    /// Load a dictionary file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Serialize the dictionary to bytes.
    ///
    /// Fails without partial output when any texture cannot be written.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = BinaryWriter::new();

        let dict_start = writer.position();
        ChunkHeader::new(ChunkType::TEX_DICTIONARY, 0, self.version).write(&mut writer);

        ChunkHeader::new(ChunkType::STRUCT, 4, self.version).write(&mut writer);
        writer.write_u16(self.textures.len() as u16);
        writer.write_u16(0); // device id

        for texture in &self.textures {
            texture.write(&mut writer)?;
        }

        ChunkHeader::new(ChunkType::EXTENSION, 0, self.version).write(&mut writer);

        let length = writer.position() - dict_start - HEADER_SIZE;
        writer.patch_u32(dict_start + 4, length as u32);

        Ok(writer.into_bytes())
    }

    /// Save the dictionary to a file.
    ///
    /// The bytes are built first, so a failed serialization leaves the
    /// target untouched.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

/// Case-fold a texture name for index lookup; ASCII only, other bytes are
/// left unchanged.
fn fold_name(name: &str) -> String {
    name.to_ascii_lowercase()
}

use std::fmt;

use crate::errors::{ Result, ErrorKind };
use crate::id::Id;

pub const OFS_DELTA: u8 = 6;
pub const REF_DELTA: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Commit,
    Tree,
    Blob,
    Tag,
    OfsDelta,
    RefDelta
}

impl Kind {
    pub fn from_tag(tag: u8) -> Result<Kind> {
        Ok(match tag {
            1 => Kind::Commit,
            2 => Kind::Tree,
            3 => Kind::Blob,
            4 => Kind::Tag,
            OFS_DELTA => Kind::OfsDelta,
            REF_DELTA => Kind::RefDelta,
            _ => return Err(ErrorKind::UnknownObjectType(tag).into())
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Commit => "commit",
            Kind::Tree => "tree",
            Kind::Blob => "blob",
            Kind::Tag => "tag",
            Kind::OfsDelta => "ofs-delta",
            Kind::RefDelta => "ref-delta"
        }
    }

    pub fn is_delta(&self) -> bool {
        match self {
            Kind::OfsDelta | Kind::RefDelta => true,
            _ => false
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a delta's base object lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base {
    /// Identifier of the base, possibly outside this pack.
    Id(Id),
    /// Absolute offset of the base's record in this pack.
    Offset(u64)
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Base::Id(id) => write!(f, "{}", id),
            Base::Offset(offset) => write!(f, "@{}", offset)
        }
    }
}

/// Descriptor for one record of a packfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub(crate) offset: u64,
    pub(crate) kind: Kind,
    pub(crate) size: u64,
    pub(crate) base: Option<Base>,
    pub(crate) packed_len: u64,
    pub(crate) crc32: u32
}

impl Object {
    /// Offset of the record's first header byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Inflated size of the record's payload. For deltas this is the size of
    /// the delta instructions, not of the object they produce.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn base(&self) -> Option<&Base> {
        self.base.as_ref()
    }

    pub fn base_offset(&self) -> Option<u64> {
        match self.base {
            Some(Base::Offset(offset)) => Some(offset),
            _ => None
        }
    }

    pub fn base_id(&self) -> Option<&Id> {
        match self.base {
            Some(Base::Id(ref id)) => Some(id),
            _ => None
        }
    }

    /// Bytes the record occupies in the pack: header, base reference and
    /// compressed payload.
    pub fn packed_len(&self) -> u64 {
        self.packed_len
    }

    /// CRC-32 of the record's packed bytes, as stored in a v2 pack index.
    pub fn crc32(&self) -> u32 {
        self.crc32
    }
}

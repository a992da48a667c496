use byteorder::{ BigEndian, ByteOrder };

use crate::errors::{ Result, ErrorKind };

// pack format is:
//
//      4 byte magic number ('P', 'A', 'C', 'K')
//      4 byte version number (2 or 3)
//      4 byte object count (N)
//      N objects
//      20 byte checksum
pub const HEADER_SIZE: usize = 12;
pub const SIGNATURE: u32 = 0x5041_434b;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub object_count: u32
}

pub fn parse_header(bytes: &[u8]) -> Result<Header> {
    if bytes.len() < HEADER_SIZE {
        return Err(ErrorKind::TruncatedInput(HEADER_SIZE, bytes.len()).into())
    }

    if BigEndian::read_u32(&bytes[0..4]) != SIGNATURE {
        let mut found = [0u8; 4];
        found.copy_from_slice(&bytes[0..4]);
        return Err(ErrorKind::BadSignature(found).into())
    }

    let version = BigEndian::read_u32(&bytes[4..8]);
    if version != 2 && version != 3 {
        return Err(ErrorKind::BadVersion(version).into())
    }

    Ok(Header {
        version,
        object_count: BigEndian::read_u32(&bytes[8..12])
    })
}

/// Decode an object's type tag and inflated size.
///
/// The first byte holds a continuation bit, three type bits and the low four
/// bits of the size; every following byte adds seven more bits, least
/// significant group first.
pub fn read_type_and_size<F>(mut next_byte: F) -> Result<(u8, u64)>
    where F: FnMut() -> Result<u8> {

    let mut byte = next_byte()?;
    let tag = (byte >> 4) & 0x7;
    let mut size = u64::from(byte & 0xf);
    let mut shift = 4;

    while byte & 0x80 != 0 {
        byte = next_byte()?;
        let bits = u64::from(byte & 0x7f);
        if shift >= 64 || (bits << shift) >> shift != bits {
            return Err(ErrorKind::BadObjectHeader.into())
        }

        size += bits << shift;
        shift += 7;
    }

    Ok((tag, size))
}

/// Decode the backwards distance from an ofs-delta to its base.
///
/// Each continuation adds one before shifting, so a two byte encoding starts
/// where the one byte encodings stop, and so on.
pub fn read_ofs_distance<F>(mut next_byte: F) -> Result<u64>
    where F: FnMut() -> Result<u8> {

    let mut byte = next_byte()?;
    let mut distance = u64::from(byte & 0x7f);

    while byte & 0x80 != 0 {
        distance = distance.wrapping_add(1);
        if distance == 0 || distance >> (64 - 7) != 0 {
            return Err(ErrorKind::OffsetOverflow.into())
        }

        byte = next_byte()?;
        distance = (distance << 7) + u64::from(byte & 0x7f);
    }

    Ok(distance)
}

/// Resolve an ofs-delta distance against the delta's own offset.
pub fn resolve_base_offset(offset: u64, distance: u64) -> Result<u64> {
    match offset.checked_sub(distance) {
        Some(base) if base > 0 && base < offset => Ok(base),
        _ => Err(ErrorKind::DeltaBaseOutOfBounds(offset, distance).into())
    }
}

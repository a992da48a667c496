use std::convert::TryFrom;
use std::io::Read;
use crc::{ Crc, Digest, CRC_32_ISO_HDLC };
use tracing::{ debug, trace };

use crate::errors::{ Result, ErrorKind };
use crate::id::{ Id, ID_LEN };

pub mod buffer;
pub mod catalog;
pub mod header;
pub mod inflate;
pub mod iter;
pub mod object;

use self::buffer::Buffer;
use self::header::{ Header, HEADER_SIZE };
use self::inflate::{ Inflate, Step, ZlibInflater };
use self::iter::{ Entry, Entries };
use self::object::{ Base, Kind, Object };

static CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

const OUTPUT_CHUNK: usize = 8192;

/// A packfile being read front to back.
///
/// Records are variable length and carry no index, so the only way to find
/// where one ends is to inflate it; `offset` always sits at the first byte
/// nothing has consumed yet.
pub struct Packfile<R> {
    input: Buffer<R>,
    header: Option<Header>,
    offset: u64,
    read: u32,
    crc: Digest<'static, u32>
}

impl<R: Read> Packfile<R> {
    pub fn new(reader: R) -> Self {
        Packfile::with_capacity(reader, buffer::DEFAULT_BUFFER_SIZE)
    }

    /// `capacity` is the initial read-ahead size; the buffer grows past it
    /// when a single request needs more.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Packfile {
            input: Buffer::with_capacity(reader, capacity),
            header: None,
            offset: 0,
            read: 0,
            crc: CRC32.digest()
        }
    }

    /// Read and validate the 12 byte pack header. Later calls return the
    /// header read the first time.
    pub fn read_header(&mut self) -> Result<Header> {
        if let Some(header) = self.header {
            return Ok(header)
        }

        let header = header::parse_header(self.fill(HEADER_SIZE)?)?;
        self.consume(HEADER_SIZE);

        debug!(version = header.version, object_count = header.object_count, "read pack header");
        self.header = Some(header);
        Ok(header)
    }

    pub fn header(&self) -> Option<Header> {
        self.header
    }

    /// Absolute offset of the next unread byte.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of records read so far.
    pub fn objects_read(&self) -> u32 {
        self.read
    }

    pub fn entries(&mut self) -> Entries<'_, R> {
        Entries::new(self)
    }

    /// Read the next record, or `None` once the declared count is reached.
    ///
    /// Failures are wrapped in `BadObject` with the record's index and offset.
    pub fn next_entry(&mut self) -> Result<Option<Entry>> {
        self.next_entry_with(ZlibInflater::new())
    }

    /// As `next_entry`, inflating the payload with `inflater`, which must be
    /// fresh.
    pub fn next_entry_with<I: Inflate>(&mut self, inflater: I) -> Result<Option<Entry>> {
        let header = self.read_header()?;
        if self.read >= header.object_count {
            return Ok(None)
        }

        let index = self.read;
        let offset = self.offset;
        let entry = match self.read_entry(inflater) {
            Ok(xs) => xs,
            Err(e) => return Err(ErrorKind::BadObject(index, offset, Box::new(e)).into())
        };

        trace!(
            index,
            offset,
            kind = entry.object.kind.as_str(),
            size = entry.object.size,
            "read object"
        );
        self.read += 1;
        Ok(Some(entry))
    }

    fn read_entry<I: Inflate>(&mut self, mut inflater: I) -> Result<Entry> {
        let offset = self.offset;
        self.crc = CRC32.digest();

        let (tag, size) = header::read_type_and_size(|| self.read_byte())?;
        let kind = Kind::from_tag(tag)?;

        let base = match kind {
            Kind::RefDelta => {
                let mut raw = [0u8; ID_LEN];
                raw.copy_from_slice(&self.fill(ID_LEN)?[..ID_LEN]);
                self.consume(ID_LEN);
                Some(Base::Id(Id::from(raw)))
            },

            Kind::OfsDelta => {
                let distance = header::read_ofs_distance(|| self.read_byte())?;
                Some(Base::Offset(header::resolve_base_offset(offset, distance)?))
            },

            _ => None
        };

        let expected = match usize::try_from(size) {
            Ok(xs) => xs,
            Err(_) => return Err(ErrorKind::BadObjectHeader.into())
        };
        let data = self.inflate(&mut inflater, expected)?;

        let crc = std::mem::replace(&mut self.crc, CRC32.digest());
        Ok(Entry {
            object: Object {
                offset,
                kind,
                size,
                base,
                packed_len: self.offset - offset,
                crc32: crc.finalize()
            },
            data
        })
    }

    // inflate exactly `size` bytes, consuming only the compressed bytes the
    // stream actually used so the next record starts at `self.offset`.
    //
    // `size` comes from the file, so the output grows as data arrives (never
    // past `size`) rather than being allocated up front.
    fn inflate<I: Inflate>(&mut self, inflater: &mut I, size: usize) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut produced = 0;
        let mut status = Step::Ok;

        while status == Step::Ok {
            if produced == output.len() && output.len() < size {
                let grown = size.min(output.len().saturating_mul(2).max(OUTPUT_CHUNK));
                if output.try_reserve_exact(grown - output.len()).is_err() {
                    let reason = format!("cannot allocate {} of {} bytes", grown, size);
                    return Err(ErrorKind::Inflate(reason).into())
                }
                output.resize(grown, 0);
            }

            let (consumed, written, step) = {
                let input = self.input.fill(1)?;
                inflater.step(input, &mut output[produced..])?
            };
            self.consume(consumed);
            produced += written;
            status = step;
        }

        if status != Step::StreamEnd || produced != size {
            let reason = format!("stream {:?} after {} of {} bytes", status, produced, size);
            return Err(ErrorKind::Inflate(reason).into())
        }

        Ok(output)
    }

    fn fill(&mut self, min: usize) -> Result<&[u8]> {
        self.input.fill(min)
    }

    fn consume(&mut self, length: usize) {
        self.crc.update(&self.input.buffer()[..length]);
        self.input.consume(length);
        self.offset += length as u64;
    }

    fn read_byte(&mut self) -> Result<u8> {
        let byte = self.fill(1)?[0];
        self.consume(1);
        Ok(byte)
    }
}

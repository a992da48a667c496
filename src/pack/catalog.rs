use std::io::Read;
use tracing::debug;

use crate::errors::Result;
use crate::pack::object::{ Kind, Object };
use crate::pack::Packfile;

/// Every record of a packfile, in file order.
///
/// Only produced by a parse that read all of the declared records; a corrupt
/// pack yields an error and no catalog at all.
#[derive(Debug)]
pub struct Catalog {
    version: u32,
    objects: Vec<Object>
}

impl Catalog {
    pub fn build<R: Read>(reader: R) -> Result<Catalog> {
        Catalog::from_packfile(&mut Packfile::new(reader))
    }

    /// As `build`, starting with a read-ahead buffer of `capacity` bytes.
    pub fn build_with_capacity<R: Read>(reader: R, capacity: usize) -> Result<Catalog> {
        Catalog::from_packfile(&mut Packfile::with_capacity(reader, capacity))
    }

    // the packfile must be fresh, or records read before this call would be
    // missing from the catalog
    fn from_packfile<R: Read>(packfile: &mut Packfile<R>) -> Result<Catalog> {
        let header = packfile.read_header()?;

        // the count comes from the file, so don't trust it for allocation
        let mut objects = Vec::with_capacity((header.object_count as usize).min(4096));
        for entry in packfile.entries() {
            objects.push(entry?.object);
        }

        debug!(objects = objects.len(), end = packfile.offset(), "built pack catalog");
        Ok(Catalog {
            version: header.version,
            objects
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Find the record that starts at `offset`.
    pub fn get_by_offset(&self, offset: u64) -> Option<&Object> {
        self.objects
            .binary_search_by_key(&offset, |object| object.offset())
            .ok()
            .map(|idx| &self.objects[idx])
    }

    /// The record an ofs-delta was computed against.
    pub fn base_of(&self, object: &Object) -> Option<&Object> {
        self.get_by_offset(object.base_offset()?)
    }

    pub fn count_by_kind(&self, kind: Kind) -> usize {
        self.objects.iter().filter(|object| object.kind() == kind).count()
    }
}

impl IntoIterator for Catalog {
    type Item = Object;
    type IntoIter = std::vec::IntoIter<Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

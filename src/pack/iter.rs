use std::io::Read;

use crate::errors::Result;
use crate::pack::object::Object;
use crate::pack::Packfile;

/// A record's descriptor along with its inflated payload.
#[derive(Debug)]
pub struct Entry {
    pub object: Object,
    pub data: Vec<u8>
}

/// Iterates the records of a packfile in file order, stopping after the
/// declared count or the first error.
pub struct Entries<'a, R> {
    packfile: &'a mut Packfile<R>,
    done: bool
}

impl<'a, R: Read> Entries<'a, R> {
    pub fn new(packfile: &'a mut Packfile<R>) -> Self {
        Entries {
            packfile,
            done: false
        }
    }
}

impl<'a, R: Read> Iterator for Entries<'a, R> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None
        }

        match self.packfile.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            },
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pack::tests::{ deflate, object_header, pack_header };
    use crate::pack::object::Kind;
    use crate::pack::Packfile;

    #[test]
    fn yields_each_record_in_order() {
        let mut bytes = pack_header(2, 3);
        for (tag, data) in &[(1u8, &b"tree abc\n"[..]), (2, &b""[..]), (3, &b"blob"[..])] {
            bytes.extend(object_header(*tag, data.len() as u64));
            bytes.extend(deflate(data));
        }

        let mut packfile = Packfile::new(&bytes[..]);
        let entries: Vec<_> = packfile.entries()
            .collect::<Result<_, _>>()
            .expect("read failed");

        let kinds: Vec<_> = entries.iter().map(|entry| entry.object.kind()).collect();
        assert_eq!(kinds, vec![Kind::Commit, Kind::Tree, Kind::Blob]);
        assert_eq!(entries[2].data, b"blob");
        assert_eq!(entries[0].object.offset(), 12);
        assert_eq!(
            entries[1].object.offset(),
            entries[0].object.offset() + entries[0].object.packed_len()
        );
        assert_eq!(packfile.objects_read(), 3);
    }

    #[test]
    fn stops_after_an_error() {
        let mut bytes = pack_header(2, 2);
        bytes.extend(object_header(5, 1));
        bytes.extend(deflate(b"x"));

        let mut packfile = Packfile::new(&bytes[..]);
        let mut entries = packfile.entries();
        assert!(entries.next().expect("missing result").is_err());
        assert!(entries.next().is_none());
    }
}

error_chain! {
    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        TruncatedInput(needed: usize, available: usize) {
            description("packfile ended early")
            display("packfile ended early: needed {} bytes, {} available", needed, available)
        }

        BadSignature(found: [u8; 4]) {
            description("bad packfile signature")
            display("bad packfile signature {:?}", found)
        }

        BadVersion(version: u32) {
            description("unsupported packfile version")
            display("unsupported packfile version {}", version)
        }

        BadObjectHeader {
            description("object size does not fit in 64 bits")
            display("object size does not fit in 64 bits")
        }

        UnknownObjectType(tag: u8) {
            description("unknown object type")
            display("unknown object type {}", tag)
        }

        OffsetOverflow {
            description("offset value overflow for delta base object")
            display("offset value overflow for delta base object")
        }

        DeltaBaseOutOfBounds(offset: u64, distance: u64) {
            description("delta base offset is out of bound")
            display("delta base offset is out of bound: object at {} points {} bytes back", offset, distance)
        }

        Inflate(reason: String) {
            description("failed to inflate object data")
            display("failed to inflate object data: {}", reason)
        }

        BadObject(index: u32, offset: u64, cause: Box<Error>) {
            description("bad object")
            display("bad object #{} at offset {}: {}", index, offset, cause)
        }
    }
}

impl Error {
    /// The kind that caused this error, looking through the `BadObject`
    /// wrapper a catalog build puts around per-object failures.
    pub fn root_kind(&self) -> &ErrorKind {
        match self.kind() {
            ErrorKind::BadObject(_, _, cause) => cause.root_kind(),
            kind => kind
        }
    }
}

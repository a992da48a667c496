use std::io::{ self, Read };

use crate::errors::{ Result, ErrorKind };

pub const DEFAULT_BUFFER_SIZE: usize = 8192;

// read-ahead window over a byte source:
//
//      data: [ consumed ... | unread ... | free ... ]
//                           ^start       ^end
//
// `fill` reads into the free tail (compacting or growing the slab when the
// tail is too small), `consume` moves `start` forward.
pub struct Buffer<R> {
    inner: R,
    data: Vec<u8>,
    start: usize,
    end: usize
}

impl<R: Read> Buffer<R> {
    pub fn new(inner: R) -> Self {
        Buffer::with_capacity(inner, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Buffer {
            inner,
            data: vec![0u8; capacity.max(1)],
            start: 0,
            end: 0
        }
    }

    /// Make at least `min` unread bytes available and return every unread
    /// byte currently held, which may be more than `min`.
    pub fn fill(&mut self, min: usize) -> Result<&[u8]> {
        if self.available() < min {
            self.make_room(min);

            while self.available() < min {
                let read = match self.inner.read(&mut self.data[self.end..]) {
                    Ok(n) => n,
                    Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into())
                };

                if read == 0 {
                    return Err(ErrorKind::TruncatedInput(min, self.available()).into())
                }
                self.end += read;
            }
        }

        Ok(self.buffer())
    }

    pub fn buffer(&self) -> &[u8] {
        &self.data[self.start..self.end]
    }

    pub fn available(&self) -> usize {
        self.end - self.start
    }

    /// Mark the first `length` unread bytes as used.
    ///
    /// Panics if `length` is more than is currently buffered.
    pub fn consume(&mut self, length: usize) {
        assert!(
            length <= self.available(),
            "consumed {} bytes with only {} buffered", length, self.available()
        );
        self.start += length;
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn make_room(&mut self, min: usize) {
        if self.data.len() - self.start >= min {
            return
        }

        if self.start > 0 {
            self.data.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }

        if self.data.len() < min {
            let grown = min.max(self.data.len() * 2);
            self.data.resize(grown, 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{ self, Read };
    use super::Buffer;
    use crate::errors::ErrorKind;

    // hands out at most `step` bytes per read, interrupting every other call
    struct Trickle<'a> {
        bytes: &'a [u8],
        step: usize,
        interrupt: bool
    }

    impl<'a> Read for Trickle<'a> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "again"))
            }

            let n = self.step.min(buf.len()).min(self.bytes.len());
            buf[..n].copy_from_slice(&self.bytes[..n]);
            self.bytes = &self.bytes[n..];
            Ok(n)
        }
    }

    #[test]
    fn fill_can_return_more_than_requested() {
        let mut buffer = Buffer::new(&b"0123456789"[..]);
        let view = buffer.fill(2).expect("fill failed");
        assert_eq!(view, b"0123456789");
    }

    #[test]
    fn consume_slides_the_window() {
        let mut buffer = Buffer::new(&b"0123456789"[..]);
        buffer.fill(4).expect("fill failed");
        buffer.consume(3);
        assert_eq!(buffer.buffer(), b"3456789");
        buffer.consume(7);
        assert_eq!(buffer.available(), 0);
        assert!(buffer.fill(1).is_err());
    }

    #[test]
    fn grows_past_its_initial_capacity() {
        let input = (0u8..100).collect::<Vec<_>>();
        let mut buffer = Buffer::with_capacity(Trickle { bytes: &input, step: 7, interrupt: false }, 4);

        buffer.fill(3).expect("fill failed");
        buffer.consume(2);
        let view = buffer.fill(50).expect("fill failed");
        assert!(view.len() >= 50);
        assert_eq!(&view[..50], &input[2..52]);
    }

    #[test]
    fn compacts_before_reading_more() {
        let input = (0u8..16).collect::<Vec<_>>();
        let mut buffer = Buffer::with_capacity(Trickle { bytes: &input, step: 3, interrupt: false }, 8);

        for expected in 0u8..16 {
            let view = buffer.fill(1).expect("fill failed");
            assert_eq!(view[0], expected);
            buffer.consume(1);
        }
        assert_eq!(buffer.data.len(), 8);
    }

    #[test]
    fn reports_truncation() {
        let mut buffer = Buffer::new(&b"abc"[..]);
        match buffer.fill(4) {
            Err(e) => match e.kind() {
                ErrorKind::TruncatedInput(4, 3) => (),
                kind => panic!("unexpected error {:?}", kind)
            },
            Ok(_) => panic!("expected failure")
        }
    }

    #[test]
    #[should_panic]
    fn consuming_past_the_window_panics() {
        let mut buffer = Buffer::new(&b"abc"[..]);
        buffer.fill(1).expect("fill failed");
        buffer.consume(4);
    }
}

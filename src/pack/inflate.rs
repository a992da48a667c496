use flate2::{ Decompress, FlushDecompress, Status };

use crate::errors::{ Result, ErrorKind };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Progress was made and the stream wants more input or output room.
    Ok,
    /// Nothing could be done with the input and output on offer.
    Stalled,
    /// The compressed stream is complete.
    StreamEnd
}

/// One incremental step of a streaming inflate.
///
/// `step` decompresses as much of `input` into `output` as it can and
/// reports how many bytes of each it used.
pub trait Inflate {
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Result<(usize, usize, Step)>;
}

pub struct ZlibInflater {
    inner: Decompress
}

impl ZlibInflater {
    pub fn new() -> Self {
        ZlibInflater {
            inner: Decompress::new(true)
        }
    }
}

impl Default for ZlibInflater {
    fn default() -> Self {
        ZlibInflater::new()
    }
}

impl Inflate for ZlibInflater {
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> Result<(usize, usize, Step)> {
        let before_in = self.inner.total_in();
        let before_out = self.inner.total_out();

        let status = match self.inner.decompress(input, output, FlushDecompress::None) {
            Ok(xs) => xs,
            Err(e) => return Err(ErrorKind::Inflate(e.to_string()).into())
        };

        let consumed = (self.inner.total_in() - before_in) as usize;
        let produced = (self.inner.total_out() - before_out) as usize;
        let step = match status {
            Status::StreamEnd => Step::StreamEnd,
            Status::BufError => Step::Stalled,
            Status::Ok if consumed == 0 && produced == 0 => Step::Stalled,
            Status::Ok => Step::Ok
        };

        Ok((consumed, produced, step))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;

    use super::{ Inflate, ZlibInflater, Step };

    fn deflate(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).expect("write failed");
        encoder.finish().expect("finish failed")
    }

    #[test]
    fn stops_at_the_end_of_the_stream() {
        let mut input = deflate(b"hello");
        let compressed_len = input.len();
        input.extend_from_slice(b"trailing bytes");

        let mut output = [0u8; 5];
        let mut inflater = ZlibInflater::new();
        let (consumed, produced, step) = inflater.step(&input, &mut output).expect("inflate failed");

        assert_eq!(step, Step::StreamEnd);
        assert_eq!(consumed, compressed_len);
        assert_eq!(produced, 5);
        assert_eq!(&output, b"hello");
    }

    #[test]
    fn accepts_input_a_byte_at_a_time() {
        let input = deflate(b"hello hello hello hello");
        let mut output = vec![0u8; 23];
        let mut inflater = ZlibInflater::new();
        let mut used = 0;
        let mut written = 0;

        loop {
            let end = (used + 1).min(input.len());
            let (consumed, produced, step) = inflater.step(&input[used..end], &mut output[written..]).expect("inflate failed");
            used += consumed;
            written += produced;
            match step {
                Step::StreamEnd => break,
                Step::Ok => (),
                Step::Stalled => panic!("stalled after {} bytes", used)
            }
        }

        assert_eq!(used, input.len());
        assert_eq!(&output[..], &b"hello hello hello hello"[..]);
    }

    #[test]
    fn stalls_when_output_is_full() {
        let input = deflate(b"hello");
        let mut output = [0u8; 2];
        let mut inflater = ZlibInflater::new();

        let (_, produced, step) = inflater.step(&input, &mut output).expect("inflate failed");
        assert_eq!(produced, 2);
        assert_ne!(step, Step::StreamEnd);

        let (consumed, produced, step) = inflater.step(&input[input.len()..], &mut []).expect("inflate failed");
        assert_eq!((consumed, produced, step), (0, 0, Step::Stalled));
    }

    #[test]
    fn rejects_garbage() {
        let mut output = [0u8; 8];
        let mut inflater = ZlibInflater::new();
        assert!(inflater.step(b"\xff\xff\xff\xff\xff\xff", &mut output).is_err());
    }
}

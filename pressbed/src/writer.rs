use std::io::{self, Read};

/// Size of the buffer used to copy external sources.
pub const COPY_CHUNK_SIZE: usize = 8 * 1024;

/// Append-only byte sink that knows how many bytes it has received.
pub trait Writer {
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Number of bytes written so far.
    fn position(&self) -> usize;
}

impl Writer for Vec<u8> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn position(&self) -> usize {
        self.len()
    }
}

/// Adapts any [`io::Write`] (a file, a socket) to a [`Writer`].
///
/// The position starts at zero when the adapter is created.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    written: usize,
}

impl<W: io::Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Writer for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)?;
        self.written += buf.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.written
    }
}

/// Discards everything, only counts.
#[derive(Debug, Default)]
struct LengthCounter(usize);

impl Writer for LengthCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0 += buf.len();
        Ok(())
    }

    fn position(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub enum CopyError {
    Read(io::Error),
    Write(io::Error),
}

impl From<CopyError> for io::Error {
    fn from(e: CopyError) -> Self {
        match e {
            CopyError::Read(e) | CopyError::Write(e) => e,
        }
    }
}

/// Copy `reader` into `writer` through a fixed size buffer. Returns the
/// number of bytes copied.
pub fn copy_chunked(reader: &mut dyn Read, writer: &mut dyn Writer) -> Result<u64, CopyError> {
    let mut buf = [0u8; COPY_CHUNK_SIZE];
    let mut copied = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(copied),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };
        writer.write(&buf[..n]).map_err(CopyError::Write)?;
        copied += n as u64;
    }
}

/// Copy exactly `length` bytes from `reader`. A source with fewer or more
/// bytes fails with a read error.
pub fn copy_exact(
    reader: &mut dyn Read,
    writer: &mut dyn Writer,
    length: u64,
) -> Result<u64, CopyError> {
    let copied = copy_chunked(&mut Read::take(&mut *reader, length), writer)?;
    if copied < length {
        return Err(CopyError::Read(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("source ended after {} of {} bytes", copied, length),
        )));
    }

    let mut extra = [0u8; 1];
    loop {
        match reader.read(&mut extra) {
            Ok(0) => return Ok(copied),
            Ok(_) => {
                return Err(CopyError::Read(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("source is longer than {} bytes", length),
                )))
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        }
    }
}

pub trait Encoder<T: ?Sized> {
    fn write_to(o: &T, writer: &mut dyn Writer) -> io::Result<()>;

    fn encoded_len(o: &T) -> usize {
        let mut counter = LengthCounter::default();
        // counting never fails
        let _ = Self::write_to(o, &mut counter);
        counter.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_writer_tracks_position() {
        let mut w = CountingWriter::new(Vec::new());
        assert_eq!(w.position(), 0);
        w.write(b"%PDF-1.3\n").unwrap();
        w.write(b"").unwrap();
        w.write(b"1 0 obj").unwrap();
        assert_eq!(w.position(), 16);
        assert_eq!(w.into_inner(), b"%PDF-1.3\n1 0 obj".to_vec());
    }

    #[test]
    fn copy_in_chunks() {
        let source: Vec<u8> = (0..COPY_CHUNK_SIZE * 2 + 17).map(|i| (i % 251) as u8).collect();
        let mut out = Vec::new();
        let copied = copy_chunked(&mut &source[..], &mut out).unwrap();
        assert_eq!(copied, source.len() as u64);
        assert_eq!(out, source);
    }

    #[test]
    fn copy_exact_checks_length() {
        let source = b"0123456789";

        let mut out = Vec::new();
        assert_eq!(copy_exact(&mut &source[..], &mut out, 10).unwrap(), 10);
        assert_eq!(&out[..], source);

        let mut out = Vec::new();
        match copy_exact(&mut &source[..], &mut out, 12) {
            Err(CopyError::Read(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("unexpected result {:?}", other),
        }

        let mut out = Vec::new();
        match copy_exact(&mut &source[..], &mut out, 4) {
            Err(CopyError::Read(e)) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(&out[..], b"0123");
    }

    #[test]
    fn vec_position_is_len() {
        let mut out = b"prefix".to_vec();
        assert_eq!(Writer::position(&out), 6);
        Writer::write(&mut out, b"++").unwrap();
        assert_eq!(Writer::position(&out), 8);
    }
}

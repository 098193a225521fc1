use std::io::SeekFrom;

use crate::tools::error::{Result, StreamError};

///
/// Payload Source Trait
///
/// Seekable byte source providing the real unit payloads, addressed
/// by `(offset, length)`.
///
pub trait PayloadSourceTrait:
    std::io::Read + std::io::Seek + Send + Sync + std::fmt::Debug
{
}
impl<T: std::io::Read + std::io::Seek + Send + Sync + std::fmt::Debug> PayloadSourceTrait for T {}

impl dyn PayloadSourceTrait + '_ {
    /// Read exactly `length` bytes at `offset`, retrying partial reads.
    pub fn read_unit(&mut self, offset: u32, length: usize) -> Result<Vec<u8>> {
        self.seek(SeekFrom::Start(offset as u64))
            .map_err(StreamError::PayloadRead)?;

        let mut buffer = vec![0u8; length];
        let mut nread = 0;
        while nread < length {
            match self.read(&mut buffer[nread..]) {
                Ok(0) => {
                    return Err(StreamError::PayloadTruncated {
                        offset,
                        expected: length,
                        read: nread,
                    })
                }
                Ok(n) => nread += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(StreamError::PayloadRead(e)),
            }
        }
        Ok(buffer)
    }
}

/// Boxed Payload Stream
pub type PayloadStream = Box<dyn PayloadSourceTrait>;

#[cfg(test)]
mod tests {
    use super::PayloadStream;
    use crate::error::StreamError;

    #[test]
    pub fn test_read_unit() {
        crate::tests::init();
        let mut stream: PayloadStream =
            Box::new(std::io::Cursor::new((0u8..100).collect::<Vec<u8>>()));
        let buffer = stream.read_unit(10, 5).unwrap();
        assert_eq!(buffer, vec![10, 11, 12, 13, 14]);
    }

    #[test]
    pub fn test_read_unit_past_eof() {
        crate::tests::init();
        let mut stream: PayloadStream = Box::new(std::io::Cursor::new(vec![0u8; 16]));
        let err = stream.read_unit(8, 100).unwrap_err();
        assert!(matches!(
            err,
            StreamError::PayloadTruncated {
                offset: 8,
                expected: 100,
                read: 8
            }
        ));
    }
}

//! Variable-length integer encoding utilities.
//!
//! Unsigned LEB128: 7 bits per byte, least significant group first, high bit
//! set on every byte except the last. This is the encoding used for the
//! counts and frequencies inside `.fdic` dictionaries.

use std::io::{ErrorKind, Read, Write};

use byteorder::ReadBytesExt;

use crate::error::{Result, SymSpellError};

/// Longest valid encoding of a u64.
pub const MAX_VARINT_LEN: usize = 10;

/// Encode a u64 value using variable-length encoding.
pub fn encode_u64(value: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(MAX_VARINT_LEN);
    let mut val = value;

    loop {
        let mut byte = (val & 0x7F) as u8;
        val >>= 7;

        if val != 0 {
            byte |= 0x80;
        }

        bytes.push(byte);

        if val == 0 {
            break;
        }
    }

    bytes
}

/// Decode a u64 value from the front of `bytes`, returning the value and the
/// number of bytes consumed.
pub fn decode_u64(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        if shift >= 64 {
            return Err(SymSpellError::format("varint overflow"));
        }

        result |= ((byte & 0x7F) as u64) << shift;

        if (byte & 0x80) == 0 {
            return Ok((result, i + 1));
        }

        shift += 7;
    }

    Err(SymSpellError::format("incomplete varint"))
}

/// Write a variable-length encoded u64 to a writer.
pub fn write_u64<W: Write>(writer: &mut W, value: u64) -> Result<usize> {
    let bytes = encode_u64(value);
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

/// Read a variable-length encoded u64 from a reader.
///
/// A stream that ends in the middle of a value is a format error, not an I/O
/// error.
pub fn read_u64<R: Read>(reader: &mut R) -> Result<u64> {
    let mut result = 0u64;
    let mut shift = 0;

    loop {
        let byte = match reader.read_u8() {
            Ok(byte) => byte,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(SymSpellError::format("incomplete varint"));
            }
            Err(e) => return Err(e.into()),
        };

        if shift >= 64 {
            return Err(SymSpellError::format("varint overflow"));
        }

        result |= ((byte & 0x7F) as u64) << shift;

        if (byte & 0x80) == 0 {
            return Ok(result);
        }

        shift += 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_encode_decode_u64() {
        let test_values = [0, 1, 127, 128, 255, 16383, 16384, 1_024_908_267_229, u64::MAX];

        for &value in &test_values {
            let encoded = encode_u64(value);
            let (decoded, bytes_read) = decode_u64(&encoded).unwrap();

            assert_eq!(value, decoded);
            assert_eq!(encoded.len(), bytes_read);
        }
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode_u64(0), vec![0x00]);
        assert_eq!(encode_u64(127), vec![0x7F]);
        assert_eq!(encode_u64(128), vec![0x80, 0x01]);
        assert_eq!(encode_u64(300), vec![0xAC, 0x02]);
        assert_eq!(encode_u64(u64::MAX).len(), MAX_VARINT_LEN);
    }

    #[test]
    fn test_write_read_sequence() {
        let mut buffer = Vec::new();
        write_u64(&mut buffer, 1).unwrap();
        write_u64(&mut buffer, 300).unwrap();
        write_u64(&mut buffer, 1 << 40).unwrap();

        let mut cursor = Cursor::new(buffer);
        assert_eq!(read_u64(&mut cursor).unwrap(), 1);
        assert_eq!(read_u64(&mut cursor).unwrap(), 300);
        assert_eq!(read_u64(&mut cursor).unwrap(), 1 << 40);
    }

    #[test]
    fn test_incomplete_varint() {
        let incomplete = vec![0x80];
        assert!(decode_u64(&incomplete).unwrap_err().is_format());

        let mut cursor = Cursor::new(incomplete);
        assert!(read_u64(&mut cursor).unwrap_err().is_format());
    }

    #[test]
    fn test_overflow() {
        let overflow_data = vec![0xFF; 11];
        assert!(decode_u64(&overflow_data).unwrap_err().is_format());

        let mut cursor = Cursor::new(overflow_data);
        assert!(read_u64(&mut cursor).unwrap_err().is_format());
    }
}

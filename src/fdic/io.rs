//! Binary encoding of `.fdic` files.
//!
//! ```text
//! magic word    u32, big-endian (0x0F0D010C)
//! version       u8
//! gzip stream:
//!   ngrams      varint
//!   term count  varint
//!   locale      UTF-8, NUL-terminated
//!   entries     (varint frequency, UTF-8 term NUL-terminated)*
//! ```
//!
//! A string also ends at the end of the stream, so a missing final
//! terminator is tolerated.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use log::{debug, warn};

use super::dictionary::{FORMAT_VERSION, FrequencyDictionary, MAGIC_WORD};
use crate::error::{Result, SymSpellError};
use crate::util::varint::{read_u64, write_u64};

/// File extension of encoded dictionaries.
pub const FDIC_EXTENSION: &str = "fdic";

/// Whether `bytes` start with the `.fdic` magic word.
pub fn is_fdic(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && bytes[..4] == MAGIC_WORD.to_be_bytes()
}

/// Whether the file at `path` starts with the `.fdic` magic word.
pub fn is_fdic_file<P: AsRef<Path>>(path: P) -> Result<bool> {
    let mut header = Vec::with_capacity(4);
    File::open(path)?.take(4).read_to_end(&mut header)?;
    Ok(is_fdic(&header))
}

/// `words.txt` becomes `words.fdic`.
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    input.as_ref().with_extension(FDIC_EXTENSION)
}

/// Encode `dictionary` to `writer`. The dictionary is validated first.
pub fn write_fdic<W: Write>(dictionary: &FrequencyDictionary, mut writer: W) -> Result<()> {
    dictionary.validate()?;

    writer.write_u32::<BigEndian>(MAGIC_WORD)?;
    writer.write_u8(FORMAT_VERSION)?;

    let mut encoder = GzEncoder::new(writer, Compression::default());
    write_u64(&mut encoder, u64::from(dictionary.ngrams))?;
    write_u64(&mut encoder, dictionary.terms.len() as u64)?;
    write_delimited(&mut encoder, &dictionary.locale)?;

    for (term, frequency) in &dictionary.terms {
        write_u64(&mut encoder, *frequency)?;
        write_delimited(&mut encoder, term)?;
    }

    encoder.finish()?.flush()?;
    Ok(())
}

/// Decode a dictionary from `reader`.
///
/// A wrong magic word, an unknown version or a truncated body is a
/// [`SymSpellError::Format`] error. The decoded dictionary is validated.
pub fn read_fdic<R: Read>(mut reader: R) -> Result<FrequencyDictionary> {
    let magic = read_header_field(reader.read_u32::<BigEndian>())?;
    if magic != MAGIC_WORD {
        return Err(SymSpellError::format(format!(
            "magic word mismatch: was {magic:08X}, expected {MAGIC_WORD:08X}. \
             This is probably not an FDIC file."
        )));
    }

    let version = read_header_field(reader.read_u8())?;
    if version != FORMAT_VERSION {
        return Err(SymSpellError::format(format!(
            "format version mismatch: was {version}, expected {FORMAT_VERSION}"
        )));
    }

    let mut body = BufReader::new(GzDecoder::new(reader));
    let ngrams = read_u64(&mut body)?;
    let ngrams = u8::try_from(ngrams)
        .map_err(|_| SymSpellError::format(format!("invalid ngram size: {ngrams}")))?;
    let term_count = read_u64(&mut body)?;
    let locale = read_delimited(&mut body)?;

    let mut terms = Vec::with_capacity(term_count.min(1 << 20) as usize);
    while has_remaining(&mut body)? {
        let frequency = read_u64(&mut body)?;
        let term = read_delimited(&mut body)?;
        terms.push((term, frequency));
    }

    if terms.len() as u64 != term_count {
        warn!(
            "fdic header announces {term_count} terms but {} were read",
            terms.len()
        );
    }

    let dictionary = FrequencyDictionary {
        format_version: version,
        ngrams,
        locale,
        terms,
    };
    dictionary.validate()?;
    debug!(
        "read {} dictionary with {} terms ({})",
        dictionary.ngram_name(),
        dictionary.term_count(),
        dictionary.locale
    );
    Ok(dictionary)
}

pub fn write_fdic_file<P: AsRef<Path>>(dictionary: &FrequencyDictionary, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_fdic(dictionary, BufWriter::new(file))
}

pub fn read_fdic_file<P: AsRef<Path>>(path: P) -> Result<FrequencyDictionary> {
    read_fdic(BufReader::new(File::open(path)?))
}

pub fn read_fdic_bytes(bytes: &[u8]) -> Result<FrequencyDictionary> {
    read_fdic(bytes)
}

fn read_header_field<T>(result: std::io::Result<T>) -> Result<T> {
    result.map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => SymSpellError::format("file too short for an FDIC header"),
        _ => e.into(),
    })
}

fn write_delimited<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    if value.as_bytes().contains(&0) {
        return Err(SymSpellError::validation(format!(
            "string contains a NUL byte: {value:?}"
        )));
    }
    writer.write_all(value.as_bytes())?;
    writer.write_u8(0)?;
    Ok(())
}

/// Read bytes up to a NUL terminator or the end of the stream.
fn read_delimited<R: Read>(reader: &mut R) -> Result<String> {
    let mut bytes = Vec::new();
    loop {
        match reader.read_u8() {
            Ok(0) => break,
            Ok(byte) => bytes.push(byte),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(gzip_error(e)),
        }
    }
    String::from_utf8(bytes).map_err(|e| SymSpellError::format(format!("invalid UTF-8: {e}")))
}

fn has_remaining<R: std::io::BufRead>(reader: &mut R) -> Result<bool> {
    match reader.fill_buf() {
        Ok(buffer) => Ok(!buffer.is_empty()),
        Err(e) => Err(gzip_error(e)),
    }
}

/// A corrupt gzip body surfaces as `InvalidInput`/`InvalidData`.
fn gzip_error(e: std::io::Error) -> SymSpellError {
    match e.kind() {
        ErrorKind::InvalidInput | ErrorKind::InvalidData => {
            SymSpellError::format(format!("corrupt compressed body: {e}"))
        }
        _ => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrequencyDictionary {
        let mut dictionary = FrequencyDictionary::new(1, "en-US");
        dictionary.push("the", 23_135_851_162);
        dictionary.push("straße", 12);
        dictionary.push("a", 0);
        dictionary
    }

    #[test]
    fn test_header_layout() {
        let mut bytes = Vec::new();
        write_fdic(&sample(), &mut bytes).unwrap();

        assert_eq!(&bytes[..5], &[0x0F, 0x0D, 0x01, 0x0C, 0x01]);
        // gzip magic follows the uncompressed header
        assert_eq!(&bytes[5..7], &[0x1F, 0x8B]);
        assert!(is_fdic(&bytes));
        assert!(!is_fdic(b"the 100\n"));
        assert!(!is_fdic(&bytes[..3]));
    }

    #[test]
    fn test_write_then_read() {
        let mut bytes = Vec::new();
        write_fdic(&sample(), &mut bytes).unwrap();

        let decoded = read_fdic_bytes(&bytes).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_rejects_foreign_files() {
        let err = read_fdic_bytes(b"the 100\nof 50\n").unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("probably not an FDIC file"));

        let err = read_fdic_bytes(&[0x0F, 0x0D]).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut bytes = Vec::new();
        write_fdic(&sample(), &mut bytes).unwrap();
        bytes[4] = 0x02;

        let err = read_fdic_bytes(&bytes).unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_rejects_corrupt_body() {
        let mut bytes = Vec::new();
        write_fdic(&sample(), &mut bytes).unwrap();
        bytes.truncate(12);

        assert!(read_fdic_bytes(&bytes).is_err());
    }

    #[test]
    fn test_missing_final_terminator() {
        let mut body = GzEncoder::new(Vec::new(), Compression::default());
        write_u64(&mut body, 1).unwrap();
        write_u64(&mut body, 1).unwrap();
        body.write_all(b"en\0").unwrap();
        write_u64(&mut body, 7).unwrap();
        body.write_all(b"word").unwrap();

        let mut bytes = vec![0x0F, 0x0D, 0x01, 0x0C, 0x01];
        bytes.extend(body.finish().unwrap());

        let dictionary = read_fdic_bytes(&bytes).unwrap();
        assert_eq!(dictionary.terms, vec![("word".to_string(), 7)]);
    }

    #[test]
    fn test_rejects_nul_in_terms() {
        let mut dictionary = sample();
        dictionary.push("bad\0term", 1);

        assert!(write_fdic(&dictionary, Vec::new()).is_err());
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("dicts/en_words.txt"),
            PathBuf::from("dicts/en_words.fdic")
        );
    }
}

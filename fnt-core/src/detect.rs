//! Serialized-format detection and decoder dispatch.

use crate::error::{ErrorKind, FontError, FontResult};
use crate::font::Font;
use crate::{binary, text, xml};

/// A BMFont serialization format.
///
/// The tagged union over the three decoders: all of them share only the
/// "produce a [`Font`] from a source" contract, so selection is a plain
/// enum rather than a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Line-oriented `key=value` records.
    Text,
    /// The XML rendition of the same records.
    Xml,
    /// Packed little-endian block stream.
    Binary,
}

impl Format {
    /// Number of bytes [`Format::detect`] inspects.
    pub const SNIFF_LEN: usize = 5;

    /// Classify a descriptor by its first five bytes: `info ` selects
    /// the text decoder and `<?xml` the XML decoder. Anything else —
    /// including input shorter than five bytes — is
    /// [`ErrorKind::UnrecognizedFormat`].
    ///
    /// The binary signature is not recognized here: its magic is only
    /// four bytes and sits in the same window as the prefixes above.
    /// Callers that hold binary data invoke [`crate::decode_binary`]
    /// (or [`Format::Binary`]) directly.
    ///
    /// Detection only borrows the buffer; nothing is consumed.
    pub fn detect(data: &[u8]) -> FontResult<Self> {
        match data.get(..Self::SNIFF_LEN) {
            Some(b"info ") => Ok(Self::Text),
            Some(b"<?xml") => Ok(Self::Xml),
            _ => Err(FontError::new(
                ErrorKind::UnrecognizedFormat,
                "unknown file format",
            )),
        }
    }

    /// Decode `data` with this format's decoder.
    ///
    /// The text and XML decoders receive the bytes as (lossily decoded)
    /// UTF-8.
    pub fn decode(self, data: &[u8]) -> FontResult<Font> {
        match self {
            Self::Text => text::decode(&String::from_utf8_lossy(data)),
            Self::Xml => xml::decode(&String::from_utf8_lossy(data)),
            Self::Binary => binary::decode(data),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_prefix() {
        assert_eq!(Format::detect(b"info face=\"X\"").unwrap(), Format::Text);
    }

    #[test]
    fn xml_prefix() {
        assert_eq!(
            Format::detect(b"<?xml version=\"1.0\"?>").unwrap(),
            Format::Xml
        );
    }

    #[test]
    fn binary_magic_is_not_sniffed() {
        let err = Format::detect(b"BMF\x03\x01\x00").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedFormat);
    }

    #[test]
    fn short_input_is_unrecognized() {
        let err = Format::detect(b"inf").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedFormat);
    }

    #[test]
    fn arbitrary_prefix_is_unrecognized() {
        let err = Format::detect(b"common lineHeight=12").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedFormat);
    }

    #[test]
    fn dispatch_runs_the_matching_decoder() {
        let font = Format::Text.decode(b"info face=\"X\" size=10\n").unwrap();
        assert_eq!(font.family_name, "X");
    }
}

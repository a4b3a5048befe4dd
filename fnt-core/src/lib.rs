//! BMFont descriptor decoding and text measurement.
//!
//! Decodes the AngelCode BMFont descriptor family — text `key=value`
//! lines, XML attributes, and the packed little-endian binary block
//! stream — into one canonical [`Font`] model, and measures text layout
//! (advances, kerning, soft wrapping) against it. The three decoders
//! converge on model-equal results for equivalent inputs.
//!
//! Rendering is out of scope: this crate produces layout numbers, not
//! pixels.

pub mod binary;
pub mod detect;
pub mod error;
pub mod font;
pub mod loader;
pub mod metrics;
pub mod text;
pub mod xml;

mod codec;

pub use detect::Format;
pub use error::{ErrorKind, FontError, FontResult};
pub use font::{Character, Font, Padding, Page, Spacing};
pub use loader::load_file;
pub use metrics::Size;

/// Decode a descriptor of unknown format, sniffing text vs. XML.
///
/// Binary data is not auto-detected here (see [`Format::detect`]); use
/// [`decode_binary`] — or [`load_file`], which dispatches on the binary
/// magic first — when the source may be binary.
///
/// # Errors
///
/// [`ErrorKind::InvalidArgument`] for empty input,
/// [`ErrorKind::UnrecognizedFormat`] when the prefix matches neither
/// format, and any decoder error for malformed content.
pub fn decode(data: &[u8]) -> FontResult<Font> {
    if data.is_empty() {
        return Err(FontError::new(ErrorKind::InvalidArgument, "empty input"));
    }
    Format::detect(data)?.decode(data)
}

/// Decode a descriptor in the text key/value format.
///
/// # Errors
///
/// This decoder is tolerant and currently never fails; the `Result`
/// keeps the signature uniform across the three formats.
pub fn decode_text(source: &str) -> FontResult<Font> {
    text::decode(source)
}

/// Decode a descriptor in the XML format.
///
/// # Errors
///
/// [`ErrorKind::InvalidFormat`] for a malformed document or a missing
/// or unparsable attribute.
pub fn decode_xml(source: &str) -> FontResult<Font> {
    xml::decode(source)
}

/// Decode a descriptor in the binary block format.
///
/// # Errors
///
/// [`ErrorKind::InvalidFormat`] for a bad magic, version, or block
/// structure; [`ErrorKind::TruncatedData`] when a block's declared
/// length exceeds the remaining input.
pub fn decode_binary(data: &[u8]) -> FontResult<Font> {
    binary::decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_sniffs_text() {
        let font = decode(b"info face=\"X\" size=10\n").unwrap();
        assert_eq!(font.family_name, "X");
    }

    #[test]
    fn decode_rejects_empty_input() {
        let err = decode(b"").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn decode_rejects_binary_input() {
        let err = decode(b"BMF\x03").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedFormat);
    }
}

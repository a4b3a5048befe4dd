//! File loading and page-path qualification.
//!
//! The decoders populate page file names exactly as declared in the
//! source data; loading from a named file additionally qualifies each
//! name against that file's directory so callers can open the texture
//! images directly.

use std::fs;
use std::path::Path;

use crate::detect::Format;
use crate::error::{ErrorKind, FontError, FontResult};
use crate::font::Font;

/// Load a font descriptor from a file, auto-detecting its format.
///
/// The binary signature is checked first — the five-byte text/XML sniff
/// in [`Format::detect`] cannot see the four-byte binary magic — then
/// the text and XML prefixes. After a successful decode, page file
/// names are qualified against the file's parent directory.
///
/// # Errors
///
/// [`ErrorKind::InvalidArgument`] for an empty path,
/// [`ErrorKind::Io`] when the file cannot be read, and any decoder
/// error for malformed content.
pub fn load_file(path: impl AsRef<Path>) -> FontResult<Font> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(FontError::new(ErrorKind::InvalidArgument, "empty file name"));
    }

    let data = fs::read(path).map_err(|e| {
        FontError::new(ErrorKind::Io, format!("cannot read {}: {e}", path.display()))
    })?;

    let format = if data.len() >= 4 && data[..3] == *b"BMF" {
        Format::Binary
    } else {
        Format::detect(&data)?
    };
    let mut font = format.decode(&data)?;

    if let Some(dir) = path.parent() {
        qualify_page_paths(&mut font, dir);
    }
    Ok(font)
}

/// Rewrite every page file name to be qualified against `dir`.
pub fn qualify_page_paths(font: &mut Font, dir: &Path) {
    for page in &mut font.pages {
        page.file_name = dir.join(&page.file_name).to_string_lossy().into_owned();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new(tag: &str) -> Self {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_nanos());
            let path = std::env::temp_dir()
                .join(format!("fnt_loader_{tag}_{}_{}", std::process::id(), ts));
            fs::create_dir_all(&path).expect("create temp test dir");
            Self { path }
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    const SAMPLE: &str = "\
info face=\"X\" size=10
common lineHeight=12 base=10 scaleW=64 scaleH=64
page id=0 file=\"x_0.png\"
";

    #[test]
    fn text_file_loads_and_qualifies_pages() {
        let dir = TestDir::new("text");
        let file = dir.path.join("x.fnt");
        fs::write(&file, SAMPLE).expect("write descriptor");

        let font = load_file(&file).unwrap();
        assert_eq!(font.family_name, "X");
        assert_eq!(
            font.pages[0].file_name,
            dir.path.join("x_0.png").to_string_lossy()
        );
    }

    #[test]
    fn binary_file_dispatches_on_magic() {
        let dir = TestDir::new("binary");
        let file = dir.path.join("x.fnt");
        // Header plus an empty-ish common block.
        let mut data = b"BMF\x03".to_vec();
        data.push(2);
        data.extend_from_slice(&15u32.to_le_bytes());
        let mut common = vec![0u8; 15];
        common[0] = 12; // lineHeight
        data.extend_from_slice(&common);
        fs::write(&file, &data).expect("write descriptor");

        let font = load_file(&file).unwrap();
        assert_eq!(font.line_height, 12);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TestDir::new("missing");
        let err = load_file(dir.path.join("absent.fnt")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Io);
    }

    #[test]
    fn empty_path_is_invalid_argument() {
        let err = load_file("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }

    #[test]
    fn unrecognized_content_is_reported() {
        let dir = TestDir::new("garbage");
        let file = dir.path.join("x.fnt");
        fs::write(&file, "not a font at all").expect("write descriptor");
        let err = load_file(&file).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedFormat);
    }
}

//! Decoder for the BMFont binary (version 3) format.
//!
//! The source opens with a four-byte header: the magic bytes `B`, `M`,
//! `F` and a version byte that must be 3. The remainder is a sequence
//! of self-describing blocks, each a one-byte type tag, a four-byte
//! little-endian payload length (excluding the tag and length fields),
//! and exactly that many payload bytes. A trailing fragment too short
//! to hold another tag + length pair ends the stream; a payload longer
//! than the remaining input is a [`ErrorKind::TruncatedData`] error.
//!
//! Unknown block types are fatal. Block layouts cannot be skipped
//! without trusting the declared length, and this decoder does not —
//! the text decoder's tag tolerance has no counterpart here.

use std::collections::HashMap;

use crate::codec::{read_cstr, read_i16, read_u16, read_u32};
use crate::error::{ErrorKind, FontError, FontResult};
use crate::font::{Character, Font, Padding, Page, Spacing};

const MAGIC: [u8; 3] = *b"BMF";
const VERSION: u8 = 3;

const BLOCK_INFO: u8 = 1;
const BLOCK_COMMON: u8 = 2;
const BLOCK_PAGES: u8 = 3;
const BLOCK_CHARS: u8 = 4;
const BLOCK_KERNINGS: u8 = 5;

/// Fixed prefix of the info block, before the font name.
const INFO_FIXED_LEN: usize = 14;
/// Exact size of the common block.
const COMMON_LEN: usize = 15;
/// Size of one character record in a chars block.
const CHAR_RECORD_LEN: usize = 20;
/// Size of one pair record in a kerning block.
const KERNING_RECORD_LEN: usize = 10;

/// Decode a descriptor in the binary block format.
pub fn decode(data: &[u8]) -> FontResult<Font> {
    if data.len() < 4 || data[..3] != MAGIC {
        return Err(FontError::new(
            ErrorKind::InvalidFormat,
            "source does not contain BMFont data",
        ));
    }
    if data[3] != VERSION {
        return Err(FontError::new(
            ErrorKind::InvalidFormat,
            format!("unsupported BMFont version {}", data[3]),
        ));
    }

    let mut font = Font::default();
    let mut page_count: u16 = 0;
    let mut pos = 4;

    while data.len() - pos >= 5 {
        let block_type = data[pos];
        let block_len = read_u32(data, pos + 1) as usize;
        pos += 5;

        if block_len > data.len() - pos {
            return Err(FontError::new(
                ErrorKind::TruncatedData,
                format!(
                    "block declares {block_len} bytes with {} remaining",
                    data.len() - pos
                ),
            ));
        }
        let block = &data[pos..pos + block_len];
        pos += block_len;

        match block_type {
            BLOCK_INFO => decode_info(block, &mut font)?,
            BLOCK_COMMON => page_count = decode_common(block, &mut font)?,
            BLOCK_PAGES => decode_pages(block, page_count, &mut font),
            BLOCK_CHARS => decode_chars(block, &mut font),
            BLOCK_KERNINGS => decode_kernings(block, &mut font),
            other => {
                return Err(FontError::new(
                    ErrorKind::InvalidFormat,
                    format!("block type {other} is not a valid BMFont block"),
                ));
            }
        }
    }

    Ok(font)
}

fn decode_info(block: &[u8], font: &mut Font) -> FontResult<()> {
    if block.len() < INFO_FIXED_LEN {
        return Err(FontError::new(
            ErrorKind::InvalidFormat,
            format!("info block of {} bytes is too short", block.len()),
        ));
    }

    font.size = i32::from(read_i16(block, 0));
    let bits = block[2];
    font.smoothed = bits & (1 << 7) != 0;
    font.unicode = bits & (1 << 6) != 0;
    font.italic = bits & (1 << 5) != 0;
    font.bold = bits & (1 << 4) != 0;
    // Byte 3 carries a numeric charset id; the model only keeps the
    // name form, so it stays empty here.
    font.charset = String::new();
    font.stretched_height = i32::from(read_i16(block, 4));
    // Full 16-bit read; the high byte overlaps the first padding byte.
    font.super_sampling = i32::from(read_i16(block, 6));
    // File order is up, right, down, left.
    font.padding = Padding {
        top: i32::from(block[7]),
        right: i32::from(block[8]),
        bottom: i32::from(block[9]),
        left: i32::from(block[10]),
    };
    font.spacing = Spacing {
        x: i32::from(block[11]),
        y: i32::from(block[12]),
    };
    font.outline_size = i32::from(block[13]);
    let (name, _) = read_cstr(block, INFO_FIXED_LEN);
    font.family_name = name;
    Ok(())
}

fn decode_common(block: &[u8], font: &mut Font) -> FontResult<u16> {
    if block.len() < COMMON_LEN {
        return Err(FontError::new(
            ErrorKind::InvalidFormat,
            format!("common block of {} bytes is too short", block.len()),
        ));
    }

    font.line_height = i32::from(read_i16(block, 0));
    font.base_height = i32::from(read_i16(block, 2));
    font.texture_width = i32::from(read_i16(block, 4));
    font.texture_height = i32::from(read_i16(block, 6));
    let page_count = read_u16(block, 8);
    font.pages = Vec::with_capacity(usize::from(page_count));
    font.packed = block[10] & 1 != 0;
    font.alpha_channel = i32::from(block[11]);
    font.red_channel = i32::from(block[12]);
    font.green_channel = i32::from(block[13]);
    font.blue_channel = i32::from(block[14]);
    Ok(page_count)
}

/// The pages block is a contiguous run of NUL-terminated file names;
/// ids are assigned by position, up to the count the common block
/// established.
fn decode_pages(block: &[u8], page_count: u16, font: &mut Font) {
    font.pages.clear();
    let mut offset = 0;
    for id in 0..page_count {
        let (file_name, next) = read_cstr(block, offset);
        offset = next;
        font.pages.push(Page {
            id: i32::from(id),
            file_name,
        });
    }
}

fn decode_chars(block: &[u8], font: &mut Font) {
    // Truncating division: remainder bytes are dropped, not an error.
    let count = block.len() / CHAR_RECORD_LEN;
    let mut characters = HashMap::with_capacity(count);

    for i in 0..count {
        let start = i * CHAR_RECORD_LEN;
        let character = Character {
            codepoint: read_u32(block, start),
            x: i32::from(read_i16(block, start + 4)),
            y: i32::from(read_i16(block, start + 6)),
            width: i32::from(read_i16(block, start + 8)),
            height: i32::from(read_i16(block, start + 10)),
            xoffset: i32::from(read_i16(block, start + 12)),
            yoffset: i32::from(read_i16(block, start + 14)),
            xadvance: i32::from(read_i16(block, start + 16)),
            page: i32::from(block[start + 18]),
            channel: i32::from(block[start + 19]),
        };
        // Last record for a codepoint wins.
        characters.insert(character.codepoint, character);
    }

    font.characters = characters;
}

fn decode_kernings(block: &[u8], font: &mut Font) {
    let count = block.len() / KERNING_RECORD_LEN;
    let mut kernings = HashMap::with_capacity(count);

    for i in 0..count {
        let start = i * KERNING_RECORD_LEN;
        let first = read_u32(block, start);
        let second = read_u32(block, start + 4);
        let amount = i32::from(read_i16(block, start + 8));
        // First record for a pair wins.
        kernings.entry((first, second)).or_insert(amount);
    }

    font.kernings = kernings;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Decoder for the BMFont text format.
//!
//! Each line is a record tag (`info`, `common`, `page`, `char`,
//! `kerning`) followed by space-delimited `key=value` fields. The
//! format is loosely schema'd: unknown tags are skipped for forward
//! compatibility, and a missing key yields its field's type default
//! rather than an error.
//!
//! Duplicate handling is deliberately asymmetric: a later `char` record
//! for a codepoint replaces the earlier one, while a later `kerning`
//! record for a pair already seen is ignored.

use std::collections::BTreeMap;

use crate::codec::{
    field_bool, field_i32, field_str, parse_fields, parse_padding, parse_spacing,
};
use crate::error::FontResult;
use crate::font::{Character, Font, Page};

/// Decode a descriptor in the text key/value format.
pub fn decode(source: &str) -> FontResult<Font> {
    let mut font = Font::default();
    // Pages accumulate keyed by declared id so the final sequence is
    // ordered by id, not by line order; a repeated id keeps the last
    // declaration.
    let mut pages: BTreeMap<i32, Page> = BTreeMap::new();

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (tag, rest) = line.split_once(' ').unwrap_or((line, ""));
        let fields = parse_fields(rest);

        match tag {
            "info" => {
                font.family_name = field_str(&fields, "face");
                font.size = field_i32(&fields, "size");
                font.bold = field_bool(&fields, "bold");
                font.italic = field_bool(&fields, "italic");
                font.charset = field_str(&fields, "charset");
                font.unicode = field_bool(&fields, "unicode");
                font.stretched_height = field_i32(&fields, "stretchH");
                font.smoothed = field_bool(&fields, "smooth");
                font.super_sampling = field_i32(&fields, "aa");
                font.padding = parse_padding(&field_str(&fields, "padding"));
                font.spacing = parse_spacing(&field_str(&fields, "spacing"));
                font.outline_size = field_i32(&fields, "outline");
            }
            "common" => {
                font.line_height = field_i32(&fields, "lineHeight");
                font.base_height = field_i32(&fields, "base");
                font.texture_width = field_i32(&fields, "scaleW");
                font.texture_height = field_i32(&fields, "scaleH");
                font.packed = field_bool(&fields, "packed");
                font.alpha_channel = field_i32(&fields, "alphaChnl");
                font.red_channel = field_i32(&fields, "redChnl");
                font.green_channel = field_i32(&fields, "greenChnl");
                font.blue_channel = field_i32(&fields, "blueChnl");
            }
            "page" => {
                let id = field_i32(&fields, "id");
                let file_name = field_str(&fields, "file");
                pages.insert(id, Page { id, file_name });
            }
            "char" => {
                let character = Character {
                    codepoint: field_i32(&fields, "id") as u32,
                    x: field_i32(&fields, "x"),
                    y: field_i32(&fields, "y"),
                    width: field_i32(&fields, "width"),
                    height: field_i32(&fields, "height"),
                    xoffset: field_i32(&fields, "xoffset"),
                    yoffset: field_i32(&fields, "yoffset"),
                    xadvance: field_i32(&fields, "xadvance"),
                    page: field_i32(&fields, "page"),
                    channel: field_i32(&fields, "chnl"),
                };
                // Last record for a codepoint wins.
                font.characters.insert(character.codepoint, character);
            }
            "kerning" => {
                let first = field_i32(&fields, "first") as u32;
                let second = field_i32(&fields, "second") as u32;
                let amount = field_i32(&fields, "amount");
                // First record for a pair wins.
                font.kernings.entry((first, second)).or_insert(amount);
            }
            // Unknown tags (including the `chars`/`kernings` count
            // lines) are skipped.
            _ => {}
        }
    }

    font.pages = pages.into_values().collect();
    Ok(font)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

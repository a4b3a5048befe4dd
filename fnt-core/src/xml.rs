//! Decoder for the BMFont XML format.
//!
//! The document mirrors the text format: an `info` and a `common`
//! element whose attributes carry the same keys (booleans written as
//! `"0"`/`"1"`), then `pages/page`, `chars/char`, and
//! `kernings/kerning` children. Unlike the text decoder, every
//! attribute is mandatory here: a missing or unparsable attribute is an
//! [`ErrorKind::InvalidFormat`] error.
//!
//! Page ordering and the char/kerning duplicate policies match the text
//! decoder exactly, so a text file and its XML twin decode model-equal.

use std::collections::BTreeMap;

use roxmltree::{Document, Node};

use crate::codec::{parse_padding, parse_spacing};
use crate::error::{ErrorKind, FontError, FontResult};
use crate::font::{Character, Font, Page};

/// Decode a descriptor in the XML format.
pub fn decode(source: &str) -> FontResult<Font> {
    let doc = Document::parse(source)
        .map_err(|e| FontError::new(ErrorKind::InvalidFormat, format!("malformed XML: {e}")))?;
    let root = doc.root_element();
    let mut font = Font::default();

    let info = require_child(root, "info")?;
    font.family_name = attr(info, "face")?.to_owned();
    font.size = attr_i32(info, "size")?;
    font.bold = attr_bool(info, "bold")?;
    font.italic = attr_bool(info, "italic")?;
    font.unicode = attr_bool(info, "unicode")?;
    font.stretched_height = attr_i32(info, "stretchH")?;
    font.charset = attr(info, "charset")?.to_owned();
    font.smoothed = attr_bool(info, "smooth")?;
    font.super_sampling = attr_i32(info, "aa")?;
    font.padding = parse_padding(attr(info, "padding")?);
    font.spacing = parse_spacing(attr(info, "spacing")?);
    font.outline_size = attr_i32(info, "outline")?;

    let common = require_child(root, "common")?;
    font.base_height = attr_i32(common, "base")?;
    font.line_height = attr_i32(common, "lineHeight")?;
    font.texture_width = attr_i32(common, "scaleW")?;
    font.texture_height = attr_i32(common, "scaleH")?;
    font.packed = attr_bool(common, "packed")?;
    font.alpha_channel = attr_i32(common, "alphaChnl")?;
    font.red_channel = attr_i32(common, "redChnl")?;
    font.green_channel = attr_i32(common, "greenChnl")?;
    font.blue_channel = attr_i32(common, "blueChnl")?;

    let mut pages: BTreeMap<i32, Page> = BTreeMap::new();
    if let Some(container) = child(root, "pages") {
        for node in elements(container, "page") {
            let id = attr_i32(node, "id")?;
            let file_name = attr(node, "file")?.to_owned();
            pages.insert(id, Page { id, file_name });
        }
    }
    font.pages = pages.into_values().collect();

    if let Some(container) = child(root, "chars") {
        for node in elements(container, "char") {
            let character = Character {
                codepoint: attr_i32(node, "id")? as u32,
                x: attr_i32(node, "x")?,
                y: attr_i32(node, "y")?,
                width: attr_i32(node, "width")?,
                height: attr_i32(node, "height")?,
                xoffset: attr_i32(node, "xoffset")?,
                yoffset: attr_i32(node, "yoffset")?,
                xadvance: attr_i32(node, "xadvance")?,
                page: attr_i32(node, "page")?,
                channel: attr_i32(node, "chnl")?,
            };
            // Last record for a codepoint wins.
            font.characters.insert(character.codepoint, character);
        }
    }

    if let Some(container) = child(root, "kernings") {
        for node in elements(container, "kerning") {
            let first = attr_i32(node, "first")? as u32;
            let second = attr_i32(node, "second")? as u32;
            let amount = attr_i32(node, "amount")?;
            // First record for a pair wins.
            font.kernings.entry((first, second)).or_insert(amount);
        }
    }

    Ok(font)
}

// ---------------------------------------------------------------------------
// Node helpers
// ---------------------------------------------------------------------------

fn elements<'a, 'input>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    parent
        .children()
        .filter(move |n| n.is_element() && n.has_tag_name(name))
}

fn child<'a, 'input>(parent: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    elements(parent, name).next()
}

fn require_child<'a, 'input>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> FontResult<Node<'a, 'input>> {
    child(parent, name).ok_or_else(|| {
        FontError::new(ErrorKind::InvalidFormat, format!("missing <{name}> element"))
    })
}

fn attr<'a>(node: Node<'a, '_>, name: &str) -> FontResult<&'a str> {
    node.attribute(name).ok_or_else(|| {
        FontError::new(
            ErrorKind::InvalidFormat,
            format!(
                "missing attribute \"{name}\" on <{}>",
                node.tag_name().name()
            ),
        )
    })
}

fn attr_i32(node: Node<'_, '_>, name: &str) -> FontResult<i32> {
    let value = attr(node, name)?;
    value.parse().map_err(|_| {
        FontError::new(
            ErrorKind::InvalidFormat,
            format!("attribute \"{name}\" is not an integer: {value:?}"),
        )
    })
}

fn attr_bool(node: Node<'_, '_>, name: &str) -> FontResult<bool> {
    Ok(attr_i32(node, name)? != 0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

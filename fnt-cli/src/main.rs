//! `fnt` CLI — inspect BMFont descriptors and measure text.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use fnt_core::{
    load_file, loader, ErrorKind, Font, FontError, FontResult, Format,
};

#[derive(Parser)]
#[command(version, about = "fnt \u{2014} BMFont descriptor inspection and text measurement")]
struct Cli {
    /// Font descriptor file to load
    file: PathBuf,

    /// Input format: "auto", "text", "xml" or "binary"
    #[arg(long, default_value = "auto", value_parser = parse_format)]
    format: InputFormat,

    /// Measure this string with the loaded font
    #[arg(short, long, value_name = "TEXT")]
    measure: Option<String>,

    /// Wrap measured text at this pixel width
    #[arg(long, value_name = "PIXELS")]
    max_width: Option<i32>,
}

#[derive(Debug, Clone, Copy)]
enum InputFormat {
    Auto,
    Text,
    Xml,
    Binary,
}

fn parse_format(s: &str) -> Result<InputFormat, String> {
    match s.to_lowercase().as_str() {
        "auto" => Ok(InputFormat::Auto),
        "text" => Ok(InputFormat::Text),
        "xml" => Ok(InputFormat::Xml),
        "binary" => Ok(InputFormat::Binary),
        _ => Err(format!(
            "unknown format \"{s}\": expected \"auto\", \"text\", \"xml\" or \"binary\""
        )),
    }
}

fn load(cli: &Cli) -> FontResult<Font> {
    let format = match cli.format {
        InputFormat::Auto => return load_file(&cli.file),
        InputFormat::Text => Format::Text,
        InputFormat::Xml => Format::Xml,
        InputFormat::Binary => Format::Binary,
    };

    let data = fs::read(&cli.file).map_err(|e| {
        FontError::new(
            ErrorKind::Io,
            format!("cannot read {}: {e}", cli.file.display()),
        )
    })?;
    let mut font = format.decode(&data)?;
    if let Some(dir) = cli.file.parent() {
        loader::qualify_page_paths(&mut font, dir);
    }
    Ok(font)
}

fn print_summary(font: &Font) {
    println!("face: {}", font.family_name);
    println!("size: {}", font.size);

    let mut style = Vec::new();
    if font.bold {
        style.push("bold");
    }
    if font.italic {
        style.push("italic");
    }
    if font.smoothed {
        style.push("smoothed");
    }
    if font.unicode {
        style.push("unicode");
    }
    if !style.is_empty() {
        println!("style: {}", style.join(", "));
    }

    println!("line height: {} (base {})", font.line_height, font.base_height);
    println!("texture: {}x{}", font.texture_width, font.texture_height);
    println!("pages: {}", font.pages.len());
    for page in &font.pages {
        println!("  [{}] {}", page.id, page.file_name);
    }
    println!("characters: {}", font.characters.len());
    println!("kerning pairs: {}", font.kernings.len());
}

fn main() {
    let cli = Cli::parse();

    let font = match load(&cli) {
        Ok(font) => font,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    print_summary(&font);

    if let Some(ref text) = cli.measure {
        match font.measure_wrapped(text, cli.max_width) {
            Ok(size) => println!("measure: {}x{}", size.width, size.height),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}

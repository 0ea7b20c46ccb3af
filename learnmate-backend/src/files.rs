//! Task-description extraction from uploaded or local files.
//!
//! Supports plain `.txt` and Word `.docx` (the OOXML container is a zip;
//! paragraph text lives in `word/document.xml`).

use std::io::{Cursor, Read};
use std::path::Path;

pub const UNSUPPORTED_TYPE_MESSAGE: &str =
    "Unsupported file type. Please upload .txt or .docx files.";

/// Whether the filename has an extension this module can extract text from.
pub fn is_supported(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    lower.ends_with(".txt") || lower.ends_with(".docx")
}

/// Extract the text content of an uploaded file, dispatching on extension.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, String> {
    let lower = filename.to_lowercase();
    if lower.ends_with(".txt") {
        String::from_utf8(bytes.to_vec())
            .map_err(|_| format!("File '{}' is not valid UTF-8 text", filename))
    } else if lower.ends_with(".docx") {
        extract_docx_text(bytes)
    } else {
        Err(UNSUPPORTED_TYPE_MESSAGE.to_string())
    }
}

/// Read a task description from a file on disk (CLI `--file`).
pub fn read_task_file(path: &Path) -> Result<String, String> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !is_supported(&filename) {
        return Err("Unsupported file type. Please use .txt or .docx".to_string());
    }
    let bytes =
        std::fs::read(path).map_err(|e| format!("File not found: {}: {}", path.display(), e))?;
    extract_text(&filename, &bytes)
}

/// Pull paragraph text out of a .docx document.
fn extract_docx_text(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| format!("Invalid .docx file: {}", e))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| format!("Invalid .docx file: missing document body: {}", e))?
        .read_to_string(&mut document_xml)
        .map_err(|e| format!("Invalid .docx file: {}", e))?;

    // Paragraph closes become newlines; every other tag is dropped and the
    // remaining text nodes concatenated.
    let with_breaks = document_xml.replace("</w:p>", "\n");
    let mut text = String::with_capacity(with_breaks.len() / 4);
    let mut in_tag = false;
    for c in with_breaks.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }

    let text = decode_xml_entities(&text);
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn decode_xml_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

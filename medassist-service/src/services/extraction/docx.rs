use super::ExtractionError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Main document part of a WordprocessingML package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Largest decompressed `word/document.xml` accepted (64 MiB).
const MAX_DOCUMENT_PART_BYTES: u64 = 64 * 1024 * 1024;

/// Text of every top-level body paragraph, each followed by `\n`.
///
/// Paragraph text is the concatenation of its runs: `w:t` verbatim, `w:tab`
/// as a tab, `w:br`/`w:cr` as a line break. Paragraphs nested inside tables,
/// text boxes or content controls are not body paragraphs and are skipped.
pub(super) fn extract_text(content: &[u8]) -> Result<String, ExtractionError> {
    let xml = read_document_part(content, MAX_DOCUMENT_PART_BYTES)?;
    body_paragraphs_text(&xml)
}

/// Decompress the main document part, refusing anything larger than `limit`
/// bytes. The declared size is checked first, then enforced while reading.
fn read_document_part(content: &[u8], limit: u64) -> Result<String, ExtractionError> {
    let part_err = |e: &dyn std::fmt::Display| {
        ExtractionError::DocxParsing(format!("{}: {}", DOCUMENT_PART, e))
    };
    let too_large = || {
        ExtractionError::DocxParsing(format!(
            "{} exceeds {} bytes when decompressed",
            DOCUMENT_PART, limit
        ))
    };

    let mut archive = ZipArchive::new(Cursor::new(content))
        .map_err(|e| ExtractionError::DocxParsing(e.to_string()))?;
    let part = archive.by_name(DOCUMENT_PART).map_err(|e| part_err(&e))?;

    if part.size() > limit {
        return Err(too_large());
    }

    let mut xml = String::new();
    part.take(limit + 1)
        .read_to_string(&mut xml)
        .map_err(|e| part_err(&e))?;

    if xml.len() as u64 > limit {
        return Err(too_large());
    }

    Ok(xml)
}

fn body_paragraphs_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let xml_err = |e: quick_xml::Error| ExtractionError::DocxParsing(e.to_string());

    // Qualified names of the currently open elements, outermost first.
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut paragraph: Option<String> = None;
    let mut in_text = false;
    let mut output = String::new();

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                match name.as_slice() {
                    b"w:p" if parent_is_body(&path) => paragraph = Some(String::new()),
                    b"w:t" => in_text = paragraph.is_some() && is_paragraph_run(&path),
                    _ => {}
                }
                path.push(name);
            }
            Event::Empty(e) => {
                let name = e.name();
                match name.as_ref() {
                    b"w:p" if parent_is_body(&path) => output.push('\n'),
                    b"w:tab" if is_paragraph_run(&path) => {
                        if let Some(p) = paragraph.as_mut() {
                            p.push('\t');
                        }
                    }
                    b"w:br" | b"w:cr" if is_paragraph_run(&path) => {
                        if let Some(p) = paragraph.as_mut() {
                            p.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) if in_text => {
                if let Some(p) = paragraph.as_mut() {
                    p.push_str(&e.unescape().map_err(xml_err)?);
                }
            }
            Event::CData(e) if in_text => {
                if let Some(p) = paragraph.as_mut() {
                    p.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => {
                path.pop();
                match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" if parent_is_body(&path) => {
                        if let Some(p) = paragraph.take() {
                            output.push_str(&p);
                            output.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(output)
}

fn parent_is_body(path: &[Vec<u8>]) -> bool {
    path.last().is_some_and(|name| name.as_slice() == b"w:body")
}

/// True when the innermost open element is a run of a body paragraph, either
/// directly or through a hyperlink.
fn is_paragraph_run(path: &[Vec<u8>]) -> bool {
    let names: Vec<&[u8]> = path.iter().map(|n| n.as_slice()).collect();
    matches!(
        names.as_slice(),
        [.., b"w:body", b"w:p", b"w:r"] | [.., b"w:body", b"w:p", b"w:hyperlink", b"w:r"]
    )
}

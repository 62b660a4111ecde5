//! DOCX text extraction: reads the text runs of `word/document.xml` out of the OOXML zip.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the decompressed size of `word/document.xml`.
const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

pub(super) fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let xml = read_document_part(bytes, MAX_DOCUMENT_XML_BYTES)?;
    document_xml_to_text(&xml)
}

/// Reads the main document part, refusing to inflate more than `limit` bytes.
fn read_document_part(bytes: &[u8], limit: u64) -> Result<String, ExtractionError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractionError::ExtractionFailed(format!("not a DOCX container: {e}")))?;

    let entry = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    let read = entry
        .take(limit + 1)
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    if read as u64 > limit {
        return Err(ExtractionError::ExtractionFailed(format!(
            "{DOCUMENT_PART} exceeds {limit} bytes when decompressed"
        )));
    }
    Ok(xml)
}

/// Walks WordprocessingML and keeps only `w:t` contents. Tabs, breaks and
/// paragraph ends become whitespace so words on separate lines stay apart.
fn document_xml_to_text(xml: &str) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::with_capacity(xml.len() / 4);
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t.unescape().map_err(|e| {
                    ExtractionError::ExtractionFailed(format!("bad text run: {e}"))
                })?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::ExtractionFailed(format!(
                    "malformed {DOCUMENT_PART} at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(out)
}

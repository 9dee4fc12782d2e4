// ============================================================
// Layer 4 — Spreadsheet (XLSX) Extractor
// ============================================================
// An .xlsx file is a ZIP archive of XML parts:
//
//   xl/sharedStrings.xml      ← every distinct string cell value
//   xl/worksheets/sheet1.xml  ← cells of the first sheet
//   xl/worksheets/sheet2.xml  ← ...
//
// Inside a worksheet:
//   <row r="1">
//     <c r="A1" t="s"><v>0</v></c>                    shared string #0
//     <c r="B1"><v>42.5</v></c>                       number, verbatim
//     <c r="C1" t="inlineStr"><is><t>hi</t></is></c>  inline string
//   </row>
//
// Output text: non-empty cells of a row joined by a space,
// rows joined by '\n', sheets (in numeric sheet order)
// joined by '\n'.
//
// Reference: ECMA-376 Part 1 §18.3 (Worksheets), §18.4 (Shared Strings)

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};

use crate::domain::document::DocumentKind;
use crate::domain::errors::ExtractionError;
use crate::domain::traits::DocumentExtractor;

const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const SHEET_PREFIX:   &str = "xl/worksheets/sheet";

/// Reads the text content of every worksheet in an XLSX workbook.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for SpreadsheetExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Spreadsheet
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractionError::Spreadsheet(format!("not a ZIP archive: {e}")))?;

        // A workbook with only numbers has no shared string table
        let shared = match read_part(&mut archive, SHARED_STRINGS)? {
            Some(xml) => parse_shared_strings(&xml)?,
            None      => Vec::new(),
        };

        let mut sheets: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| sheet_index(name).map(|i| (i, name.to_string())))
            .collect();
        sheets.sort();

        if sheets.is_empty() {
            return Err(ExtractionError::Spreadsheet("workbook has no worksheets".into()));
        }

        let mut parts = Vec::with_capacity(sheets.len());
        for (_, name) in &sheets {
            let Some(xml) = read_part(&mut archive, name)? else {
                continue;
            };
            let text = parse_sheet(&xml, &shared)?;
            tracing::debug!("Sheet '{}': {} chars", name, text.len());
            if !text.is_empty() {
                parts.push(text);
            }
        }

        Ok(parts.join("\n"))
    }
}

/// `xl/worksheets/sheet12.xml` → Some(12)
fn sheet_index(name: &str) -> Option<u32> {
    name.strip_prefix(SHEET_PREFIX)?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

/// Read one archive member as UTF-8; Ok(None) if it is absent.
fn read_part(
    archive: &mut zip::ZipArchive<Cursor<&[u8]>>,
    name:    &str,
) -> Result<Option<String>, ExtractionError> {
    let mut file = match archive.by_name(name) {
        Ok(f) => f,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(ExtractionError::Spreadsheet(format!("cannot open '{name}': {e}")));
        }
    };

    let mut xml = String::new();
    file.read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Spreadsheet(format!("cannot read '{name}': {e}")))?;
    Ok(Some(xml))
}

fn xml_error(part: &str, reader: &Reader<&[u8]>, e: impl std::fmt::Display) -> ExtractionError {
    ExtractionError::Spreadsheet(format!(
        "malformed {part} at byte {}: {e}",
        reader.buffer_position()
    ))
}

/// Parse `<sst>` into the shared string table. Rich-text entries
/// (`<si><r><t>a</t></r><r><t>b</t></r></si>`) are concatenated.
fn parse_shared_strings(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader  = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si   = false;
    let mut in_t    = false;

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"t" if in_si => in_t = true,
                _ => {}
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Ok(Event::Text(t)) if in_t => {
                let text = t.unescape().map_err(|e| xml_error("shared strings", &reader, e))?;
                current.push_str(&text);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t"  => in_t = false,
                b"si" => {
                    in_si = false;
                    strings.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            Err(e) => return Err(xml_error("shared strings", &reader, e)),
            _ => {}
        }
    }

    Ok(strings)
}

/// The `t` attribute of a `<c>` element, if any
fn cell_type(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == b"t")
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Resolve a cell's raw value according to its type
fn cell_text(kind: Option<&str>, raw: &str, shared: &[String]) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match kind {
        Some("s") => match raw.parse::<usize>().ok().and_then(|i| shared.get(i)) {
            Some(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            None => {
                tracing::warn!("Shared string index '{}' out of range, cell skipped", raw);
                None
            }
        },
        Some("b") => Some(if raw == "1" { "TRUE" } else { "FALSE" }.to_string()),
        _ => Some(raw.to_string()),
    }
}

/// Parse one worksheet into text: one line per non-empty row.
fn parse_sheet(xml: &str, shared: &[String]) -> Result<String, ExtractionError> {
    let mut reader = Reader::from_str(xml);

    let mut lines: Vec<String> = Vec::new();
    let mut row:   Vec<String> = Vec::new();

    let mut kind: Option<String> = None;
    let mut raw   = String::new();
    let mut in_value = false;

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"row" => row.clear(),
                b"c" => {
                    kind = cell_type(&e);
                    raw.clear();
                }
                // <v> holds the value; <t> holds an inline string
                b"v" | b"t" => in_value = true,
                _ => {}
            },
            Ok(Event::Text(t)) if in_value => {
                let text = t.unescape().map_err(|e| xml_error("worksheet", &reader, e))?;
                raw.push_str(&text);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    if let Some(text) = cell_text(kind.as_deref(), &raw, shared) {
                        row.push(text);
                    }
                    kind = None;
                }
                b"row" => {
                    if !row.is_empty() {
                        lines.push(row.join(" "));
                        row.clear();
                    }
                }
                _ => {}
            },
            Err(e) => return Err(xml_error("worksheet", &reader, e)),
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_xlsx(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let opts = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, body) in parts {
            zip.start_file(*name, opts).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    const SST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
  <si><t>Product</t></si>
  <si><t>Price</t></si>
  <si><r><t>Widget </t></r><r><t>&amp; Co</t></r></si>
</sst>"#;

    const SHEET1: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
    <row r="2"><c r="A2" t="s"><v>2</v></c><c r="B2"><v>9.5</v></c></row>
    <row r="3"><c r="A3"/></row>
  </sheetData>
</worksheet>"#;

    const SHEET2: &str = r#"<worksheet><sheetData>
    <row r="1"><c r="A1" t="inlineStr"><is><t>In stock</t></is></c><c r="B1" t="b"><v>1</v></c></row>
</sheetData></worksheet>"#;

    #[test]
    fn test_extracts_rows_and_sheets_in_order() {
        // Stored out of order on purpose; sheet10 sorts after sheet2
        let bytes = build_xlsx(&[
            ("xl/worksheets/sheet10.xml", SHEET2),
            ("xl/worksheets/sheet2.xml", SHEET2),
            ("xl/sharedStrings.xml", SST),
            ("xl/worksheets/sheet1.xml", SHEET1),
        ]);
        let text = SpreadsheetExtractor::new().extract(&bytes).unwrap();
        assert_eq!(
            text,
            "Product Price\nWidget & Co 9.5\nIn stock TRUE\nIn stock TRUE"
        );
    }

    #[test]
    fn test_numbers_only_workbook_without_shared_strings() {
        let sheet = r#"<worksheet><sheetData><row><c><v>1</v></c><c><v>2</v></c></row></sheetData></worksheet>"#;
        let bytes = build_xlsx(&[("xl/worksheets/sheet1.xml", sheet)]);
        assert_eq!(SpreadsheetExtractor::new().extract(&bytes).unwrap(), "1 2");
    }

    #[test]
    fn test_out_of_range_shared_string_is_skipped() {
        let sheet = r#"<worksheet><sheetData><row><c t="s"><v>7</v></c><c><v>3</v></c></row></sheetData></worksheet>"#;
        let bytes = build_xlsx(&[("xl/worksheets/sheet1.xml", sheet)]);
        assert_eq!(SpreadsheetExtractor::new().extract(&bytes).unwrap(), "3");
    }

    #[test]
    fn test_not_a_zip_is_an_error() {
        let err = SpreadsheetExtractor::new().extract(b"plain text").unwrap_err();
        assert!(matches!(err, ExtractionError::Spreadsheet(_)));
    }

    #[test]
    fn test_zip_without_sheets_is_an_error() {
        let bytes = build_xlsx(&[("docProps/app.xml", "<Properties/>")]);
        assert!(SpreadsheetExtractor::new().extract(&bytes).is_err());
    }

    #[test]
    fn test_sheet_index() {
        assert_eq!(sheet_index("xl/worksheets/sheet3.xml"), Some(3));
        assert_eq!(sheet_index("xl/worksheets/_rels/sheet3.xml.rels"), None);
        assert_eq!(sheet_index("xl/sharedStrings.xml"), None);
    }
}

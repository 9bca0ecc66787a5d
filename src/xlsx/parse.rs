use quick_xml::events::*;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;
use crate::error::Result;
use super::SheetRow;

// Element names may carry a namespace prefix ("x:row").
fn local(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|&b| b == b':') {
        Some(i) => &name[i + 1..],
        None => name,
    }
}

fn get_attribute<B: BufRead>(reader: &Reader<B>, tag: &BytesStart, attr: &str) -> Result<Option<String>> {
    tag.attributes().flat_map(|x| x)
        .find(|a| a.key == attr.as_bytes())
        .map(|a| a.unescape_and_decode_value(reader))
        .transpose()
        .map_err(|e| e.into())
}

/// Column index of a cell reference: `A1` is 0, `AB7` is 27.
fn column_index(reference: &str) -> Option<usize> {
    reference
        .bytes()
        .take_while(u8::is_ascii_uppercase)
        .fold(0usize, |acc, b| acc * 26 + (b - b'A' + 1) as usize)
        .checked_sub(1)
}

/// Sheet names paired with their relationship ids, from `xl/workbook.xml`.
pub fn get_sheets<B: BufRead>(reader: &mut Reader<B>) -> Result<Vec<(String, String)>> {
    let mut buf = Vec::new();
    let mut sheets = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Empty(ref event) | Event::Start(ref event) if local(event.name()) == b"sheet" => {
                let name = get_attribute(reader, event, "name")?;
                let id = get_attribute(reader, event, "r:id")?;
                if let (Some(name), Some(id)) = (name, id) {
                    sheets.push((name, id));
                }
            }
            Event::Eof => break,
            _ => ()
        }
        buf.clear();
    }
    Ok(sheets)
}

/// Relationship id to target path, from `xl/_rels/workbook.xml.rels`.
pub fn get_relationships<B: BufRead>(reader: &mut Reader<B>) -> Result<HashMap<String, String>> {
    let mut buf = Vec::new();
    let mut rels = HashMap::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Empty(ref event) | Event::Start(ref event) if local(event.name()) == b"Relationship" => {
                let id = get_attribute(reader, event, "Id")?;
                let target = get_attribute(reader, event, "Target")?;
                if let (Some(id), Some(target)) = (id, target) {
                    rels.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => ()
        }
        buf.clear();
    }
    Ok(rels)
}

// Concatenates the text runs of one <si>, leaving out phonetic hints.
fn get_string_item<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>) -> Result<String> {
    let mut text = String::new();
    let mut phonetic = false;

    loop {
        match reader.read_event(buf)? {
            Event::Start(ref event) if local(event.name()) == b"rPh" => phonetic = true,
            Event::End(ref event) if local(event.name()) == b"rPh" => phonetic = false,
            Event::Start(ref event) if local(event.name()) == b"t" => {
                let end = event.name().to_vec();
                let raw = reader.read_text(&end, buf)?;
                if !phonetic {
                    text += &raw;
                }
            }
            Event::End(ref event) if local(event.name()) == b"si" => break,
            Event::Eof => return Err(quick_xml::Error::UnexpectedEof("si".to_owned()).into()),
            _ => ()
        }
        buf.clear();
    }

    Ok(text)
}

pub fn get_shared_strings<B: BufRead>(reader: &mut Reader<B>) -> Result<Vec<String>> {
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref event) if local(event.name()) == b"si" => {
                strings.push(get_string_item(reader, &mut Vec::new())?);
            }
            Event::Empty(ref event) if local(event.name()) == b"si" => {
                strings.push(String::new());
            }
            Event::Eof => break,
            _ => ()
        }
        buf.clear();
    }
    Ok(strings)
}

fn get_cell<B: BufRead>(reader: &mut Reader<B>, buf: &mut Vec<u8>, ty: Option<&str>, shared: &[String]) -> Result<String> {
    let mut raw = String::new();

    loop {
        match reader.read_event(buf)? {
            // <v> holds the value, <is><t> an inline string.
            Event::Start(ref event) if local(event.name()) == b"v" || local(event.name()) == b"t" => {
                let end = event.name().to_vec();
                raw += &reader.read_text(&end, buf)?;
            }
            Event::End(ref event) if local(event.name()) == b"c" => break,
            Event::Eof => return Err(quick_xml::Error::UnexpectedEof("c".to_owned()).into()),
            _ => ()
        }
        buf.clear();
    }

    let value = match ty {
        Some("s") => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|i| shared.get(i))
            .cloned()
            .unwrap_or_default(),
        Some("b") if raw.trim() == "1" => "TRUE".to_owned(),
        Some("b") => "FALSE".to_owned(),
        _ => raw,
    };
    Ok(value)
}

/// Every `<row>` of a worksheet with its cell text placed by column.
pub fn get_rows<B: BufRead>(reader: &mut Reader<B>, shared: &[String]) -> Result<Vec<SheetRow>> {
    let mut buf = Vec::new();
    let mut rows: Vec<SheetRow> = Vec::new();
    loop {
        match reader.read_event(&mut buf)? {
            Event::Start(ref event) | Event::Empty(ref event) if local(event.name()) == b"row" => {
                let number = get_attribute(reader, event, "r")?
                    .and_then(|r| r.parse().ok())
                    .unwrap_or_else(|| rows.last().map_or(1, |r| r.number + 1));
                rows.push(SheetRow { number, cells: Vec::new() });
            }
            Event::Start(ref event) if local(event.name()) == b"c" => {
                let reference = get_attribute(reader, event, "r")?;
                let ty = get_attribute(reader, event, "t")?;
                let value = get_cell(reader, &mut Vec::new(), ty.as_ref().map(String::as_str), shared)?;

                if let Some(row) = rows.last_mut() {
                    let column = reference
                        .as_ref()
                        .and_then(|r| column_index(r))
                        .unwrap_or_else(|| row.cells.len());
                    if row.cells.len() <= column {
                        row.cells.resize(column + 1, String::new());
                    }
                    row.cells[column] = value;
                }
            }
            Event::Eof => break,
            _ => ()
        }
        buf.clear();
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_references() {
        assert_eq!(column_index("A1"), Some(0));
        assert_eq!(column_index("Z9"), Some(25));
        assert_eq!(column_index("AB7"), Some(27));
        assert_eq!(column_index("12"), None);
    }

    #[test]
    fn prefixed_names() {
        assert_eq!(local(b"x:row"), b"row");
        assert_eq!(local(b"row"), b"row");
    }

    #[test]
    fn rows_without_references() {
        let xml = r#"<worksheet><sheetData><row><c><v>1</v></c><c><v>2</v></c></row><row><c t="str"><v>a</v></c></row></sheetData></worksheet>"#;
        let rows = get_rows(&mut Reader::from_reader(xml.as_bytes()), &[]).unwrap();
        assert_eq!(rows[0], SheetRow { number: 1, cells: vec!["1".to_owned(), "2".to_owned()] });
        assert_eq!(rows[1], SheetRow { number: 2, cells: vec!["a".to_owned()] });
    }

    #[test]
    fn escaped_text() {
        let xml = r#"<sst><si><t>Mast &amp; Antenne</t></si><si/></sst>"#;
        let strings = get_shared_strings(&mut Reader::from_reader(xml.as_bytes())).unwrap();
        assert_eq!(strings, vec!["Mast & Antenne", ""]);
    }

    #[test]
    fn truncated_cell() {
        let xml = r#"<worksheet><sheetData><row r="1"><c r="A1"><v>1</v>"#;
        assert!(get_rows(&mut Reader::from_reader(xml.as_bytes()), &[]).is_err());
    }
}

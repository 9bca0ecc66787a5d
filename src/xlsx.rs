//! Minimal reader for the Office Open XML workbooks the obstacle lists ship as.
//!
//! Only cell text is read. Shared strings and inline strings are resolved,
//! every other cell keeps the raw text of its `<v>` element.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::debug;
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::zip_util::entry_to_pseudofile;

pub mod parse;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based row number as stored in the sheet.
    pub number: u32,
    /// Cell text by column, gaps filled with empty strings.
    pub cells: Vec<String>,
}

impl SheetRow {
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Sheet {
    pub rows: Vec<SheetRow>,
}

pub struct Workbook<R> {
    archive: ZipArchive<R>,
    /// Sheet name and archive path, in workbook order.
    sheets: Vec<(String, String)>,
    shared_strings: Vec<String>,
}

impl Workbook<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Workbook::new(BufReader::new(File::open(path)?))
    }
}

// Relationship targets are relative to xl/ unless they start with a slash.
fn resolve_target(target: &str) -> String {
    if target.starts_with('/') {
        target.trim_start_matches('/').to_owned()
    } else {
        format!("xl/{}", target)
    }
}

impl<R: Read + Seek> Workbook<R> {
    pub fn new(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let workbook = entry_to_pseudofile(&mut archive, "xl/workbook.xml")?;
        let names = parse::get_sheets(&mut Reader::from_reader(workbook))?;

        let rels = entry_to_pseudofile(&mut archive, "xl/_rels/workbook.xml.rels")?;
        let rels = parse::get_relationships(&mut Reader::from_reader(rels))?;

        let sheets = names
            .into_iter()
            .filter_map(|(name, id)| {
                let target = rels.get(&id)?;
                Some((name, resolve_target(target)))
            })
            .collect();

        let shared_strings = match entry_to_pseudofile(&mut archive, "xl/sharedStrings.xml") {
            Ok(file) => parse::get_shared_strings(&mut Reader::from_reader(file))?,
            Err(ZipError::FileNotFound) => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("{} shared strings", shared_strings.len());

        Ok(Workbook {
            archive,
            sheets,
            shared_strings,
        })
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sheets.iter().map(|(name, _)| name.as_str())
    }

    pub fn sheet(&mut self, name: &str) -> Result<Sheet> {
        let path = self
            .sheets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, path)| path.clone())
            .ok_or_else(|| Error::MissingSheet {
                name: name.to_owned(),
            })?;

        let file = entry_to_pseudofile(&mut self.archive, &path)?;
        let rows = parse::get_rows(&mut Reader::from_reader(file), &self.shared_strings)?;
        Ok(Sheet { rows })
    }
}

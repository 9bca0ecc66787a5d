use std::collections::HashMap;

use itertools::Itertools;
use log::debug;

use crate::error::{Error, Result};
use crate::xlsx::Sheet;

pub const LOCATION: &str = "Location";
pub const TYPE: &str = "Type";
pub const GEOMETRY: &str = "Geometry";
pub const COORDINATES: &str = "Coordinates (decimal degrees)";
pub const ELEVATION: &str = "ELEV (M / FT)";
pub const AGL: &str = "MAX HGT AGL (M / FT)";
pub const DAY_MARKING: &str = "Day marking";
pub const LIGHTED: &str = "Lighted";

/// One obstacle record, exactly as it appears in the sheet.
#[derive(Debug, Builder, Clone, PartialEq, Eq)]
#[builder(setter(into))]
pub struct Row {
    /// Sheet row number, for error reporting.
    #[builder(default)]
    pub number: u32,
    pub location: String,
    pub ty: String,
    pub geometry: String,
    pub coordinates: String,
    pub elevation: String,
    #[builder(default)]
    pub agl: String,
    #[builder(default)]
    pub day_marking: String,
    #[builder(default)]
    pub lighted: String,
}

impl Row {
    /// Identifier part of the location, used to name a row in errors.
    pub fn id(&self) -> &str {
        crate::text::split_location(&self.location).0
    }
}

// Column headers wrap inside their cells ("ELEV\n(M / FT)").
fn normalize_header(name: &str) -> String {
    name.split_whitespace().join(" ")
}

/// Maps normalized column names to cell positions.
#[derive(Debug)]
pub struct Header {
    columns: HashMap<String, usize>,
}

impl Header {
    pub fn new<T: AsRef<str>>(cells: &[T]) -> Self {
        let columns = cells
            .iter()
            .enumerate()
            .map(|(i, c)| (normalize_header(c.as_ref()), i))
            .filter(|(name, _)| !name.is_empty())
            .collect();
        Header { columns }
    }

    fn cell<'a, T: AsRef<str>>(&self, cells: &'a [T], name: &str) -> Option<&'a str> {
        let i = *self.columns.get(name)?;
        Some(cells.get(i).map(|c| c.as_ref()).unwrap_or(""))
    }

    pub fn row<T: AsRef<str>>(&self, number: u32, cells: &[T]) -> Result<Row> {
        let mut row = RowBuilder::default();
        row.number(number);

        if let Some(x) = self.cell(cells, LOCATION) {
            row.location(x);
        }
        if let Some(x) = self.cell(cells, TYPE) {
            row.ty(x);
        }
        if let Some(x) = self.cell(cells, GEOMETRY) {
            row.geometry(x);
        }
        if let Some(x) = self.cell(cells, COORDINATES) {
            row.coordinates(x);
        }
        if let Some(x) = self.cell(cells, ELEVATION) {
            row.elevation(x);
        }
        if let Some(x) = self.cell(cells, AGL) {
            row.agl(x);
        }
        if let Some(x) = self.cell(cells, DAY_MARKING) {
            row.day_marking(x);
        }
        if let Some(x) = self.cell(cells, LIGHTED) {
            row.lighted(x);
        }

        row.build()
            .map_err(|message| Error::IncompleteRow { row: number, message })
    }
}

/// Reads every non-blank row below `header_row` (1-based sheet row number).
pub fn rows(sheet: &Sheet, header_row: u32) -> Result<Vec<Row>> {
    let header = sheet
        .rows
        .iter()
        .find(|r| r.number == header_row)
        .filter(|r| !r.is_blank())
        .map(|r| Header::new(&r.cells))
        .ok_or(Error::MissingHeader { row: header_row })?;

    let mut rows = Vec::new();
    for r in sheet.rows.iter().filter(|r| r.number > header_row) {
        if r.is_blank() {
            debug!("Skipping blank row {}", r.number);
            continue;
        }
        rows.push(header.row(r.number, &r.cells)?);
    }
    Ok(rows)
}

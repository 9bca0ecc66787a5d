use custom_error::custom_error;

use crate::feature::Violations;

pub type Result<T> = std::result::Result<T, Error>;

custom_error! {pub Error
    Io{source: std::io::Error} = "I/O error: {source}",
    Zip{source: zip::result::ZipError} = "Zip error: {source}",
    XML{quick_xml: quick_xml::Error} = "XML error: {quick_xml}",
    Json{source: serde_json::Error} = "JSON error: {source}",
    MissingSheet{name: String} = "No sheet named '{name}' in workbook",
    MissingHeader{row: u32} = "Header row {row} is empty or missing",
    IncompleteRow{row: u32, message: String} = "Row {row}: {message}",
    UnknownGeometry{row: u32, id: String, geometry: String} = "Row {row} ({id}): unknown geometry type '{geometry}'",
    Invalid{violations: Violations} = "Invalid feature collection: {violations}"
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Error {
        Error::XML { quick_xml: e }
    }
}

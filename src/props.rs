use log::debug;
use serde::Serialize;

use crate::config::Config;
use crate::row::Row;
use crate::text::{is_yes, numlist, pick_language, split_location};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Properties {
    pub id: String,
    pub location: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(flatten)]
    pub point: Option<PointAttributes>,
}

/// Attributes only single-point obstacles carry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PointAttributes {
    pub daymark: bool,
    pub lighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agl: Option<f64>,
}

impl Properties {
    pub fn from_row(row: &Row, config: &Config, is_point: bool) -> Self {
        let (id, location) = split_location(&row.location);
        let point = if is_point {
            Some(PointAttributes::from_row(row, config))
        } else {
            None
        };

        Properties {
            id: id.to_owned(),
            location: location.to_owned(),
            ty: pick_language(&row.ty, config.language).to_owned(),
            point,
        }
    }
}

impl PointAttributes {
    pub fn from_row(row: &Row, config: &Config) -> Self {
        let agl = numlist(&row.agl).get(config.unit.index()).cloned();
        if agl.is_none() {
            debug!("Row {}: no height above ground", row.number);
        }

        PointAttributes {
            daymark: is_yes(&row.day_marking, &config.yes_marker),
            lighted: is_yes(&row.lighted, &config.yes_marker),
            agl,
        }
    }
}

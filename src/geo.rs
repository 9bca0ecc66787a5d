use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::config::VerticalUnit;
use crate::row::Row;
use crate::text::numlist;

/// A vertex with an optional elevation.
///
/// The sheet lists latitude first; GeoJSON wants `[lon, lat, elev]`, which is
/// what `Serialize` writes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    pub elev: Option<f64>,
}

impl Position {
    pub fn new(lat: f64, lon: f64, elev: Option<f64>) -> Self {
        Position { lat, lon, elev }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.lon, self.lat, self.elev).serialize(serializer)
    }
}

/// Interleaves a flat `lat, lon, lat, lon, ...` list with elevations.
///
/// An elevation list shorter than the coordinate list holds one metric/imperial
/// pair shared by every vertex; otherwise it holds one pair per vertex. A
/// trailing unpaired coordinate is dropped.
pub fn interleave(coords: &[f64], ele: &[f64], unit: VerticalUnit) -> Vec<Position> {
    let shared = ele.len() < coords.len();
    coords
        .iter()
        .tuples::<(_, _)>()
        .enumerate()
        .map(|(i, (&lat, &lon))| {
            let elev = if shared {
                ele.get(unit.index())
            } else {
                ele.get(i * 2 + unit.index())
            };
            Position::new(lat, lon, elev.cloned())
        })
        .collect()
}

/// Builds the vertex list of a row. With `closed` the first vertex is repeated
/// at the end, as a polygon ring requires.
pub fn positions(row: &Row, unit: VerticalUnit, closed: bool) -> Vec<Position> {
    let coords = numlist(&row.coordinates);
    let ele = numlist(&row.elevation);
    let mut l = interleave(&coords, &ele, unit);
    if closed {
        if let Some(&first) = l.first() {
            l.push(first);
        }
    }
    l
}

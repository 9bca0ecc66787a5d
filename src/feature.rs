//! GeoJSON output model and its structural validity check.

use std::fmt;
use std::io::Write;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::geo::Position;
use crate::props::Properties;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(Option<Position>),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
}

impl Geometry {
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
        }
    }

    /// Structural problems of this geometry; empty when it is well-formed.
    pub fn defects(&self) -> Vec<Defect> {
        let too_few = |required: usize, found: usize| {
            if found < required {
                Some(Defect::TooFewPositions { geometry: self.name(), required, found })
            } else {
                None
            }
        };

        match self {
            Geometry::Point(p) => too_few(1, p.iter().count()).into_iter().collect(),
            Geometry::MultiPoint(l) => too_few(1, l.len()).into_iter().collect(),
            Geometry::LineString(l) => too_few(2, l.len()).into_iter().collect(),
            Geometry::Polygon(rings) if rings.is_empty() => vec![Defect::NoRing],
            Geometry::Polygon(rings) => rings
                .iter()
                .flat_map(|ring| {
                    let open = if ring.first() != ring.last() {
                        Some(Defect::OpenRing)
                    } else {
                        None
                    };
                    too_few(4, ring.len()).into_iter().chain(open)
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Properties,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        FeatureCollection::default()
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Every structural violation in the collection, in feature order.
    pub fn errors(&self) -> Vec<Violation> {
        self.features
            .iter()
            .enumerate()
            .flat_map(|(index, f)| {
                f.geometry.defects().into_iter().map(move |defect| Violation {
                    index,
                    id: f.properties.id.clone(),
                    defect,
                })
            })
            .collect()
    }

    /// Writes the collection as GeoJSON indented by four spaces.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut ser)?;

        let mut writer = ser.into_inner();
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Defect {
    TooFewPositions { geometry: &'static str, required: usize, found: usize },
    OpenRing,
    NoRing,
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Defect::TooFewPositions { geometry, required, found } => write!(
                f,
                "{} needs at least {} position(s), found {}",
                geometry, required, found
            ),
            Defect::OpenRing => write!(f, "polygon ring is not closed"),
            Defect::NoRing => write!(f, "polygon has no ring"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Position of the feature in the collection.
    pub index: usize,
    pub id: String,
    pub defect: Defect,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "feature {} ({}): {}", self.index, self.id, self.defect)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violations(pub Vec<Violation>);

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", itertools::join(&self.0, "; "))
    }
}

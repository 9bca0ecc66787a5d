use log::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::feature::{Feature, FeatureCollection, Geometry, Violations};
use crate::geo::positions;
use crate::props::Properties;
use crate::row::Row;

/// Shape named by a row's `Geometry` column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GeometryKind {
    Curve,
    Point,
    GroupedPoint,
    GroupedCurve,
    Surface,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 5] = [
        GeometryKind::Curve,
        GeometryKind::Point,
        GeometryKind::GroupedPoint,
        GeometryKind::GroupedCurve,
        GeometryKind::Surface,
    ];

    /// Exact match against the bilingual labels used in the sheet.
    pub fn from_label(label: &str) -> Option<Self> {
        GeometryKind::ALL
            .iter()
            .cloned()
            .find(|&k| Into::<&str>::into(k) == label)
    }
}

impl From<GeometryKind> for &'static str {
    fn from(x: GeometryKind) -> &'static str {
        match x {
            GeometryKind::Curve => "Curve / Linie",
            GeometryKind::Point => "Point / Punkt",
            GeometryKind::GroupedPoint => "Point (grouped) / Punkt (gruppiert)",
            GeometryKind::GroupedCurve => "Curve (grouped) / Linie (gruppiert)",
            GeometryKind::Surface => "Surface / Fläche",
        }
    }
}

pub fn decode_row(row: &Row, config: &Config) -> Result<Feature> {
    let kind = GeometryKind::from_label(&row.geometry).ok_or_else(|| Error::UnknownGeometry {
        row: row.number,
        id: row.id().to_owned(),
        geometry: row.geometry.clone(),
    })?;
    debug!("Row {} ({}): {:?}", row.number, row.id(), kind);

    let unit = config.unit;
    let feature = match kind {
        GeometryKind::Curve | GeometryKind::GroupedCurve => Feature {
            geometry: Geometry::LineString(positions(row, unit, false)),
            properties: Properties::from_row(row, config, false),
        },
        GeometryKind::Point => Feature {
            geometry: Geometry::Point(positions(row, unit, false).first().cloned()),
            properties: Properties::from_row(row, config, true),
        },
        GeometryKind::GroupedPoint => Feature {
            geometry: Geometry::MultiPoint(positions(row, unit, false)),
            properties: Properties::from_row(row, config, false),
        },
        GeometryKind::Surface => Feature {
            geometry: Geometry::Polygon(vec![positions(row, unit, true)]),
            properties: Properties::from_row(row, config, false),
        },
    };
    Ok(feature)
}

/// Decodes rows in order and checks the finished collection.
///
/// Stops at the first row with an unknown geometry type. Structural problems
/// are collected over the whole collection and reported together.
pub fn decode_rows<'a, I>(rows: I, config: &Config) -> Result<FeatureCollection>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut fc = FeatureCollection::new();
    for row in rows {
        fc.push(decode_row(row, config)?);
    }
    info!("Decoded {} features", fc.features.len());

    let errs = fc.errors();
    if !errs.is_empty() {
        return Err(Error::Invalid {
            violations: Violations(errs),
        });
    }
    Ok(fc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VerticalUnit;
    use crate::geo::Position;
    use crate::props::PointAttributes;
    use crate::row::RowBuilder;

    fn row(number: u32, geometry: &str, coordinates: &str, elevation: &str) -> Row {
        RowBuilder::default()
            .number(number)
            .location(format!("LO_ODS_{:06} - Obstacle {}", number, number))
            .ty("Windkraftanlage / Wind turbine")
            .geometry(geometry)
            .coordinates(coordinates)
            .elevation(elevation)
            .agl("30 / 98")
            .day_marking("yes")
            .lighted("no")
            .build()
            .unwrap()
    }

    #[test]
    fn labels_round_trip() {
        for &k in GeometryKind::ALL.iter() {
            assert_eq!(GeometryKind::from_label(k.into()), Some(k));
        }
        assert_eq!(GeometryKind::from_label("Point/Punkt"), None);
        assert_eq!(GeometryKind::from_label("Blob / Klecks"), None);
    }

    #[test]
    fn point_row() {
        let r = RowBuilder::default()
            .location("LO_ODS_001304 - Fiderepasshütte")
            .ty("Sendemast / Transmission mast")
            .geometry("Point / Punkt")
            .coordinates("47.1 / 10.2")
            .elevation("1500 / 4921")
            .agl("30 / 98")
            .day_marking("yes")
            .lighted("Yes")
            .build()
            .unwrap();
        let f = decode_row(&r, &Config::default()).unwrap();

        assert_eq!(f.geometry, Geometry::Point(Some(Position::new(47.1, 10.2, Some(1500.0)))));
        assert_eq!(f.properties.id, "LO_ODS_001304");
        assert_eq!(f.properties.location, "Fiderepasshütte");
        assert_eq!(f.properties.ty, "Transmission mast");
        assert_eq!(
            f.properties.point,
            Some(PointAttributes { daymark: true, lighted: false, agl: Some(30.0) })
        );
    }

    #[test]
    fn point_row_in_feet() {
        let config = Config { unit: VerticalUnit::Feet, ..Config::default() };
        let f = decode_row(&row(1, "Point / Punkt", "47.1 / 10.2", "1500 / 4921"), &config).unwrap();
        assert_eq!(f.geometry, Geometry::Point(Some(Position::new(47.1, 10.2, Some(4921.0)))));
        assert_eq!(f.properties.point.unwrap().agl, Some(98.0));
    }

    #[test]
    fn curves_are_line_strings() {
        let config = Config::default();
        for &label in ["Curve / Linie", "Curve (grouped) / Linie (gruppiert)"].iter() {
            let f = decode_row(&row(2, label, "47.1 / 10.2 / 47.2 / 10.3", "900 / 2953"), &config).unwrap();
            assert_eq!(
                f.geometry,
                Geometry::LineString(vec![
                    Position::new(47.1, 10.2, Some(900.0)),
                    Position::new(47.2, 10.3, Some(900.0)),
                ])
            );
            assert_eq!(f.properties.point, None);
        }
    }

    #[test]
    fn grouped_points() {
        let f = decode_row(
            &row(3, "Point (grouped) / Punkt (gruppiert)", "47.1 10.2 47.2 10.3", "900 2953 910 2986"),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(
            f.geometry,
            Geometry::MultiPoint(vec![
                Position::new(47.1, 10.2, Some(900.0)),
                Position::new(47.2, 10.3, Some(910.0)),
            ])
        );
        assert_eq!(f.properties.point, None);
    }

    #[test]
    fn surface_is_closed_polygon() {
        let f = decode_row(
            &row(4, "Surface / Fläche", "47.1/10.2 47.2/10.3 47.1/10.4", "900 / 2953"),
            &Config::default(),
        )
        .unwrap();
        match f.geometry {
            Geometry::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 4);
                assert_eq!(rings[0][0], rings[0][3]);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn unknown_geometry_aborts() {
        let rows = vec![
            row(4, "Point / Punkt", "47.1 / 10.2", "1500 / 4921"),
            row(5, "Blob / Klecks", "47.1 / 10.2", "1500 / 4921"),
            row(6, "Point / Punkt", "47.1 / 10.2", "1500 / 4921"),
        ];
        match decode_rows(&rows, &Config::default()) {
            Err(Error::UnknownGeometry { row, id, geometry }) => {
                assert_eq!(row, 5);
                assert_eq!(id, "LO_ODS_000005");
                assert_eq!(geometry, "Blob / Klecks");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn collection_keeps_row_order() {
        let rows = vec![
            row(4, "Point / Punkt", "47.1 / 10.2", "1500 / 4921"),
            row(5, "Curve / Linie", "47.1 / 10.2 / 47.2 / 10.3", "900 / 2953"),
            row(6, "Surface / Fläche", "1 2 3 4 5 6", "900 / 2953"),
        ];
        let fc = decode_rows(&rows, &Config::default()).unwrap();
        let ids: Vec<_> = fc.features.iter().map(|f| f.properties.id.as_str()).collect();
        assert_eq!(ids, vec!["LO_ODS_000004", "LO_ODS_000005", "LO_ODS_000006"]);
    }

    #[test]
    fn degenerate_rows_fail_together() {
        let rows = vec![
            row(4, "Point (grouped) / Punkt (gruppiert)", "", ""),
            row(5, "Point / Punkt", "47.1 / 10.2", "1500 / 4921"),
            row(6, "Curve / Linie", "47.1 / 10.2", "900 / 2953"),
        ];
        match decode_rows(&rows, &Config::default()) {
            Err(Error::Invalid { violations }) => {
                let ids: Vec<_> = violations.0.iter().map(|v| v.id.as_str()).collect();
                assert_eq!(ids, vec!["LO_ODS_000004", "LO_ODS_000006"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

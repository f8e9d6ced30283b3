// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use colored::Color;
use pinmap_core::Point;

use crate::arg::ArgOutputFormat;
use crate::table::{Column, PaddingDirection, Table};

#[derive(Debug)]
pub struct PointFormatter {
    columns: Vec<PointColumn>,
    format: ArgOutputFormat,
}

impl PointFormatter {
    pub fn new(format: ArgOutputFormat) -> Self {
        Self {
            columns: vec![PointColumn::Id, PointColumn::Name, PointColumn::Coordinates],
            format,
        }
    }

    pub fn write(&self, w: &mut impl io::Write, points: &[Point]) -> Result<(), Box<dyn Error>> {
        match self.format {
            ArgOutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, points)?;
                writeln!(w)?;
                Ok(())
            }
            ArgOutputFormat::Table => Table::new(&self.columns, points).write_to(w),
        }
    }

    pub fn print(&self, points: &[Point]) -> Result<(), Box<dyn Error>> {
        self.write(&mut io::stdout().lock(), points)
    }
}

#[derive(Debug, Clone, Copy)]
enum PointColumn {
    Id,
    Name,
    Coordinates,
}

impl Column<Point> for PointColumn {
    fn format(&self, point: &Point) -> String {
        match self {
            PointColumn::Id => point.id.to_string(),
            PointColumn::Name => point.name.clone(),
            PointColumn::Coordinates => point.coordinates.clone(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn get_color(&self, point: &Point) -> Option<Color> {
        match self {
            PointColumn::Id => Some(Color::BrightBlack),
            // stored points can carry unparseable coordinates
            PointColumn::Coordinates if point.coordinate().is_err() => Some(Color::Red),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmap_core::{PointId, PointRecord};

    fn points() -> Vec<Point> {
        vec![
            Point::new(
                PointId::new("a1"),
                PointRecord {
                    name: "Borobudur".to_string(),
                    coordinates: "-7.6079, 110.2038".to_string(),
                },
            ),
            Point::new(
                PointId::new("b22"),
                PointRecord {
                    name: "Tugu".to_string(),
                    coordinates: "-7.7829, 110.3671".to_string(),
                },
            ),
        ]
    }

    #[test]
    fn writes_json_array() {
        let mut out = Vec::new();
        PointFormatter::new(ArgOutputFormat::Json)
            .write(&mut out, &points())
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["id"], "a1");
        assert_eq!(value[0]["name"], "Borobudur");
        assert_eq!(value[1]["coordinates"], "-7.7829, 110.3671");
    }

    #[test]
    fn writes_aligned_table() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        PointFormatter::new(ArgOutputFormat::Table)
            .write(&mut out, &points())
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "a1   Borobudur  -7.6079, 110.2038");
        assert_eq!(lines[1], "b22  Tugu       -7.7829, 110.3671");
    }

    #[test]
    fn writes_empty_json_array() {
        let mut out = Vec::new();
        PointFormatter::new(ArgOutputFormat::Json)
            .write(&mut out, &[])
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}

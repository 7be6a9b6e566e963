//! The fixed ten-line header of a legacy structured-points file.
//!
//! ```text
//! # vtk DataFile Version x.x
//! comment
//! BINARY
//! DATASET STRUCTURED_POINTS
//! DIMENSIONS 128 128 128
//! ORIGIN 0.0 0.0 0.0
//! SPACING 1.0 1.0 1.0
//! POINT_DATA 2097152
//! SCALARS image_data unsigned_char
//! LOOKUP_TABLE default
//! ```
//!
//! Declarations are looked up by keyword, so their order within the header
//! does not matter.

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use glam::{UVec3, Vec3};
use volcast_core::{ElementType, Result, VolcastError};

/// Number of lines in a structured-points header.
pub const HEADER_LINE_COUNT: usize = 10;

/// Prefix of the first header line.
pub const MAGIC: &str = "# vtk";

/// Payload encoding declared in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ascii,
    Binary,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ascii => "ASCII",
            Self::Binary => "BINARY",
        })
    }
}

/// Metadata parsed from a structured-points header.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub dimensions: UVec3,
    pub origin: Vec3,
    pub spacing: Vec3,
    /// Name given on the `SCALARS` line.
    pub scalars_name: String,
    pub element_type: ElementType,
    pub encoding: Encoding,
    /// Point count from `POINT_DATA`, if the line is present.
    pub point_data: Option<u64>,
}

impl Header {
    /// Reads and parses the header, leaving `reader` at the first payload byte.
    pub fn read<R: BufRead>(reader: &mut R) -> Result<Self> {
        let lines = read_header_lines(reader)?;
        Self::parse(&lines)
    }

    /// Parses header lines already split off the file.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let lines: Vec<&str> = lines.iter().map(AsRef::as_ref).collect();

        let first = lines
            .first()
            .ok_or_else(|| VolcastError::header("missing line 1"))?;
        if !first.starts_with(MAGIC) {
            return Err(VolcastError::header("not a valid VTK file"));
        }

        if let Some(dataset) = declaration(&lines, "DATASET") {
            match dataset.split_whitespace().nth(1) {
                Some("STRUCTURED_POINTS") => {}
                other => {
                    return Err(VolcastError::header(format!(
                        "unsupported dataset '{}'",
                        other.unwrap_or_default()
                    )))
                }
            }
        }

        let dimensions = parse_dimensions(&lines)?;
        let origin = Vec3::from_array(parse_triple::<f32>(&lines, "ORIGIN", "origin")?);
        let spacing = Vec3::from_array(parse_triple::<f32>(&lines, "SPACING", "spacing")?);
        let (scalars_name, element_type) = parse_scalars(&lines)?;
        let encoding = parse_encoding(&lines)?;
        let point_data = declaration(&lines, "POINT_DATA")
            .and_then(|line| line.split_whitespace().nth(1))
            .and_then(|count| count.parse().ok());

        log::debug!(
            "VTK header: dimensions {dimensions}, origin {origin}, spacing {spacing}, \
             type {element_type}, encoding {encoding}"
        );

        let header = Self {
            dimensions,
            origin,
            spacing,
            scalars_name,
            element_type,
            encoding,
            point_data,
        };
        if let Some(points) = header.point_data {
            let voxels = header.dimensions.as_u64vec3();
            if points != voxels.x * voxels.y * voxels.z {
                log::warn!(
                    "POINT_DATA {points} disagrees with DIMENSIONS {}, using DIMENSIONS",
                    header.dimensions
                );
            }
        }
        Ok(header)
    }

    /// Number of voxels, `nx * ny * nz`.
    pub fn element_count(&self) -> Result<usize> {
        let d = self.dimensions.as_u64vec3();
        d.x.checked_mul(d.y)
            .and_then(|n| n.checked_mul(d.z))
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| VolcastError::header("volume dimensions overflow"))
    }
}

/// Reads exactly [`HEADER_LINE_COUNT`] non-empty lines.
///
/// Lines are split on `\n` only and read as raw bytes, so the reader stays
/// byte-exact at the start of a binary payload. A trailing `\r` is dropped.
pub fn read_header_lines<R: BufRead>(reader: &mut R) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(HEADER_LINE_COUNT);
    let mut buf = Vec::new();
    for i in 0..HEADER_LINE_COUNT {
        buf.clear();
        reader.read_until(b'\n', &mut buf)?;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        if buf.is_empty() {
            return Err(VolcastError::header(format!("missing line {}", i + 1)));
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Ok(lines)
}

/// Last header line starting with `keyword`.
fn declaration<'a>(lines: &[&'a str], keyword: &str) -> Option<&'a str> {
    lines.iter().rev().find(|line| line.starts_with(keyword)).copied()
}

fn parse_triple<T: FromStr>(lines: &[&str], keyword: &str, field: &str) -> Result<[T; 3]> {
    let line = declaration(lines, keyword)
        .ok_or_else(|| VolcastError::header(format!("missing {keyword} declaration")))?;
    let mut values = line.split_whitespace().skip(1).map(str::parse::<T>);
    let mut next = || {
        values
            .next()
            .and_then(std::result::Result::ok)
            .ok_or_else(|| VolcastError::header(format!("cannot read volume {field}")))
    };
    Ok([next()?, next()?, next()?])
}

fn parse_dimensions(lines: &[&str]) -> Result<UVec3> {
    let [x, y, z] = parse_triple::<i64>(lines, "DIMENSIONS", "dimensions")?;
    let positive = |d: i64| {
        u32::try_from(d)
            .ok()
            .filter(|&d| d > 0)
            .ok_or_else(|| VolcastError::header(format!("invalid volume dimension {d}")))
    };
    Ok(UVec3::new(positive(x)?, positive(y)?, positive(z)?))
}

fn parse_scalars(lines: &[&str]) -> Result<(String, ElementType)> {
    let line = declaration(lines, "SCALARS")
        .ok_or_else(|| VolcastError::header("missing SCALARS declaration"))?;
    let mut fields = line.split_whitespace().skip(1);
    let (Some(name), Some(token)) = (fields.next(), fields.next()) else {
        return Err(VolcastError::header("cannot read volume data type"));
    };
    let element_type = token.parse::<ElementType>()?;
    Ok((name.to_string(), element_type))
}

fn parse_encoding(lines: &[&str]) -> Result<Encoding> {
    lines
        .iter()
        .find_map(|line| {
            if line.starts_with("BINARY") {
                Some(Encoding::Binary)
            } else if line.starts_with("ASCII") {
                Some(Encoding::Ascii)
            } else {
                None
            }
        })
        .ok_or_else(|| VolcastError::header("cannot read file format"))
}

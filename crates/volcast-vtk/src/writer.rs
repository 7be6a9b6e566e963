//! Writing structured-points volumes.
//!
//! Output uses the canonical ten-line header and big-endian binary
//! payloads, so anything written here loads back through [`crate::read_from`]
//! unchanged.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use volcast_core::element::iter_native;
use volcast_core::{with_element_type, Element, Result, ScalarVolume, VolcastError};

use crate::header::Encoding;

/// Name written on the `SCALARS` line.
pub const SCALARS_NAME: &str = "image_data";

/// Writes `volume` in the given encoding.
///
/// # Errors
///
/// Returns [`VolcastError::HeaderFormat`] for an empty volume, which has no
/// valid `DIMENSIONS` line, and I/O errors from `writer`.
pub fn write_to<W: Write>(volume: &ScalarVolume, encoding: Encoding, writer: &mut W) -> Result<()> {
    if volume.is_empty() {
        return Err(VolcastError::header("cannot write an empty volume"));
    }

    let d = volume.dimensions();
    let o = volume.origin();
    let s = volume.spacing();
    writeln!(writer, "# vtk DataFile Version 3.0")?;
    writeln!(writer, "volcast structured points")?;
    writeln!(writer, "{encoding}")?;
    writeln!(writer, "DATASET STRUCTURED_POINTS")?;
    writeln!(writer, "DIMENSIONS {} {} {}", d.x, d.y, d.z)?;
    writeln!(writer, "ORIGIN {} {} {}", o.x, o.y, o.z)?;
    writeln!(writer, "SPACING {} {} {}", s.x, s.y, s.z)?;
    writeln!(writer, "POINT_DATA {}", volume.element_count())?;
    writeln!(
        writer,
        "SCALARS {SCALARS_NAME} {}",
        volume.element_type().vtk_token()
    )?;
    writeln!(writer, "LOOKUP_TABLE default")?;

    with_element_type!(volume.element_type(), T => {
        write_payload::<T, W>(volume.samples(), encoding, writer)?;
    });
    writer.flush()?;
    Ok(())
}

/// Writes `volume` to a file at `path`.
pub fn save(volume: &ScalarVolume, encoding: Encoding, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(volume, encoding, &mut writer)?;
    log::info!("saved {encoding} volume to {}", path.display());
    Ok(())
}

fn write_payload<T: Element, W: Write>(samples: &[u8], encoding: Encoding, writer: &mut W) -> Result<()> {
    match encoding {
        Encoding::Binary => {
            let mut out = Vec::with_capacity(samples.len());
            for value in iter_native::<T>(samples) {
                value.extend_be_bytes(&mut out);
            }
            writer.write_all(&out)?;
        }
        Encoding::Ascii => {
            for value in iter_native::<T>(samples) {
                writeln!(writer, "{value}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_from;
    use glam::{UVec3, Vec3};
    use proptest::prelude::*;

    #[test]
    fn test_binary_layout() {
        let volume =
            ScalarVolume::from_elements(UVec3::new(2, 1, 1), Vec3::ZERO, Vec3::ONE, &[1u16, 0x0203])
                .unwrap();
        let mut out = Vec::new();
        write_to(&volume, Encoding::Binary, &mut out).unwrap();
        assert!(out.ends_with(b"LOOKUP_TABLE default\n\x00\x01\x02\x03"));
        let text = String::from_utf8_lossy(&out);
        assert!(text.starts_with("# vtk DataFile Version 3.0\n"));
        assert!(text.contains("\nBINARY\n"));
        assert!(text.contains("SCALARS image_data unsigned_short\n"));
    }

    #[test]
    fn test_ascii_layout() {
        let volume = ScalarVolume::from_elements(
            UVec3::new(3, 1, 1),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::splat(2.0),
            &[-1i32, 0, 7],
        )
        .unwrap();
        let mut out = Vec::new();
        write_to(&volume, Encoding::Ascii, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ORIGIN 0.5 0 0\n"));
        assert!(text.contains("SPACING 2 2 2\n"));
        assert!(text.ends_with("LOOKUP_TABLE default\n-1\n0\n7\n"));
    }

    #[test]
    fn test_empty_volume_rejected() {
        let mut out = Vec::new();
        let err = write_to(&ScalarVolume::default(), Encoding::Binary, &mut out).unwrap_err();
        assert!(matches!(err, VolcastError::HeaderFormat(_)));
        assert!(out.is_empty());
    }

    proptest! {
        #[test]
        fn prop_written_volume_reads_back(
            dims in (1u32..5, 1u32..5, 1u32..5),
            seed in prop::collection::vec(any::<i16>(), 64),
            origin in prop::array::uniform3(-100i16..100),
            binary in any::<bool>(),
        ) {
            let dims = UVec3::new(dims.0, dims.1, dims.2);
            let count = (dims.x * dims.y * dims.z) as usize;
            let volume = ScalarVolume::from_elements(
                dims,
                Vec3::from_array(origin.map(f32::from)),
                Vec3::new(0.5, 1.0, 2.0),
                &seed[..count],
            )
            .unwrap();
            let encoding = if binary { Encoding::Binary } else { Encoding::Ascii };
            let mut out = Vec::new();
            write_to(&volume, encoding, &mut out).unwrap();
            prop_assert_eq!(read_from(out.as_slice()).unwrap(), volume);
        }
    }
}

//! File-format tests for the structured-points reader and writer.
//!
//! Binary fixtures are built by hand with `to_be_bytes` so that the reader's
//! byte-order conversion is checked against an independent decoder.

use std::fmt::Debug;
use std::fs;

use proptest::prelude::*;
use volcast::*;

fn header_text(encoding: &str, dims: [u32; 3], token: &str) -> String {
    let count = dims[0] * dims[1] * dims[2];
    format!(
        "# vtk DataFile Version 3.0\n\
         fixture\n\
         {encoding}\n\
         DATASET STRUCTURED_POINTS\n\
         DIMENSIONS {} {} {}\n\
         ORIGIN 0 0 0\n\
         SPACING 1 1 1\n\
         POINT_DATA {count}\n\
         SCALARS image_data {token}\n\
         LOOKUP_TABLE default\n",
        dims[0], dims[1], dims[2]
    )
}

/// Writes `values` through the library encoder, reads them back in both
/// encodings, and checks values and range.
fn assert_round_trip<T: Element + Debug>(values: &[T]) {
    let dims = UVec3::new(values.len() as u32, 1, 1);
    let origin = Vec3::new(-1.25, 0.0, 3.5);
    let spacing = Vec3::new(0.5, 0.75, 2.0);
    let volume = ScalarVolume::from_elements(dims, origin, spacing, values).unwrap();

    for encoding in [Encoding::Binary, Encoding::Ascii] {
        let mut bytes = Vec::new();
        write_to(&volume, encoding, &mut bytes).unwrap();
        let loaded = read_from(bytes.as_slice()).unwrap();

        assert_eq!(loaded.element_type(), T::TYPE, "{encoding}");
        assert_eq!(loaded.dimensions(), dims);
        assert_eq!(loaded.origin(), origin);
        assert_eq!(loaded.spacing(), spacing);
        assert_eq!(loaded.samples_as::<T>().unwrap(), values, "{encoding}");
        assert_eq!(loaded.value_range(), volume.value_range(), "{encoding}");
        assert_eq!(loaded, volume);
    }
}

#[test]
fn test_round_trip_every_type() {
    assert_round_trip(&[i8::MIN, -1, 0, 1, i8::MAX]);
    assert_round_trip(&[0u8, 1, 128, 254, u8::MAX]);
    assert_round_trip(&[i16::MIN, -300, 0, 300, i16::MAX]);
    assert_round_trip(&[0u16, 1, 0x0100, 0xfffe, u16::MAX]);
    assert_round_trip(&[i32::MIN, -70000, 0, 70000, i32::MAX]);
    assert_round_trip(&[0u32, 1, 0x0102_0304, u32::MAX - 1, u32::MAX]);
    assert_round_trip(&[i64::MIN, -1, 0, 1 << 40, i64::MAX]);
    assert_round_trip(&[0u64, 1, 1 << 63, u64::MAX - 1, u64::MAX]);
    assert_round_trip(&[-1.5f32, 0.0, 1e-7, 3.402_823e38, f32::MIN_POSITIVE]);
    assert_round_trip(&[-2.5f64, 0.1, 1e300, -1e-300, std::f64::consts::PI]);
}

#[test]
fn test_swap_matches_reference_decoder() {
    let values: Vec<i32> = vec![-2, 0x0102_0304, i32::MIN, 77, -123_456_789, 0];
    let mut bytes = header_text("BINARY", [3, 2, 1], "int").into_bytes();
    for v in &values {
        bytes.extend_from_slice(&v.to_be_bytes());
    }

    let reference: Vec<i32> = bytes[bytes.len() - values.len() * 4..]
        .chunks_exact(4)
        .map(|c| i32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    let volume = read_from(bytes.as_slice()).unwrap();
    assert_eq!(volume.samples_as::<i32>().unwrap(), reference);
    assert_eq!(reference, values);
    // Samples are stored in host order.
    let native: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    assert_eq!(volume.samples(), native.as_slice());
}

#[test]
fn test_swap_for_floats() {
    let values = [1.0f64, -0.5, 1234.5678];
    let mut bytes = header_text("BINARY", [1, 3, 1], "double").into_bytes();
    for v in values {
        bytes.extend_from_slice(&v.to_be_bytes());
    }
    let volume = read_from(bytes.as_slice()).unwrap();
    assert_eq!(volume.samples_as::<f64>().unwrap(), values);
    assert_eq!(volume.value_range(), ValueRange::new(-0.5, 1234.5678));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("load.vtk");
    let mut bytes = header_text("BINARY", [2, 2, 2], "unsigned_short").into_bytes();
    for v in [0u16, 10, 20, 30, 40, 50, 60, 1000] {
        bytes.extend_from_slice(&v.to_be_bytes());
    }
    fs::write(&path, bytes).unwrap();

    let volume = load(&path).unwrap();
    assert_eq!(volume.dimensions(), UVec3::splat(2));
    assert_eq!(volume.value_range(), ValueRange::new(0.0, 1000.0));
    assert_eq!(volume.value_at(1, 1, 1), Some(1000.0));
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.vtk");
    let values: Vec<f32> = (0..60).map(|i| i as f32 * 0.25 - 3.0).collect();
    let volume = ScalarVolume::from_elements(
        UVec3::new(5, 4, 3),
        Vec3::ZERO,
        Vec3::new(1.0, 1.0, 2.5),
        &values,
    )
    .unwrap();
    save(&volume, Encoding::Binary, &path).unwrap();
    let loaded = load(&path).unwrap();
    assert_eq!(loaded, volume);
}

#[test]
fn test_nine_line_header_names_line_ten() {
    let text = header_text("BINARY", [1, 1, 1], "unsigned_char");
    let nine: String = text.lines().take(9).map(|l| format!("{l}\n")).collect();
    let err = read_from(nine.as_bytes()).unwrap_err();
    assert!(matches!(err, VolcastError::HeaderFormat(ref m) if m.contains("line 10")));
}

#[test]
fn test_unknown_type_token() {
    let mut bytes = header_text("BINARY", [1, 1, 1], "vector").into_bytes();
    bytes.push(0);
    let err = read_from(bytes.as_slice()).unwrap_err();
    assert!(matches!(err, VolcastError::UnsupportedType(ref t) if t == "vector"));
}

#[test]
fn test_bad_magic_stops_before_payload() {
    let text = header_text("BINARY", [1, 1, 1], "unsigned_char").replacen("# vtk", "# xyz", 1);
    let mut bytes = text.into_bytes();
    bytes.extend_from_slice(b"PAYLOAD");
    let mut reader = bytes.as_slice();
    let err = Header::read(&mut reader).unwrap_err();
    assert!(matches!(err, VolcastError::HeaderFormat(_)));
    assert_eq!(reader, b"PAYLOAD");
}

#[test]
fn test_missing_file_is_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(dir.path().join("does-not-exist.vtk")).unwrap_err();
    assert!(matches!(err, VolcastError::FileOpen { .. }));
}

proptest! {
    #[test]
    fn prop_binary_round_trip_i16(values in prop::collection::vec(any::<i16>(), 1..64)) {
        let volume = ScalarVolume::from_elements(
            UVec3::new(values.len() as u32, 1, 1), Vec3::ZERO, Vec3::ONE, &values,
        ).unwrap();
        let mut bytes = Vec::new();
        write_to(&volume, Encoding::Binary, &mut bytes).unwrap();
        let loaded = read_from(bytes.as_slice()).unwrap();
        prop_assert_eq!(loaded.samples_as::<i16>().unwrap(), values);
    }

    #[test]
    fn prop_ascii_round_trip_f32(values in prop::collection::vec(-1e30f32..1e30, 1..64)) {
        let volume = ScalarVolume::from_elements(
            UVec3::new(1, values.len() as u32, 1), Vec3::ZERO, Vec3::ONE, &values,
        ).unwrap();
        let mut bytes = Vec::new();
        write_to(&volume, Encoding::Ascii, &mut bytes).unwrap();
        let loaded = read_from(bytes.as_slice()).unwrap();
        prop_assert_eq!(loaded.samples_as::<f32>().unwrap(), values);
    }

    #[test]
    fn prop_loaded_range_bounds_samples(values in prop::collection::vec(any::<u32>(), 1..64)) {
        let mut bytes = header_text("BINARY", [values.len() as u32, 1, 1], "unsigned_int").into_bytes();
        for v in &values {
            bytes.extend_from_slice(&v.to_be_bytes());
        }
        let volume = read_from(bytes.as_slice()).unwrap();
        let range = volume.value_range();
        for v in volume.values_f64() {
            prop_assert!(range.contains(v));
        }
        prop_assert_eq!(range.min, f64::from(*values.iter().min().unwrap()));
        prop_assert_eq!(range.max, f64::from(*values.iter().max().unwrap()));
    }
}

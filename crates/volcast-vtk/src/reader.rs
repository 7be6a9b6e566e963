//! Loading structured-points volumes.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use volcast_core::{
    with_element_type, Element, RangeTracker, Result, ScalarVolume, ValueRange, VolcastError,
};

use crate::header::{Encoding, Header};

/// Returns whether the host stores multi-byte integers little-endian.
pub const fn host_is_little_endian() -> bool {
    cfg!(target_endian = "little")
}

/// Loads a VTK legacy structured-points file.
///
/// The file is read in binary mode; both ASCII and binary payloads are
/// supported. On failure no partially loaded volume is returned.
///
/// # Errors
///
/// - [`VolcastError::FileOpen`] if the file cannot be opened
/// - [`VolcastError::HeaderFormat`] for a short header, a bad magic line or
///   an unreadable declaration
/// - [`VolcastError::UnsupportedType`] for an unknown `SCALARS` type
/// - [`VolcastError::PayloadTruncated`] / [`VolcastError::PayloadFormat`]
///   if the payload is short or malformed
pub fn load(path: impl AsRef<Path>) -> Result<ScalarVolume> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| VolcastError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let volume = read_from(BufReader::new(file))?;
    log::info!(
        "loaded {}x{}x{} {} volume from {}",
        volume.nx(),
        volume.ny(),
        volume.nz(),
        volume.element_type(),
        path.display()
    );
    Ok(volume)
}

/// Reads a structured-points volume from any buffered source.
pub fn read_from<R: BufRead>(mut reader: R) -> Result<ScalarVolume> {
    let header = Header::read(&mut reader)?;
    let count = header.element_count()?;

    let (range, samples) = with_element_type!(header.element_type, T => {
        match header.encoding {
            Encoding::Binary => read_binary::<T, _>(&mut reader, count)?,
            Encoding::Ascii => read_ascii::<T, _>(&mut reader, count)?,
        }
    });

    ScalarVolume::from_raw_parts(
        header.dimensions,
        header.origin,
        header.spacing,
        header.element_type,
        range,
        samples,
    )
}

/// Reads `count` big-endian elements, converting them to native order in
/// place while tracking their range.
fn read_binary<T: Element, R: Read>(reader: &mut R, count: usize) -> Result<(ValueRange, Vec<u8>)> {
    let size = std::mem::size_of::<T>();
    let byte_len = count
        .checked_mul(size)
        .ok_or_else(|| VolcastError::header("volume dimensions overflow"))?;

    let mut bytes = Vec::new();
    reader.take(byte_len as u64).read_to_end(&mut bytes)?;
    if bytes.len() < byte_len {
        return Err(VolcastError::PayloadTruncated {
            expected: count,
            actual: bytes.len() / size,
        });
    }

    let swap = host_is_little_endian() && size > 1;
    let mut tracker = RangeTracker::<T>::new();
    for chunk in bytes.chunks_exact_mut(size) {
        if swap {
            chunk.reverse();
        }
        tracker.push(bytemuck::pod_read_unaligned(chunk));
    }
    Ok((tracker.finish().unwrap_or_default(), bytes))
}

/// Reads `count` whitespace-separated literals.
fn read_ascii<T: Element, R: Read>(reader: &mut R, count: usize) -> Result<(ValueRange, Vec<u8>)> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;
    let text = String::from_utf8_lossy(&raw);

    // Every literal takes at least two bytes with its separator, which bounds
    // the allocation for a header that overstates the voxel count.
    let mut samples = Vec::with_capacity(count.min(text.len() / 2 + 1) * std::mem::size_of::<T>());
    let mut tracker = RangeTracker::<T>::new();
    let mut tokens = text.split_ascii_whitespace();
    for index in 0..count {
        let token = tokens.next().ok_or(VolcastError::PayloadTruncated {
            expected: count,
            actual: index,
        })?;
        let value = token
            .parse::<T>()
            .map_err(|_| VolcastError::PayloadFormat {
                index,
                token: token.to_string(),
            })?;
        tracker.push(value);
        samples.extend_from_slice(bytemuck::bytes_of(&value));
    }
    Ok((tracker.finish().unwrap_or_default(), samples))
}

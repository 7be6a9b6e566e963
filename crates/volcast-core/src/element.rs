//! Scalar element types and the type-tag dispatch over them.
//!
//! A volume stores its samples as raw bytes tagged with an [`ElementType`].
//! Code that needs typed access is written once, generically over
//! [`Element`], and selected at runtime with [`with_element_type!`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VolcastError;

/// Numeric type of the samples stored in a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ElementType {
    Int8,
    /// Also the type of every normalized volume.
    #[default]
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
}

impl ElementType {
    /// All supported element types.
    pub const ALL: [ElementType; 10] = [
        ElementType::Int8,
        ElementType::Uint8,
        ElementType::Int16,
        ElementType::Uint16,
        ElementType::Int32,
        ElementType::Uint32,
        ElementType::Int64,
        ElementType::Uint64,
        ElementType::Float32,
        ElementType::Float64,
    ];

    /// Maps a VTK `SCALARS` type token to an element type.
    pub fn from_vtk_token(token: &str) -> Option<Self> {
        match token {
            "unsigned_char" => Some(Self::Uint8),
            "char" => Some(Self::Int8),
            "unsigned_short" => Some(Self::Uint16),
            "short" => Some(Self::Int16),
            "unsigned_int" => Some(Self::Uint32),
            "int" => Some(Self::Int32),
            "unsigned_long" => Some(Self::Uint64),
            "long" => Some(Self::Int64),
            "float" => Some(Self::Float32),
            "double" => Some(Self::Float64),
            _ => None,
        }
    }

    /// The VTK `SCALARS` type token for this element type.
    pub fn vtk_token(self) -> &'static str {
        match self {
            Self::Int8 => "char",
            Self::Uint8 => "unsigned_char",
            Self::Int16 => "short",
            Self::Uint16 => "unsigned_short",
            Self::Int32 => "int",
            Self::Uint32 => "unsigned_int",
            Self::Int64 => "long",
            Self::Uint64 => "unsigned_long",
            Self::Float32 => "float",
            Self::Float64 => "double",
        }
    }

    /// Size of one element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Int64 | Self::Uint64 | Self::Float64 => 8,
        }
    }

    /// Returns true for `Float32` and `Float64`.
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.vtk_token())
    }
}

impl FromStr for ElementType {
    type Err = VolcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_vtk_token(s).ok_or_else(|| VolcastError::UnsupportedType(s.to_string()))
    }
}

/// A primitive numeric type that can be stored as a volume sample.
pub trait Element:
    bytemuck::Pod + PartialOrd + FromStr + fmt::Display + Send + Sync + 'static
{
    /// The runtime tag matching this type.
    const TYPE: ElementType;

    /// Decodes one big-endian element. `bytes` must hold exactly one element.
    fn from_be_slice(bytes: &[u8]) -> Self;

    /// Appends the big-endian encoding of `self` to `out`.
    fn extend_be_bytes(self, out: &mut Vec<u8>);

    /// Widens the value for range and normalization arithmetic.
    fn to_f64(self) -> f64;
}

macro_rules! impl_element {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const TYPE: ElementType = ElementType::$variant;

                fn from_be_slice(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    <$t>::from_be_bytes(buf)
                }

                fn extend_be_bytes(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_be_bytes());
                }

                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_element! {
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    i64 => Int64,
    u64 => Uint64,
    f32 => Float32,
    f64 => Float64,
}

/// Evaluates `$body` with the type alias `$t` bound to the primitive type
/// named by the runtime [`ElementType`] `$ty`.
///
/// ```
/// use volcast_core::{with_element_type, Element, ElementType};
///
/// let size = with_element_type!(ElementType::Uint16, T => std::mem::size_of::<T>());
/// assert_eq!(size, 2);
/// ```
#[macro_export]
macro_rules! with_element_type {
    ($ty:expr, $t:ident => $body:expr) => {
        match $ty {
            $crate::ElementType::Int8 => {
                type $t = i8;
                $body
            }
            $crate::ElementType::Uint8 => {
                type $t = u8;
                $body
            }
            $crate::ElementType::Int16 => {
                type $t = i16;
                $body
            }
            $crate::ElementType::Uint16 => {
                type $t = u16;
                $body
            }
            $crate::ElementType::Int32 => {
                type $t = i32;
                $body
            }
            $crate::ElementType::Uint32 => {
                type $t = u32;
                $body
            }
            $crate::ElementType::Int64 => {
                type $t = i64;
                $body
            }
            $crate::ElementType::Uint64 => {
                type $t = u64;
                $body
            }
            $crate::ElementType::Float32 => {
                type $t = f32;
                $body
            }
            $crate::ElementType::Float64 => {
                type $t = f64;
                $body
            }
        }
    };
}

/// Reads the `index`-th element of a native-endian byte buffer.
///
/// The buffer carries no alignment guarantee, so elements are copied out
/// rather than cast in place.
pub fn read_native<T: Element>(bytes: &[u8], index: usize) -> T {
    let size = std::mem::size_of::<T>();
    bytemuck::pod_read_unaligned(&bytes[index * size..(index + 1) * size])
}

/// Iterates over the elements of a native-endian byte buffer.
pub fn iter_native<T: Element>(bytes: &[u8]) -> impl Iterator<Item = T> + '_ {
    bytes
        .chunks_exact(std::mem::size_of::<T>())
        .map(bytemuck::pod_read_unaligned::<T>)
}

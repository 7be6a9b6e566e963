//! VTK legacy structured-points volumes for volcast.
//!
//! Reads ASCII and binary `.vtk` files holding a single scalar field on a
//! regular grid into a [`ScalarVolume`](volcast_core::ScalarVolume), and
//! writes volumes back in the same format.
//!
//! ```no_run
//! let mut volume = volcast_vtk::load("head.vtk")?;
//! volume.normalize_to_uint8();
//! # Ok::<(), volcast_core::VolcastError>(())
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod header;
pub mod reader;
pub mod writer;

pub use header::{Encoding, Header, HEADER_LINE_COUNT, MAGIC};
pub use reader::{host_is_little_endian, load, read_from};
pub use writer::{save, write_to};

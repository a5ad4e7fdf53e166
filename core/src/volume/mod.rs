//! Volume assembly and persistence
//!
//! Turns a raw B-scan byte stream into a physically scaled 3D volume and
//! writes it as NIfTI-1.

mod artifact;
mod assembler;
mod writer;

pub use artifact::{SpatialUnit, TemporalUnit, VolumeArtifact, VoxelType};
pub use assembler::{assemble, diagonal_affine, flip_depth, reorient, reshape_native, slice_count};
pub use writer::VolumeWriter;

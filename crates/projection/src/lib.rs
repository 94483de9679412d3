//! Coordinate transformations between geographic and pixel space.
//!
//! Only the plain equirectangular mapping is implemented: longitude and
//! latitude are scaled linearly onto the raster axes.

pub mod geographic;

pub use geographic::CoordinateMapper;

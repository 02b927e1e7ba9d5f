//! Page geometry and pagination.
//!
//! Both stages are pure: [`compute_geometry`] turns page settings into the
//! numbers a layout needs, and [`paginate`] cuts a raster of a given size into
//! page-sized horizontal slices under that geometry.

pub mod algorithms;
pub mod geometry;

pub use algorithms::pagination::{PageSlice, Pagination, paginate};
pub use geometry::{
    Decorations, HeaderContent, OrientationPolicy, PageGeometry, choose_orientation,
    compute_geometry,
};

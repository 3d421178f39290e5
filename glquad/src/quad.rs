//! The built-in quad.
//!
//! A unit-centered square made of two triangles, with a different color at each corner.

use crate::vertex::{VertexLayout, VertexLayoutError};

/// Number of components of a quad vertex: a 2D position followed by an RGB color.
pub const QUAD_STRIDE: usize = 5;

/// Interleaved quad vertices.
#[rustfmt::skip]
pub const QUAD_VERTICES: [f32; 4 * QUAD_STRIDE] = [
  -0.5,  0.5, 1., 0., 0., // top-left
   0.5,  0.5, 0., 1., 0., // top-right
   0.5, -0.5, 0., 0., 1., // bottom-right
  -0.5, -0.5, 1., 1., 1., // bottom-left
];

/// Quad indices: two triangles sharing the top-left / bottom-right diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Name of the position attribute in the vertex shader.
pub const POSITION_ATTRIB: &str = "position";

/// Name of the color attribute in the vertex shader.
pub const COLOR_ATTRIB: &str = "color";

/// Layout of [`QUAD_VERTICES`].
pub fn quad_layout() -> Result<VertexLayout, VertexLayoutError> {
  VertexLayout::from_pairs(&[(POSITION_ATTRIB, 2), (COLOR_ATTRIB, 3)])
}

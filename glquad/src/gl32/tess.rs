//! Tessellations: vertex arrays along with their buffers and draw parameters.

use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::os::raw::c_void;
use std::ptr;
use std::rc::Rc;

use crate::gl32::buffer::{Buffer, BufferTarget};
use crate::gl32::error::{check_gl_error, GlError};
use crate::gl32::shader::{Program, VertexAttribWarning};
use crate::gl32::state::{Bind, GLState};
use crate::gl32::GL32;
use crate::vertex::{VertexAttribDesc, VertexLayout, VertexLayoutError};

/// Primitive mode used to connect vertices.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
  /// A single point per vertex.
  Point,
  /// A line between each pair of vertices.
  Line,
  /// Lines connecting each vertex to the next one.
  LineStrip,
  /// A triangle for each group of three vertices.
  Triangle,
  /// Triangles sharing the first vertex.
  TriangleFan,
  /// Triangles sharing their two last vertices with the next one.
  TriangleStrip,
}

impl Default for Mode {
  fn default() -> Self {
    Mode::Triangle
  }
}

pub(crate) fn opengl_mode(mode: Mode) -> GLenum {
  match mode {
    Mode::Point => gl::POINTS,
    Mode::Line => gl::LINES,
    Mode::LineStrip => gl::LINE_STRIP,
    Mode::Triangle => gl::TRIANGLES,
    Mode::TriangleFan => gl::TRIANGLE_FAN,
    Mode::TriangleStrip => gl::TRIANGLE_STRIP,
  }
}

/// Possible types of indices.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TessIndexType {
  /// 8-bit unsigned integer.
  U8,
  /// 16-bit unsigned integer.
  U16,
  /// 32-bit unsigned integer.
  U32,
}

impl TessIndexType {
  /// Size in bytes of a single index.
  pub fn bytes(self) -> usize {
    match self {
      TessIndexType::U8 => 1,
      TessIndexType::U16 => 2,
      TessIndexType::U32 => 4,
    }
  }
}

pub(crate) fn index_type_to_glenum(ty: TessIndexType) -> GLenum {
  match ty {
    TessIndexType::U8 => gl::UNSIGNED_BYTE,
    TessIndexType::U16 => gl::UNSIGNED_SHORT,
    TessIndexType::U32 => gl::UNSIGNED_INT,
  }
}

/// Types that can be used as indices.
pub trait TessIndex: Copy {
  /// Type of the index.
  const INDEX_TYPE: TessIndexType;

  /// Widen the index so that it can be range-checked.
  fn to_usize(self) -> usize;
}

impl TessIndex for u8 {
  const INDEX_TYPE: TessIndexType = TessIndexType::U8;

  fn to_usize(self) -> usize {
    self as usize
  }
}

impl TessIndex for u16 {
  const INDEX_TYPE: TessIndexType = TessIndexType::U16;

  fn to_usize(self) -> usize {
    self as usize
  }
}

impl TessIndex for u32 {
  const INDEX_TYPE: TessIndexType = TessIndexType::U32;

  fn to_usize(self) -> usize {
    self as usize
  }
}

/// Possible errors that might occur when building a tessellation.
#[non_exhaustive]
#[derive(Debug)]
pub enum TessError {
  /// The vertex data doesn’t match its layout.
  Layout(VertexLayoutError),
  /// No vertex data was provided.
  NoVertices,
  /// An index points past the last vertex.
  IndexOutOfRange {
    /// Faulty index.
    index: usize,
    /// Number of vertices.
    vertex_count: usize,
  },
  /// The driver reported an error.
  Gl(GlError),
}

impl fmt::Display for TessError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      TessError::Layout(ref e) => write!(f, "vertex layout error: {}", e),
      TessError::NoVertices => f.write_str("no vertices to tessellate"),
      TessError::IndexOutOfRange {
        index,
        vertex_count,
      } => write!(
        f,
        "index {} out of range (only {} vertices)",
        index, vertex_count
      ),
      TessError::Gl(ref e) => write!(f, "tessellation error: {}", e),
    }
  }
}

impl error::Error for TessError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      TessError::Layout(e) => Some(e),
      TessError::Gl(e) => Some(e),
      _ => None,
    }
  }
}

impl From<VertexLayoutError> for TessError {
  fn from(e: VertexLayoutError) -> Self {
    TessError::Layout(e)
  }
}

impl From<GlError> for TessError {
  fn from(e: GlError) -> Self {
    TessError::Gl(e)
  }
}

/// Build a [`Tess`] out of interleaved vertices and optional indices.
pub struct TessBuilder<'a, I> {
  vertices: Option<(&'a [f32], VertexLayout)>,
  indices: Option<&'a [I]>,
  mode: Mode,
}

impl<'a> TessBuilder<'a, u32> {
  /// Create a builder for non-indexed geometry, or for `u32` indices.
  pub fn new() -> Self {
    TessBuilder {
      vertices: None,
      indices: None,
      mode: Mode::default(),
    }
  }
}

impl<'a> Default for TessBuilder<'a, u32> {
  fn default() -> Self {
    Self::new()
  }
}

impl<'a, I> TessBuilder<'a, I>
where
  I: TessIndex,
{
  /// Set the interleaved vertex data along with its layout.
  pub fn set_vertices(mut self, vertices: &'a [f32], layout: VertexLayout) -> Self {
    self.vertices = Some((vertices, layout));
    self
  }

  /// Set the indices, turning the tessellation into an indexed one.
  pub fn set_indices<J>(self, indices: &'a [J]) -> TessBuilder<'a, J>
  where
    J: TessIndex,
  {
    TessBuilder {
      vertices: self.vertices,
      indices: Some(indices),
      mode: self.mode,
    }
  }

  /// Set the primitive mode.
  pub fn set_mode(mut self, mode: Mode) -> Self {
    self.mode = mode;
    self
  }

  /// Upload everything to the GPU and bind the vertex attributes of `program`.
  ///
  /// Attributes the program doesn’t use are skipped and reported as warnings.
  pub fn build(
    self,
    gl32: &mut GL32,
    program: &Program,
  ) -> Result<(Tess, Vec<VertexAttribWarning>), TessError> {
    let vert_nb = check_geometry(
      self.vertices.as_ref().map(|(vertices, layout)| (*vertices, layout)),
      self.indices,
    )?;
    let (vertices, layout) = self.vertices.ok_or(TessError::NoVertices)?;

    let mut vao: GLuint = 0;

    unsafe {
      gl::GenVertexArrays(1, &mut vao);

      // force binding the vertex array so that previously bound vertex arrays (possibly the same
      // handle) don’t prevent us from binding here
      gl32
        .state
        .borrow_mut()
        .bind_vertex_array(vao, Bind::Forced);
    }

    // own the vao right away so that it’s deleted on the error paths below
    let mut tess = Tess {
      mode: opengl_mode(self.mode),
      vert_nb,
      vao,
      _vertex_buffer: None,
      index_state: None,
      state: gl32.state.clone(),
    };

    // buffer creation binds them, which is recorded by the vao
    let vertex_buffer = Buffer::new(gl32, BufferTarget::Array, vertices)?;

    if let Some(indices) = self.indices {
      let buffer = Buffer::new(gl32, BufferTarget::ElementArray, indices)?;
      tess.index_state = Some(IndexedDrawState {
        _buffer: buffer,
        index_type: I::INDEX_TYPE,
      });
    }

    tess._vertex_buffer = Some(vertex_buffer);

    let warnings = set_vertex_pointers(program, &layout);
    check_gl_error("vertex attribs")?;

    for warning in &warnings {
      log::warn!("{}", warning);
    }

    log::debug!(
      "created vertex array {} ({} vertices to render)",
      vao,
      tess.vert_nb
    );

    Ok((tess, warnings))
  }
}

/// Validate vertices and indices, and return how many vertices a draw call renders.
///
/// That is the number of indices for indexed geometry, the number of vertices otherwise.
pub(crate) fn check_geometry<I>(
  vertices: Option<(&[f32], &VertexLayout)>,
  indices: Option<&[I]>,
) -> Result<usize, TessError>
where
  I: TessIndex,
{
  let (vertices, layout) = vertices.ok_or(TessError::NoVertices)?;
  let vertex_count = layout.vertex_count(vertices.len())?;

  if vertex_count == 0 {
    return Err(TessError::NoVertices);
  }

  match indices {
    Some(indices) => {
      if let Some(index) = indices
        .iter()
        .map(|i| i.to_usize())
        .find(|&i| i >= vertex_count)
      {
        return Err(TessError::IndexOutOfRange {
          index,
          vertex_count,
        });
      }

      Ok(indices.len())
    }

    None => Ok(vertex_count),
  }
}

/// All the extra data required when doing indexed drawing.
#[derive(Debug)]
struct IndexedDrawState {
  _buffer: Buffer,
  index_type: TessIndexType,
}

/// A GPU vertex array ready to be rendered.
#[derive(Debug)]
pub struct Tess {
  mode: GLenum,
  vert_nb: usize,
  vao: GLuint,
  _vertex_buffer: Option<Buffer>,
  index_state: Option<IndexedDrawState>,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Tess {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().unbind_vertex_array();
      gl::DeleteVertexArrays(1, &self.vao);
    }
  }
}

impl Tess {
  /// Number of vertices (or indices, when indexed) rendered by [`Tess::render`].
  #[inline]
  pub fn vert_nb(&self) -> usize {
    self.vert_nb
  }

  /// Whether the tessellation is rendered through an index buffer.
  #[inline]
  pub fn is_indexed(&self) -> bool {
    self.index_state.is_some()
  }

  /// Render the tessellation with the currently used program.
  pub fn render(&self) -> Result<(), GlError> {
    let vert_nb = self.vert_nb as GLsizei;

    unsafe {
      self
        .state
        .borrow_mut()
        .bind_vertex_array(self.vao, Bind::Cached);

      if let Some(index_state) = self.index_state.as_ref() {
        gl::DrawElements(
          self.mode,
          vert_nb,
          index_type_to_glenum(index_state.index_type),
          ptr::null(),
        );
      } else {
        gl::DrawArrays(self.mode, 0, vert_nb);
      }
    }

    check_gl_error("draw")
  }
}

// Enable and point every attribute of the layout the program uses, at the location the program
// gives it.
fn set_vertex_pointers(program: &Program, layout: &VertexLayout) -> Vec<VertexAttribWarning> {
  let stride = layout.stride_bytes() as GLsizei;
  let mut warnings = Vec::new();

  for desc in layout.attribs() {
    match program.attrib_location(&desc.name) {
      Ok(index) => set_component_format(index, stride, desc),
      Err(warning) => warnings.push(warning),
    }
  }

  warnings
}

fn set_component_format(index: GLuint, stride: GLsizei, desc: &VertexAttribDesc) {
  log::debug!(
    "vertex attrib {} at location {}: {} components, stride {}, offset {}",
    desc.name,
    index,
    desc.size,
    stride,
    desc.offset_bytes()
  );

  unsafe {
    gl::EnableVertexAttribArray(index);
    gl::VertexAttribPointer(
      index,
      desc.size as GLint,
      gl::FLOAT,
      gl::FALSE,
      stride,
      ptr::null::<c_void>().add(desc.offset_bytes()),
    );
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::quad::{quad_layout, QUAD_INDICES, QUAD_VERTICES};

  #[test]
  fn missing_vertices() {
    let err = check_geometry::<u32>(None, None).unwrap_err();
    assert!(matches!(err, TessError::NoVertices));
  }

  #[test]
  fn empty_vertices() {
    let layout = quad_layout().unwrap();
    let err = check_geometry::<u32>(Some((&[][..], &layout)), None).unwrap_err();

    assert!(matches!(err, TessError::NoVertices));
  }

  #[test]
  fn partial_vertex() {
    let layout = quad_layout().unwrap();
    let data = [0.; 21];
    let err = check_geometry::<u32>(Some((&data[..], &layout)), None).unwrap_err();

    assert!(matches!(
      err,
      TessError::Layout(VertexLayoutError::MisalignedData { len: 21, stride: 5 })
    ));
  }

  #[test]
  fn index_past_last_vertex() {
    let layout = quad_layout().unwrap();
    let indices: [u16; 3] = [0, 3, 4];
    let err = check_geometry(Some((&QUAD_VERTICES[..], &layout)), Some(&indices[..])).unwrap_err();

    assert!(matches!(
      err,
      TessError::IndexOutOfRange {
        index: 4,
        vertex_count: 4
      }
    ));
  }

  #[test]
  fn indexed_renders_index_count() {
    let layout = quad_layout().unwrap();
    let count = check_geometry(Some((&QUAD_VERTICES[..], &layout)), Some(&QUAD_INDICES[..])).unwrap();

    assert_eq!(count, 6);
  }

  #[test]
  fn direct_renders_vertex_count() {
    let layout = quad_layout().unwrap();
    let count = check_geometry::<u8>(Some((&QUAD_VERTICES[..], &layout)), None).unwrap();

    assert_eq!(count, 4);
  }
}

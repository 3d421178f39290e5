//! Vertex layouts.
//!
//! Vertices are interleaved `f32` components. A layout is declared as an ordered list of
//! attributes, each one being a shader input name along with its number of components. From that
//! list, a [`VertexLayout`] computes everything OpenGL needs to set the vertex attribute pointers:
//!
//! - The stride: the number of components of a single vertex, i.e. the sum of every attribute
//!   size.
//! - The offsets: each attribute starts where the previous one ends, so its offset is the sum of
//!   the sizes of all the attributes declared before it.
//!
//! Sizes, strides and offsets are expressed in components; use [`VertexLayout::stride_bytes`] and
//! [`VertexAttribDesc::offset_bytes`] to get the byte values the GL API expects.
//!
//! ```
//! use glquad::vertex::VertexLayout;
//!
//! let layout = VertexLayout::from_pairs(&[("position", 2), ("color", 3)]).unwrap();
//!
//! assert_eq!(layout.stride(), 5);
//! assert_eq!(layout.stride_bytes(), 20);
//! assert_eq!(layout.attribs()[1].offset_bytes(), 8);
//! ```

use std::error;
use std::fmt;
use std::mem;

/// Size in bytes of a single vertex component.
pub const COMPONENT_SIZE: usize = mem::size_of::<f32>();

/// Maximum number of components a single vertex attribute can have.
pub const MAX_ATTRIB_SIZE: usize = 4;

/// A vertex attribute as declared by the user.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttrib {
  /// Name of the attribute in the vertex shader.
  pub name: String,
  /// Number of `f32` components (1 to 4).
  pub size: usize,
}

impl VertexAttrib {
  /// Declare a new attribute.
  pub fn new(name: impl Into<String>, size: usize) -> Self {
    VertexAttrib {
      name: name.into(),
      size,
    }
  }
}

/// A vertex attribute along with its place in the vertex.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttribDesc {
  /// Name of the attribute in the vertex shader.
  pub name: String,
  /// Number of `f32` components.
  pub size: usize,
  /// Offset of the first component, in components, from the start of the vertex.
  pub offset: usize,
}

impl VertexAttribDesc {
  /// Offset of the attribute in bytes.
  #[inline]
  pub fn offset_bytes(&self) -> usize {
    self.offset * COMPONENT_SIZE
  }

  /// Size of the attribute in bytes.
  #[inline]
  pub fn size_bytes(&self) -> usize {
    self.size * COMPONENT_SIZE
  }
}

/// Interleaved layout of a vertex.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VertexLayout {
  attribs: Vec<VertexAttribDesc>,
  stride: usize,
}

impl VertexLayout {
  /// Compute the layout of a list of attributes.
  ///
  /// Attributes are laid out in the order they are provided.
  pub fn new<I>(attribs: I) -> Result<Self, VertexLayoutError>
  where
    I: IntoIterator<Item = VertexAttrib>,
  {
    let mut descs: Vec<VertexAttribDesc> = Vec::new();
    let mut offset = 0;

    for VertexAttrib { name, size } in attribs {
      if name.is_empty() {
        return Err(VertexLayoutError::EmptyName { rank: descs.len() });
      }

      if size == 0 || size > MAX_ATTRIB_SIZE {
        return Err(VertexLayoutError::InvalidSize { name, size });
      }

      if descs.iter().any(|desc| desc.name == name) {
        return Err(VertexLayoutError::DuplicateName(name));
      }

      descs.push(VertexAttribDesc { name, size, offset });
      offset += size;
    }

    if descs.is_empty() {
      return Err(VertexLayoutError::NoAttributes);
    }

    Ok(VertexLayout {
      attribs: descs,
      stride: offset,
    })
  }

  /// Compute the layout of a list of `(name, size)` pairs.
  pub fn from_pairs(pairs: &[(&str, usize)]) -> Result<Self, VertexLayoutError> {
    Self::new(
      pairs
        .iter()
        .map(|&(name, size)| VertexAttrib::new(name, size)),
    )
  }

  /// Attributes, in declaration order.
  pub fn attribs(&self) -> &[VertexAttribDesc] {
    &self.attribs
  }

  /// Look an attribute up by name.
  pub fn attrib(&self, name: &str) -> Option<&VertexAttribDesc> {
    self.attribs.iter().find(|desc| desc.name == name)
  }

  /// Number of components of a single vertex.
  #[inline]
  pub fn stride(&self) -> usize {
    self.stride
  }

  /// Size in bytes of a single vertex.
  #[inline]
  pub fn stride_bytes(&self) -> usize {
    self.stride * COMPONENT_SIZE
  }

  /// Number of vertices held in a flat slice of `len` components.
  pub fn vertex_count(&self, len: usize) -> Result<usize, VertexLayoutError> {
    if len % self.stride != 0 {
      return Err(VertexLayoutError::MisalignedData {
        len,
        stride: self.stride,
      });
    }

    Ok(len / self.stride)
  }
}

/// Errors that can occur while computing a vertex layout.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VertexLayoutError {
  /// No attribute was provided.
  NoAttributes,
  /// The attribute at the given rank has an empty name.
  EmptyName {
    /// Rank of the attribute in the declaration list.
    rank: usize,
  },
  /// The attribute has a size outside of `1..=4`.
  InvalidSize {
    /// Name of the attribute.
    name: String,
    /// Size that was asked.
    size: usize,
  },
  /// The same name was declared twice.
  DuplicateName(String),
  /// Vertex data doesn’t hold a whole number of vertices.
  MisalignedData {
    /// Number of components in the data.
    len: usize,
    /// Number of components per vertex.
    stride: usize,
  },
}

impl fmt::Display for VertexLayoutError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      VertexLayoutError::NoAttributes => f.write_str("no vertex attribute declared"),
      VertexLayoutError::EmptyName { rank } => {
        write!(f, "vertex attribute #{} has an empty name", rank)
      }
      VertexLayoutError::InvalidSize { ref name, size } => write!(
        f,
        "vertex attribute {} has {} components (expected 1 to {})",
        name, size, MAX_ATTRIB_SIZE
      ),
      VertexLayoutError::DuplicateName(ref name) => {
        write!(f, "vertex attribute {} declared more than once", name)
      }
      VertexLayoutError::MisalignedData { len, stride } => write!(
        f,
        "{} components cannot be split into vertices of {} components",
        len, stride
      ),
    }
  }
}

impl error::Error for VertexLayoutError {}

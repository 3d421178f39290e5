//! OpenGL buffer implementation.

use crate::gl32::{
  error::{check_gl_error, GlError},
  state::{Bind, GLState},
  GL32,
};
use gl::types::*;
use std::{cell::RefCell, mem, rc::Rc};

/// Target a buffer is bound to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BufferTarget {
  /// Vertex data (VBO).
  Array,
  /// Index data (EBO).
  ElementArray,
}

impl BufferTarget {
  fn tag(self) -> &'static str {
    match self {
      BufferTarget::Array => "vbo",
      BufferTarget::ElementArray => "ebo",
    }
  }
}

/// Wrapped OpenGL buffer.
///
/// Used to drop the buffer.
#[derive(Debug)]
struct BufferWrapper {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for BufferWrapper {
  fn drop(&mut self) {
    unsafe {
      self.state.borrow_mut().unbind_buffer(self.handle);
      gl::DeleteBuffers(1, &self.handle);
    }
  }
}

/// Immutable GPU buffer, uploaded once with `GL_STATIC_DRAW`.
#[derive(Debug)]
pub struct Buffer {
  gl_buf: BufferWrapper,
  target: BufferTarget,
  len: usize,
  bytes: usize,
}

impl Buffer {
  /// Create a buffer and upload `data` into it.
  ///
  /// The buffer is left bound to `target`.
  pub fn new<T>(gl32: &mut GL32, target: BufferTarget, data: &[T]) -> Result<Self, GlError>
  where
    T: Copy,
  {
    let mut handle: GLuint = 0;
    let len = data.len();
    let bytes = mem::size_of::<T>() * len;

    unsafe {
      gl::GenBuffers(1, &mut handle);

      let mut state = gl32.state.borrow_mut();
      let gl_target = match target {
        BufferTarget::Array => {
          state.bind_array_buffer(handle, Bind::Forced);
          gl::ARRAY_BUFFER
        }

        BufferTarget::ElementArray => {
          state.bind_element_array_buffer(handle, Bind::Forced);
          gl::ELEMENT_ARRAY_BUFFER
        }
      };

      gl::BufferData(
        gl_target,
        bytes as GLsizeiptr,
        data.as_ptr() as _,
        gl::STATIC_DRAW,
      );
    }

    let state = gl32.state.clone();
    let gl_buf = BufferWrapper { handle, state };

    // wrap before checking so that the handle is released on error
    let buffer = Buffer {
      gl_buf,
      target,
      len,
      bytes,
    };

    check_gl_error(target.tag())?;
    log::debug!(
      "created {} {} ({} elements, {} bytes)",
      target.tag(),
      handle,
      len,
      bytes
    );

    Ok(buffer)
  }

  /// Target the buffer was created for.
  #[inline]
  pub fn target(&self) -> BufferTarget {
    self.target
  }

  /// Length of the buffer (number of elements).
  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  /// Whether the buffer holds no element.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Size of the buffer in bytes.
  #[inline]
  pub fn bytes(&self) -> usize {
    self.bytes
  }
}

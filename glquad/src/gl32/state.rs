//! Graphics state.

use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

use crate::gl32::error::{check_gl_error, GlError};

// TLS synchronization barrier for `GLState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

/// Cached value.
///
/// A cached value is used to prevent issuing GPU commands if we know the target value is already
/// set to what the command tries to set.
#[derive(Debug)]
pub(crate) struct Cached<T>(T)
where
  T: PartialEq;

impl<T> Cached<T>
where
  T: PartialEq,
{
  /// Cache a value.
  pub(crate) fn new(initial: T) -> Self {
    Cached(initial)
  }

  pub(crate) fn set(&mut self, value: T) {
    self.0 = value;
  }

  /// Check if the cached value is invalid regarding a value.
  pub(crate) fn is_invalid(&self, new_val: &T) -> bool {
    self.0 != *new_val
  }
}

/// The graphics state.
///
/// Forward-gate to the handful of GL bindings the bootstrap touches, with a small cache layer so
/// that binding the same object twice in a row doesn’t reach the driver.
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  // viewport
  viewport: Cached<[GLint; 4]>,

  // clear buffers
  clear_color: Cached<[GLfloat; 4]>,

  // array buffer
  bound_array_buffer: GLuint,

  // element buffer
  bound_element_array_buffer: GLuint,

  // vertex array
  bound_vertex_array: GLuint,

  // shader program
  current_program: GLuint,
}

impl GLState {
  /// Create a new `GLState`.
  ///
  /// > Note: keep in mind you can create only one per thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    TLS_ACQUIRE_GFX_STATE.with(|rc| {
      let mut inner = rc.borrow_mut();

      match *inner {
        Some(_) => {
          inner.take();
          Self::get_from_context()
        }

        None => Err(StateQueryError::UnavailableGLState),
      }
    })
  }

  /// Read the initial state from the current OpenGL context.
  fn get_from_context() -> Result<Self, StateQueryError> {
    unsafe {
      let viewport = Cached::new(get_ctx_viewport());
      let clear_color = Cached::new(get_ctx_clear_color());
      let bound_vertex_array = get_ctx_integer(gl::VERTEX_ARRAY_BINDING);
      let current_program = get_ctx_integer(gl::CURRENT_PROGRAM);

      check_gl_error("state query")?;

      Ok(GLState {
        _a: PhantomData,
        viewport,
        clear_color,
        bound_array_buffer: 0,
        bound_element_array_buffer: 0,
        bound_vertex_array,
        current_program,
      })
    }
  }

  /// Forget the current program, so that the next `use_program` rebinds.
  pub(crate) fn invalidate_shader_program(&mut self) {
    self.current_program = 0;
  }

  pub(crate) unsafe fn set_viewport(&mut self, viewport: [GLint; 4]) {
    if self.viewport.is_invalid(&viewport) {
      gl::Viewport(viewport[0], viewport[1], viewport[2], viewport[3]);
      self.viewport.set(viewport);
    }
  }

  pub(crate) unsafe fn set_clear_color(&mut self, clear_color: [GLfloat; 4]) {
    if self.clear_color.is_invalid(&clear_color) {
      gl::ClearColor(
        clear_color[0],
        clear_color[1],
        clear_color[2],
        clear_color[3],
      );
      self.clear_color.set(clear_color);
    }
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_array_buffer != handle {
      gl::BindBuffer(gl::ARRAY_BUFFER, handle);
      self.bound_array_buffer = handle;
    }
  }

  pub(crate) unsafe fn bind_element_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_element_array_buffer != handle {
      gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, handle);
      self.bound_element_array_buffer = handle;
    }
  }

  pub(crate) unsafe fn unbind_buffer(&mut self, handle: GLuint) {
    if self.bound_array_buffer == handle {
      self.bind_array_buffer(0, Bind::Cached);
    } else if self.bound_element_array_buffer == handle {
      self.bind_element_array_buffer(0, Bind::Cached);
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced || self.bound_vertex_array != handle {
      gl::BindVertexArray(handle);
      self.bound_vertex_array = handle;

      // the element array binding is part of the vertex array state
      self.bound_element_array_buffer = 0;
    }
  }

  pub(crate) unsafe fn unbind_vertex_array(&mut self) {
    self.bind_vertex_array(0, Bind::Cached)
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.current_program != handle {
      gl::UseProgram(handle);
      self.current_program = handle;
    }
  }

  pub(crate) fn current_program(&self) -> GLuint {
    self.current_program
  }
}

/// Should the binding be cached or forced to the provided value?
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Bind {
  Forced,
  Cached,
}

/// An error that might happen when the context is queried.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The [`GLState`] object is unavailable.
  ///
  /// That might occur if you try to have more than one state on the same thread.
  UnavailableGLState,
  /// The driver reported an error while the initial state was read.
  QueryFailed(GlError),
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
      StateQueryError::QueryFailed(ref e) => write!(f, "cannot query graphics state: {}", e),
    }
  }
}

impl error::Error for StateQueryError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      StateQueryError::QueryFailed(e) => Some(e),
      _ => None,
    }
  }
}

impl From<GlError> for StateQueryError {
  fn from(e: GlError) -> Self {
    StateQueryError::QueryFailed(e)
  }
}

unsafe fn get_ctx_viewport() -> [GLint; 4] {
  let mut data = [0; 4];
  gl::GetIntegerv(gl::VIEWPORT, data.as_mut_ptr());
  data
}

unsafe fn get_ctx_clear_color() -> [GLfloat; 4] {
  let mut data = [0.; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, data.as_mut_ptr());
  data
}

unsafe fn get_ctx_integer(name: GLenum) -> GLuint {
  let mut value = 0 as GLint;
  gl::GetIntegerv(name, &mut value);
  value as GLuint
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cached_value_is_valid_only_for_same_value() {
    let cached = Cached::new([0., 0., 0., 1.]);

    assert!(!cached.is_invalid(&[0., 0., 0., 1.]));
    assert!(cached.is_invalid(&[1., 0., 0., 1.]));
  }

  #[test]
  fn set_value_replaces_cached_one() {
    let mut cached = Cached::new([0, 0, 800, 600]);
    cached.set([0, 0, 1024, 768]);

    assert!(cached.is_invalid(&[0, 0, 800, 600]));
    assert!(!cached.is_invalid(&[0, 0, 1024, 768]));
  }
}

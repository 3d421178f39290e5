//! OpenGL 3.2 core backend.
//!
//! The backend type is [`GL32`]. It must be created once an OpenGL context is current on the
//! calling thread and the GL function pointers are loaded.

mod buffer;
mod error;
mod shader;
mod state;
mod tess;

pub use self::buffer::{Buffer, BufferTarget};
pub use self::error::{check_gl_error, gl_error_name, GlError};
pub use self::shader::{Program, ProgramError, Stage, StageError, StageType, VertexAttribWarning};
pub use self::state::{GLState, StateQueryError};
pub use self::tess::{Mode, Tess, TessBuilder, TessError, TessIndex, TessIndexType};

use gl::types::*;
use std::cell::RefCell;
use std::ffi::CStr;
use std::rc::Rc;

/// An OpenGL 3.2 backend.
#[derive(Debug)]
pub struct GL32 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL32 {
  /// Create a new OpenGL 3.2 backend.
  pub fn new() -> Result<Self, StateQueryError> {
    GLState::new().map(|state| GL32 {
      state: Rc::new(RefCell::new(state)),
    })
  }

  /// Clear the color buffer of the currently bound framebuffer with `color`.
  pub fn clear(&mut self, color: [f32; 4]) -> Result<(), GlError> {
    unsafe {
      self.state.borrow_mut().set_clear_color(color);
      gl::Clear(gl::COLOR_BUFFER_BIT);
    }

    check_gl_error("clear")
  }

  /// Set the viewport to cover a `width × height` framebuffer.
  pub fn set_viewport(&mut self, width: u32, height: u32) {
    unsafe {
      self
        .state
        .borrow_mut()
        .set_viewport([0, 0, width as GLint, height as GLint]);
    }
  }

  /// Information about the driver.
  pub fn info(&self) -> ContextInfo {
    unsafe {
      ContextInfo {
        vendor: get_string(gl::VENDOR),
        renderer: get_string(gl::RENDERER),
        version: get_string(gl::VERSION),
        shading_lang_version: get_string(gl::SHADING_LANGUAGE_VERSION),
      }
    }
  }
}

/// Driver information, as reported by `glGetString`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContextInfo {
  /// Company responsible for the implementation.
  pub vendor: String,
  /// Name of the renderer.
  pub renderer: String,
  /// OpenGL version string.
  pub version: String,
  /// GLSL version string.
  pub shading_lang_version: String,
}

unsafe fn get_string(name: GLenum) -> String {
  let ptr = gl::GetString(name);

  if ptr.is_null() {
    String::new()
  } else {
    CStr::from_ptr(ptr as *const _).to_string_lossy().into_owned()
  }
}

//! OpenGL error checking.

use gl::types::GLenum;
use std::error;
use std::fmt;

/// An error reported by `glGetError`, tagged with the step that triggered it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlError {
  tag: String,
  code: GLenum,
}

impl GlError {
  /// Create an error out of a tag and a raw GL error code.
  pub fn new(tag: impl Into<String>, code: GLenum) -> Self {
    GlError {
      tag: tag.into(),
      code,
    }
  }

  /// The step that was running when the error was detected.
  pub fn tag(&self) -> &str {
    &self.tag
  }

  /// Raw GL error code.
  pub fn code(&self) -> GLenum {
    self.code
  }
}

impl fmt::Display for GlError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    let name = gl_error_name(self.code).unwrap_or("unknown");
    write!(f, "{}: {} ({})", self.tag, name, self.code)
  }
}

impl error::Error for GlError {}

/// Human-readable name of a `glGetError` code.
///
/// Returns [`None`] for codes that are not part of the core error set.
pub fn gl_error_name(code: GLenum) -> Option<&'static str> {
  match code {
    gl::NO_ERROR => Some("GL_NO_ERROR"),
    gl::INVALID_ENUM => Some("GL_INVALID_ENUM"),
    gl::INVALID_VALUE => Some("GL_INVALID_VALUE"),
    gl::INVALID_OPERATION => Some("GL_INVALID_OPERATION"),
    gl::INVALID_FRAMEBUFFER_OPERATION => Some("GL_INVALID_FRAMEBUFFER_OPERATION"),
    gl::OUT_OF_MEMORY => Some("GL_OUT_OF_MEMORY"),
    _ => None,
  }
}

/// Check whether the driver has recorded an error since the last call.
///
/// `tag` names the step being checked and ends up in the error message.
pub fn check_gl_error(tag: &str) -> Result<(), GlError> {
  match unsafe { gl::GetError() } {
    gl::NO_ERROR => Ok(()),
    code => {
      log::debug!("{} failed with {:#x}", tag, code);
      Err(GlError::new(tag, code))
    }
  }
}

//! Shader stages and programs.

use crate::gl32::{
  error::{check_gl_error, GlError},
  state::GLState,
  GL32,
};
use gl::types::*;
use std::{
  cell::RefCell,
  error,
  ffi::CString,
  fmt, fs, io,
  path::{Path, PathBuf},
  ptr::{null, null_mut},
  rc::Rc,
};

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

/// Errors that shader stages can emit.
#[non_exhaustive]
#[derive(Debug)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  CompilationFailed(StageType, String),
  /// The shader source cannot be read.
  Io {
    /// Path of the source file.
    path: PathBuf,
    /// Underlying I/O error.
    source: io::Error,
  },
  /// The shader source contains a NUL byte.
  InvalidSource(StageType),
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
      StageError::Io {
        ref path,
        ref source,
      } => write!(f, "unable to read '{}': {}", path.display(), source),
      StageError::InvalidSource(ref ty) => write!(f, "{} source contains a NUL byte", ty),
    }
  }
}

impl error::Error for StageError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      StageError::Io { source, .. } => Some(source),
      _ => None,
    }
  }
}

/// A compiled shader stage.
#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
  ty: StageType,
}

impl Drop for Stage {
  fn drop(&mut self) {
    unsafe {
      gl::DeleteShader(self.handle);
    }
  }
}

impl Stage {
  /// Compile a stage from its GLSL source.
  pub fn new(ty: StageType, src: &str) -> Result<Self, StageError> {
    let c_src = CString::new(src.as_bytes()).map_err(|_| StageError::InvalidSource(ty))?;

    unsafe {
      let handle = gl::CreateShader(opengl_shader_type(ty));

      if handle == 0 {
        return Err(StageError::CompilationFailed(
          ty,
          "unable to create shader stage".to_owned(),
        ));
      }

      gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
      gl::CompileShader(handle);

      let mut compiled: GLint = gl::FALSE.into();
      gl::GetShaderiv(handle, gl::COMPILE_STATUS, &mut compiled);

      if compiled == gl::TRUE.into() {
        log::debug!("compiled {} {}", ty, handle);
        Ok(Stage { handle, ty })
      } else {
        let mut log_len: GLint = 0;
        gl::GetShaderiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log: Vec<u8> = Vec::with_capacity(log_len as usize);
        gl::GetShaderInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

        gl::DeleteShader(handle);

        log.set_len(log_len as usize);

        Err(StageError::CompilationFailed(ty, info_log_to_string(log)))
      }
    }
  }

  /// Read a GLSL source file and compile it.
  pub fn from_file(ty: StageType, path: impl AsRef<Path>) -> Result<Self, StageError> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|source| StageError::Io {
      path: path.to_owned(),
      source,
    })?;

    log::debug!("loaded {} from {}", ty, path.display());
    Self::new(ty, &src)
  }

  /// Type of the stage.
  #[inline]
  pub fn ty(&self) -> StageType {
    self.ty
  }
}

/// Errors that a program can emit.
#[non_exhaustive]
#[derive(Debug)]
pub enum ProgramError {
  /// A program must have a vertex and a fragment stage.
  MissingStage(StageType),
  /// Program link failed. You can inspect the reason by looking at the contained [`String`].
  LinkFailed(String),
  /// The fragment output name contains a NUL byte.
  InvalidOutputName(String),
  /// The driver reported an error.
  Gl(GlError),
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::MissingStage(ref ty) => write!(f, "missing {}", ty),
      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
      ProgramError::InvalidOutputName(ref name) => {
        write!(f, "invalid fragment output name: {:?}", name)
      }
      ProgramError::Gl(ref e) => write!(f, "shader program error: {}", e),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::Gl(e) => Some(e),
      _ => None,
    }
  }
}

impl From<GlError> for ProgramError {
  fn from(e: GlError) -> Self {
    ProgramError::Gl(e)
  }
}

/// A linked shader program.
#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl Drop for Program {
  fn drop(&mut self) {
    unsafe {
      let mut state = self.state.borrow_mut();

      if state.current_program() == self.handle {
        state.invalidate_shader_program();
      }

      gl::DeleteProgram(self.handle);
    }
  }
}

impl Program {
  /// Attach `stages` to a new program, bind `frag_output` to the color number 0 and link.
  ///
  /// Stages can be dropped once the program is built.
  pub fn new(gl32: &mut GL32, stages: &[&Stage], frag_output: &str) -> Result<Self, ProgramError> {
    for ty in [StageType::VertexShader, StageType::FragmentShader] {
      if !stages.iter().any(|stage| stage.ty == ty) {
        return Err(ProgramError::MissingStage(ty));
      }
    }

    let c_output = CString::new(frag_output.as_bytes())
      .map_err(|_| ProgramError::InvalidOutputName(frag_output.to_owned()))?;

    let handle = unsafe { gl::CreateProgram() };
    let program = Program {
      handle,
      state: gl32.state.clone(),
    };

    unsafe {
      for stage in stages {
        gl::AttachShader(handle, stage.handle);
      }

      gl::BindFragDataLocation(handle, 0, c_output.as_ptr() as *const GLchar);
    }

    program.link()?;
    check_gl_error("program")?;
    log::debug!("linked program {} ({} stages)", handle, stages.len());

    Ok(program)
  }

  fn link(&self) -> Result<(), ProgramError> {
    let handle = self.handle;

    unsafe {
      gl::LinkProgram(handle);

      let mut linked: GLint = gl::FALSE.into();
      gl::GetProgramiv(handle, gl::LINK_STATUS, &mut linked);

      if linked == gl::TRUE.into() {
        Ok(())
      } else {
        let mut log_len: GLint = 0;
        gl::GetProgramiv(handle, gl::INFO_LOG_LENGTH, &mut log_len);

        let mut log: Vec<u8> = Vec::with_capacity(log_len as usize);
        gl::GetProgramInfoLog(handle, log_len, null_mut(), log.as_mut_ptr() as *mut GLchar);

        log.set_len(log_len as usize);

        Err(ProgramError::LinkFailed(info_log_to_string(log)))
      }
    }
  }

  /// Make this program the current one.
  pub fn use_program(&self) -> Result<(), GlError> {
    unsafe {
      self.state.borrow_mut().use_program(self.handle);
    }

    check_gl_error("use program")
  }

  /// Location of a vertex attribute, or a warning if the program has no such active attribute.
  pub fn attrib_location(&self, name: &str) -> Result<GLuint, VertexAttribWarning> {
    let c_name =
      CString::new(name.as_bytes()).map_err(|_| VertexAttribWarning::Inactive(name.to_owned()))?;
    let location = unsafe { gl::GetAttribLocation(self.handle, c_name.as_ptr() as *const GLchar) };

    if location < 0 {
      Err(VertexAttribWarning::Inactive(name.to_owned()))
    } else {
      Ok(location as GLuint)
    }
  }
}

/// Warnings related to vertex attributes.
///
/// These are not errors: an attribute the shader doesn’t use is simply not bound.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VertexAttribWarning {
  /// The vertex attribute is not active in the program.
  Inactive(String),
}

impl fmt::Display for VertexAttribWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      VertexAttribWarning::Inactive(ref attrib) => write!(f, "inactive {} vertex attribute", attrib),
    }
  }
}

impl error::Error for VertexAttribWarning {}

// Drivers include the terminating NUL in the log length.
fn info_log_to_string(mut log: Vec<u8>) -> String {
  while log.last() == Some(&0) {
    log.pop();
  }

  String::from_utf8_lossy(&log).into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn info_log_drops_trailing_nul() {
    let log = b"0:1(1): error: syntax error\n\0".to_vec();
    assert_eq!(info_log_to_string(log), "0:1(1): error: syntax error\n");
  }

  #[test]
  fn info_log_keeps_invalid_utf8() {
    let log = vec![b'o', b'k', 0xff, 0];
    assert_eq!(info_log_to_string(log), "ok\u{fffd}");
  }

  #[test]
  fn missing_source_file_is_an_io_error() {
    let err = Stage::from_file(StageType::VertexShader, "does/not/exist.vert").unwrap_err();

    match err {
      StageError::Io { path, .. } => assert_eq!(path, Path::new("does/not/exist.vert")),
      e => panic!("unexpected error: {}", e),
    }
  }
}

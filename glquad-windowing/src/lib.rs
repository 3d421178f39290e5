//! # glquad windowing
//!
//! Common windowing types for glquad. The `glquad` crate talks to OpenGL but doesn’t create the
//! OpenGL context; that’s the job of a windowing backend (`glquad-sdl2` for now). This crate
//! holds what every backend shares so that the application doesn’t depend on the backend:
//!
//! - `WindowDim`: dimension of the window and its mode (windowed, fullscreen, fullscreen
//!   restricted).
//! - `WindowOpt`: hints to customize the window and the context, such as the OpenGL version or
//!   the stencil buffer size.
//! - `InputAction`: the few events the render loop reacts to.
//! - `Surface`: the trait backends implement.

#![deny(missing_docs)]

use glquad::GL32;

/// Dimension metrics.
///
///   - `Windowed { width, height }` opens in windowed mode with the wished resolution.
///   - `Fullscreen` opens in fullscreen mode by using the primary monitor resolution.
///   - `FullscreenRestricted { width, height }` is a mix between `Windowed` and `Fullscreen`. It
///     opens in fullscreen mode by using the wished resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowDim {
  /// Windowed mode.
  Windowed {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
  /// Fullscreen mode (adapt to your screen).
  Fullscreen,
  /// Fullscreen mode with restricted viewport dimension.
  FullscreenRestricted {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
}

/// OpenGL context version. Contexts are always core profile.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GlVersion {
  /// Major version.
  pub major: u8,
  /// Minor version.
  pub minor: u8,
}

impl Default for GlVersion {
  /// OpenGL 3.2.
  fn default() -> Self {
    GlVersion { major: 3, minor: 2 }
  }
}

/// Different window options.
///
/// Feel free to look at the different methods available to tweak the options. You may want to start
/// with `default()` though.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: WindowDim,
  position: Option<(i32, i32)>,
  gl_version: GlVersion,
  stencil_bits: u8,
  vsync: bool,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `dim` set to `WindowDim::Windowed { width: 800, height: 600 }`.
  /// - `position` set to `(100, 100)`.
  /// - `gl_version` set to 3.2.
  /// - `stencil_bits` set to `8`.
  /// - `vsync` enabled.
  fn default() -> Self {
    WindowOpt {
      dim: WindowDim::Windowed {
        width: 800,
        height: 600,
      },
      position: Some((100, 100)),
      gl_version: GlVersion::default(),
      stencil_bits: 8,
      vsync: true,
    }
  }
}

impl WindowOpt {
  /// Set the dimension of the window.
  #[inline]
  pub fn set_dim(self, dim: WindowDim) -> Self {
    WindowOpt { dim, ..self }
  }

  /// Get the dimension of the window.
  #[inline]
  pub fn dim(&self) -> &WindowDim {
    &self.dim
  }

  /// Set the position of the window on the desktop.
  ///
  /// Pass `None` to let the system center the window.
  #[inline]
  pub fn set_position<P>(self, position: P) -> Self
  where
    P: Into<Option<(i32, i32)>>,
  {
    WindowOpt {
      position: position.into(),
      ..self
    }
  }

  /// Get the position of the window, if any.
  #[inline]
  pub fn position(&self) -> Option<(i32, i32)> {
    self.position
  }

  /// Set the OpenGL version to ask for.
  #[inline]
  pub fn set_gl_version(self, gl_version: GlVersion) -> Self {
    WindowOpt { gl_version, ..self }
  }

  /// Get the OpenGL version to ask for.
  #[inline]
  pub fn gl_version(&self) -> GlVersion {
    self.gl_version
  }

  /// Set the number of bits of the stencil buffer.
  #[inline]
  pub fn set_stencil_bits(self, stencil_bits: u8) -> Self {
    WindowOpt {
      stencil_bits,
      ..self
    }
  }

  /// Get the number of bits of the stencil buffer.
  #[inline]
  pub fn stencil_bits(&self) -> u8 {
    self.stencil_bits
  }

  /// Enable or disable vertical synchronization.
  #[inline]
  pub fn set_vsync(self, vsync: bool) -> Self {
    WindowOpt { vsync, ..self }
  }

  /// Whether vertical synchronization is enabled.
  #[inline]
  pub fn vsync(&self) -> bool {
    self.vsync
  }
}

/// Inputs the render loop reacts to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputAction {
  /// Quit the application.
  Quit,

  /// Framebuffer size changed.
  Resized {
    /// New width.
    width: u32,
    /// New height.
    height: u32,
  },
}

/// Whether the render loop should go on.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum LoopFeedback {
  /// Render another frame.
  Continue,
  /// Leave the loop.
  Exit,
}

impl LoopFeedback {
  /// Fold a batch of actions into a feedback, calling `on_resize` for every resize.
  ///
  /// Actions are handled in order, and handling stops at the first `Quit`.
  pub fn from_actions<A, F>(actions: A, mut on_resize: F) -> Self
  where
    A: IntoIterator<Item = InputAction>,
    F: FnMut(u32, u32),
  {
    for action in actions {
      match action {
        InputAction::Quit => return LoopFeedback::Exit,
        InputAction::Resized { width, height } => on_resize(width, height),
      }
    }

    LoopFeedback::Continue
  }
}

/// Rendering surface.
///
/// A surface owns the window, the OpenGL context and the [`GL32`] backend living on it.
pub trait Surface: Sized {
  /// Type of surface errors.
  type Error;

  /// Open a window, create its OpenGL context and bootstrap the backend.
  fn new(title: &str, win_opt: WindowOpt) -> Result<Self, Self::Error>;

  /// Options the surface was created with.
  fn opts(&self) -> &WindowOpt;

  /// The OpenGL backend.
  fn backend(&mut self) -> &mut GL32;

  /// Size of the surface’s framebuffer.
  fn size(&self) -> [u32; 2];

  /// Width of the surface’s framebuffer.
  ///
  /// # Defaults
  ///
  /// Defaults to `.size()[0]`.
  fn width(&self) -> u32 {
    self.size()[0]
  }

  /// Height of the surface’s framebuffer.
  ///
  /// # Defaults
  ///
  /// Defaults to `.size()[1]`.
  fn height(&self) -> u32 {
    self.size()[1]
  }

  /// Drain the pending events without blocking, mapped to actions.
  fn poll_actions(&mut self) -> Vec<InputAction>;

  /// Swap the back and front buffers.
  fn swap_buffers(&mut self);
}

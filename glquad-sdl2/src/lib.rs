//! [SDL2](https://crates.io/crates/sdl2) backend for glquad and glquad-windowing.

#![deny(missing_docs)]

use glquad::gl32::{StateQueryError, GL32};
use glquad_windowing::{InputAction, Surface, WindowDim, WindowOpt};
pub use sdl2;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::video::{GLProfile, SwapInterval};
use std::error;
use std::fmt;
use std::os::raw::c_void;

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum Sdl2SurfaceError {
  /// Initialization of the surface went wrong.
  InitError(String),
  /// No available video mode.
  VideoInitError(String),
  /// Window creation failed.
  WindowCreationFailed(sdl2::video::WindowBuildError),
  /// Failed to create an OpenGL context.
  GlContextInitFailed(String),
  /// The event pump is already in use.
  EventPumpError(String),
  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired.
  GraphicsStateError(StateQueryError),
}

impl fmt::Display for Sdl2SurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      Sdl2SurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      Sdl2SurfaceError::VideoInitError(ref e) => {
        write!(f, "failed to initialize video system: {}", e)
      }
      Sdl2SurfaceError::WindowCreationFailed(ref e) => write!(f, "failed to create window: {}", e),
      Sdl2SurfaceError::GlContextInitFailed(ref e) => {
        write!(f, "failed to create OpenGL context: {}", e)
      }
      Sdl2SurfaceError::EventPumpError(ref e) => write!(f, "failed to get event pump: {}", e),
      Sdl2SurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
    }
  }
}

impl error::Error for Sdl2SurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Sdl2SurfaceError::WindowCreationFailed(e) => Some(e),
      Sdl2SurfaceError::GraphicsStateError(e) => Some(e),
      _ => None,
    }
  }
}

/// A glquad surface backed by SDL2 and an OpenGL core context.
///
/// ```ignore
/// use glquad_sdl2::GL32Surface;
/// use glquad_windowing::{Surface, WindowOpt};
///
/// let surface = GL32Surface::new("My app", WindowOpt::default())
///     .expect("failed to create surface");
/// ```
pub struct GL32Surface {
  // the backend must go before the context; GL objects are released while it’s still current
  gl: GL32,
  _gl_context: sdl2::video::GLContext,
  window: sdl2::video::Window,
  event_pump: sdl2::EventPump,
  _video: sdl2::VideoSubsystem,
  _sdl: sdl2::Sdl,
  opts: WindowOpt,
}

impl GL32Surface {
  /// Borrow the underlying SDL2 window of this surface.
  pub fn window(&self) -> &sdl2::video::Window {
    &self.window
  }

  /// Mutably borrow the underlying SDL2 window of this surface.
  pub fn window_mut(&mut self) -> &mut sdl2::video::Window {
    &mut self.window
  }
}

impl Surface for GL32Surface {
  type Error = Sdl2SurfaceError;

  fn new(title: &str, win_opt: WindowOpt) -> Result<Self, Self::Error> {
    let sdl = sdl2::init().map_err(Sdl2SurfaceError::InitError)?;

    let video = sdl.video().map_err(Sdl2SurfaceError::VideoInitError)?;

    let gl_attr = video.gl_attr();
    let version = win_opt.gl_version();

    gl_attr.set_context_profile(GLProfile::Core);
    gl_attr.set_context_flags().forward_compatible().set();
    gl_attr.set_context_version(version.major, version.minor);
    gl_attr.set_stencil_size(win_opt.stencil_bits());

    let mut builder = match *win_opt.dim() {
      WindowDim::Windowed { width, height } => video.window(title, width, height),

      WindowDim::Fullscreen => {
        let mode = video
          .desktop_display_mode(0)
          .map_err(Sdl2SurfaceError::VideoInitError)?;
        let mut builder = video.window(title, mode.w as u32, mode.h as u32);
        builder.fullscreen_desktop();
        builder
      }

      WindowDim::FullscreenRestricted { width, height } => {
        let mut builder = video.window(title, width, height);
        builder.fullscreen();
        builder
      }
    };

    match win_opt.position() {
      Some((x, y)) => builder.position(x, y),
      None => builder.position_centered(),
    };

    let window = builder
      .opengl()
      .resizable()
      .build()
      .map_err(Sdl2SurfaceError::WindowCreationFailed)?;

    let gl_context = window
      .gl_create_context()
      .map_err(Sdl2SurfaceError::GlContextInitFailed)?;

    gl::load_with(|s| video.gl_get_proc_address(s) as *const c_void);

    let swap_interval = if win_opt.vsync() {
      SwapInterval::VSync
    } else {
      SwapInterval::Immediate
    };

    if let Err(e) = video.gl_set_swap_interval(swap_interval) {
      log::warn!("cannot set swap interval: {}", e);
    }

    let gl = GL32::new().map_err(Sdl2SurfaceError::GraphicsStateError)?;

    let info = gl.info();
    log::info!(
      "OpenGL {} (GLSL {}) on {} by {}",
      info.version,
      info.shading_lang_version,
      info.renderer,
      info.vendor
    );

    let event_pump = sdl.event_pump().map_err(Sdl2SurfaceError::EventPumpError)?;

    Ok(GL32Surface {
      gl,
      _gl_context: gl_context,
      window,
      event_pump,
      _video: video,
      _sdl: sdl,
      opts: win_opt,
    })
  }

  fn opts(&self) -> &WindowOpt {
    &self.opts
  }

  fn backend(&mut self) -> &mut GL32 {
    &mut self.gl
  }

  fn size(&self) -> [u32; 2] {
    let (w, h) = self.window.drawable_size();
    [w, h]
  }

  fn poll_actions(&mut self) -> Vec<InputAction> {
    let window = &self.window;

    self
      .event_pump
      .poll_iter()
      .filter_map(|event| {
        adapt_event(event).map(|action| match action {
          // window events carry the window size, not the drawable one
          InputAction::Resized { .. } => {
            let (width, height) = window.drawable_size();
            InputAction::Resized { width, height }
          }

          action => action,
        })
      })
      .collect()
  }

  fn swap_buffers(&mut self) {
    self.window.gl_swap_window();
  }
}

/// Map an SDL event to an action, if the render loop cares about it.
pub fn adapt_event(event: Event) -> Option<InputAction> {
  match event {
    Event::Quit { .. }
    | Event::KeyUp {
      keycode: Some(Keycode::Escape),
      ..
    } => Some(InputAction::Quit),

    Event::Window {
      win_event: WindowEvent::SizeChanged(width, height),
      ..
    } => Some(InputAction::Resized {
      width: width.max(0) as u32,
      height: height.max(0) as u32,
    }),

    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use sdl2::keyboard::Mod;

  fn key_up(keycode: Keycode) -> Event {
    Event::KeyUp {
      timestamp: 0,
      window_id: 0,
      keycode: Some(keycode),
      scancode: None,
      keymod: Mod::NOMOD,
      repeat: false,
    }
  }

  fn window_event(win_event: WindowEvent) -> Event {
    Event::Window {
      timestamp: 0,
      window_id: 0,
      win_event,
    }
  }

  #[test]
  fn escape_release_quits() {
    assert!(matches!(
      adapt_event(key_up(Keycode::Escape)),
      Some(InputAction::Quit)
    ));
  }

  #[test]
  fn escape_press_is_ignored() {
    let event = Event::KeyDown {
      timestamp: 0,
      window_id: 0,
      keycode: Some(Keycode::Escape),
      scancode: None,
      keymod: Mod::NOMOD,
      repeat: false,
    };

    assert!(adapt_event(event).is_none());
  }

  #[test]
  fn other_key_release_is_ignored() {
    assert!(adapt_event(key_up(Keycode::Space)).is_none());
  }

  #[test]
  fn quit_event_quits() {
    assert!(matches!(
      adapt_event(Event::Quit { timestamp: 0 }),
      Some(InputAction::Quit)
    ));
  }

  #[test]
  fn negative_size_is_clamped() {
    assert!(matches!(
      adapt_event(window_event(WindowEvent::SizeChanged(-1, 600))),
      Some(InputAction::Resized {
        width: 0,
        height: 600
      })
    ));
  }

  #[test]
  fn unrelated_window_event_is_ignored() {
    assert!(adapt_event(window_event(WindowEvent::Shown)).is_none());
  }
}

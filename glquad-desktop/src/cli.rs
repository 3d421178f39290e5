//! Command-line options.

use glquad_windowing::{WindowDim, WindowOpt};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "glquad", about = "Render a colored quad with OpenGL")]
pub struct CLIOpts {
  #[structopt(long, default_value = "shaders/quad.vert")]
  /// Vertex shader source file.
  pub vertex: PathBuf,

  #[structopt(long, default_value = "shaders/quad.frag")]
  /// Fragment shader source file.
  pub fragment: PathBuf,

  #[structopt(long, default_value = "outColor")]
  /// Name of the fragment shader output bound to the color buffer.
  pub frag_output: String,

  #[structopt(short, long, default_value = "OpenGL")]
  /// Window title.
  pub title: String,

  #[structopt(long, default_value = "800")]
  /// Window width.
  pub width: u32,

  #[structopt(long, default_value = "600")]
  /// Window height.
  pub height: u32,

  #[structopt(short, long)]
  /// Open in fullscreen, at the desktop resolution.
  pub fullscreen: bool,

  #[structopt(long)]
  /// Disable vertical synchronization.
  pub no_vsync: bool,
}

impl CLIOpts {
  /// Window options matching the command line.
  pub fn window_opt(&self) -> WindowOpt {
    let dim = if self.fullscreen {
      WindowDim::Fullscreen
    } else {
      WindowDim::Windowed {
        width: self.width,
        height: self.height,
      }
    };

    WindowOpt::default()
      .set_dim(dim)
      .set_vsync(!self.no_vsync)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::Path;

  #[test]
  fn defaults() {
    let opts = CLIOpts::from_iter_safe(&["glquad"]).unwrap();

    assert_eq!(opts.vertex, Path::new("shaders/quad.vert"));
    assert_eq!(opts.fragment, Path::new("shaders/quad.frag"));
    assert_eq!(opts.frag_output, "outColor");
    assert_eq!(opts.title, "OpenGL");
    assert_eq!(
      *opts.window_opt().dim(),
      WindowDim::Windowed {
        width: 800,
        height: 600
      }
    );
    assert!(opts.window_opt().vsync());
  }

  #[test]
  fn overrides() {
    let opts = CLIOpts::from_iter_safe(&[
      "glquad",
      "--vertex",
      "a.vert",
      "--fragment",
      "b.frag",
      "--width",
      "1280",
      "--height",
      "720",
      "--no-vsync",
    ])
    .unwrap();

    assert_eq!(opts.vertex, Path::new("a.vert"));
    assert_eq!(opts.fragment, Path::new("b.frag"));
    assert_eq!(
      *opts.window_opt().dim(),
      WindowDim::Windowed {
        width: 1280,
        height: 720
      }
    );
    assert!(!opts.window_opt().vsync());
  }

  #[test]
  fn fullscreen_ignores_size() {
    let opts = CLIOpts::from_iter_safe(&["glquad", "--fullscreen", "--width", "10"]).unwrap();
    assert_eq!(*opts.window_opt().dim(), WindowDim::Fullscreen);
  }

  #[test]
  fn invalid_width_is_rejected() {
    assert!(CLIOpts::from_iter_safe(&["glquad", "--width", "wide"]).is_err());
  }
}

//! Bootstrap and render loop.

use crate::cli::CLIOpts;
use glquad::gl32::{
  GlError, Program, ProgramError, Stage, StageError, StageType, Tess, TessBuilder, TessError,
};
use glquad::quad::{quad_layout, QUAD_INDICES, QUAD_VERTICES};
use glquad::vertex::VertexLayoutError;
use glquad_sdl2::{GL32Surface, Sdl2SurfaceError};
use glquad_windowing::{LoopFeedback, Surface};
use std::{error, fmt};

const CLEAR_COLOR: [f32; 4] = [0., 0., 0., 1.];

/// Anything that can stop the program.
#[derive(Debug)]
pub enum AppError {
  Surface(Sdl2SurfaceError),
  Stage(StageError),
  Program(ProgramError),
  Layout(VertexLayoutError),
  Tess(TessError),
  Gl(GlError),
}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      AppError::Surface(ref e) => write!(f, "cannot create surface: {}", e),
      AppError::Stage(ref e) => write!(f, "cannot build shader stage: {}", e),
      AppError::Program(ref e) => write!(f, "cannot build shader program: {}", e),
      AppError::Layout(ref e) => write!(f, "invalid vertex layout: {}", e),
      AppError::Tess(ref e) => write!(f, "cannot upload geometry: {}", e),
      AppError::Gl(ref e) => write!(f, "rendering failed: {}", e),
    }
  }
}

impl error::Error for AppError {}

macro_rules! impl_from_error {
  ($($variant:ident($ty:ty)),* $(,)?) => {
    $(
      impl From<$ty> for AppError {
        fn from(source: $ty) -> Self {
          AppError::$variant(source)
        }
      }
    )*
  }
}

impl_from_error!(
  Surface(Sdl2SurfaceError),
  Stage(StageError),
  Program(ProgramError),
  Layout(VertexLayoutError),
  Tess(TessError),
  Gl(GlError),
);

/// GPU resources of the scene.
///
/// Must be dropped before the surface, while the context is still alive.
struct Scene {
  program: Program,
  quad: Tess,
}

impl Scene {
  fn new(surface: &mut GL32Surface, cli_opts: &CLIOpts) -> Result<Self, AppError> {
    let gl = surface.backend();

    let program = {
      let vertex = Stage::from_file(StageType::VertexShader, &cli_opts.vertex)?;
      let fragment = Stage::from_file(StageType::FragmentShader, &cli_opts.fragment)?;
      Program::new(gl, &[&vertex, &fragment], &cli_opts.frag_output)?
    };
    program.use_program()?;

    let (quad, _) = TessBuilder::new()
      .set_vertices(&QUAD_VERTICES, quad_layout()?)
      .set_indices(&QUAD_INDICES)
      .build(gl, &program)?;

    Ok(Scene { program, quad })
  }

  fn render(&self, surface: &mut GL32Surface) -> Result<(), GlError> {
    surface.backend().clear(CLEAR_COLOR)?;
    self.program.use_program()?;
    self.quad.render()
  }
}

pub fn run(cli_opts: CLIOpts) -> Result<(), AppError> {
  let mut surface = GL32Surface::new(&cli_opts.title, cli_opts.window_opt())?;

  let [width, height] = surface.size();
  surface.backend().set_viewport(width, height);
  log::info!("window opened ({}×{})", width, height);

  // the scene lives in its own scope so that it goes away before the surface
  {
    let scene = Scene::new(&mut surface, &cli_opts)?;

    'app: loop {
      let actions = surface.poll_actions();
      let backend = surface.backend();
      let feedback = LoopFeedback::from_actions(actions, |width, height| {
        log::debug!("resized to {}×{}", width, height);
        backend.set_viewport(width, height);
      });

      if feedback == LoopFeedback::Exit {
        break 'app;
      }

      scene.render(&mut surface)?;
      surface.swap_buffers();
    }
  }

  log::info!("bye");

  Ok(())
}

//! Minimal OpenGL bootstrap.
//!
//! This crate exports an [OpenGL](https://www.khronos.org/opengl/) 3.2 core backend, [`GL32`],
//! small enough to fit a single program: compile a vertex / fragment shader pair, upload
//! interleaved vertices and indices, bind the vertex attributes by asking the program where they
//! live and draw.
//!
//! Vertex layouts are computed by [`vertex::VertexLayout`] from an ordered list of `(name, size)`
//! pairs, and [`quad`] holds the built-in colored quad.
//!
//! Creating the OpenGL context itself is not done here; see the windowing crates.

pub mod gl32;
pub mod quad;
pub mod vertex;

pub use gl32::GL32;

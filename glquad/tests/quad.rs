use glquad::gl32::{gl_error_name, GlError, Mode, TessIndex, TessIndexType};
use glquad::quad::{quad_layout, QUAD_INDICES, QUAD_STRIDE, QUAD_VERTICES};

#[test]
fn quad_layout_matches_vertices() {
  let layout = quad_layout().unwrap();

  assert_eq!(layout.stride(), QUAD_STRIDE);
  assert_eq!(layout.vertex_count(QUAD_VERTICES.len()), Ok(4));
}

#[test]
fn quad_indices_reference_existing_vertices() {
  let vertex_count = QUAD_VERTICES.len() / QUAD_STRIDE;

  assert_eq!(QUAD_INDICES.len(), 6);
  assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < vertex_count));
}

#[test]
fn quad_corners() {
  let corners: Vec<_> = QUAD_VERTICES
    .chunks(QUAD_STRIDE)
    .map(|v| (v[0], v[1]))
    .collect();

  assert_eq!(
    corners,
    vec![(-0.5, 0.5), (0.5, 0.5), (0.5, -0.5), (-0.5, -0.5)]
  );
}

#[test]
fn quad_colors() {
  let colors: Vec<_> = QUAD_VERTICES
    .chunks(QUAD_STRIDE)
    .map(|v| [v[2], v[3], v[4]])
    .collect();

  assert_eq!(colors[0], [1., 0., 0.]);
  assert_eq!(colors[1], [0., 1., 0.]);
  assert_eq!(colors[2], [0., 0., 1.]);
  assert_eq!(colors[3], [1., 1., 1.]);
}

#[test]
fn index_types() {
  assert_eq!(u8::INDEX_TYPE, TessIndexType::U8);
  assert_eq!(u16::INDEX_TYPE, TessIndexType::U16);
  assert_eq!(u32::INDEX_TYPE, TessIndexType::U32);

  assert_eq!(TessIndexType::U8.bytes(), 1);
  assert_eq!(TessIndexType::U16.bytes(), 2);
  assert_eq!(TessIndexType::U32.bytes(), 4);

  assert_eq!(300u16.to_usize(), 300);
}

#[test]
fn default_mode_is_triangle() {
  assert_eq!(Mode::default(), Mode::Triangle);
}

#[test]
fn gl_error_names() {
  assert_eq!(gl_error_name(0), Some("GL_NO_ERROR"));
  assert_eq!(gl_error_name(0x0500), Some("GL_INVALID_ENUM"));
  assert_eq!(gl_error_name(0x0501), Some("GL_INVALID_VALUE"));
  assert_eq!(gl_error_name(0x0502), Some("GL_INVALID_OPERATION"));
  assert_eq!(gl_error_name(0x0505), Some("GL_OUT_OF_MEMORY"));
  assert_eq!(
    gl_error_name(0x0506),
    Some("GL_INVALID_FRAMEBUFFER_OPERATION")
  );
  assert_eq!(gl_error_name(0x1234), None);
}

#[test]
fn gl_error_display() {
  let err = GlError::new("vbo", 0x0501);

  assert_eq!(err.tag(), "vbo");
  assert_eq!(err.code(), 0x0501);
  assert_eq!(err.to_string(), "vbo: GL_INVALID_VALUE (1281)");
  assert_eq!(
    GlError::new("draw", 0x9999).to_string(),
    "draw: unknown (39321)"
  );
}

use glquad_windowing::{GlVersion, InputAction, LoopFeedback, WindowDim, WindowOpt};

#[test]
fn default_options() {
  let opt = WindowOpt::default();

  assert_eq!(
    *opt.dim(),
    WindowDim::Windowed {
      width: 800,
      height: 600
    }
  );
  assert_eq!(opt.position(), Some((100, 100)));
  assert_eq!(opt.gl_version(), GlVersion { major: 3, minor: 2 });
  assert_eq!(opt.stencil_bits(), 8);
  assert!(opt.vsync());
}

#[test]
fn builder_overrides() {
  let opt = WindowOpt::default()
    .set_dim(WindowDim::Fullscreen)
    .set_position(None)
    .set_gl_version(GlVersion { major: 3, minor: 3 })
    .set_stencil_bits(0)
    .set_vsync(false);

  assert_eq!(*opt.dim(), WindowDim::Fullscreen);
  assert_eq!(opt.position(), None);
  assert_eq!(opt.gl_version(), GlVersion { major: 3, minor: 3 });
  assert_eq!(opt.stencil_bits(), 0);
  assert!(!opt.vsync());
}

#[test]
fn gl_versions_are_ordered() {
  assert!(GlVersion { major: 3, minor: 2 } < GlVersion { major: 3, minor: 3 });
  assert!(GlVersion { major: 3, minor: 3 } < GlVersion { major: 4, minor: 0 });
}

#[test]
fn no_action_continues() {
  let feedback = LoopFeedback::from_actions(Vec::new(), |_, _| panic!("no resize expected"));
  assert_eq!(feedback, LoopFeedback::Continue);
}

#[test]
fn quit_exits() {
  let feedback = LoopFeedback::from_actions(vec![InputAction::Quit], |_, _| {});
  assert_eq!(feedback, LoopFeedback::Exit);
}

#[test]
fn resizes_are_forwarded_in_order() {
  let mut sizes = Vec::new();
  let feedback = LoopFeedback::from_actions(
    vec![
      InputAction::Resized {
        width: 640,
        height: 480,
      },
      InputAction::Resized {
        width: 1024,
        height: 768,
      },
    ],
    |w, h| sizes.push((w, h)),
  );

  assert_eq!(feedback, LoopFeedback::Continue);
  assert_eq!(sizes, vec![(640, 480), (1024, 768)]);
}

#[test]
fn actions_after_quit_are_ignored() {
  let mut resized = false;
  let feedback = LoopFeedback::from_actions(
    vec![
      InputAction::Quit,
      InputAction::Resized {
        width: 1,
        height: 1,
      },
    ],
    |_, _| resized = true,
  );

  assert_eq!(feedback, LoopFeedback::Exit);
  assert!(!resized);
}

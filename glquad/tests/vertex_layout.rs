use glquad::vertex::{VertexAttrib, VertexLayout, VertexLayoutError, COMPONENT_SIZE};

#[test]
fn position_color_layout() {
  let layout = VertexLayout::from_pairs(&[("position", 2), ("color", 3)]).unwrap();

  assert_eq!(layout.stride(), 5);
  assert_eq!(layout.stride_bytes(), 5 * COMPONENT_SIZE);

  let attribs = layout.attribs();
  assert_eq!(attribs.len(), 2);

  assert_eq!(attribs[0].name, "position");
  assert_eq!(attribs[0].size, 2);
  assert_eq!(attribs[0].offset, 0);
  assert_eq!(attribs[0].offset_bytes(), 0);

  assert_eq!(attribs[1].name, "color");
  assert_eq!(attribs[1].size, 3);
  assert_eq!(attribs[1].offset, 2);
  assert_eq!(attribs[1].offset_bytes(), 8);
  assert_eq!(attribs[1].size_bytes(), 12);
}

#[test]
fn offsets_are_prefix_sums() {
  let sizes = [3, 1, 4, 2, 4, 1];
  let pairs: Vec<_> = ["a", "b", "c", "d", "e", "f"]
    .iter()
    .copied()
    .zip(sizes.iter().copied())
    .collect();
  let layout = VertexLayout::from_pairs(&pairs).unwrap();

  let mut expected_offset = 0;
  for (desc, size) in layout.attribs().iter().zip(sizes.iter()) {
    assert_eq!(desc.offset, expected_offset);
    assert!(desc.offset < layout.stride());
    expected_offset += size;
  }

  assert_eq!(layout.stride(), sizes.iter().sum::<usize>());
}

#[test]
fn single_attribute() {
  let layout = VertexLayout::new(vec![VertexAttrib::new("weight", 1)]).unwrap();

  assert_eq!(layout.stride(), 1);
  assert_eq!(layout.attribs()[0].offset, 0);
}

#[test]
fn declaration_order_is_kept() {
  let layout = VertexLayout::from_pairs(&[("color", 3), ("position", 2)]).unwrap();

  assert_eq!(layout.attrib("color").unwrap().offset, 0);
  assert_eq!(layout.attrib("position").unwrap().offset, 3);
  assert!(layout.attrib("normal").is_none());
}

#[test]
fn empty_layout_is_rejected() {
  assert_eq!(
    VertexLayout::from_pairs(&[]),
    Err(VertexLayoutError::NoAttributes)
  );
}

#[test]
fn zero_sized_attribute_is_rejected() {
  assert_eq!(
    VertexLayout::from_pairs(&[("position", 2), ("color", 0)]),
    Err(VertexLayoutError::InvalidSize {
      name: "color".to_owned(),
      size: 0
    })
  );
}

#[test]
fn oversized_attribute_is_rejected() {
  assert_eq!(
    VertexLayout::from_pairs(&[("matrix", 16)]),
    Err(VertexLayoutError::InvalidSize {
      name: "matrix".to_owned(),
      size: 16
    })
  );
}

#[test]
fn unnamed_attribute_is_rejected() {
  assert_eq!(
    VertexLayout::from_pairs(&[("position", 2), ("", 3)]),
    Err(VertexLayoutError::EmptyName { rank: 1 })
  );
}

#[test]
fn duplicate_attribute_is_rejected() {
  assert_eq!(
    VertexLayout::from_pairs(&[("position", 2), ("position", 3)]),
    Err(VertexLayoutError::DuplicateName("position".to_owned()))
  );
}

#[test]
fn vertex_count() {
  let layout = VertexLayout::from_pairs(&[("position", 2), ("color", 3)]).unwrap();

  assert_eq!(layout.vertex_count(0), Ok(0));
  assert_eq!(layout.vertex_count(20), Ok(4));
  assert_eq!(
    layout.vertex_count(21),
    Err(VertexLayoutError::MisalignedData {
      len: 21,
      stride: 5
    })
  );
}

#[test]
fn errors_display() {
  let err = VertexLayoutError::InvalidSize {
    name: "color".to_owned(),
    size: 7,
  };

  assert_eq!(
    err.to_string(),
    "vertex attribute color has 7 components (expected 1 to 4)"
  );
  assert_eq!(
    VertexLayoutError::NoAttributes.to_string(),
    "no vertex attribute declared"
  );
}

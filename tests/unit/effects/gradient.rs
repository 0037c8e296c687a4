use super::*;

#[test]
fn too_few_stops_are_rejected() {
    let none: [Color; 0] = [];
    assert_eq!(
        GradientStops::new(&none, None),
        Err(DlfxError::TooFewStops { count: 0 })
    );
    assert_eq!(
        GradientStops::new(&[Color::RED], Some(&[0.0])),
        Err(DlfxError::TooFewStops { count: 1 })
    );
}

#[test]
fn mismatched_lengths_are_rejected() {
    let err = GradientStops::new(&[Color::RED, Color::BLUE], Some(&[0.0])).unwrap_err();
    assert_eq!(
        err,
        DlfxError::StopCountMismatch {
            colors: 2,
            offsets: 1
        }
    );
}

#[test]
fn bad_offsets_are_rejected() {
    let colors = [Color::RED, Color::GREEN, Color::BLUE];
    for offsets in [
        [0.0f32, 0.7, 0.5],
        [-0.1, 0.5, 1.0],
        [0.0, 0.5, 1.5],
        [0.0, f32::NAN, 1.0],
    ] {
        let err = GradientStops::new(&colors, Some(&offsets)).unwrap_err();
        assert!(matches!(err, DlfxError::Validation(_)), "{offsets:?}");
    }
}

#[test]
fn equal_offsets_are_allowed() {
    let stops = GradientStops::new(&[Color::RED, Color::BLUE, Color::GREEN], Some(&[0.0, 0.5, 0.5]))
        .unwrap();
    assert_eq!(stops.offsets(), &[0.0, 0.5, 0.5]);
}

#[test]
fn missing_offsets_are_spread_evenly() {
    let stops = GradientStops::new(&[Color::RED, Color::GREEN, Color::BLUE], None).unwrap();
    assert_eq!(stops.offsets(), &[0.0, 0.5, 1.0]);
}

#[test]
fn packed_and_float_colors_are_converted() {
    let packed = GradientStops::new(&[0xFFFF_0000u32, 0x800000FF], None).unwrap();
    let floats = GradientStops::new(&[[1.0f32, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 128.0 / 255.0]], None)
        .unwrap();
    assert_eq!(packed, floats);
    assert_eq!(packed.colors()[0], Color::RED);
    assert_eq!(packed.len(), 2);
    assert!(!packed.is_empty());
}

#[test]
fn from_pairs_matches_parallel_arrays() {
    let a = GradientStops::from_pairs(&[(Color::RED, 0.0), (Color::BLUE, 1.0)]).unwrap();
    let b = GradientStops::new(&[Color::RED, Color::BLUE], Some(&[0.0, 1.0])).unwrap();
    assert_eq!(a, b);
}

#[test]
fn payload_size_counts_both_arrays() {
    for n in [2usize, 3, 100] {
        let colors = vec![Color::WHITE; n];
        let stops = GradientStops::new(&colors, None).unwrap();
        assert_eq!(stops.payload_size(), n * (std::mem::size_of::<Color>() + 4));
    }
}

#[test]
fn identity_matrix_is_not_stored() {
    let stops = GradientStops::new(&[Color::RED, Color::BLUE], None).unwrap();
    let base = GradientBase::new(stops.clone(), TileMode::Clamp, Some(&Affine::IDENTITY));
    assert!(base.explicit_matrix().is_none());
    assert_eq!(base.matrix(), Affine::IDENTITY);

    let scale = Affine::scale(2.0);
    let base = GradientBase::new(stops, TileMode::Clamp, Some(&scale));
    assert_eq!(base.explicit_matrix(), Some(&scale));
}

#[test]
fn decal_gradients_are_not_opaque() {
    let stops = GradientStops::new(&[Color::RED, Color::BLUE], None).unwrap();
    assert!(GradientBase::new(stops.clone(), TileMode::Mirror, None).is_opaque());
    assert!(!GradientBase::new(stops, TileMode::Decal, None).is_opaque());
}

#[test]
fn copied_stops_do_not_alias() {
    let stops = GradientStops::new(&[Color::RED, Color::BLUE], None).unwrap();
    let base = GradientBase::new(stops, TileMode::Repeat, None);
    let copy = base.copy_stops();
    assert_eq!(copy.colors(), base.colors());
    assert_ne!(copy.colors().as_ptr(), base.colors().as_ptr());
    assert_ne!(copy.offsets().as_ptr(), base.stops().as_ptr());
}

#[test]
fn nan_stop_colors_equal_their_copy() {
    let colors = [Color::new(f32::NAN, 0.0, 0.0, 1.0), Color::BLUE];
    let stops = GradientStops::new(&colors, None).unwrap();
    assert_eq!(stops, stops.clone());
    assert_eq!(stops, GradientStops::copy_of(stops.colors(), stops.offsets()));
}

#[test]
fn signed_zero_offsets_are_equal() {
    let a = GradientStops::new(&[Color::RED, Color::BLUE], Some(&[-0.0, 1.0])).unwrap();
    let b = GradientStops::new(&[Color::RED, Color::BLUE], Some(&[0.0, 1.0])).unwrap();
    assert_eq!(a, b);
}

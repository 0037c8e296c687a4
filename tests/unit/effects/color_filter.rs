use super::*;

fn partial() -> Color {
    Color::from_rgba8(0, 255, 0, 128)
}

fn expect_none(color: Color, mode: BlendMode) -> bool {
    match mode {
        BlendMode::Dst => true,
        BlendMode::SrcOver
        | BlendMode::DstOver
        | BlendMode::DstOut
        | BlendMode::SrcATop
        | BlendMode::Xor
        | BlendMode::Darken => color.is_transparent(),
        BlendMode::DstIn => color.is_opaque(),
        _ => false,
    }
}

#[test]
fn make_blend_canonicalization_is_complete() {
    let colors = [Color::TRANSPARENT, Color::RED, partial()];
    for mode in BlendMode::ALL {
        for color in colors {
            let filter = ColorFilter::make_blend(color, mode);
            if expect_none(color, mode) {
                assert!(filter.is_none(), "{mode:?} {color:?} should collapse");
                continue;
            }
            let filter = filter.unwrap_or_else(|| panic!("{mode:?} {color:?} should build"));
            let blend = filter.as_blend().unwrap();
            assert_eq!(blend.color(), color);
            if mode == BlendMode::SrcOver && color.is_opaque() {
                assert_eq!(blend.mode(), BlendMode::Src);
            } else {
                assert_eq!(blend.mode(), mode);
            }
        }
    }
}

#[test]
fn blend_scenarios() {
    assert!(ColorFilter::make_blend(Color::from_rgba8(0, 0, 0, 0), BlendMode::SrcOver).is_none());

    let red = ColorFilter::make_blend(Color::from_rgba8(255, 0, 0, 255), BlendMode::SrcOver)
        .unwrap();
    assert_eq!(red.as_blend().unwrap().mode(), BlendMode::Src);

    let green = ColorFilter::make_blend(partial(), BlendMode::Multiply).unwrap();
    let blend = green.as_blend().unwrap();
    assert_eq!(blend.mode(), BlendMode::Multiply);
    assert_eq!(blend.color(), partial());
}

#[test]
fn predicates_are_total_over_modes() {
    for mode in BlendMode::ALL {
        for color in [Color::RED, partial()] {
            if let Some(f) = ColorFilter::make_blend(color, mode) {
                let _ = f.modifies_transparent_black();
                let _ = f.can_commute_with_opacity();
            }
        }
    }
}

#[test]
fn modifies_transparent_black_table() {
    let modifying = [
        BlendMode::Src,
        BlendMode::SrcOver,
        BlendMode::DstOver,
        BlendMode::SrcOut,
        BlendMode::DstATop,
        BlendMode::Xor,
        BlendMode::Plus,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Multiply,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ];
    for mode in BlendMode::ALL {
        let Some(f) = ColorFilter::make_blend(partial(), mode) else {
            assert_eq!(mode, BlendMode::Dst);
            continue;
        };
        assert_eq!(
            f.modifies_transparent_black(),
            modifying.contains(&mode),
            "{mode:?}"
        );
    }
}

#[test]
fn transparent_color_never_modifies_transparent_black() {
    for mode in BlendMode::ALL {
        if let Some(f) = ColorFilter::make_blend(Color::TRANSPARENT, mode) {
            assert!(!f.modifies_transparent_black(), "{mode:?}");
        }
    }
}

#[test]
fn can_commute_with_opacity_table() {
    for mode in BlendMode::ALL {
        let Some(f) = ColorFilter::make_blend(partial(), mode) else {
            continue;
        };
        let expected = matches!(mode, BlendMode::DstIn | BlendMode::DstOut);
        assert_eq!(f.can_commute_with_opacity(), expected, "{mode:?}");
    }
}

const IDENTITY: [f32; 20] = [
    1.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0, //
];

#[test]
fn matrix_is_copied_and_never_collapses() {
    let mut m = IDENTITY;
    let f = ColorFilter::make_matrix(&m);
    m[0] = 5.0;
    assert_eq!(f.as_matrix().unwrap().matrix(), IDENTITY);
    assert_eq!(f.kind(), ColorFilterKind::Matrix);
}

#[test]
fn matrix_predicates() {
    let identity = ColorFilter::make_matrix(&IDENTITY);
    assert!(!identity.modifies_transparent_black());
    assert!(identity.can_commute_with_opacity());

    let mut offset_alpha = IDENTITY;
    offset_alpha[19] = 0.5;
    let f = ColorFilter::make_matrix(&offset_alpha);
    assert!(f.modifies_transparent_black());
    assert!(!f.can_commute_with_opacity());

    let mut negative_alpha = IDENTITY;
    negative_alpha[19] = -0.5;
    assert!(!ColorFilter::make_matrix(&negative_alpha).modifies_transparent_black());

    let mut nan_alpha = IDENTITY;
    nan_alpha[19] = f32::NAN;
    assert!(!ColorFilter::make_matrix(&nan_alpha).modifies_transparent_black());

    let mut mixes_red_into_alpha = IDENTITY;
    mixes_red_into_alpha[15] = 0.3;
    assert!(!ColorFilter::make_matrix(&mixes_red_into_alpha).can_commute_with_opacity());

    let mut reads_alpha_into_red = IDENTITY;
    reads_alpha_into_red[3] = 1.0;
    assert!(!ColorFilter::make_matrix(&reads_alpha_into_red).can_commute_with_opacity());

    let mut scaled_red = IDENTITY;
    scaled_red[0] = 0.5;
    scaled_red[4] = 0.2;
    assert!(ColorFilter::make_matrix(&scaled_red).can_commute_with_opacity());
}

#[test]
fn matrix_apply_clamps() {
    let mut m = IDENTITY;
    m[4] = 2.0;
    m[19] = 0.25;
    let f = ColorFilter::make_matrix(&m);
    let out = f.as_matrix().unwrap().apply(Color::TRANSPARENT);
    assert_eq!(out, Color::new(1.0, 0.0, 0.0, 0.25));
}

#[test]
fn gamma_filters_are_singletons() {
    let a = ColorFilter::make_srgb_to_linear_gamma();
    let b = ColorFilter::make_srgb_to_linear_gamma();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(Arc::ptr_eq(&a.shared(), &a));
    assert!(a.as_srgb_to_linear_gamma().is_some());
    assert!(!a.modifies_transparent_black());
    assert!(a.can_commute_with_opacity());

    let c = ColorFilter::make_linear_to_srgb_gamma();
    assert!(Arc::ptr_eq(&c, &ColorFilter::make_linear_to_srgb_gamma()));
    assert!(c.as_linear_to_srgb_gamma().is_some());
    assert_ne!(*a, *c);
}

#[test]
fn equality_is_kind_checked() {
    let filters = [
        ColorFilter::make_blend(partial(), BlendMode::Multiply).unwrap(),
        ColorFilter::make_blend(partial(), BlendMode::Screen).unwrap(),
        ColorFilter::make_matrix(&IDENTITY),
        ColorFilter::make_srgb_to_linear_gamma(),
        ColorFilter::make_linear_to_srgb_gamma(),
    ];
    for (i, a) in filters.iter().enumerate() {
        for (j, b) in filters.iter().enumerate() {
            assert_eq!(a == b, i == j, "{i} vs {j}");
            assert_eq!(a == b, b == a);
        }
    }
}

#[test]
fn matrix_equality_keys_nan_and_zero() {
    let mut m = IDENTITY;
    m[19] = f32::NAN;
    let a = ColorFilter::make_matrix(&m);
    let b = ColorFilter::make_matrix(&m);
    assert_eq!(*a, *b);
    assert_eq!(*a, *a.shared());

    let mut z = IDENTITY;
    z[4] = -0.0;
    let neg = ColorFilter::make_matrix(&z);
    let pos = ColorFilter::make_matrix(&IDENTITY);
    assert_eq!(*neg, *pos);
    assert_eq!(neg.fingerprint(), pos.fingerprint());
}

#[test]
fn nan_alpha_blend_counts_as_transparent() {
    let nan_alpha = Color::new(1.0, 0.0, 0.0, f32::NAN);
    assert!(ColorFilter::make_blend(nan_alpha, BlendMode::SrcOver).is_none());

    let f = ColorFilter::make_blend(nan_alpha, BlendMode::Multiply).unwrap();
    assert!(!f.modifies_transparent_black());
    assert_eq!(*f, *f.shared());
    assert_eq!(f.fingerprint(), f.shared().fingerprint());
}

#[test]
fn nan_channel_blend_equals_its_copy() {
    let color = Color::new(f32::NAN, 0.0, 0.0, 0.5);
    let f = ColorFilter::make_blend(color, BlendMode::Screen).unwrap();
    assert!(f.modifies_transparent_black());
    assert_eq!(*f, *f.shared());
    assert!(filters_equal(Some(&f), Some(&f.shared())));
}

#[test]
fn matrix_transparent_black_agrees_with_apply() {
    for (alpha_offset, expected) in [
        (0.5, true),
        (-0.5, false),
        (f32::INFINITY, false),
        (f32::NEG_INFINITY, false),
        (f32::NAN, false),
    ] {
        let mut m = IDENTITY;
        m[19] = alpha_offset;
        let f = ColorFilter::make_matrix(&m);
        let out = f.as_matrix().unwrap().apply(Color::TRANSPARENT);
        assert_eq!(f.modifies_transparent_black(), expected, "{alpha_offset}");
        assert_eq!(out.a > 0.0, expected, "{alpha_offset}");
    }
}

#[test]
fn shared_makes_equal_distinct_copies() {
    let blend = ColorFilter::make_blend(partial(), BlendMode::Plus).unwrap();
    let copy = blend.shared();
    assert!(!Arc::ptr_eq(&blend, &copy));
    assert_eq!(*blend, *copy);

    let matrix = ColorFilter::make_matrix(&IDENTITY);
    let copy = matrix.shared();
    assert!(!Arc::ptr_eq(&matrix, &copy));
    assert_eq!(*matrix, *copy);
}

#[test]
fn fingerprints_follow_equality() {
    let a = ColorFilter::make_blend(partial(), BlendMode::Multiply).unwrap();
    assert_eq!(a.fingerprint(), a.shared().fingerprint());
    let b = ColorFilter::make_blend(partial(), BlendMode::Screen).unwrap();
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_ne!(
        ColorFilter::make_srgb_to_linear_gamma().fingerprint(),
        ColorFilter::make_linear_to_srgb_gamma().fingerprint()
    );
}

#[test]
fn optional_filter_equality() {
    let a = ColorFilter::make_matrix(&IDENTITY);
    assert!(filters_equal(None, None));
    assert!(!filters_equal(Some(&a), None));
    assert!(filters_equal(Some(&a), Some(&a.shared())));
}

#[test]
fn sizes_are_concrete() {
    let blend = ColorFilter::make_blend(partial(), BlendMode::Multiply).unwrap();
    assert_eq!(blend.size(), std::mem::size_of::<BlendColorFilter>());
    let matrix = ColorFilter::make_matrix(&IDENTITY);
    assert_eq!(matrix.size(), std::mem::size_of::<MatrixColorFilter>());
    assert!(matrix.size() >= 80);
}

#[test]
fn gamma_filters_report_nonzero_size() {
    for f in [
        ColorFilter::make_srgb_to_linear_gamma(),
        ColorFilter::make_linear_to_srgb_gamma(),
    ] {
        assert!(f.size() > 0);
        assert_eq!(f.size(), std::mem::size_of::<ColorFilter>());
    }
}

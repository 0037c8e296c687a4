use super::*;

#[test]
fn signed_zeroes_hash_alike() {
    let mut a = StableHasher::new();
    a.write_f32(0.0);
    a.write_f64(0.0);
    let mut b = StableHasher::new();
    b.write_f32(-0.0);
    b.write_f64(-0.0);
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn nan_payloads_hash_alike() {
    let mut a = StableHasher::new();
    a.write_f32(f32::NAN);
    a.write_f64(f64::NAN);
    let mut b = StableHasher::new();
    b.write_f32(f32::from_bits(0x7fc0_0001));
    b.write_f64(-f64::NAN);
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn identity_matrix_differs_from_absent() {
    let mut a = StableHasher::new();
    a.write_matrix(None);
    let mut b = StableHasher::new();
    b.write_matrix(Some(&Affine::IDENTITY));
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn digest_is_deterministic() {
    let run = || {
        let mut h = StableHasher::new();
        h.write_point(Point::new(1.0, 2.0));
        h.write_color(Color::RED);
        h.write_len(3);
        h.finish()
    };
    assert_eq!(run(), run());
}

use crate::foundation::core::{Affine, Color, Point, f32_key, f64_key};
use xxhash_rust::xxh3::Xxh3;

const XXH3_SEED: u64 = 0x5d1f_3c2b_9e07_a4c1;

/// Stable 128-bit fingerprint of an effect object.
///
/// Objects that compare equal always produce the same fingerprint. The converse does not
/// hold; callers using fingerprints as cache keys must confirm hits with `==`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectFingerprint {
    /// High 64 bits of the digest.
    pub hi: u64,
    /// Low 64 bits of the digest.
    pub lo: u64,
}

pub(crate) struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    pub(crate) fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    pub(crate) fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_len(&mut self, n: usize) {
        self.write_u64(n as u64);
    }

    /// Hash a float by its equality key: both zeroes and all NaNs hash alike.
    pub(crate) fn write_f32(&mut self, v: f32) {
        self.write_u32(f32_key(v));
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(f64_key(v));
    }

    pub(crate) fn write_point(&mut self, p: Point) {
        self.write_f64(p.x);
        self.write_f64(p.y);
    }

    pub(crate) fn write_color(&mut self, c: Color) {
        self.write_f32(c.r);
        self.write_f32(c.g);
        self.write_f32(c.b);
        self.write_f32(c.a);
    }

    pub(crate) fn write_matrix(&mut self, m: Option<&Affine>) {
        match m {
            Some(m) => {
                self.write_u8(1);
                for c in m.as_coeffs() {
                    self.write_f64(c);
                }
            }
            None => self.write_u8(0),
        }
    }

    pub(crate) fn finish(self) -> EffectFingerprint {
        let v = self.inner.digest128();
        EffectFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/fingerprint.rs"]
mod tests;

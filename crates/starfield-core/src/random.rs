use rand::Rng;

/// Uniform sample in `[lo, hi)`; degenerate or inverted ranges are allowed
/// and never panic (unlike `gen_range` on an empty range).
#[inline]
pub(crate) fn between<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo)
}

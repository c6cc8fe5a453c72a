//! Bounded shrink-to-fit for stacked text.

/// Hard upper bound on shrink iterations.
pub const MAX_SHRINK_ITERATIONS: usize = 2;

/// Shrink `font_size` until `required(font_size)` fits `available(font_size)`.
///
/// Each iteration scales the size by `available / required` when the content
/// overflows and the available extent is positive; otherwise it stops. The
/// size never grows.
pub fn shrink_to_fit<R, A>(font_size: f32, mut required: R, mut available: A) -> f32
where
    R: FnMut(f32) -> f32,
    A: FnMut(f32) -> f32,
{
    let mut size = font_size;
    for _ in 0..MAX_SHRINK_ITERATIONS {
        let need = required(size);
        let have = available(size);
        if !(have > 0.0 && need > have) {
            break;
        }
        let next = size * (have / need);
        if !next.is_finite() || next >= size {
            break;
        }
        size = next;
    }
    size
}

/// Shrink a run of `chars` stacked one per line at `step_ratio × size` into a
/// fixed `available` height.
#[must_use]
pub fn shrink_stack_to_height(
    font_size: f32,
    chars: usize,
    step_ratio: f32,
    available: f32,
) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    let count = chars as f32;
    shrink_to_fit(font_size, |s| s * step_ratio * count, |_| available)
}

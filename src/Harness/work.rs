// Synthetic per-iteration work for the two data workers.

use std::hint::black_box;

/// Checksum-style integer accumulation over `steps` steps.
pub fn integer_work(steps: u32) -> u32 {
    let mut checksum = 0u32;
    for j in 0..black_box(steps) {
        checksum = checksum.wrapping_add(j.wrapping_mul(997));
    }
    black_box(checksum)
}

/// Sum of square roots of `j * 1.7` over `steps` steps.
pub fn float_work(steps: u32) -> f32 {
    let mut result = 0.0f32;
    for j in 0..black_box(steps) {
        result += (j as f32 * 1.7).sqrt();
    }
    black_box(result)
}

use rand::prelude::*;

/// Generates a 0/255 checkerboard with `cell`-sized squares, 0 at the origin.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y * width + x] = if sum % 2 == 0 { 0 } else { 255 };
        }
    }
    img
}

/// Uniform random bytes from a fixed seed.
pub fn random_u8(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..width * height).map(|_| rng.random()).collect()
}

/// Uniform random floats in [0, 1) from a fixed seed.
pub fn random_f32(width: usize, height: usize, seed: u64) -> Vec<f32> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..width * height).map(|_| rng.random()).collect()
}

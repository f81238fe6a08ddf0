use std::fmt;

use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Deterministic 2D coherent noise. Output is roughly in [-1, 1] and
/// changes smoothly with the input.
pub trait NoiseSource {
    fn sample(&self, x: f32, z: f32) -> f32;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        (**self).sample(x, z)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        (**self).sample(x, z)
    }
}

/// Seeded OpenSimplex2 noise. Frequency is fixed at 1.0; callers scale
/// coordinates themselves.
pub struct SimplexNoise {
    seed: i32,
    inner: FastNoiseLite,
}

impl SimplexNoise {
    pub fn new(seed: i32) -> Self {
        let mut inner = FastNoiseLite::with_seed(seed);
        inner.set_noise_type(Some(NoiseType::OpenSimplex2));
        inner.set_frequency(Some(1.0));
        Self { seed, inner }
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }
}

impl fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplexNoise")
            .field("seed", &self.seed)
            .finish()
    }
}

impl NoiseSource for SimplexNoise {
    #[inline]
    fn sample(&self, x: f32, z: f32) -> f32 {
        self.inner.get_noise_2d(x, z)
    }
}

/// Returns the same value everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    #[inline]
    fn sample(&self, _x: f32, _z: f32) -> f32 {
        self.0
    }
}

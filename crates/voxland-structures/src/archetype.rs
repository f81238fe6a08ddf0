use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TreeArchetype {
    Autumn,
    Oak,
    Default,
}

impl TreeArchetype {
    pub const ALL: [TreeArchetype; 3] = [
        TreeArchetype::Autumn,
        TreeArchetype::Oak,
        TreeArchetype::Default,
    ];

    /// Picks an archetype from `r ∈ [0, 1)` using equal half-open buckets.
    ///
    /// Values outside the range are clamped onto the first or last bucket.
    pub fn select(r: f32) -> TreeArchetype {
        let n = Self::ALL.len();
        let slot = if r.is_nan() || r <= 0.0 {
            0
        } else {
            ((r * n as f32) as usize).min(n - 1)
        };
        Self::ALL[slot]
    }

    pub fn name(self) -> &'static str {
        match self {
            TreeArchetype::Autumn => "autumn",
            TreeArchetype::Oak => "oak",
            TreeArchetype::Default => "default",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            TreeArchetype::Autumn => 0,
            TreeArchetype::Oak => 1,
            TreeArchetype::Default => 2,
        }
    }
}

impl fmt::Display for TreeArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Largest `f64` strictly below 1.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// A reproducible stream of values in `[0, 1)`.
pub trait UnitStream {
    fn next_unit(&mut self) -> f64;
}

/// Sine-hash generator: `frac(sin(state) * 10000)`, then `state += 1`.
///
/// Reproducible on any platform with an IEEE `sin`. This is the default
/// layout stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SineGenerator {
    state: i64,
}

impl SineGenerator {
    pub fn new(seed: i64) -> Self {
        SineGenerator { state: seed }
    }

    /// The value the next draw will hash.
    pub fn state(&self) -> i64 {
        self.state
    }
}

impl UnitStream for SineGenerator {
    fn next_unit(&mut self) -> f64 {
        let x = (self.state as f64).sin() * 10000.0;
        self.state = self.state.wrapping_add(1);
        // frac of a tiny negative x rounds up to exactly 1.0
        (x - x.floor()).min(BELOW_ONE)
    }
}

/// `StdRng` seeded from the layout seed. Reproducible for a given build of
/// `rand`.
#[derive(Debug, Clone)]
pub struct StdGenerator {
    rng: StdRng,
}

impl StdGenerator {
    pub fn new(seed: i64) -> Self {
        StdGenerator { rng: StdRng::seed_from_u64(seed as u64) }
    }
}

impl UnitStream for StdGenerator {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Which generator a layout pass is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    #[default]
    Sine,
    Std,
}

/// A generator chosen at runtime.
#[derive(Debug, Clone)]
pub enum LayoutRng {
    Sine(SineGenerator),
    Std(StdGenerator),
}

impl LayoutRng {
    pub fn new(kind: GeneratorKind, seed: i64) -> Self {
        match kind {
            GeneratorKind::Sine => LayoutRng::Sine(SineGenerator::new(seed)),
            GeneratorKind::Std  => LayoutRng::Std(StdGenerator::new(seed)),
        }
    }
}

impl UnitStream for LayoutRng {
    fn next_unit(&mut self) -> f64 {
        match self {
            LayoutRng::Sine(g) => g.next_unit(),
            LayoutRng::Std(g)  => g.next_unit(),
        }
    }
}

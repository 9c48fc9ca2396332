use serde::{Deserialize, Serialize};

use crate::layout::seeded::{GeneratorKind, LayoutRng, UnitStream};

/// Smallest number of targets a source unit fans out to.
pub const MIN_FAN_OUT: usize = 3;
/// Number of distinct fan-out counts, so counts span `3..=7`.
pub const FAN_OUT_CHOICES: usize = 5;

/// One rendered edge between two adjacent rows.
///
/// `from_layer` / `to_layer` are row indices in render order (0 = top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from_layer: usize,
    pub to_layer: usize,
    pub from_unit: usize,
    pub to_unit: usize,
}

/// Draws the fan-out from every unit of one row into the next.
///
/// For each source unit, in index order, one draw picks a count in `3..=7`
/// and that many further draws pick target units. Targets may repeat. An
/// empty row on either side consumes no draws.
pub fn fan_out<S: UnitStream + ?Sized>(
    stream: &mut S,
    from_layer: usize,
    to_layer: usize,
    from_size: usize,
    to_size: usize,
) -> Vec<Connection> {
    if from_size == 0 || to_size == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(from_size * (MIN_FAN_OUT + FAN_OUT_CHOICES / 2));
    for from_unit in 0..from_size {
        let count = MIN_FAN_OUT + pick(stream.next_unit(), FAN_OUT_CHOICES);
        for _ in 0..count {
            let to_unit = pick(stream.next_unit(), to_size);
            out.push(Connection { from_layer, to_layer, from_unit, to_unit });
        }
    }
    out
}

/// Maps a unit draw onto `0..n`.
fn pick(unit: f64, n: usize) -> usize {
    ((unit * n as f64) as usize).min(n - 1)
}

/// How generators are seeded across the row pairs of one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// One generator, advanced across every pair in order.
    #[default]
    SharedStream,
    /// A fresh generator with the same seed for every pair, so equally
    /// sized pairs get identical wiring.
    PerPair,
}

/// Parameters of one layout pass over a stack of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutPass {
    pub seed: i64,
    #[serde(default)]
    pub policy: SeedPolicy,
    #[serde(default)]
    pub generator: GeneratorKind,
}

impl LayoutPass {
    pub fn new(seed: i64) -> Self {
        LayoutPass { seed, policy: SeedPolicy::default(), generator: GeneratorKind::default() }
    }

    pub fn with_policy(mut self, policy: SeedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_generator(mut self, generator: GeneratorKind) -> Self {
        self.generator = generator;
        self
    }

    /// Connections between every adjacent pair of `rows` (unit counts in
    /// render order), row 0 fanning into row 1, row 1 into row 2, and so on.
    pub fn compute(&self, rows: &[usize]) -> Vec<Connection> {
        let mut shared = LayoutRng::new(self.generator, self.seed);
        let mut out = Vec::new();

        for (from_layer, pair) in rows.windows(2).enumerate() {
            let edges = match self.policy {
                SeedPolicy::SharedStream => fan_out(&mut shared, from_layer, from_layer + 1, pair[0], pair[1]),
                SeedPolicy::PerPair => {
                    let mut fresh = LayoutRng::new(self.generator, self.seed);
                    fan_out(&mut fresh, from_layer, from_layer + 1, pair[0], pair[1])
                }
            };
            out.extend(edges);
        }
        out
    }
}

use serde::{Deserialize, Serialize};

/// The three visualized layers, named from input side to output side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Hidden1,
    Hidden2,
    Output,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::Hidden1, LayerKind::Hidden2, LayerKind::Output];

    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Hidden1 => "hidden1",
            LayerKind::Hidden2 => "hidden2",
            LayerKind::Output  => "output",
        }
    }
}

/// Unit counts of the three layers. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSizes {
    pub hidden1: usize,
    pub hidden2: usize,
    pub output: usize,
}

impl Default for LayerSizes {
    fn default() -> Self {
        LayerSizes { hidden1: 25, hidden2: 25, output: 10 }
    }
}

impl LayerSizes {
    pub fn of(&self, kind: LayerKind) -> usize {
        match kind {
            LayerKind::Hidden1 => self.hidden1,
            LayerKind::Hidden2 => self.hidden2,
            LayerKind::Output  => self.output,
        }
    }

    /// Sizes in the order the rows are drawn, top to bottom:
    /// output, hidden2, hidden1.
    pub fn render_rows(&self) -> [usize; 3] {
        [self.output, self.hidden2, self.hidden1]
    }
}

/// Activations parsed from one prediction response, `[hidden1, hidden2, output]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationTriple {
    pub hidden1: Vec<f64>,
    pub hidden2: Vec<f64>,
    pub output: Vec<f64>,
}

impl ActivationTriple {
    /// All-zero activations of the given sizes.
    pub fn zeros(sizes: &LayerSizes) -> Self {
        ActivationTriple {
            hidden1: vec![0.0; sizes.hidden1],
            hidden2: vec![0.0; sizes.hidden2],
            output:  vec![0.0; sizes.output],
        }
    }

    pub fn sizes(&self) -> LayerSizes {
        LayerSizes {
            hidden1: self.hidden1.len(),
            hidden2: self.hidden2.len(),
            output:  self.output.len(),
        }
    }
}

/// Last known activations of the three layers.
///
/// Contents are only ever replaced all at once; vector lengths never change.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerState {
    sizes: LayerSizes,
    current: ActivationTriple,
}

impl LayerState {
    pub fn new(sizes: LayerSizes) -> Self {
        LayerState { sizes, current: ActivationTriple::zeros(&sizes) }
    }

    pub fn sizes(&self) -> LayerSizes {
        self.sizes
    }

    pub fn get(&self, kind: LayerKind) -> &[f64] {
        match kind {
            LayerKind::Hidden1 => &self.current.hidden1,
            LayerKind::Hidden2 => &self.current.hidden2,
            LayerKind::Output  => &self.current.output,
        }
    }

    pub fn activations(&self) -> &ActivationTriple {
        &self.current
    }

    /// Replaces all three vectors. Returns the triple back when its shape
    /// does not match the configured sizes; the state is then untouched.
    pub fn replace(&mut self, triple: ActivationTriple) -> Result<(), ActivationTriple> {
        if triple.sizes() != self.sizes {
            return Err(triple);
        }
        self.current = triple;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.current = ActivationTriple::zeros(&self.sizes);
    }

    pub fn is_zero(&self) -> bool {
        LayerKind::ALL.iter().all(|&k| self.get(k).iter().all(|&v| v == 0.0))
    }
}

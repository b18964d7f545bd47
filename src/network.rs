use std::fmt::Display;

use log::debug;
use num::Float;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use crate::activation::Activation;
use crate::activation::Sigmoid;
use crate::cases::CaseSet;
use crate::cost::case_error;
use crate::error::NetworkError;
use crate::matrix::Matrix;
use crate::matrix::MatrixItem;

/// Whether the network only evaluates cases or also learns from them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Run,
    Train,
}

/// A fully connected feed-forward network without biases.
///
/// The network owns every buffer it works on: one activation vector per
/// layer of nodes, one weight matrix per connectivity layer and, when
/// training, the `theta`/`psi` vectors of the backpropagation sweep. None
/// of them is reallocated after construction.
#[derive(Debug, Clone)]
pub struct Network<T, U = Sigmoid>
where
    T: NetworkItem,
    U: Activation<T>,
{
    arch: Box<[usize]>,
    activations: Vec<Vec<T>>,
    /// `weights[n][(k, j)]` connects node `k` of layer `n` to node `j` of layer `n + 1`.
    weights: Vec<Matrix<T>>,
    training: Option<Intermediates<T>>,
    activation: U,
}

/// Values only meaningful inside a backpropagation sweep.
#[derive(Debug, Clone)]
struct Intermediates<T> {
    /// Pre-activation sums of the hidden layers, `thetas[0]` is unused.
    thetas: Vec<Vec<T>>,
    /// Back-propagated signals of hidden and output layers, `psis[0]` is unused.
    psis: Vec<Vec<T>>,
}

impl<T> Intermediates<T>
where
    T: NetworkItem,
{
    fn new(arch: &[usize]) -> Self {
        let last = arch.len() - 1;
        let layer = |n: usize| match n {
            0 => Vec::new(),
            n => vec![T::zero(); arch[n]],
        };

        Self {
            thetas: (0..last).map(layer).collect(),
            psis: (0..=last).map(layer).collect(),
        }
    }
}

impl<T> Network<T, Sigmoid>
where
    T: NetworkItem,
{
    /// Create a new neural network with the sigmoid activation function.
    pub fn new(arch: &[usize], mode: Mode) -> Result<Self, NetworkError> {
        Self::with_activation(arch, Sigmoid, mode)
    }
}

impl<T, U> Network<T, U>
where
    T: NetworkItem,
    U: Activation<T>,
{
    /// Create a new neural network with the activation function.
    ///
    /// `arch` lists the width of every layer of nodes, input layer first.
    /// All weights start at zero.
    pub fn with_activation(arch: &[usize], activation: U, mode: Mode) -> Result<Self, NetworkError> {
        if arch.len() < 2 {
            return Err(NetworkError::InvalidTopology(format!(
                "expects at least 2 layers, got {}",
                arch.len()
            )));
        }

        if let Some(n) = arch.iter().position(|&size| size == 0) {
            return Err(NetworkError::InvalidTopology(format!("layer {n} has no nodes")));
        }

        let activations = arch.iter().map(|&size| vec![T::zero(); size]).collect();
        let weights = arch
            .windows(2)
            .map(|pair| Matrix::new(pair[0], pair[1]))
            .collect();
        let training = match mode {
            Mode::Run => None,
            Mode::Train => Some(Intermediates::new(arch)),
        };

        debug!("allocated network {arch:?} in {mode:?} mode");

        Ok(Self {
            arch: arch.into(),
            activations,
            weights,
            training,
            activation,
        })
    }

    /// Layer widths, input layer first.
    pub fn arch(&self) -> &[usize] {
        &self.arch
    }

    /// Number of connectivity layers.
    pub fn num_layers(&self) -> usize {
        self.arch.len() - 1
    }

    pub fn weights(&self) -> &[Matrix<T>] {
        &self.weights
    }

    pub fn layer_weights(&self, layer: usize) -> &Matrix<T> {
        &self.weights[layer]
    }

    pub fn layer_weights_mut(&mut self, layer: usize) -> &mut Matrix<T> {
        &mut self.weights[layer]
    }

    /// Set every connection to the same value.
    pub fn fill_weights(&mut self, value: T) {
        for matrix in self.weights.iter_mut() {
            matrix.fill(value);
        }
    }

    /// Activations of the output layer after the most recent forward pass.
    pub fn output(&self) -> &[T] {
        &self.activations[self.num_layers()]
    }

    pub fn activations(&self, layer: usize) -> &[T] {
        &self.activations[layer]
    }

    /// Copy a case input into the input layer.
    pub fn load_inputs(&mut self, input: &[T]) {
        if input.len() != self.arch[0] {
            panic!(
                "Input mismatch while loading inputs, expected {} values got {}.",
                self.arch[0],
                input.len()
            );
        }

        self.activations[0].copy_from_slice(input);
    }

    /// Forward pass over the loaded inputs.
    pub fn run_set(&mut self) {
        for n in 1..self.arch.len() {
            for j in 0..self.arch[n] {
                let theta = weighted_sum(&self.activations[n - 1], &self.weights[n - 1], j);
                self.activations[n][j] = self.activation.activate(theta);
            }
        }
    }

    /// Forward pass that keeps the hidden thetas and seeds the output psis
    /// for a following [`Network::train_set`].
    pub fn run_for_train(&mut self, expected: &[T]) {
        let last = self.num_layers();
        if expected.len() != self.arch[last] {
            panic!(
                "Output mismatch while training, expected {} values got {}.",
                self.arch[last],
                expected.len()
            );
        }

        let Self {
            ref arch,
            ref mut activations,
            ref weights,
            ref mut training,
            ref activation,
        } = *self;
        let Intermediates { thetas, psis } = training.get_or_insert_with(|| Intermediates::new(arch));

        for n in 1..last {
            for j in 0..arch[n] {
                let theta = weighted_sum(&activations[n - 1], &weights[n - 1], j);
                thetas[n][j] = theta;
                activations[n][j] = activation.activate(theta);
            }
        }

        for i in 0..arch[last] {
            let theta = weighted_sum(&activations[last - 1], &weights[last - 1], i);
            activations[last][i] = activation.activate(theta);
            psis[last][i] = (expected[i] - activations[last][i]) * activation.derivative(theta);
        }
    }

    /// Gradient descent step for the case prepared by [`Network::run_for_train`].
    ///
    /// Walks the connectivity layers back to front. Each weight row is
    /// updated while the psi of its source node is still being accumulated,
    /// so `omega` always reads a weight before that weight changes. Returns
    /// the case error of a fresh forward pass with the updated weights.
    pub fn train_set(&mut self, expected: &[T], lambda: T) -> T {
        let last = self.num_layers();

        {
            let Self {
                ref arch,
                ref activations,
                ref mut weights,
                ref mut training,
                ref activation,
            } = *self;
            let Intermediates { thetas, psis } = training.get_or_insert_with(|| Intermediates::new(arch));

            for n in (2..last).rev() {
                for k in 0..arch[n] {
                    let omega = update_row(weights[n].row_mut(k), &psis[n + 1], activations[n][k], lambda);
                    psis[n][k] = omega * activation.derivative(thetas[n][k]);
                }
            }

            if last == 1 {
                for i in 0..arch[1] {
                    update_column(&mut weights[0], &activations[0], i, psis[1][i], lambda);
                }
            } else {
                for k in 0..arch[1] {
                    let omega = update_row(weights[1].row_mut(k), &psis[2], activations[1][k], lambda);
                    psis[1][k] = omega * activation.derivative(thetas[1][k]);
                    update_column(&mut weights[0], &activations[0], k, psis[1][k], lambda);
                }
            }
        }

        self.run_set();

        case_error(self.output(), expected)
    }

    /// Runs every case and collects the output layer of each.
    pub fn run(&mut self, cases: &CaseSet<T>) -> Vec<Vec<T>> {
        cases
            .inputs()
            .iter()
            .map(|input| {
                self.load_inputs(input);
                self.run_set();
                self.output().to_vec()
            })
            .collect()
    }
}

impl<T, U> Network<T, U>
where
    T: NetworkItem + SampleUniform,
    U: Activation<T>,
{
    /// Draws every weight uniformly from `[min, max]`.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, min: T, max: T) {
        debug!("randomizing weights in [{min}, {max}]");

        for matrix in self.weights.iter_mut() {
            matrix.randomize(rng, min, max);
        }
    }
}

fn weighted_sum<T: NetworkItem>(inputs: &[T], weights: &Matrix<T>, j: usize) -> T {
    let mut theta = T::zero();

    for (k, &a) in inputs.iter().enumerate() {
        theta += a * weights[(k, j)];
    }

    theta
}

/// Updates the outgoing weights of one source node and returns its omega.
fn update_row<T: NetworkItem>(row: &mut [T], psis: &[T], activation: T, lambda: T) -> T {
    let mut omega = T::zero();

    for (w, &psi) in row.iter_mut().zip(psis) {
        omega += psi * *w;
        *w += lambda * activation * psi;
    }

    omega
}

/// Updates the incoming weights of node `j` from the input layer.
fn update_column<T: NetworkItem>(weights: &mut Matrix<T>, inputs: &[T], j: usize, psi: T, lambda: T) {
    for (m, &a) in inputs.iter().enumerate() {
        weights[(m, j)] += lambda * a * psi;
    }
}

pub trait NetworkItem: MatrixItem + Float + Display {}
impl NetworkItem for f32 {}
impl NetworkItem for f64 {}

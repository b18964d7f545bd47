use std::time::Duration;
use std::time::Instant;

use log::debug;
use log::info;

use crate::activation::Activation;
use crate::cases::CaseSet;
use crate::config::Config;
use crate::cost::average_error;
use crate::error::NetworkError;
use crate::network::Network;
use crate::network::NetworkItem;

/// Where the convergence loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    Idle,
    Running,
    /// The average error reached the threshold.
    Converged,
    /// The iteration cap was reached first.
    Exhausted,
    /// The average error is no longer a number.
    Diverged,
}

/// Online gradient descent over a case set until the average error drops to
/// `error_threshold` or `max_iterations` epochs ran.
#[derive(Debug, Clone, PartialEq)]
pub struct Trainer<T> {
    pub lambda: T,
    pub error_threshold: T,
    pub max_iterations: usize,
    /// Epochs between progress messages, 0 disables them.
    pub keep_alive: usize,
}

/// Outcome of [`Trainer::train`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport<T> {
    pub state: TrainingState,
    pub converged: bool,
    pub exhausted: bool,
    pub iterations: usize,
    pub average_error: T,
    pub error_threshold: T,
    pub max_iterations: usize,
    pub elapsed: Duration,
}

impl<T> Trainer<T>
where
    T: NetworkItem,
{
    pub fn new(lambda: T, error_threshold: T, max_iterations: usize) -> Self {
        Self {
            lambda,
            error_threshold,
            max_iterations,
            keep_alive: 0,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, NetworkError> {
        let convert = |value: f64| T::from(value).ok_or(NetworkError::NumericConversion(value));

        Ok(Self {
            lambda: convert(config.lambda)?,
            error_threshold: convert(config.error_threshold)?,
            max_iterations: config.max_iterations,
            keep_alive: config.keep_alive,
        })
    }

    /// Both stop conditions are checked before every epoch.
    fn next_state(&self, iterations: usize, average_error: T) -> TrainingState {
        if average_error.is_nan() {
            TrainingState::Diverged
        } else if average_error <= self.error_threshold {
            TrainingState::Converged
        } else if iterations >= self.max_iterations {
            TrainingState::Exhausted
        } else {
            TrainingState::Running
        }
    }

    /// Trains the network in place, case by case in set order.
    pub fn train<U>(&self, network: &mut Network<T, U>, cases: &CaseSet<T>) -> Result<TrainingReport<T>, NetworkError>
    where
        U: Activation<T>,
    {
        let expected = cases.expected().ok_or(NetworkError::MissingExpectedOutputs)?;
        if cases.is_empty() {
            return Err(NetworkError::InvalidCaseCount);
        }

        let mut state = TrainingState::Idle;
        let mut iterations = 0;
        let mut average = self.error_threshold + T::one();

        debug!("training state {state:?}");
        let start = Instant::now();

        loop {
            state = self.next_state(iterations, average);
            if state != TrainingState::Running {
                break;
            }

            let mut total_error = T::zero();
            for (input, truth) in cases.inputs().iter().zip(expected) {
                network.load_inputs(input);
                network.run_for_train(truth);
                total_error += network.train_set(truth, self.lambda);
            }

            average = average_error(total_error, cases.len());
            iterations += 1;

            if self.keep_alive != 0 && iterations % self.keep_alive == 0 {
                info!("iteration {iterations}, error = {average}");
            }
        }

        let elapsed = start.elapsed();
        debug!("training state {state:?} after {iterations} iterations");

        Ok(TrainingReport {
            state,
            converged: average <= self.error_threshold,
            exhausted: iterations >= self.max_iterations,
            iterations,
            average_error: average,
            error_threshold: self.error_threshold,
            max_iterations: self.max_iterations,
            elapsed,
        })
    }
}

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use log::debug;
use log::warn;

use crate::error::NetworkError;

pub const DEFAULT_CONFIG_FILE: &str = "Train_Config.txt";

/// Log filter used when `RUST_LOG` is unset, low enough for keep-alive progress.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Network and training parameters read from a `KEY = VALUE` file.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub train: bool,
    pub randomize: bool,
    pub save: bool,
    /// Number of connectivity layers, checked against `layers` when present.
    pub num_layers: Option<usize>,
    /// Width of every layer of nodes, input layer first.
    pub layers: Vec<usize>,
    pub min_weight: f64,
    pub max_weight: f64,
    pub test_cases: usize,
    pub max_iterations: usize,
    pub error_threshold: f64,
    pub lambda: f64,
    /// Epochs between progress messages, 0 disables them.
    pub keep_alive: usize,
    pub load_file: PathBuf,
    pub save_file: PathBuf,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            train: true,
            randomize: true,
            save: false,
            num_layers: None,
            layers: vec![2, 2, 1],
            min_weight: -1.5,
            max_weight: 1.5,
            test_cases: 4,
            max_iterations: 100_000,
            error_threshold: 2e-4,
            lambda: 0.3,
            keep_alive: 0,
            load_file: PathBuf::from("weights.bin"),
            save_file: PathBuf::from("weights.bin"),
            input_file: PathBuf::from("inputs.txt"),
            output_file: PathBuf::from("outputs.txt"),
        }
    }
}

impl Config {
    /// Reads the configuration file. A missing file leaves every default in place.
    pub fn from_file(path: &Path) -> Result<Self, NetworkError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("configuration file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parses `KEY = VALUE` lines on top of the defaults.
    ///
    /// Lines without `=` and unknown keys are skipped, malformed values keep
    /// the default.
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();

        for line in text.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            config.set(key.trim(), value.trim());
        }

        config
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "TRAIN_FLAG" => assign(&mut self.train, key, parse_flag(value)),
            "RAND_FLAG" => assign(&mut self.randomize, key, parse_flag(value)),
            "SAVE_FLAG" => assign(&mut self.save, key, parse_flag(value)),
            "NUM_LAYERS" => assign(&mut self.num_layers, key, value.parse().ok().map(Some)),
            "LAYER_CONFIG" => assign(&mut self.layers, key, parse_layers(value)),
            "MIN_WEIGHT" => assign(&mut self.min_weight, key, value.parse().ok()),
            "MAX_WEIGHT" => assign(&mut self.max_weight, key, value.parse().ok()),
            "TEST_CASES" => assign(&mut self.test_cases, key, value.parse().ok()),
            "MAX_ITERATIONS" => assign(&mut self.max_iterations, key, value.parse().ok()),
            "ERROR_THRESHOLD" => assign(&mut self.error_threshold, key, value.parse().ok()),
            "LAMBDA" => assign(&mut self.lambda, key, value.parse().ok()),
            "KEEP_ALIVE" => assign(&mut self.keep_alive, key, value.parse().ok()),
            "LOAD_FILE_NAME" => self.load_file = PathBuf::from(value),
            "SAVE_FILE_NAME" => self.save_file = PathBuf::from(value),
            "INPUT_FILE_NAME" => self.input_file = PathBuf::from(value),
            "OUTPUT_FILE_NAME" => self.output_file = PathBuf::from(value),
            _ => debug!("ignoring unknown configuration key {key}"),
        }
    }

    /// Layer widths, checked against `NUM_LAYERS` when it was given.
    pub fn topology(&self) -> Result<&[usize], NetworkError> {
        if let Some(num_layers) = self.num_layers {
            if num_layers + 1 != self.layers.len() {
                return Err(NetworkError::InvalidTopology(format!(
                    "NUM_LAYERS is {num_layers} but LAYER_CONFIG lists {} layers",
                    self.layers.len()
                )));
            }
        }

        Ok(&self.layers)
    }

    /// Checks the random weight range before it is sampled.
    ///
    /// Both bounds and their span must be finite.
    pub fn weight_range(&self) -> Result<(f64, f64), NetworkError> {
        let (min, max) = (self.min_weight, self.max_weight);
        if !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
            return Err(NetworkError::InvalidConfig(format!(
                "weight range [{min}, {max}] is not finite"
            )));
        }

        if !(min <= max) {
            return Err(NetworkError::InvalidConfig(format!(
                "MIN_WEIGHT {} exceeds MAX_WEIGHT {}",
                self.min_weight, self.max_weight
            )));
        }

        Ok((self.min_weight, self.max_weight))
    }
}

fn assign<V>(slot: &mut V, key: &str, value: Option<V>) {
    match value {
        Some(value) => *slot = value,
        None => warn!("malformed value for {key}, keeping the previous one"),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

fn parse_layers(value: &str) -> Option<Vec<usize>> {
    value
        .split('-')
        .map(|size| usize::from_str(size.trim()).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# N-layer perceptron
TRAIN_FLAG = 1
RAND_FLAG = 0
SAVE_FLAG = 1
NUM_LAYERS = 3
LAYER_CONFIG = 2-5-3-1
MIN_WEIGHT = -0.5
MAX_WEIGHT = 0.5
TEST_CASES = 4
MAX_ITERATIONS = 5000
ERROR_THRESHOLD = 0.0002
LAMBDA = 0.3
KEEP_ALIVE = 100
LOAD_FILE_NAME = in.bin
SAVE_FILE_NAME = out.bin
INPUT_FILE_NAME = cases.txt
OUTPUT_FILE_NAME = truth.txt
COLOR = blue
";

    #[test]
    fn parses_every_key() {
        let config = Config::parse(SAMPLE);

        assert!(config.train);
        assert!(!config.randomize);
        assert!(config.save);
        assert_eq!(config.topology().unwrap(), &[2, 5, 3, 1]);
        assert_eq!(config.weight_range().unwrap(), (-0.5, 0.5));
        assert_eq!(config.test_cases, 4);
        assert_eq!(config.max_iterations, 5000);
        assert_eq!(config.error_threshold, 0.0002);
        assert_eq!(config.lambda, 0.3);
        assert_eq!(config.keep_alive, 100);
        assert_eq!(config.load_file, PathBuf::from("in.bin"));
        assert_eq!(config.save_file, PathBuf::from("out.bin"));
        assert_eq!(config.input_file, PathBuf::from("cases.txt"));
        assert_eq!(config.output_file, PathBuf::from("truth.txt"));
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = Config::parse("LAMBDA = fast\nLAYER_CONFIG = 2-x-1\nTRAIN_FLAG = maybe\n");
        let defaults = Config::default();

        assert_eq!(config, defaults);
    }

    #[test]
    fn layer_count_must_agree() {
        let config = Config::parse("NUM_LAYERS = 1\nLAYER_CONFIG = 2-2-1\n");

        assert!(matches!(config.topology(), Err(NetworkError::InvalidTopology(_))));
    }

    #[test]
    fn inverted_weight_range() {
        let config = Config::parse("MIN_WEIGHT = 1\nMAX_WEIGHT = -1\n");

        assert!(matches!(config.weight_range(), Err(NetworkError::InvalidConfig(_))));
    }

    #[test]
    fn unbounded_weight_range() {
        for text in [
            "MIN_WEIGHT = -1e308\nMAX_WEIGHT = 1e308\n",
            "MIN_WEIGHT = -inf\nMAX_WEIGHT = 1\n",
            "MIN_WEIGHT = 0\nMAX_WEIGHT = NaN\n",
        ] {
            let config = Config::parse(text);

            assert!(
                matches!(config.weight_range(), Err(NetworkError::InvalidConfig(_))),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = Config::from_file(Path::new("no/such/config.txt")).unwrap();

        assert_eq!(config, Config::default());
    }
}

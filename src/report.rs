use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::time::Duration;

use crate::cases::CaseSet;
use crate::config::Config;
use crate::network::NetworkItem;
use crate::train::TrainingReport;
use crate::train::TrainingState;

const MS_PER_SEC: f64 = 1000.0;
const SEC_PER_MIN: f64 = 60.0;
const MIN_PER_HOUR: f64 = 60.0;
const HOUR_PER_DAY: f64 = 24.0;
const DAY_PER_WEEK: f64 = 7.0;

/// Echo of the network and training parameters printed before a run.
pub struct Parameters<'a, T> {
    pub config: &'a Config,
    pub cases: &'a CaseSet<T>,
}

impl<T> Display for Parameters<'_, T>
where
    T: NetworkItem,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let config = self.config;
        let layers: Vec<String> = config.layers.iter().map(ToString::to_string).collect();

        writeln!(f, "Network Configuration: {}", layers.join("-"))?;
        writeln!(f)?;

        if config.randomize {
            writeln!(f, "Randomizing weights.")?;
        } else {
            writeln!(f, "Loading weights from: {}", config.load_file.display())?;
        }

        if config.save {
            writeln!(f, "Saving weights to: {}", config.save_file.display())?;
        } else {
            writeln!(f, "Not saving weights.")?;
        }
        writeln!(f)?;

        if config.train {
            if let Some(expected) = self.cases.expected() {
                writeln!(f, "Expected outputs:")?;
                for row in expected {
                    writeln!(f, "{}", join(row, |value| format!("{value:.3}"), "\t"))?;
                }
                writeln!(f)?;
            }

            writeln!(f, "Random Num Range: {} to {}", config.min_weight, config.max_weight)?;
            writeln!(f, "Max Iterations:   {}", config.max_iterations)?;
            writeln!(f, "Error Threshold:  {}", config.error_threshold)?;
            writeln!(f, "Lambda:           {}", config.lambda)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

/// One row per case: the inputs, a colon, the network outputs.
pub struct TruthTable<'a, T> {
    pub inputs: &'a [Vec<T>],
    pub outputs: &'a [Vec<T>],
}

impl<T> Display for TruthTable<'_, T>
where
    T: NetworkItem,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Truth Table:")?;

        for (input, output) in self.inputs.iter().zip(self.outputs) {
            let input = join(input, |value| value.to_string(), " ");
            let output = join(output, |value| value.to_string(), " ");
            writeln!(f, "{input} : {output}")?;
        }

        Ok(())
    }
}

impl<T> Display for TrainingReport<T>
where
    T: NetworkItem,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reason for Exiting:")?;
        if self.converged {
            writeln!(f, "  average error is less than {}", self.error_threshold)?;
        }
        if self.exhausted {
            writeln!(f, "  iterations exceeded {}", self.max_iterations)?;
        }
        if self.state == TrainingState::Diverged {
            writeln!(f, "  average error is not a number")?;
        }

        writeln!(f, "Iterations Reached: {}", self.iterations)?;
        writeln!(f, "Avg Error Reached:  {}", self.average_error)?;
        writeln!(f, "Elapsed time: {}", human_duration(self.elapsed))
    }
}

/// Scales a duration to the largest unit that keeps it above one.
pub fn human_duration(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    if seconds < 1.0 {
        return format!("{} milliseconds", seconds * MS_PER_SEC);
    }
    if seconds < SEC_PER_MIN {
        return format!("{seconds} seconds");
    }

    let minutes = seconds / SEC_PER_MIN;
    if minutes < MIN_PER_HOUR {
        return format!("{minutes} minutes");
    }

    let hours = minutes / MIN_PER_HOUR;
    if hours < HOUR_PER_DAY {
        return format!("{hours} hours");
    }

    let days = hours / HOUR_PER_DAY;
    if days < DAY_PER_WEEK {
        return format!("{days} days");
    }

    format!("{} weeks", days / DAY_PER_WEEK)
}

fn join<T: Copy>(values: &[T], render: impl Fn(T) -> String, separator: &str) -> String {
    values.iter().map(|&value| render(value)).collect::<Vec<_>>().join(separator)
}

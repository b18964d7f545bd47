use std::time::Duration;

use nlayer::report::human_duration;
use nlayer::report::Parameters;
use nlayer::report::TruthTable;
use nlayer::CaseSet;
use nlayer::Config;
use nlayer::TrainingReport;
use nlayer::TrainingState;

#[test]
fn durations_pick_a_readable_unit() {
    assert_eq!(human_duration(Duration::from_millis(500)), "500 milliseconds");
    assert_eq!(human_duration(Duration::from_secs(30)), "30 seconds");
    assert_eq!(human_duration(Duration::from_secs(90)), "1.5 minutes");
    assert_eq!(human_duration(Duration::from_secs(2 * 3600)), "2 hours");
    assert_eq!(human_duration(Duration::from_secs(3 * 86_400)), "3 days");
    assert_eq!(human_duration(Duration::from_secs(14 * 86_400)), "2 weeks");
}

#[test]
fn truth_table_rows() {
    let inputs = vec![vec![0.0, 1.0], vec![1.0, 1.0]];
    let outputs = vec![vec![0.75], vec![0.5]];

    let table = TruthTable { inputs: &inputs, outputs: &outputs }.to_string();

    assert_eq!(table, "Truth Table:\n0 1 : 0.75\n1 1 : 0.5\n");
}

#[test]
fn summary_lists_every_stop_reason() {
    let report = TrainingReport {
        state: TrainingState::Converged,
        converged: true,
        exhausted: true,
        iterations: 1000,
        average_error: 0.0001,
        error_threshold: 0.0002,
        max_iterations: 1000,
        elapsed: Duration::from_millis(250),
    };

    let text = report.to_string();

    assert!(text.contains("average error is less than 0.0002"));
    assert!(text.contains("iterations exceeded 1000"));
    assert!(text.contains("Iterations Reached: 1000"));
    assert!(text.contains("Elapsed time: 250 milliseconds"));
}

#[test]
fn summary_with_a_single_reason() {
    let report = TrainingReport {
        state: TrainingState::Exhausted,
        converged: false,
        exhausted: true,
        iterations: 10,
        average_error: 0.3,
        error_threshold: 0.0002,
        max_iterations: 10,
        elapsed: Duration::from_secs(2),
    };

    let text = report.to_string();

    assert!(!text.contains("average error is less than"));
    assert!(text.contains("iterations exceeded 10"));
}

#[test]
fn parameter_echo() {
    let config = Config::parse("LAYER_CONFIG = 2-5-1\nRAND_FLAG = 0\nLOAD_FILE_NAME = w.bin\nSAVE_FLAG = 0\n");
    let cases = CaseSet::with_expected(vec![vec![0.0, 1.0]], vec![vec![1.0]]);

    let text = Parameters { config: &config, cases: &cases }.to_string();

    assert!(text.starts_with("Network Configuration: 2-5-1\n"));
    assert!(text.contains("Loading weights from: w.bin"));
    assert!(text.contains("Not saving weights."));
    assert!(text.contains("1.000"));
    assert!(text.contains("Lambda:           0.3"));
}

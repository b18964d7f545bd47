use std::str::FromStr;
use std::sync::Mutex;

use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;

use nlayer::config::DEFAULT_LOG_FILTER;
use nlayer::CaseSet;
use nlayer::Mode;
use nlayer::Network;
use nlayer::Trainer;

struct Capture {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines.lock().unwrap().push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    lines: Mutex::new(Vec::new()),
};

#[test]
fn keep_alive_reports_progress_at_the_default_level() {
    let default = LevelFilter::from_str(DEFAULT_LOG_FILTER).unwrap();
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(default);

    let mut network: Network<f64> = Network::new(&[2, 2, 1], Mode::Train).unwrap();
    network.fill_weights(0.1);
    let cases = CaseSet::with_expected(vec![vec![1.0, 0.0], vec![0.0, 1.0]], vec![vec![1.0], vec![0.0]]);

    let mut trainer = Trainer::new(0.3, 0.0, 10);
    trainer.keep_alive = 4;
    trainer.train(&mut network, &cases).unwrap();

    let lines = CAPTURE.lines.lock().unwrap();
    let progress: Vec<_> = lines
        .iter()
        .filter(|(_, message)| message.starts_with("iteration "))
        .collect();

    assert_eq!(progress.len(), 2);
    assert!(progress.iter().all(|(level, _)| *level <= default));
    assert!(progress[0].1.starts_with("iteration 4, error = "));
    assert!(progress[1].1.starts_with("iteration 8, error = "));
}

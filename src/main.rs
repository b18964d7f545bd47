use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use nlayer::config::DEFAULT_CONFIG_FILE;
use nlayer::config::DEFAULT_LOG_FILTER;
use nlayer::report::Parameters;
use nlayer::report::TruthTable;
use nlayer::weights;
use nlayer::CaseSet;
use nlayer::Config;
use nlayer::Mode;
use nlayer::Network;
use nlayer::Trainer;

/// Runs or trains an N-layer perceptron described by a configuration file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// `KEY = VALUE` configuration file.
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER)).init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::from_file(&cli.config)
        .with_context(|| format!("reading configuration {}", cli.config.display()))?;
    let mode = if config.train { Mode::Train } else { Mode::Run };

    let mut network: Network<f64> = Network::new(config.topology()?, mode)?;
    let cases = populate(&config, &mut network)?;

    print!("{}", Parameters { config: &config, cases: &cases });

    let report = if config.train {
        let trainer = Trainer::from_config(&config)?;
        Some(trainer.train(&mut network, &cases)?)
    } else {
        None
    };

    let outputs = network.run(&cases);

    if config.save {
        weights::save(&network, &config.save_file)
            .with_context(|| format!("saving weights to {}", config.save_file.display()))?;
    }

    match &report {
        Some(report) => {
            println!("TRAINING RESULTS-------------------------------------");
            println!("{report}");
        }
        None => println!("RUNNING RESULTS--------------------"),
    }
    println!("{}", TruthTable { inputs: cases.inputs(), outputs: &outputs });

    Ok(())
}

/// Sets the weights and loads the cases. Any failure here stops the
/// program before it runs, trains or saves anything.
fn populate(config: &Config, network: &mut Network<f64>) -> anyhow::Result<CaseSet<f64>> {
    if config.randomize {
        let (min, max) = config.weight_range()?;
        network.randomize(&mut rand::thread_rng(), min, max);
    } else {
        weights::load(network, &config.load_file)?;
    }

    let expected = config.train.then_some(config.output_file.as_path());
    let cases = CaseSet::load(&config.input_file, expected, network.arch(), config.test_cases)?;
    info!("populated network with {} cases", cases.len());

    Ok(cases)
}

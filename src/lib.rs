pub mod activation;
pub mod cases;
pub mod config;
pub mod cost;
pub mod error;
pub mod matrix;
pub mod network;
pub mod report;
pub mod train;
pub mod weights;

pub use activation::Activation;
pub use activation::Sigmoid;
pub use cases::CaseSet;
pub use config::Config;
pub use error::NetworkError;
pub use network::Mode;
pub use network::Network;
pub use network::NetworkItem;
pub use train::Trainer;
pub use train::TrainingReport;
pub use train::TrainingState;

pub mod config;
pub mod experiment;
pub mod io;
pub mod math;
pub mod model;
pub mod verify;

pub use config::{RunConfig, Variant};
pub use experiment::{run, run_variant, RunReport};
pub use model::generalized::GeneralizedProblem;
pub use model::shifted::ShiftedProblem;
pub use model::standard::StandardProblem;
pub use model::{Optimum, RatioProblem};

//! Stratification of whole-blood gene-expression samples into Sepsis
//! Response Signature (SRS) groups.
//!
//! The crate exposes two entry points: [`stratify`], which batch-aligns an
//! input matrix against a built-in reference cohort with mutual nearest
//! neighbours and then runs the trained classifier/regressor pair, and
//! [`project`], a model-free k-NN projection intended for cohorts too small
//! for stable alignment.

pub mod align;
pub mod cli;
pub mod ctx;
pub mod error;
pub mod io;
pub mod math;
pub mod matrix;
pub mod model;
pub mod pipeline;
pub mod project;
pub mod reference;
pub mod result;
pub mod schema;
pub mod signature;
pub mod stratify;

pub use error::StratError;
pub use matrix::SampleMatrix;
pub use project::{project, ProjectOptions};
pub use result::{PredictionResult, SamplePrediction};
pub use signature::{Signature, SrsGroup};
pub use stratify::{stratify, StratifyOptions};

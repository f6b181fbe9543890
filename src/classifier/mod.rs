pub mod classifier;
pub mod prediction;

pub use classifier::{Classifier, ClassifyError, ModelError};
pub use prediction::{argmax, Prediction};

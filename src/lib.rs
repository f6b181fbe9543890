pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod preprocess;
pub mod classifier;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{InputType, ModelMetadata, Network};
pub use preprocess::{allowed_file, preprocess_bytes, preprocess_image, ImageTensor, PreprocessError};
pub use classifier::{argmax, Classifier, ClassifyError, ModelError, Prediction};

use thiserror::Error;

use crate::activation::activation::ActivationFunction;
use crate::classifier::prediction::{argmax, Prediction};
use crate::network::{InputType, Network};
use crate::preprocess::ImageTensor;

/// Reasons a model file cannot back a classifier.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("could not load model from '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("model has no layers")]
    NoLayers,
    #[error("model layers do not connect (weight/bias shapes disagree)")]
    Malformed,
    #[error("model metadata does not declare an RGB image input")]
    MissingInputType,
    #[error("model input size {width}x{height} must be non-zero")]
    ZeroInputSize { width: u32, height: u32 },
    #[error("first layer expects {actual} inputs but {width}x{height}x3 image gives {expected}")]
    InputSizeMismatch { width: u32, height: u32, expected: usize, actual: usize },
    #[error("output activation {0:?} does not produce probabilities (use Softmax or Sigmoid)")]
    UnboundedOutput(ActivationFunction),
    #[error("need at least 2 class labels, got {0}")]
    TooFewLabels(usize),
    #[error("{labels} class labels do not match {outputs} model outputs")]
    LabelCountMismatch { labels: usize, outputs: usize },
}

/// Failures while classifying one tensor.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("input tensor has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch { expected: [usize; 4], actual: Vec<usize> },
    #[error("model produced no usable probabilities")]
    EmptyOutput,
}

/// A pre-trained network paired with its input size and class labels.
///
/// Immutable once built; `classify` takes `&self` and the underlying
/// `Network::predict` keeps no per-call state, so one instance can be shared
/// across request threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Classifier {
    network: Network,
    labels: Vec<String>,
    width: u32,
    height: u32,
    /// Single sigmoid unit giving P(labels[1]).
    binary_head: bool,
}

impl Classifier {
    /// Loads a model JSON file and validates it with `from_network`.
    pub fn load(path: &str, fallback_labels: &[String]) -> Result<Classifier, ModelError> {
        let network = Network::load_json(path).map_err(|source| ModelError::Load {
            path: path.to_owned(),
            source,
        })?;
        Classifier::from_network(network, fallback_labels)
    }

    /// Wraps `network`, taking labels from its metadata or, when the model
    /// has none, from `fallback_labels`.
    pub fn from_network(network: Network, fallback_labels: &[String]) -> Result<Classifier, ModelError> {
        let last = network.layers.last().ok_or(ModelError::NoLayers)?;
        if !network.is_well_formed() {
            return Err(ModelError::Malformed);
        }

        let metadata = network.metadata.as_ref();
        let (width, height) = match metadata.and_then(|m| m.input_type.as_ref()) {
            Some(InputType::ImageRgb { width, height }) => (*width, *height),
            None => return Err(ModelError::MissingInputType),
        };
        if width == 0 || height == 0 {
            return Err(ModelError::ZeroInputSize { width, height });
        }
        let expected = width as usize * height as usize * 3;
        if network.input_size() != expected {
            return Err(ModelError::InputSizeMismatch {
                width,
                height,
                expected,
                actual: network.input_size(),
            });
        }

        if !last.activator.is_probabilistic() {
            return Err(ModelError::UnboundedOutput(last.activator.clone()));
        }

        let labels: Vec<String> = metadata
            .and_then(|m| m.output_labels.clone())
            .unwrap_or_else(|| fallback_labels.to_vec());
        if labels.len() < 2 {
            return Err(ModelError::TooFewLabels(labels.len()));
        }

        let outputs = network.output_size();
        let binary_head = outputs == 1
            && last.activator == ActivationFunction::Sigmoid
            && labels.len() == 2;
        if !binary_head && labels.len() != outputs {
            return Err(ModelError::LabelCountMismatch { labels: labels.len(), outputs });
        }

        Ok(Classifier { network, labels, width, height, binary_head })
    }

    /// Spatial size (width, height) images are resized to.
    pub fn input_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Expected tensor shape, (1, height, width, 3).
    pub fn input_shape(&self) -> [usize; 4] {
        [1, self.height as usize, self.width as usize, 3]
    }

    /// One probability per label, in label order.
    pub fn probabilities(&self, tensor: &ImageTensor) -> Result<Vec<f64>, ClassifyError> {
        let expected = self.input_shape();
        if tensor.shape() != &expected[..] {
            return Err(ClassifyError::ShapeMismatch { expected, actual: tensor.shape().to_vec() });
        }

        let input: Vec<f64> = tensor.iter().copied().collect();
        let output = self.network.predict(&input);

        if self.binary_head {
            let p = output[0];
            Ok(vec![1.0 - p, p])
        } else {
            Ok(output)
        }
    }

    /// Picks the most probable label for `tensor`.
    pub fn classify(&self, tensor: &ImageTensor) -> Result<Prediction, ClassifyError> {
        let probs = self.probabilities(tensor)?;
        let index = argmax(&probs).ok_or(ClassifyError::EmptyOutput)?;
        Ok(Prediction {
            index,
            label: self.labels[index].clone(),
            probability: probs[index].clamp(0.0, 1.0),
        })
    }
}

use crate::{activation::activation::ActivationFunction, layers::dense::Layer};
use crate::network::metadata::ModelMetadata;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    /// Builds a randomly initialised network from (size, input_size, activation) tuples.
    pub fn new(layer_specs: Vec<(usize, usize, ActivationFunction)>) -> Network {
        let layers = layer_specs.into_iter()
            .map(|(size, input_size, activation)| Layer::new(size, input_size, activation))
            .collect();
        Network { layers, metadata: None }
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Network {
        self.metadata = Some(metadata);
        self
    }

    /// Inference-only forward pass. Takes `&self` and caches nothing.
    pub fn predict(&self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.forward(&current);
        }
        current
    }

    /// Fan-in of the first layer, or 0 for an empty network.
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, |l| l.input_size())
    }

    /// Width of the last layer, or 0 for an empty network.
    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// Every layer is internally consistent and feeds the next one.
    pub fn is_well_formed(&self) -> bool {
        self.layers.iter().all(|l| l.is_consistent())
            && self.layers.windows(2).all(|w| w[0].size == w[1].input_size())
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: &str) -> std::io::Result<Network> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::metadata::InputType;

    fn model_path(dir: &tempfile::TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn predict_shapes() {
        let net = Network::new(vec![
            (4, 6, ActivationFunction::ReLU),
            (2, 4, ActivationFunction::Softmax),
        ]);
        assert_eq!(net.input_size(), 6);
        assert_eq!(net.output_size(), 2);
        assert!(net.is_well_formed());

        let out = net.predict(&[0.1; 6]);
        assert_eq!(out.len(), 2);
        assert!((out.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn predict_is_deterministic() {
        let net = Network::new(vec![(3, 3, ActivationFunction::Tanh), (2, 3, ActivationFunction::Sigmoid)]);
        let input = [0.2, 0.4, 0.9];
        assert_eq!(net.predict(&input), net.predict(&input));
    }

    #[test]
    fn mismatched_layers_are_not_well_formed() {
        let net = Network::new(vec![(4, 6, ActivationFunction::ReLU), (2, 5, ActivationFunction::Softmax)]);
        assert!(!net.is_well_formed());
    }

    #[test]
    fn json_round_trip_keeps_metadata_and_outputs() {
        let net = Network::new(vec![(2, 3, ActivationFunction::Softmax)]).with_metadata(ModelMetadata {
            description: Some("tiny".into()),
            input_type: Some(InputType::ImageRgb { width: 1, height: 1 }),
            output_labels: Some(vec!["a".into(), "b".into()]),
        });
        let dir = tempfile::tempdir().unwrap();
        let path = model_path(&dir, "roundtrip.json");
        net.save_json(&path).unwrap();
        let loaded = Network::load_json(&path).unwrap();

        let meta = loaded.metadata.as_ref().unwrap();
        assert_eq!(meta.input_type, Some(InputType::ImageRgb { width: 1, height: 1 }));
        assert_eq!(meta.output_labels.as_deref(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(loaded.predict(&[0.5, 0.5, 0.5]), net.predict(&[0.5, 0.5, 0.5]));
    }

    #[test]
    fn file_without_metadata_still_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = model_path(&dir, "bare.json");
        let json = r#"{"layers":[{"size":1,"weights":{"rows":1,"cols":1,"data":[[2.0]]},
            "biases":{"rows":1,"cols":1,"data":[[0.5]]},"activator":"Identity"}]}"#;
        std::fs::write(&path, json).unwrap();
        let loaded = Network::load_json(&path).unwrap();

        assert!(loaded.metadata.is_none());
        assert_eq!(loaded.predict(&[1.0]), vec![2.5]);
    }

    #[test]
    fn garbage_json_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = model_path(&dir, "garbage.json");
        std::fs::write(&path, "not json").unwrap();
        let err = Network::load_json(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}

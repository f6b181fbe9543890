use serde::{Deserialize, Serialize};

/// Describes how to interpret the input fed to a Network.
/// Stored in model JSON; the classifier reads this to size its preprocessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputType {
    /// RGB image resized to width×height, normalized to [0, 1], flattened
    /// row-major as R,G,B,R,G,B,...
    ImageRgb { width: u32, height: u32 },
}

/// Optional annotations attached to a saved Network.
/// All fields are Option<> so bare weight files still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    pub description: Option<String>,
    pub input_type: Option<InputType>,
    /// Class labels for the output layer, in training order
    /// (e.g. ["healthy_", "unhealthy_"]).
    pub output_labels: Option<Vec<String>>,
}

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tiny_http::Request;

use ferrite_classify::{allowed_file, preprocess_image, Classifier};

use crate::routes::{request_header, ApiResponse};
use crate::state::AppState;
use crate::util::multipart::{extract_boundary, extract_file_part};
use crate::util::upload::TempUpload;

pub const MODEL_NOT_LOADED: &str = "Model not loaded. Cannot make predictions.";
pub const NO_FILE_PART: &str = "No file part in the request.";
pub const NO_SELECTED_FILE: &str = "No selected file.";
pub const DISALLOWED_TYPE: &str = "Allowed image types are png, jpg, jpeg";
pub const UNPROCESSABLE_IMAGE: &str = "Could not process image.";
pub const TOO_LARGE: &str = "Uploaded file is too large.";
pub const PREDICTION_FAILED: &str = "Prediction failed.";

/// Field name of the uploaded image in the form.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predicted_class: String,
    pub confidence: String,
}

// ---------------------------------------------------------------------------
// POST /predict
// ---------------------------------------------------------------------------

pub fn handle_request(request: &mut Request, state: &AppState) -> ApiResponse {
    // Checked before touching the body so an unloaded model always answers 500.
    let Some(classifier) = state.classifier.as_ref() else {
        log::error!("prediction requested but no model is loaded");
        return ApiResponse::error(500, MODEL_NOT_LOADED);
    };

    let content_type = request_header(request, "Content-Type").unwrap_or_default();

    if request.body_length().map_or(false, |len| len > state.max_upload_bytes) {
        log::warn!("rejecting upload: declared body exceeds {} bytes", state.max_upload_bytes);
        return ApiResponse::error(413, TOO_LARGE);
    }
    let mut body = Vec::new();
    let limit = (state.max_upload_bytes as u64).saturating_add(1);
    if let Err(e) = request.as_reader().take(limit).read_to_end(&mut body) {
        log::warn!("could not read request body: {}", e);
        return ApiResponse::error(400, NO_FILE_PART);
    }
    if body.len() > state.max_upload_bytes {
        log::warn!("rejecting upload: body exceeds {} bytes", state.max_upload_bytes);
        return ApiResponse::error(413, TOO_LARGE);
    }

    handle(classifier, &state.upload_dir, &content_type, &body)
}

/// Validates the multipart upload, classifies the image and formats the reply.
pub fn handle(classifier: &Classifier, upload_dir: &Path, content_type: &str, body: &[u8]) -> ApiResponse {
    let part = match extract_boundary(content_type)
        .and_then(|boundary| extract_file_part(body, &boundary, FILE_FIELD))
    {
        Some(part) => part,
        None => return ApiResponse::error(400, NO_FILE_PART),
    };

    if part.filename.is_empty() {
        return ApiResponse::error(400, NO_SELECTED_FILE);
    }
    if !allowed_file(&part.filename) {
        log::warn!("rejecting upload '{}': disallowed extension", part.filename);
        return ApiResponse::error(400, DISALLOWED_TYPE);
    }

    let (width, height) = classifier.input_size();
    let tensor = {
        let upload = match TempUpload::create(upload_dir, &part.filename, &part.data) {
            Ok(u) => u,
            Err(e) => {
                log::error!("could not save upload '{}': {}", part.filename, e);
                return ApiResponse::error(500, PREDICTION_FAILED);
            }
        };
        preprocess_image(upload.path(), width, height)
        // `upload` drops here, removing the file whether or not decoding worked.
    };
    let tensor = match tensor {
        Ok(t) => t,
        Err(e) => {
            log::warn!("could not process '{}': {}", part.filename, e);
            return ApiResponse::error(400, UNPROCESSABLE_IMAGE);
        }
    };

    match classifier.classify(&tensor) {
        Ok(prediction) => {
            let confidence = prediction.confidence_percent();
            log::info!("'{}' -> {} (class {}, {})", part.filename, prediction.label, prediction.index, confidence);
            ApiResponse::json(200, &PredictResponse { predicted_class: prediction.label, confidence })
        }
        Err(e) => {
            log::error!("inference failed for '{}': {}", part.filename, e);
            ApiResponse::error(500, PREDICTION_FAILED)
        }
    }
}

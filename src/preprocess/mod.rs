pub mod extension;
pub mod tensor;

pub use extension::{allowed_file, ALLOWED_EXTENSIONS};
pub use tensor::{preprocess_bytes, preprocess_image, ImageTensor, PreprocessError};

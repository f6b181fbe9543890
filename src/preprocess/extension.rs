/// File extensions accepted for upload, lower-case.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// True when `filename` has a `.` and its final suffix is an allowed image type.
/// The comparison ignores case, so `LEAF.JPG` passes.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

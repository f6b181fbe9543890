use std::path::PathBuf;

use clap::Parser;

/// Command-line and environment configuration for the prediction server.
#[derive(Debug, Clone, Parser)]
#[command(name = "server", version, about = "Serve a ferrite image classifier over HTTP")]
pub struct Config {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Trained model JSON (ferrite format, with image metadata).
    #[arg(long, env = "MODEL_PATH", default_value = "plant_growth_model.json")]
    pub model_path: String,

    /// Directory for temporary uploads; created if missing.
    #[arg(long, env = "UPLOAD_FOLDER", default_value = "uploads")]
    pub upload_folder: PathBuf,

    /// Class labels used when the model file carries none, in training order.
    #[arg(long, env = "CLASS_NAMES", value_delimiter = ',', default_value = "healthy_,unhealthy_")]
    pub class_names: Vec<String>,

    /// Largest accepted request body, in megabytes.
    #[arg(long, env = "MAX_UPLOAD_MB", default_value_t = 16)]
    pub max_upload_mb: usize,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cfg = Config::try_parse_from([
            "server",
            "--host", "127.0.0.1",
            "--port", "8080",
            "--model-path", "leaf.json",
            "--upload-folder", "/tmp/up",
            "--class-names", "ok,sick,dead",
            "--max-upload-mb", "2",
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.model_path, "leaf.json");
        assert_eq!(cfg.upload_folder, PathBuf::from("/tmp/up"));
        assert_eq!(cfg.class_names, vec!["ok", "sick", "dead"]);
        assert_eq!(cfg.max_upload_bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Config::try_parse_from(["server", "--port", "not-a-port"]).is_err());
    }
}

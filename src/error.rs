use thiserror::Error;

#[derive(Debug, Error)]
pub enum CubefallError {
    #[error("Failed to load settings: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Failed to write settings to {path}: {source}")]
    ConfigSave {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("No platform configuration directory available")]
    NoConfigDir,

    #[error("wgpu render state unavailable (is the wgpu renderer enabled?)")]
    WgpuUnavailable,
}

pub type CubefallResult<T> = Result<T, CubefallError>;

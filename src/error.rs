use thiserror::Error;

/// Error type for everything around the pixel pipeline
///
/// Filters and noise never fail. These cover config files, frame construction
/// and image I/O in the driver.
#[derive(Error, Debug)]
pub enum CamFxError {
    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Frame construction and frame I/O errors
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Sample count {len} does not match {width}x{height} RGBA")]
    DimensionMismatch { width: u32, height: u32, len: usize },

    #[error("Cannot read source image {path}")]
    LoadFailed { path: String },

    #[error("Cannot write frame to {path}: {reason}")]
    SaveFailed { path: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed TOML in {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("{key} = {value} is out of range")]
    InvalidValue { key: String, value: String },

    #[error("No config file at {path}")]
    FileNotFound { path: String },
}

pub type Result<T> = std::result::Result<T, CamFxError>;

impl CamFxError {
    /// Whether the frame loop may carry on after this error
    ///
    /// Failed reads and writes of individual frames are transient; bad configuration and
    /// malformed buffers are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Frame(FrameError::LoadFailed { .. } | FrameError::SaveFailed { .. })
        )
    }

    /// One-line message for the CLI
    pub fn user_message(&self) -> String {
        match self {
            Self::Frame(FrameError::LoadFailed { path }) => {
                format!("Could not open '{}'. Use a PNG or JPEG image as the camera source.", path)
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Config file '{}' not found.", path)
            }
            Self::Image(e) => {
                format!("The source image is not a readable PNG or JPEG ({}).", e)
            }
            Self::Config(ConfigError::InvalidValue { key, value }) => {
                format!("Setting '{}' cannot be '{}'.", key, value)
            }
            other => other.to_string(),
        }
    }
}

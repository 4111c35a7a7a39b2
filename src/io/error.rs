//! Error types for tile preparation, indexing, placement and mosaic assembly

use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Image data could not be decoded
    UnsupportedFormat {
        /// File the data came from, `None` for in-memory bytes
        path: Option<PathBuf>,
        /// Underlying decoding error
        source: image::ImageError,
    },

    /// Failed to read an image file
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// A tile, target, source or grid dimension is zero
    DegenerateSize {
        /// What the dimensions belong to
        subject: &'static str,
        /// Offending width
        width: u32,
        /// Offending height
        height: u32,
    },

    /// No tiles were supplied to build the mosaic from
    EmptyTileSet,

    /// A color query produced no candidate tiles
    NoCandidates,

    /// Placement policy configuration is not usable
    InvalidPolicyConfig {
        /// Explanation of why the configuration is invalid
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save the finished mosaic to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Global logger could not be installed
    LoggerInit {
        /// Underlying logger error
        source: log::SetLoggerError,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat {
                path: Some(path),
                source,
            } => {
                write!(
                    f,
                    "Unsupported image format in '{}': {source}",
                    path.display()
                )
            }
            Self::UnsupportedFormat { path: None, source } => {
                write!(f, "Unsupported image format: {source}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::DegenerateSize {
                subject,
                width,
                height,
            } => {
                write!(f, "Degenerate {subject} size {width}x{height}")
            }
            Self::EmptyTileSet => write!(f, "No tile images were supplied"),
            Self::NoCandidates => write!(f, "Color query produced no candidate tiles"),
            Self::InvalidPolicyConfig { reason } => {
                write!(f, "Invalid placement policy: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::LoggerInit { source } => {
                write!(f, "Failed to initialize logging: {source}")
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedFormat { source, .. }
            | Self::ImageLoad { source, .. }
            | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::LoggerInit { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::UnsupportedFormat {
            path: None,
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<log::SetLoggerError> for MosaicError {
    fn from(err: log::SetLoggerError) -> Self {
        Self::LoggerInit { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid policy configuration error
pub fn invalid_policy(reason: &impl ToString) -> MosaicError {
    MosaicError::InvalidPolicyConfig {
        reason: reason.to_string(),
    }
}

/// Fail with `DegenerateSize` when either dimension is zero
///
/// # Errors
///
/// Returns `DegenerateSize` naming `subject` if `width` or `height` is zero
pub fn ensure_extent(subject: &'static str, width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(MosaicError::DegenerateSize {
            subject,
            width,
            height,
        });
    }
    Ok(())
}

/// Fail with `InvalidParameter` unless `value` lies in [0, 1]
///
/// # Errors
///
/// Returns `InvalidParameter` naming `parameter` for values outside the unit
/// interval, including NaN
pub fn ensure_unit_interval(parameter: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(invalid_parameter(parameter, &value, &"must lie in [0, 1]"))
    }
}

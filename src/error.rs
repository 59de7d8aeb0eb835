use std::{path::PathBuf, process::ExitStatus};

use glam::UVec2;
use image::ImageFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("no {0} in dimension report")]
    MissingField(&'static str),
    #[error("unsupported output format {0:?}")]
    UnsupportedFormat(ImageFormat),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("crop of {size} at {offset} falls outside {dims}")]
    OutOfBounds {
        size: UVec2,
        offset: UVec2,
        dims: UVec2,
    },
}

/// Reasons a whole sheet is skipped
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("File missing: {}", .0.display())]
    Missing(PathBuf),
    #[error("Could not read dimensions for {0}")]
    Unmeasurable(String),
}

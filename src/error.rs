//! Error types of the scene-graph core.
//!
//! Every fallible operation of the crate returns [`Result<T>`], an alias for
//! `std::result::Result<T, NginError>`. Application code that only needs to
//! report errors can lift them into `anyhow::Error` with `?`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NginError {
    /// The resource key could not be resolved to an existing file.
    #[error("resource not found: {path}")]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but could not be read as an image.
    #[error("cannot load texture {path}: {source}")]
    TextureDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Checked access outside of `[0, len)`.
    #[error("index {index} is out of range for a collection of size {len}")]
    OutOfRange { index: usize, len: usize },

    /// A handle that does not (or no longer) refer to a live entry.
    #[error("unknown {0} handle")]
    UnknownHandle(&'static str),

    #[error("the default texture cannot be released")]
    DefaultTextureRelease,
}

pub type Result<T> = std::result::Result<T, NginError>;

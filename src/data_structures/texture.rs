//! Textures referenced by materials.
//!
//! A [`Texture`] is identified by its canonical file path. Pixel upload is the
//! backend's job; the engine only probes the image header so that a missing or
//! unreadable file is reported when the texture is first requested rather
//! than in the middle of a frame.

use std::path::{Path, PathBuf};

use crate::{
    error::{NginError, Result},
    resources::shader::ShaderBackend,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    path: PathBuf,
    width: u32,
    height: u32,
    unit: u32,
}

impl Texture {
    /// Probe the image at `path`, which is expected to be canonical already.
    ///
    /// # Arguments
    ///
    /// * `path` is the canonical path and doubles as the texture's identity
    /// * `unit` is the texture unit the texture is bound to
    pub fn from_path(path: &Path, unit: u32) -> Result<Self> {
        let (width, height) =
            image::image_dimensions(path).map_err(|source| NginError::TextureDecode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            unit,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn unit(&self) -> u32 {
        self.unit
    }

    pub fn set_unit(&mut self, unit: u32) {
        self.unit = unit;
    }

    /// Bind the texture to its unit on `shader`.
    pub fn processing(&self, shader: &mut dyn ShaderBackend) {
        shader.bind_texture(self.unit, self);
    }
}

/// A texture request: which file and which unit to bind it to.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureParams {
    pub path: PathBuf,
    pub unit: u32,
}

impl TextureParams {
    pub fn new(path: impl Into<PathBuf>, unit: u32) -> Self {
        Self {
            path: path.into(),
            unit,
        }
    }
}

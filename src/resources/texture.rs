use std::path::{Path, PathBuf};

use slotmap::new_key_type;

use crate::{
    config::EngineConfig,
    data_structures::texture::{Texture, TextureParams},
    error::{NginError, Result},
    resources::storage::KeyedStorage,
};

new_key_type! {
    /// Stable reference to a texture in the [`TextureStorage`].
    pub struct TextureHandle;
}

/// Resolve `path` to its canonical absolute form, which is the cache key.
pub fn canonical_path(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|source| NginError::ResourceNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/**
 * Texture cache keyed by canonical file path.
 *
 * At most one texture exists per canonical path for the lifetime of the
 * storage. The default texture is loaded on construction and stays until the
 * storage is dropped.
 */
pub struct TextureStorage {
    textures: KeyedStorage<PathBuf, TextureHandle, Texture>,
    default_texture: TextureHandle,
    default_path: PathBuf,
    default_unit: u32,
}

impl TextureStorage {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let default_path = canonical_path(&config.default_texture_path)?;
        let mut textures = KeyedStorage::new();
        let (default_texture, _) = textures.get_or_try_insert_with(default_path.as_path(), || {
            Texture::from_path(&default_path, config.default_texture_unit)
        })?;
        log::debug!("default texture {}", default_path.display());
        Ok(Self {
            textures,
            default_texture,
            default_path,
            default_unit: config.default_texture_unit,
        })
    }

    /// Like [`new`](Self::new), then preloads every path of `paths`.
    pub fn with_paths<P: AsRef<Path>>(
        config: &EngineConfig,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<Self> {
        let mut storage = Self::new(config)?;
        for path in paths {
            storage.get(path)?;
        }
        Ok(storage)
    }

    /// Texture for `path`, bound to the default unit.
    pub fn get(&mut self, path: impl AsRef<Path>) -> Result<TextureHandle> {
        self.get_with_unit(path, self.default_unit)
    }

    /// Texture for `path`, loaded on first request. Every request rebinds the
    /// texture to `unit`.
    pub fn get_with_unit(&mut self, path: impl AsRef<Path>, unit: u32) -> Result<TextureHandle> {
        let path = canonical_path(path.as_ref())?;
        let (handle, created) = self
            .textures
            .get_or_try_insert_with(path.as_path(), || Texture::from_path(&path, unit))?;
        if created {
            log::debug!("loaded texture {}", path.display());
        }
        if let Some(texture) = self.textures.get_mut(handle) {
            texture.set_unit(unit);
        }
        Ok(handle)
    }

    pub fn get_params(&mut self, params: &TextureParams) -> Result<TextureHandle> {
        self.get_with_unit(&params.path, params.unit)
    }

    pub fn default_texture(&mut self) -> TextureHandle {
        self.default_texture_with_unit(self.default_unit)
    }

    pub fn default_texture_with_unit(&mut self, unit: u32) -> TextureHandle {
        if let Some(texture) = self.textures.get_mut(self.default_texture) {
            texture.set_unit(unit);
        }
        self.default_texture
    }

    pub fn default_texture_path(&self) -> &Path {
        &self.default_path
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle)
    }

    /// Frees a texture. Materials still holding its handle skip it from now on.
    pub fn release(&mut self, handle: TextureHandle) -> Result<Texture> {
        if handle == self.default_texture {
            return Err(NginError::DefaultTextureRelease);
        }
        self.textures
            .release(handle)
            .ok_or(NginError::UnknownHandle("texture"))
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

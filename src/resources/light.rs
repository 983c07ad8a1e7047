//! Point lights visible to the uniform callbacks.

use cgmath::Vector3;
use slotmap::{SlotMap, new_key_type};

use crate::data_structures::color::Color;

new_key_type! {
    pub struct LightHandle;
}

/// Light terms uploaded into `pointLights[i]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl PointLight {
    // The usual Phong split of a single light color.
    const AMBIENT_FACTOR: f32 = 0.05;
    const DIFFUSE_FACTOR: f32 = 0.8;

    pub fn from_color(position: Vector3<f32>, color: Color) -> Self {
        Self {
            position,
            ambient: (color * Self::AMBIENT_FACTOR).to_vec3(),
            diffuse: (color * Self::DIFFUSE_FACTOR).to_vec3(),
            specular: color.to_vec3(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Published {
    light: PointLight,
    traversal: u64,
}

/// All point lights of the running application, in insertion order.
///
/// Every entry remembers the traversal it was last published in. A light that
/// misses a whole traversal has left the scene graph and is dropped at the
/// start of the next one.
#[derive(Default)]
pub struct LightStorage {
    lights: SlotMap<LightHandle, Published>,
    order: Vec<LightHandle>,
    traversal: u64,
}

impl LightStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a traversal and drops the lights nobody published during the
    /// previous one.
    pub fn begin_frame(&mut self) {
        self.traversal += 1;
        let current = self.traversal;
        let before = self.lights.len();
        self.lights.retain(|_, entry| entry.traversal + 1 >= current);
        if self.lights.len() != before {
            self.order.retain(|handle| self.lights.contains_key(*handle));
            log::debug!("dropped {} unpublished lights", before - self.lights.len());
        }
    }

    pub fn add(&mut self, light: PointLight) -> LightHandle {
        let handle = self.lights.insert(Published {
            light,
            traversal: self.traversal,
        });
        self.order.push(handle);
        handle
    }

    /// Overwrites a light and marks it published. Returns `false` if the
    /// handle is stale.
    pub fn update(&mut self, handle: LightHandle, light: PointLight) -> bool {
        match self.lights.get_mut(handle) {
            Some(entry) => {
                *entry = Published {
                    light,
                    traversal: self.traversal,
                };
                true
            }
            None => false,
        }
    }

    pub fn get(&self, handle: LightHandle) -> Option<&PointLight> {
        self.lights.get(handle).map(|entry| &entry.light)
    }

    pub fn release(&mut self, handle: LightHandle) -> Option<PointLight> {
        let entry = self.lights.remove(handle)?;
        self.order.retain(|h| *h != handle);
        Some(entry.light)
    }

    /// The first `max` lights in insertion order.
    pub fn active(&self, max: usize) -> impl Iterator<Item = &PointLight> {
        self.order
            .iter()
            .filter_map(|handle| self.lights.get(*handle))
            .map(|entry| &entry.light)
            .take(max)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }
}

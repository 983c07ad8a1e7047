use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::data_structures::{collection::CollectionOfShared, material::Material};

/// Canonical owner of every material. Objects only keep [`Weak`] references,
/// so releasing a material here makes its users skip it.
#[derive(Default)]
pub struct MaterialStorage {
    materials: CollectionOfShared<Material>,
}

impl MaterialStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, material: Material) -> Weak<RefCell<Material>> {
        let entry = self.materials.add_value(material);
        Rc::downgrade(&entry)
    }

    pub fn get(&self, material: &Weak<RefCell<Material>>) -> Option<Rc<RefCell<Material>>> {
        material
            .upgrade()
            .filter(|entry| self.materials.contains(entry))
    }

    /// Drops the storage's reference. Returns `false` if it was already gone.
    pub fn release(&mut self, material: &Weak<RefCell<Material>>) -> bool {
        match material.upgrade() {
            Some(entry) => self.materials.delete(&entry) > 0,
            None => false,
        }
    }

    pub fn materials(&self) -> &CollectionOfShared<Material> {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

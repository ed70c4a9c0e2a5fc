//! Guards that undo scene mutations when they go out of scope, on every exit
//! path. Each guard borrows the scene mutably and derefs to it, so guards nest.

use report_core::error::SceneError;
use report_core::model::ObjectId;
use report_core::naming::{assign_unique_name, revert_names, NameMap};
use report_core::scene::Scene;
use std::ops::{Deref, DerefMut};
use tracing::warn;

/// Restores the selection captured at construction.
pub struct SelectionScope<'a, S: Scene + ?Sized> {
    scene: &'a mut S,
    saved: Vec<ObjectId>,
}

impl<'a, S: Scene + ?Sized> SelectionScope<'a, S> {
    pub fn new(scene: &'a mut S) -> Self {
        let saved = scene.selected();
        Self { scene, saved }
    }

    pub fn saved(&self) -> &[ObjectId] {
        &self.saved
    }
}

impl<S: Scene + ?Sized> Deref for SelectionScope<'_, S> {
    type Target = S;
    fn deref(&self) -> &S {
        self.scene
    }
}

impl<S: Scene + ?Sized> DerefMut for SelectionScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.scene
    }
}

impl<S: Scene + ?Sized> Drop for SelectionScope<'_, S> {
    fn drop(&mut self) {
        self.scene.unselect_all();
        self.scene.select(&self.saved);
    }
}

/// Temporary object names; originals come back when the scope ends.
pub struct RenameScope<'a, S: Scene + ?Sized> {
    scene: &'a mut S,
    names: NameMap,
}

impl<'a, S: Scene + ?Sized> RenameScope<'a, S> {
    pub fn new(scene: &'a mut S) -> Self {
        Self {
            scene,
            names: NameMap::new(),
        }
    }

    pub fn assign(&mut self, ids: &[ObjectId]) -> Result<(), SceneError> {
        for &id in ids {
            assign_unique_name(&mut *self.scene, id, &mut self.names)?;
        }
        Ok(())
    }
}

impl<S: Scene + ?Sized> Deref for RenameScope<'_, S> {
    type Target = S;
    fn deref(&self) -> &S {
        self.scene
    }
}

impl<S: Scene + ?Sized> DerefMut for RenameScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.scene
    }
}

impl<S: Scene + ?Sized> Drop for RenameScope<'_, S> {
    fn drop(&mut self) {
        if let Err(err) = revert_names(&mut *self.scene, &mut self.names) {
            warn!("failed to restore object names: {err}");
        }
    }
}

/// Objects created for the duration of an export step; deleted when the
/// scope ends unless already gone.
pub struct TransientScope<'a, S: Scene + ?Sized> {
    scene: &'a mut S,
    ids: Vec<ObjectId>,
}

impl<'a, S: Scene + ?Sized> TransientScope<'a, S> {
    pub fn new(scene: &'a mut S) -> Self {
        Self {
            scene,
            ids: Vec::new(),
        }
    }

    pub fn track(&mut self, id: ObjectId) {
        self.ids.push(id);
    }

    pub fn track_all(&mut self, ids: &[ObjectId]) {
        self.ids.extend_from_slice(ids);
    }

    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Deletes the tracked objects now, reporting failure to the caller.
    pub fn release(mut self) -> Result<(), SceneError> {
        self.delete_tracked()
    }

    fn delete_tracked(&mut self) -> Result<(), SceneError> {
        let live: Vec<ObjectId> = std::mem::take(&mut self.ids)
            .into_iter()
            .filter(|&id| self.scene.contains(id))
            .collect();
        if live.is_empty() {
            return Ok(());
        }
        self.scene.delete(&live)
    }
}

impl<S: Scene + ?Sized> Deref for TransientScope<'_, S> {
    type Target = S;
    fn deref(&self) -> &S {
        self.scene
    }
}

impl<S: Scene + ?Sized> DerefMut for TransientScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.scene
    }
}

impl<S: Scene + ?Sized> Drop for TransientScope<'_, S> {
    fn drop(&mut self) {
        if let Err(err) = self.delete_tracked() {
            warn!("failed to delete transient objects: {err}");
        }
    }
}

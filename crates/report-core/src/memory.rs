//! In-memory host scene, built from a serializable scene document.

use crate::error::SceneError;
use crate::geom::{Vec3, Xform};
use crate::model::{
    BlockDefinition, DocumentInfo, Geometry, InstanceRef, LightData, MeshData, ObjectId,
    ObjectKind, ObjectRecord,
};
use crate::scene::Scene;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub document: DocumentInfo,
    #[serde(default)]
    pub blocks: Vec<BlockDefinition>,
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryScene {
    document: DocumentInfo,
    blocks: BTreeMap<String, BlockDefinition>,
    objects: BTreeMap<ObjectId, ObjectRecord>,
    selection: BTreeSet<ObjectId>,
    next_id: u64,
}

impl MemoryScene {
    pub fn new(document: DocumentInfo) -> Self {
        Self {
            document,
            next_id: 1,
            ..Self::default()
        }
    }

    pub fn from_document(doc: SceneDocument) -> Self {
        let mut scene = Self::new(doc.document);
        for block in doc.blocks {
            scene.add_block(block);
        }
        for record in doc.objects {
            let selected = record.selected;
            let id = scene.add(record);
            if selected {
                scene.selection.insert(id);
            }
        }
        scene
    }

    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            document: self.document.clone(),
            blocks: self.blocks.values().cloned().collect(),
            objects: self
                .objects
                .iter()
                .map(|(id, record)| ObjectRecord {
                    selected: self.selection.contains(id),
                    ..record.clone()
                })
                .collect(),
        }
    }

    pub fn document_mut(&mut self) -> &mut DocumentInfo {
        &mut self.document
    }

    pub fn add(&mut self, mut record: ObjectRecord) -> ObjectId {
        let id = ObjectId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        record.selected = false;
        self.objects.insert(id, record);
        id
    }

    pub fn add_block(&mut self, block: BlockDefinition) {
        self.blocks.insert(block.name.clone(), block);
    }

    pub fn block(&self, name: &str) -> Option<&BlockDefinition> {
        self.blocks.get(name)
    }

    pub fn record(&self, id: ObjectId) -> Option<&ObjectRecord> {
        self.objects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn get(&self, id: ObjectId) -> Result<&ObjectRecord, SceneError> {
        self.objects.get(&id).ok_or(SceneError::UnknownObject(id))
    }

    fn get_mut(&mut self, id: ObjectId) -> Result<&mut ObjectRecord, SceneError> {
        self.objects.get_mut(&id).ok_or(SceneError::UnknownObject(id))
    }
}

impl Scene for MemoryScene {
    fn document(&self) -> DocumentInfo {
        self.document.clone()
    }

    fn objects(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    fn kind(&self, id: ObjectId) -> Result<ObjectKind, SceneError> {
        Ok(self.get(id)?.kind())
    }

    fn name(&self, id: ObjectId) -> Result<Option<String>, SceneError> {
        Ok(self.get(id)?.name.clone())
    }

    fn set_name(&mut self, id: ObjectId, name: Option<&str>) -> Result<(), SceneError> {
        self.get_mut(id)?.name = name.map(str::to_string);
        Ok(())
    }

    fn layer(&self, id: ObjectId) -> Result<String, SceneError> {
        Ok(self.get(id)?.layer.clone())
    }

    fn set_layer(&mut self, id: ObjectId, layer: &str) -> Result<(), SceneError> {
        self.get_mut(id)?.layer = layer.to_string();
        Ok(())
    }

    fn selected(&self) -> Vec<ObjectId> {
        self.selection.iter().copied().collect()
    }

    fn select(&mut self, ids: &[ObjectId]) {
        for &id in ids {
            if self.objects.contains_key(&id) {
                self.selection.insert(id);
            }
        }
    }

    fn unselect_all(&mut self) {
        self.selection.clear();
    }

    fn instance(&self, id: ObjectId) -> Result<InstanceRef, SceneError> {
        match &self.get(id)?.geometry {
            Geometry::Instance { definition, xform } => Ok(InstanceRef {
                definition: definition.clone(),
                xform: *xform,
            }),
            _ => Err(SceneError::NotAnInstance(id)),
        }
    }

    fn light(&self, id: ObjectId) -> Result<LightData, SceneError> {
        match &self.get(id)?.geometry {
            Geometry::Light { light } => Ok(light.clone()),
            _ => Err(SceneError::NotALight(id)),
        }
    }

    fn render_mesh(&self, id: ObjectId) -> Result<Option<MeshData>, SceneError> {
        Ok(self.get(id)?.geometry.render_mesh().cloned())
    }

    fn insert_block(&mut self, definition: &str, origin: Vec3) -> Result<ObjectId, SceneError> {
        if !self.blocks.contains_key(definition) {
            return Err(SceneError::UnknownBlock(definition.to_string()));
        }
        Ok(self.add(ObjectRecord::new(
            None,
            Geometry::Instance {
                definition: definition.to_string(),
                xform: Xform::translation(origin),
            },
        )))
    }

    fn explode(&mut self, id: ObjectId) -> Result<Vec<ObjectId>, SceneError> {
        let instance = self.instance(id)?;
        let block = self
            .blocks
            .get(&instance.definition)
            .ok_or_else(|| SceneError::UnknownBlock(instance.definition.clone()))?;
        let parts: Vec<ObjectRecord> = block
            .objects
            .iter()
            .map(|record| ObjectRecord {
                geometry: record.geometry.transformed(&instance.xform),
                ..record.clone()
            })
            .collect();

        self.objects.remove(&id);
        self.selection.remove(&id);
        Ok(parts.into_iter().map(|record| self.add(record)).collect())
    }

    fn delete(&mut self, ids: &[ObjectId]) -> Result<(), SceneError> {
        let mut missing = None;
        for &id in ids {
            if self.objects.remove(&id).is_none() {
                missing.get_or_insert(id);
            }
            self.selection.remove(&id);
        }
        match missing {
            Some(id) => Err(SceneError::UnknownObject(id)),
            None => Ok(()),
        }
    }

    fn add_mesh(&mut self, mesh: MeshData) -> Result<ObjectId, SceneError> {
        if let Some(face) = mesh.invalid_face() {
            return Err(SceneError::InvalidMesh { face });
        }
        Ok(self.add(ObjectRecord::new(None, Geometry::Mesh { mesh })))
    }
}

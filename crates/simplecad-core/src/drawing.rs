//! 图形文档
//!
//! 持有全部实体（有序），实体之间没有相互引用。工具只通过 [`EntityId`]
//! 临时引用其中的实体。

use crate::entity::{Entity, EntityId};
use crate::math::BoundingBox2;
use crate::render::Renderer;
use tracing::debug;

/// 实体集合
#[derive(Debug, Clone, Default)]
pub struct Drawing {
    entities: Vec<Entity>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加实体，返回其ID
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        debug!("Added entity {} ({})", id, entity.type_name());
        self.entities.push(entity);
        id
    }

    /// 移除实体
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        debug!("Removed entity {}", id);
        Some(self.entities.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// 当前选中实体的ID（按添加顺序）
    pub fn selected_ids(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.id)
            .collect()
    }

    pub fn clear_selection(&mut self) {
        for entity in &mut self.entities {
            entity.selected = false;
        }
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// 所有可见实体包围盒的并集
    pub fn extents(&self) -> Option<BoundingBox2> {
        self.entities
            .iter()
            .filter_map(Entity::bounding_box)
            .reduce(|a, b| a.union(&b))
    }

    /// 按添加顺序绘制所有实体
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for entity in &self.entities {
            entity.draw(renderer);
        }
    }
}

impl<'a> IntoIterator for &'a Drawing {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

//! 选择服务
//!
//! 基于包围盒的粗略拾取，用于框选与快速定位。精确拾取见 [`Entity::hit_test`]。

use crate::entity::Entity;
use crate::math::{distance, BoundingBox2, Point2};
use serde::{Deserialize, Serialize};

/// 默认拾取半径
pub const DEFAULT_HIT_TEST_RADIUS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionService {
    /// 包围盒向外扩展的距离
    pub hit_test_radius: f64,
}

impl Default for SelectionService {
    fn default() -> Self {
        Self {
            hit_test_radius: DEFAULT_HIT_TEST_RADIUS,
        }
    }
}

impl SelectionService {
    pub fn new(hit_test_radius: f64) -> Self {
        Self { hit_test_radius }
    }

    /// 点是否落在扩展后的包围盒内
    pub fn hit_test(&self, entity: &Entity, point: &Point2) -> bool {
        entity
            .bounding_box()
            .is_some_and(|bbox| bbox.inflate(self.hit_test_radius).contains(point))
    }

    /// 命中实体中包围盒中心离点最近的一个
    pub fn find_entity_at<'a>(
        &self,
        entities: impl IntoIterator<Item = &'a Entity>,
        point: &Point2,
    ) -> Option<&'a Entity> {
        let mut nearest = None;
        let mut min_distance = f64::MAX;

        for entity in entities {
            if !self.hit_test(entity, point) {
                continue;
            }
            let Some(bbox) = entity.bounding_box() else {
                continue;
            };
            let d = distance(point, &bbox.center());
            if d < min_distance {
                min_distance = d;
                nearest = Some(entity);
            }
        }

        nearest
    }

    /// 包围盒与矩形相交的可见实体
    pub fn entities_in_rectangle<'a>(
        &self,
        entities: impl IntoIterator<Item = &'a Entity>,
        rect: &BoundingBox2,
    ) -> Vec<&'a Entity> {
        entities
            .into_iter()
            .filter(|e| e.bounding_box().is_some_and(|bbox| rect.intersects(&bbox)))
            .collect()
    }

    /// 单选时设为选中，多选时切换选中状态
    pub fn select_entity(&self, entity: &mut Entity, multi_select: bool) {
        if multi_select {
            entity.selected = !entity.selected;
        } else {
            entity.selected = true;
        }
    }

    pub fn clear_selection<'a>(&self, entities: impl IntoIterator<Item = &'a mut Entity>) {
        for entity in entities {
            entity.selected = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;

    fn entities() -> Vec<Entity> {
        vec![
            Entity::new(Line::new(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0))),
            Entity::new(Line::new(Point2::new(0.0, 10.0), Point2::new(20.0, 10.0))),
        ]
    }

    #[test]
    fn test_hit_test_uses_inflated_bounds() {
        let service = SelectionService::default();
        let list = entities();
        assert!(service.hit_test(&list[0], &Point2::new(50.0, 7.0)));
        assert!(!service.hit_test(&list[0], &Point2::new(50.0, 9.0)));
    }

    #[test]
    fn test_find_nearest_by_center() {
        let service = SelectionService::default();
        let list = entities();
        let found = service.find_entity_at(&list, &Point2::new(10.0, 5.0)).unwrap();
        assert_eq!(found.id, list[1].id);
        assert!(service.find_entity_at(&list, &Point2::new(500.0, 5.0)).is_none());
    }

    #[test]
    fn test_entities_in_rectangle_skips_invisible() {
        let service = SelectionService::default();
        let mut list = entities();
        let rect = BoundingBox2::new(Point2::new(-5.0, -5.0), Point2::new(50.0, 50.0));
        assert_eq!(service.entities_in_rectangle(&list, &rect).len(), 2);

        list[1].visible = false;
        assert_eq!(service.entities_in_rectangle(&list, &rect).len(), 1);
    }

    #[test]
    fn test_select_and_clear() {
        let service = SelectionService::default();
        let mut list = entities();

        service.select_entity(&mut list[0], false);
        service.select_entity(&mut list[0], false);
        assert!(list[0].selected);

        service.select_entity(&mut list[1], true);
        assert!(list[1].selected);
        service.select_entity(&mut list[1], true);
        assert!(!list[1].selected);

        service.clear_selection(&mut list);
        assert!(list.iter().all(|e| !e.selected));
    }
}

use crate::hit_objects::{HitObjectKind, ObjectId};

/// Presentation layers, back to front
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Judgment glyphs
    Judgment,
    /// Hit circles, slider bodies and spinners
    Body,
    /// Slider balls and follow circles
    Follow,
    Approach,
}

impl Layer {
    /// Layers used by an object of given kind
    pub fn for_kind(kind: &HitObjectKind) -> &'static [Layer] {
        match kind {
            HitObjectKind::Circle(_) => &[Layer::Judgment, Layer::Body, Layer::Approach],
            HitObjectKind::Slider(_) => {
                &[Layer::Judgment, Layer::Body, Layer::Follow, Layer::Approach]
            }
            HitObjectKind::Spinner(_) => &[Layer::Judgment, Layer::Body],
        }
    }
}

/// Sort key of a single drawable part, smaller keys are drawn first
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepthKey {
    pub layer: Layer,
    pub order: u32,
}

impl DepthKey {
    /// Bodies of earlier objects have to stay on top of later ones,
    /// everything else is stacked in activation order
    pub fn new(layer: Layer, activation: u32) -> Self {
        let order = match layer {
            Layer::Body => u32::MAX - activation,
            _ => activation,
        };

        Self { layer, order }
    }
}

/// Back to front list of every drawable part of the active objects
#[derive(Debug, Default, Clone)]
pub struct DrawOrder {
    entries: Vec<(DepthKey, ObjectId)>,
}

impl DrawOrder {
    pub fn insert(&mut self, key: DepthKey, id: ObjectId) {
        // Equal keys keep insertion order
        let idx = self.entries.partition_point(|(k, _)| *k <= key);
        self.entries.insert(idx, (key, id));
    }

    pub fn insert_object(&mut self, id: ObjectId, activation: u32, layers: &[Layer]) {
        for &layer in layers {
            self.insert(DepthKey::new(layer, activation), id);
        }
    }

    /// Drops every part of an object
    pub fn remove(&mut self, id: ObjectId) {
        self.entries.retain(|(_, entry)| *entry != id);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Layer, ObjectId)> + '_ {
        self.entries.iter().map(|(key, id)| (key.layer, *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodies(order: &DrawOrder) -> Vec<ObjectId> {
        order
            .iter()
            .filter(|(layer, _)| *layer == Layer::Body)
            .map(|(_, id)| id)
            .collect()
    }

    #[test]
    fn test_layers_are_grouped() {
        let mut order = DrawOrder::default();
        order.insert_object(0, 0, &[Layer::Judgment, Layer::Body, Layer::Approach]);
        order.insert_object(1, 1, &[Layer::Judgment, Layer::Body, Layer::Approach]);

        let layers: Vec<_> = order.iter().map(|(layer, _)| layer).collect();

        assert_eq!(
            layers,
            vec![
                Layer::Judgment,
                Layer::Judgment,
                Layer::Body,
                Layer::Body,
                Layer::Approach,
                Layer::Approach
            ]
        );
    }

    #[test]
    fn test_earlier_bodies_on_top() {
        let mut order = DrawOrder::default();

        for id in 0..4 {
            order.insert_object(id, id as u32, &[Layer::Body]);
        }

        assert_eq!(bodies(&order), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_approach_in_activation_order() {
        let mut order = DrawOrder::default();

        // Out of order insertion still ends up sorted
        order.insert_object(2, 2, &[Layer::Approach]);
        order.insert_object(0, 0, &[Layer::Approach]);
        order.insert_object(1, 1, &[Layer::Approach]);

        let ids: Vec<_> = order.iter().map(|(_, id)| id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_remove() {
        let mut order = DrawOrder::default();
        order.insert_object(0, 0, &[Layer::Judgment, Layer::Body]);
        order.insert_object(1, 1, &[Layer::Judgment, Layer::Body]);

        order.remove(0);

        assert_eq!(order.len(), 2);
        assert!(order.iter().all(|(_, id)| id == 1));
    }
}

//! Entities of the reference world and their bounding boxes.

use deploy_types::{EntityId, ItemStack, Vec3};
use serde::{Deserialize, Serialize};

/// What an entity is, with the state its interactions touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EntityKind {
    /// A sheep; drops wool when sheared.
    Sheep {
        /// Whether it has been sheared.
        #[serde(default)]
        sheared: bool,
    },
    /// A cow; fills buckets with milk.
    Cow,
    /// A wall-mounted frame that displays one item.
    ItemFrame {
        /// The displayed item.
        #[serde(default)]
        item: ItemStack,
        /// Eighth turns applied to the displayed item.
        #[serde(default)]
        rotation: u8,
    },
    /// A stand that holds one item in its hand.
    ArmorStand {
        /// The held item.
        #[serde(default)]
        held: ItemStack,
    },
    /// A boat.
    Boat,
}

impl EntityKind {
    /// Whether this kind is a living creature.
    pub const fn is_living(&self) -> bool {
        matches!(self, Self::Sheep { .. } | Self::Cow | Self::ArmorStand { .. })
    }

    /// Half width and height of the bounding box.
    pub const fn dimensions(&self) -> (f64, f64) {
        match self {
            Self::Sheep { .. } => (0.45, 1.3),
            Self::Cow => (0.45, 1.4),
            Self::ItemFrame { .. } => (0.375, 0.75),
            Self::ArmorStand { .. } => (0.25, 1.975),
            Self::Boat => (0.6875, 0.5625),
        }
    }
}

/// An entity in the reference world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Identity.
    pub id: EntityId,
    /// Kind and kind-specific state.
    pub kind: EntityKind,
    /// Bottom-centre position.
    pub position: Vec3,
    /// Set by a name tag.
    #[serde(default)]
    pub named: bool,
    /// Set by feeding.
    #[serde(default)]
    pub in_love: bool,
}

impl Entity {
    /// A fresh entity of `kind` standing at `position`.
    pub fn new(kind: EntityKind, position: Vec3) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            position,
            named: false,
            in_love: false,
        }
    }

    /// Minimum and maximum corners of the bounding box.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let (half, height) = self.kind.dimensions();
        let p = self.position;
        (
            Vec3::new(p.x - half, p.y, p.z - half),
            Vec3::new(p.x + half, p.y + height, p.z + half),
        )
    }

    /// Distance along the ray at which it enters the bounding box, if it
    /// does so within `range`. A ray starting inside hits at distance 0.
    pub fn ray_entry(&self, origin: Vec3, direction: Vec3, range: f64) -> Option<f64> {
        let (min, max) = self.bounds();
        let mut t_near = 0.0_f64;
        let mut t_far = range;
        for (o, d, lo, hi) in [
            (origin.x, direction.x, min.x, max.x),
            (origin.y, direction.y, min.y, max.y),
            (origin.z, direction.z, min.z, max.z),
        ] {
            if d.abs() < f64::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let a = (lo - o) / d;
            let b = (hi - o) / d;
            t_near = t_near.max(a.min(b));
            t_far = t_far.min(a.max(b));
            if t_near > t_far {
                return None;
            }
        }
        Some(t_near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn living_kinds() {
        assert!(EntityKind::Cow.is_living());
        assert!(EntityKind::Sheep { sheared: false }.is_living());
        assert!(!EntityKind::Boat.is_living());
        assert!(
            !EntityKind::ItemFrame {
                item: ItemStack::EMPTY,
                rotation: 0,
            }
            .is_living()
        );
    }

    #[test]
    fn ray_hits_box_in_front() {
        let cow = Entity::new(EntityKind::Cow, Vec3::new(0.5, 64.0, 1.5));
        let hit = cow.ray_entry(Vec3::new(0.5, 64.5, 0.5), Vec3::new(0.0, 0.0, 1.0), 1.5);
        let t = hit.unwrap_or(f64::NAN);
        assert!((t - 0.55).abs() < 1e-9, "entry at {t}");
    }

    #[test]
    fn ray_misses_box_out_of_range() {
        let cow = Entity::new(EntityKind::Cow, Vec3::new(0.5, 64.0, 3.5));
        let hit = cow.ray_entry(Vec3::new(0.5, 64.5, 0.5), Vec3::new(0.0, 0.0, 1.0), 1.5);
        assert!(hit.is_none());
    }

    #[test]
    fn ray_from_inside_hits_immediately() {
        let sheep = Entity::new(EntityKind::Sheep { sheared: false }, Vec3::new(0.5, 64.0, 0.5));
        let hit = sheep.ray_entry(Vec3::new(0.5, 64.5, 0.5), Vec3::new(1.0, 0.0, 0.0), 1.5);
        assert_eq!(hit.map(f64::to_bits), Some(0.0_f64.to_bits()));
    }
}

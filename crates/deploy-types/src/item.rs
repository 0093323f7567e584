//! Item catalog and item stacks.
//!
//! The catalog is closed, so item behaviour that callers branch on is
//! exposed as capability queries on [`ItemKind`] rather than as type checks:
//! whether the item places a block, whether it writes sign text, and whether
//! a plain right-click may be tried when clicking a block did nothing.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::BlockKind;

/// Default maximum stack size.
pub const DEFAULT_MAX_STACK: u32 = 64;

/// Durability of a pair of shears.
pub const SHEARS_MAX_DAMAGE: u32 = 238;

/// Every item the simulation knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// The empty item.
    #[default]
    Air,
    /// Places stone.
    Stone,
    /// Places dirt.
    Dirt,
    /// Places planks.
    Planks,
    /// Places a wool block.
    Wool,
    /// Places a sign and accepts text.
    Sign,
    /// Places a lily pad onto water.
    LilyPad,
    /// Empty bucket; scoops up liquid sources.
    Bucket,
    /// Bucket of water; pours a water source.
    WaterBucket,
    /// Bucket of lava; pours a lava source.
    LavaBucket,
    /// Bucket of milk.
    MilkBucket,
    /// Spawns a boat on water.
    Boat,
    /// Empty bottle; fills from water.
    GlassBottle,
    /// Bottle of water.
    WaterBottle,
    /// Shears sheep.
    Shears,
    /// Names a creature.
    NameTag,
    /// Animal feed.
    Wheat,
    /// Plain crafting material with no interactions.
    Stick,
}

impl ItemKind {
    /// The block this item places, if it is block-like.
    pub const fn placed_block(self) -> Option<BlockKind> {
        match self {
            Self::Stone => Some(BlockKind::Stone),
            Self::Dirt => Some(BlockKind::Dirt),
            Self::Planks => Some(BlockKind::Planks),
            Self::Wool => Some(BlockKind::Wool),
            Self::Sign => Some(BlockKind::Sign),
            Self::LilyPad => Some(BlockKind::LilyPad),
            _ => None,
        }
    }

    /// Whether this item places a block when used on a surface.
    pub const fn is_block_like(self) -> bool {
        self.placed_block().is_some()
    }

    /// Whether placement of this item creates a text-bearing block entity.
    pub const fn is_sign_like(self) -> bool {
        matches!(self, Self::Sign)
    }

    /// Whether a plain right-click is worth trying after a block
    /// interaction failed to consume the attempt.
    pub const fn supports_use_fallback(self) -> bool {
        matches!(
            self,
            Self::Bucket
                | Self::WaterBucket
                | Self::LavaBucket
                | Self::Boat
                | Self::LilyPad
                | Self::GlassBottle
        )
    }

    /// Maximum number of this item in one slot.
    pub const fn max_stack_size(self) -> u32 {
        match self {
            Self::Air => 0,
            Self::WaterBucket
            | Self::LavaBucket
            | Self::MilkBucket
            | Self::Boat
            | Self::Shears => 1,
            Self::Bucket | Self::Sign => 16,
            _ => DEFAULT_MAX_STACK,
        }
    }

    /// Durability before the item breaks, for damageable items.
    pub const fn max_damage(self) -> Option<u32> {
        match self {
            Self::Shears => Some(SHEARS_MAX_DAMAGE),
            _ => None,
        }
    }
}

/// A count of one item kind plus its auxiliary data.
///
/// Equality is structural over kind, count, and damage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ItemStack {
    /// What the stack holds.
    pub item: ItemKind,
    /// How many.
    pub count: u32,
    /// Auxiliary data (wear for damageable items).
    #[serde(default)]
    pub damage: u32,
}

impl ItemStack {
    /// The empty stack.
    pub const EMPTY: Self = Self {
        item: ItemKind::Air,
        count: 0,
        damage: 0,
    };

    /// A stack of `count` fresh items.
    pub const fn new(item: ItemKind, count: u32) -> Self {
        Self {
            item,
            count,
            damage: 0,
        }
    }

    /// A single fresh item.
    pub const fn one(item: ItemKind) -> Self {
        Self::new(item, 1)
    }

    /// Whether the stack holds nothing.
    pub const fn is_empty(&self) -> bool {
        self.count == 0 || matches!(self.item, ItemKind::Air)
    }

    /// Maximum size of a stack of this item.
    pub const fn max_stack_size(&self) -> u32 {
        self.item.max_stack_size()
    }

    /// Whether `other` can merge into this stack's slot.
    pub fn is_stackable_with(&self, other: &Self) -> bool {
        self.item == other.item && self.damage == other.damage && self.max_stack_size() > 1
    }

    /// Copy of this stack with a different count.
    pub const fn with_count(&self, count: u32) -> Self {
        Self {
            item: self.item,
            count,
            damage: self.damage,
        }
    }

    /// Remove up to `amount` items, returning them as a new stack.
    pub fn split(&mut self, amount: u32) -> Self {
        let taken = amount.min(self.count);
        self.shrink(taken);
        self.with_count(taken)
    }

    /// Remove `amount` items, emptying the stack if that reaches zero.
    pub fn shrink(&mut self, amount: u32) {
        self.count = self.count.saturating_sub(amount);
        if self.count == 0 {
            *self = Self::EMPTY;
        }
    }

    /// Add `amount` items.
    pub const fn grow(&mut self, amount: u32) {
        self.count = self.count.saturating_add(amount);
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("empty")
        } else {
            write!(f, "{} x {:?}", self.count, self.item)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sentinel() {
        assert!(ItemStack::EMPTY.is_empty());
        assert!(ItemStack::new(ItemKind::Stone, 0).is_empty());
        assert!(ItemStack::new(ItemKind::Air, 5).is_empty());
        assert!(!ItemStack::one(ItemKind::Stone).is_empty());
    }

    #[test]
    fn equality_is_structural() {
        let mut worn = ItemStack::one(ItemKind::Shears);
        assert_eq!(worn, ItemStack::one(ItemKind::Shears));
        worn.damage = 3;
        assert_ne!(worn, ItemStack::one(ItemKind::Shears));
    }

    #[test]
    fn split_takes_at_most_available() {
        let mut stack = ItemStack::new(ItemKind::Dirt, 3);
        let taken = stack.split(5);
        assert_eq!(taken, ItemStack::new(ItemKind::Dirt, 3));
        assert!(stack.is_empty());
        assert_eq!(stack, ItemStack::EMPTY);
    }

    #[test]
    fn shrink_to_zero_becomes_empty() {
        let mut stack = ItemStack::new(ItemKind::Sign, 2);
        stack.shrink(1);
        assert_eq!(stack.count, 1);
        stack.shrink(1);
        assert_eq!(stack, ItemStack::EMPTY);
    }

    #[test]
    fn capabilities() {
        assert!(ItemKind::Stone.is_block_like());
        assert!(ItemKind::Sign.is_block_like());
        assert!(ItemKind::Sign.is_sign_like());
        assert!(ItemKind::LilyPad.is_block_like());
        assert!(ItemKind::LilyPad.supports_use_fallback());
        assert!(ItemKind::Bucket.supports_use_fallback());
        assert!(!ItemKind::Bucket.is_block_like());
        assert!(!ItemKind::MilkBucket.supports_use_fallback());
        assert!(!ItemKind::Shears.supports_use_fallback());
    }

    #[test]
    fn unstackable_items_never_merge() {
        let a = ItemStack::one(ItemKind::WaterBucket);
        assert!(!a.is_stackable_with(&a.clone()));
        let b = ItemStack::new(ItemKind::Stone, 10);
        assert!(b.is_stackable_with(&ItemStack::one(ItemKind::Stone)));
    }
}

//! How the reference world responds to interactions.
//!
//! Each response mirrors the familiar behaviour of its item or entity:
//! block items place a block, buckets scoop and pour, shears take wool, a
//! name tag names a creature. Anything else passes.

use deploy_agents::{DropSink, OperatorProxy};
use deploy_types::{
    BlockHit, BlockKind, BlockPos, Direction, EntityId, InteractionResult, ItemKind, ItemStack, Vec3,
};
use rand::Rng;

use crate::collaborator::{ItemUse, World};
use crate::entity::EntityKind;
use crate::grid::GridWorld;

/// How far a plain item use reaches.
pub const ITEM_REACH: f64 = 5.0;

/// Sampling step of the item-use ray.
const RAY_STEP: f64 = 0.05;

/// Which liquids stop the item-use ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FluidMode {
    /// Liquids are transparent.
    Pass,
    /// Liquids are hit like solid blocks.
    Stop,
}

/// The first block the ray stopped at and the cell the ray came from.
#[derive(Debug, Clone, Copy)]
struct RayHit {
    position: BlockPos,
    before: BlockPos,
}

/// What shearing, milking, or feeding left to do after the entity itself was
/// updated.
enum Aftermath {
    Nothing,
    Drop { stack: ItemStack, at: Vec3 },
}

impl GridWorld {
    pub(crate) fn respond_interact_at(
        &mut self,
        entity: EntityId,
        operator: &mut OperatorProxy,
    ) -> InteractionResult {
        let Some(target) = self.entities.get_mut(&entity) else {
            return InteractionResult::Pass;
        };
        let EntityKind::ArmorStand { held } = &mut target.kind else {
            return InteractionResult::Pass;
        };

        let hand = operator.held_item_mut();
        if held.is_empty() && !hand.is_empty() {
            *held = hand.split(1);
            InteractionResult::Success
        } else if !held.is_empty() && hand.is_empty() {
            *hand = core::mem::take(held);
            InteractionResult::Success
        } else {
            InteractionResult::Pass
        }
    }

    pub(crate) fn respond_interact(
        &mut self,
        entity: EntityId,
        operator: &mut OperatorProxy,
        drops: &mut dyn DropSink,
    ) -> InteractionResult {
        let Some(target) = self.entities.get_mut(&entity) else {
            return InteractionResult::Pass;
        };
        let hand = operator.held_item().item;
        let at = target.position + Vec3::new(0.0, 1.0, 0.0);

        let aftermath = match (&mut target.kind, hand) {
            (EntityKind::ItemFrame { item, rotation }, _) => {
                if item.is_empty() {
                    if operator.held_item().is_empty() {
                        return InteractionResult::Pass;
                    }
                    *item = operator.held_item_mut().split(1);
                } else {
                    *rotation = rotation.wrapping_add(1) & 7;
                }
                Aftermath::Nothing
            }
            (EntityKind::Sheep { sheared }, ItemKind::Shears) if !*sheared => {
                *sheared = true;
                damage_tool(operator.held_item_mut());
                let wool = self.rng.random_range(1..=3_u32);
                match drops.emit(entity, ItemStack::new(ItemKind::Wool, wool)) {
                    Some(stack) => Aftermath::Drop { stack, at },
                    None => Aftermath::Nothing,
                }
            }
            (EntityKind::Cow, ItemKind::Bucket) => {
                let held = core::mem::take(operator.held_item_mut());
                let (result, spill) = fill_container(held, ItemStack::one(ItemKind::MilkBucket), operator);
                operator.load_held_item(result);
                match spill {
                    Some(stack) => Aftermath::Drop { stack, at },
                    None => Aftermath::Nothing,
                }
            }
            (EntityKind::Sheep { .. } | EntityKind::Cow, ItemKind::Wheat) if !target.in_love => {
                target.in_love = true;
                operator.held_item_mut().shrink(1);
                Aftermath::Nothing
            }
            _ => return InteractionResult::Pass,
        };

        if let Aftermath::Drop { stack, at } = aftermath {
            self.scatter(stack, at);
        }
        InteractionResult::Consume
    }

    pub(crate) fn respond_use_on_living(&mut self, entity: EntityId, operator: &mut OperatorProxy) -> InteractionResult {
        if operator.held_item().item != ItemKind::NameTag {
            return InteractionResult::Pass;
        }
        match self.entities.get_mut(&entity) {
            Some(target) if target.kind.is_living() && !target.named => {
                target.named = true;
                operator.held_item_mut().shrink(1);
                InteractionResult::Success
            }
            _ => InteractionResult::Pass,
        }
    }

    pub(crate) fn respond_use_on_block(&mut self, operator: &mut OperatorProxy, hit: &BlockHit) -> InteractionResult {
        let held = operator.held_item();
        let Some(block) = held.item.placed_block() else {
            return InteractionResult::Pass;
        };
        // Lily pads only go onto water, through plain use.
        if held.item == ItemKind::LilyPad {
            return InteractionResult::Pass;
        }

        let target = if self.can_be_replaced(hit.position, held, hit) {
            hit.position
        } else {
            hit.position.relative(hit.side)
        };
        if !self.is_in_bounds(target) || !self.block(target).is_replaceable() {
            return InteractionResult::Fail;
        }

        self.put_block(target, block);
        operator.held_item_mut().shrink(1);
        tracing::debug!(%target, ?block, "block placed");
        InteractionResult::Success
    }

    pub(crate) fn respond_use(&mut self, operator: &mut OperatorProxy) -> ItemUse {
        let stack = operator.held_item().clone();
        let origin = operator.eye_position();
        let direction = operator.view_vector();

        match stack.item {
            ItemKind::Bucket => {
                let Some(hit) = self.trace(origin, direction, FluidMode::Stop) else {
                    return ItemUse::pass(stack);
                };
                let filled = match self.block(hit.position) {
                    BlockKind::Water => ItemKind::WaterBucket,
                    BlockKind::Lava => ItemKind::LavaBucket,
                    _ => return ItemUse::pass(stack),
                };
                self.put_block(hit.position, BlockKind::Air);
                self.filled(stack, filled, operator)
            }
            ItemKind::WaterBucket | ItemKind::LavaBucket => {
                let Some(hit) = self.trace(origin, direction, FluidMode::Pass) else {
                    return ItemUse::pass(stack);
                };
                let target = if self.block(hit.position).is_replaceable() {
                    hit.position
                } else {
                    hit.before
                };
                if !self.is_in_bounds(target) || !self.block(target).is_replaceable() {
                    return ItemUse {
                        result: InteractionResult::Fail,
                        stack,
                    };
                }
                let liquid = if stack.item == ItemKind::WaterBucket {
                    BlockKind::Water
                } else {
                    BlockKind::Lava
                };
                self.put_block(target, liquid);
                ItemUse {
                    result: InteractionResult::Success,
                    stack: ItemStack::one(ItemKind::Bucket),
                }
            }
            ItemKind::GlassBottle => match self.trace(origin, direction, FluidMode::Stop) {
                Some(hit) if self.block(hit.position) == BlockKind::Water => {
                    self.filled(stack, ItemKind::WaterBottle, operator)
                }
                _ => ItemUse::pass(stack),
            },
            ItemKind::LilyPad => {
                let Some(hit) = self.trace(origin, direction, FluidMode::Stop) else {
                    return ItemUse::pass(stack);
                };
                let above = hit.position.relative(Direction::Up);
                if self.block(hit.position) != BlockKind::Water
                    || !self.is_in_bounds(above)
                    || !self.block(above).is_air()
                {
                    return ItemUse::pass(stack);
                }
                self.put_block(above, BlockKind::LilyPad);
                let mut rest = stack;
                rest.shrink(1);
                ItemUse {
                    result: InteractionResult::Success,
                    stack: rest,
                }
            }
            ItemKind::Boat => {
                let Some(hit) = self.trace(origin, direction, FluidMode::Stop) else {
                    return ItemUse::pass(stack);
                };
                let at = hit.position.corner() + Vec3::new(0.5, 1.0, 0.5);
                if self.spawn_entity(EntityKind::Boat, at).is_err() {
                    return ItemUse {
                        result: InteractionResult::Fail,
                        stack,
                    };
                }
                let mut rest = stack;
                rest.shrink(1);
                ItemUse {
                    result: InteractionResult::Success,
                    stack: rest,
                }
            }
            _ => ItemUse::pass(stack),
        }
    }

    /// Swap one empty container out of `stack` for `filled`.
    fn filled(&mut self, stack: ItemStack, filled: ItemKind, operator: &mut OperatorProxy) -> ItemUse {
        let (result, spill) = fill_container(stack, ItemStack::one(filled), operator);
        if let Some(spill) = spill {
            self.scatter(spill, operator.eye_position());
        }
        ItemUse {
            result: InteractionResult::Success,
            stack: result,
        }
    }

    /// March from `origin` along `direction` and report the first block that
    /// stops the ray. Agent blocks never stop it.
    fn trace(&self, origin: Vec3, direction: Vec3, fluids: FluidMode) -> Option<RayHit> {
        let mut last: Option<BlockPos> = None;
        let mut distance = 0.0;
        while distance <= ITEM_REACH {
            let cell = BlockPos::containing(origin + direction * distance);
            distance += RAY_STEP;
            if last == Some(cell) {
                continue;
            }
            let stops = match self.block(cell) {
                BlockKind::Air | BlockKind::Turtle => false,
                BlockKind::Water | BlockKind::Lava => fluids == FluidMode::Stop,
                _ => true,
            };
            if stops {
                return Some(RayHit {
                    position: cell,
                    before: last.unwrap_or(cell),
                });
            }
            last = Some(cell);
        }
        None
    }
}

/// Trade one item of `container` for `filled`.
///
/// A single container becomes the filled item outright. Otherwise the
/// container stack shrinks by one and the filled item goes to the operator's
/// pockets; whatever the pockets cannot take is returned as spill.
fn fill_container(
    container: ItemStack,
    filled: ItemStack,
    operator: &mut OperatorProxy,
) -> (ItemStack, Option<ItemStack>) {
    if container.count <= 1 {
        return (filled, None);
    }
    let mut rest = container;
    rest.shrink(1);
    let spill = operator.add_item(filled);
    (rest, (!spill.is_empty()).then_some(spill))
}

/// Wear a tool by one use, breaking it at its damage limit.
fn damage_tool(tool: &mut ItemStack) {
    let Some(max) = tool.item.max_damage() else {
        return;
    };
    tool.damage = tool.damage.saturating_add(1);
    if tool.damage >= max {
        *tool = ItemStack::EMPTY;
    }
}

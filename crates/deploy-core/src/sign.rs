//! Writing text onto a freshly placed sign.
//!
//! Text is laid out over the sign's four lines: one or two lines of text
//! start on the second line so short messages sit in the middle, longer
//! text starts at the top. Lines are cut to what fits on the sign.

use deploy_types::{BlockEntityId, BlockPos, Direction, SIGN_LINES};
use deploy_world::World;

/// Characters that fit on one sign line.
pub const SIGN_LINE_WIDTH: usize = 15;

/// Lay `text` out over the four sign lines.
///
/// `text` is split on `\n` with trailing empty lines dropped. Lines past the
/// fourth are discarded.
pub fn layout_sign_text(text: &str) -> [String; SIGN_LINES] {
    let mut split: Vec<&str> = text.split('\n').collect();
    while split.last().is_some_and(|line| line.is_empty()) {
        split.pop();
    }
    let first = usize::from(split.len() <= 2);

    let mut lines: [String; SIGN_LINES] = Default::default();
    for (slot, line) in lines.iter_mut().skip(first).zip(&split) {
        *slot = line.chars().take(SIGN_LINE_WIDTH).collect();
    }
    lines
}

/// Write `text` onto the sign placed by a click on `side` of `position`.
///
/// The sign is looked for at `position` first, unless nothing is there or
/// the block entity there is `existing` (it predates the click), in which
/// case it is looked for in front of the clicked face. Returns whether a
/// sign was written.
pub fn apply_sign_text(
    world: &mut dyn World,
    position: BlockPos,
    side: Direction,
    existing: Option<BlockEntityId>,
    text: &str,
) -> bool {
    let at = match world.block_entity(position) {
        Some(id) if Some(id) != existing => position,
        _ => position.relative(side),
    };

    let Some(sign) = world.sign_text_mut(at) else {
        tracing::warn!(%position, %at, "placed sign has no sign entity, text not written");
        return false;
    };
    sign.lines = layout_sign_text(text);

    world.mark_block_entity_changed(at);
    world.send_block_updated(at);
    tracing::debug!(%at, "sign text written");
    true
}

use voxelbox_common::BlockType;

/// A discrete, edge-triggered request produced by input.
///
/// The session consumes actions, never raw input events, so both input
/// schemes drive the same world logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place the active block at the preview cell.
    Place,
    /// Remove the block under the look ray.
    Remove,
    /// Step the active block through the table by the given amount.
    CycleBlock(i32),
    /// Make the given block active.
    SelectBlock(BlockType),
    /// Show or hide the inspector panel.
    ToggleInspector,
    /// The platform layer should grab and hide the cursor.
    CapturePointer,
    /// The platform layer should release the cursor.
    ReleasePointer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_compare_by_payload() {
        assert_eq!(Action::CycleBlock(1), Action::CycleBlock(1));
        assert_ne!(Action::CycleBlock(1), Action::CycleBlock(-1));
        assert_ne!(
            Action::SelectBlock(BlockType::Glass),
            Action::SelectBlock(BlockType::Sand)
        );
    }
}

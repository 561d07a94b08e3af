//! Vertical stacking of block boxes.
//!
//! Every block becomes a fixed-height leaf in a taffy flex column whose width
//! is the content width. Taffy positions the leaves top to bottom; rounding
//! is disabled so offsets stay exact sums of the outer heights.

use taffy::prelude::*;

use super::engine::LayoutError;

/// Outer-box tops of the stacked blocks plus the total stack height.
#[derive(Debug, Clone, PartialEq)]
pub struct Stacked {
    pub tops: Vec<f32>,
    pub height: f32,
}

/// Collects block outer heights and stacks them with taffy.
pub struct BlockStack {
    tree: TaffyTree<()>,
    children: Vec<NodeId>,
}

impl BlockStack {
    pub fn new() -> Self {
        let mut tree = TaffyTree::new();
        tree.disable_rounding();
        Self {
            tree,
            children: Vec::new(),
        }
    }

    /// Append a block whose outer box is `outer_height` tall.
    pub fn push(&mut self, outer_height: f32) -> Result<(), LayoutError> {
        let leaf = self
            .tree
            .new_leaf(Style {
                flex_shrink: 0.0,
                size: Size {
                    width: Dimension::AUTO,
                    height: Dimension::from_length(outer_height.max(0.0)),
                },
                ..Default::default()
            })
            .map_err(stacking_error)?;
        self.children.push(leaf);
        Ok(())
    }

    /// Lay the column out at `width` and read back each block's top.
    pub fn compute(mut self, width: f32) -> Result<Stacked, LayoutError> {
        let root = self
            .tree
            .new_with_children(
                Style {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Column,
                    size: Size {
                        width: Dimension::from_length(width),
                        height: Dimension::AUTO,
                    },
                    ..Default::default()
                },
                &self.children,
            )
            .map_err(stacking_error)?;

        self.tree
            .compute_layout(
                root,
                Size {
                    width: AvailableSpace::Definite(width),
                    height: AvailableSpace::MaxContent,
                },
            )
            .map_err(stacking_error)?;

        let mut tops = Vec::with_capacity(self.children.len());
        for &child in &self.children {
            tops.push(self.tree.layout(child).map_err(stacking_error)?.location.y);
        }
        let height = self.tree.layout(root).map_err(stacking_error)?.size.height;
        Ok(Stacked { tops, height })
    }
}

impl Default for BlockStack {
    fn default() -> Self {
        Self::new()
    }
}

fn stacking_error(err: taffy::TaffyError) -> LayoutError {
    LayoutError::Stacking(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_has_zero_height() {
        let stacked = BlockStack::new().compute(100.0).unwrap();
        assert!(stacked.tops.is_empty());
        assert_eq!(stacked.height, 0.0);
    }

    #[test]
    fn boxes_stack_top_to_bottom() {
        let mut stack = BlockStack::new();
        for h in [32.0, 22.0, 0.0, 10.0] {
            stack.push(h).unwrap();
        }
        let stacked = stack.compute(200.0).unwrap();
        assert_eq!(stacked.tops, vec![0.0, 32.0, 54.0, 54.0]);
        assert_eq!(stacked.height, 64.0);
    }

    #[test]
    fn boxes_do_not_shrink_to_fit() {
        let mut stack = BlockStack::new();
        stack.push(500.0).unwrap();
        stack.push(500.0).unwrap();
        let stacked = stack.compute(10.0).unwrap();
        assert_eq!(stacked.tops, vec![0.0, 500.0]);
        assert_eq!(stacked.height, 1000.0);
    }
}

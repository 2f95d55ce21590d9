use super::COLUMNS;
use crate::geometry::{Measurement, Rect};

/// Resting rectangle of one menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSlot {
    /// Child index; the toggle is child 0 so items start at 1.
    pub index: usize,
    pub line_tag: usize,
    pub rect: Rect,
}

impl ItemSlot {
    /// Vertical distance an item travels between collapsed and resting.
    pub fn collapse_offset(&self) -> i32 {
        self.rect.top
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLayout {
    pub toggle: Rect,
    pub items: Vec<ItemSlot>,
    pub rows: usize,
    pub horizontal_gap: i32,
    pub vertical_gap: i32,
}

impl MenuLayout {
    /// Places the toggle and every item. `vertical_gap` is already in pixels.
    pub fn calculate(measurement: &Measurement, vertical_gap: i32) -> Self {
        let item = measurement.item_size();
        let (c_width, c_height) = (item.width, item.height);
        let height = measurement.container.height;
        let left_padding = measurement.padding.left;

        let horizontal_gap = (measurement.usable_width() - COLUMNS as i32 * c_width) / 2;

        // toggle sits in the third column slot, one gap above the bottom edge
        let toggle = Rect::new(
            2 * horizontal_gap + 2 * c_width + left_padding,
            height - c_height - vertical_gap,
            2 * horizontal_gap + 3 * c_width + left_padding,
            height - vertical_gap,
        );

        let child_count = measurement.children.len();
        let rows = row_count(child_count);

        let items = (1..child_count)
            .map(|index| {
                let tag = line_tag(index, rows);
                let tag_i = tag as i32;
                let column = (index - 1) as i32 - tag_i * COLUMNS as i32;

                let horizontal_offset = column * (horizontal_gap + c_width);
                let vertical_offset = (2 - tag_i) * vertical_gap;

                let left = horizontal_offset + left_padding;
                let rect = Rect::new(
                    left,
                    height - (2 - tag_i) * c_height - vertical_offset,
                    left + c_width,
                    height - (1 - tag_i) * c_height - vertical_offset,
                );

                ItemSlot {
                    index,
                    line_tag: tag,
                    rect,
                }
            })
            .collect();

        Self {
            toggle,
            items,
            rows,
            horizontal_gap,
            vertical_gap,
        }
    }

    pub fn item(&self, index: usize) -> Option<&ItemSlot> {
        index
            .checked_sub(1)
            .and_then(|i| self.items.get(i))
    }

    /// Layout rectangle of any child, toggle included.
    pub fn rect(&self, index: usize) -> Option<Rect> {
        if index == 0 {
            Some(self.toggle)
        } else {
            self.item(index).map(|s| s.rect)
        }
    }
}

/// Rows needed for the menu items of `child_count` children (the toggle excluded).
pub fn row_count(child_count: usize) -> usize {
    child_count.saturating_sub(1).div_ceil(COLUMNS)
}

/// Groups items into `rows` buckets by consecutive index. With 6 items and 2 rows
/// this yields tags 0,0,1,1,2,2 rather than a row-major 0,0,0,1,1,1.
///
/// `index` is a child index with items starting at 1. The toggle (index 0) has no
/// row and shares tag 0 with the first item.
pub fn line_tag(index: usize, rows: usize) -> usize {
    index.saturating_sub(1) / rows.max(1)
}

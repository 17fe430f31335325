//! Lookup from target identity to rendered elements.
//!
//! The presentation layer owns its rendered rows. The core only needs to read
//! and write their visual style, which [`RenderSurface`] captures. A ready-made
//! [`HandleTable`] keeps an index-keyed (and id-keyed) table of handles that
//! the presentation layer rebinds after each render pass.

use super::request::{Property, Target};
use crate::domain::{Item, ItemId};
use std::collections::HashMap;

/// Visual state of a rendered element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualStyle {
    pub opacity: f32,
    pub translate_y: f32,
    pub scale: f32,
    pub rotation: f32,
    pub highlight: f32,
}

impl Default for VisualStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            highlight: 0.0,
        }
    }
}

impl VisualStyle {
    #[must_use]
    pub const fn get(&self, property: Property) -> f32 {
        match property {
            Property::Opacity => self.opacity,
            Property::TranslateY => self.translate_y,
            Property::Scale => self.scale,
            Property::Rotation => self.rotation,
            Property::Highlight => self.highlight,
        }
    }

    pub fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::Opacity => self.opacity = value,
            Property::TranslateY => self.translate_y = value,
            Property::Scale => self.scale = value,
            Property::Rotation => self.rotation = value,
            Property::Highlight => self.highlight = value,
        }
    }
}

/// Read/write access to whatever is currently rendered for a target.
///
/// Both methods report a missing or detached element instead of failing:
/// `style` returns `None` and `apply_style` returns `false`.
pub trait RenderSurface {
    fn style(&self, target: Target) -> Option<VisualStyle>;

    fn apply_style(&mut self, target: Target, style: VisualStyle) -> bool;
}

/// A rendered element the core can restyle.
pub trait StyleHandle {
    fn style(&self) -> VisualStyle;

    fn set_style(&mut self, style: VisualStyle);
}

/// Headless handle that records the style applied to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowHandle {
    style: VisualStyle,
    writes: usize,
}

impl RowHandle {
    /// Number of times a style has been applied.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl StyleHandle for RowHandle {
    fn style(&self) -> VisualStyle {
        self.style
    }

    fn set_style(&mut self, style: VisualStyle) {
        self.style = style;
        self.writes += 1;
    }
}

/// Index-keyed table of rendered row handles plus the add-button icon.
///
/// # Examples
///
/// ```
/// use listkeeper::domain::{Item, ItemId};
/// use listkeeper::transition::{HandleTable, RenderSurface, RowHandle, Target};
///
/// let items = vec![Item::new(ItemId(1), "milk"), Item::new(ItemId(2), "eggs")];
/// let mut table: HandleTable<RowHandle> = HandleTable::default();
/// table.sync(&items, |_| RowHandle::default());
///
/// assert!(table.style(Target::Row(1)).is_some());
/// assert!(table.style(Target::Item(ItemId(2))).is_some());
/// assert!(table.style(Target::Row(2)).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct HandleTable<H> {
    rows: Vec<Option<(ItemId, H)>>,
    icon: Option<H>,
}

impl<H> Default for HandleTable<H> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            icon: None,
        }
    }
}

impl<H: StyleHandle> HandleTable<H> {
    /// Binds `handle` as the element rendering `id` at `index`.
    pub fn bind_row(&mut self, index: usize, id: ItemId, handle: H) {
        if self.rows.len() <= index {
            self.rows.resize_with(index + 1, || None);
        }
        self.rows[index] = Some((id, handle));
    }

    /// Detaches the row at `index`, returning its handle.
    pub fn unbind_row(&mut self, index: usize) -> Option<H> {
        self.rows.get_mut(index).and_then(Option::take).map(|(_, h)| h)
    }

    pub fn bind_icon(&mut self, handle: H) {
        self.icon = Some(handle);
    }

    pub fn unbind_icon(&mut self) -> Option<H> {
        self.icon.take()
    }

    /// Number of row slots, bound or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Re-indexes the table after the sequence changed structurally.
    ///
    /// Handles follow their item id to its new position; items without a
    /// handle get one from `make`; handles of items no longer present are
    /// dropped.
    pub fn sync(&mut self, items: &[Item], mut make: impl FnMut(&Item) -> H) {
        let mut by_id: HashMap<ItemId, H> = self.rows.drain(..).flatten().collect();

        self.rows = items
            .iter()
            .map(|item| {
                let handle = by_id.remove(&item.id).unwrap_or_else(|| make(item));
                Some((item.id, handle))
            })
            .collect();
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&H> {
        self.rows.get(index).and_then(Option::as_ref).map(|(_, h)| h)
    }

    #[must_use]
    pub const fn icon(&self) -> Option<&H> {
        self.icon.as_ref()
    }

    fn resolve(&self, target: Target) -> Option<&H> {
        match target {
            Target::Row(index) => self.row(index),
            Target::Item(id) => self
                .rows
                .iter()
                .flatten()
                .find(|(row_id, _)| *row_id == id)
                .map(|(_, h)| h),
            Target::AddIcon => self.icon.as_ref(),
        }
    }

    fn resolve_mut(&mut self, target: Target) -> Option<&mut H> {
        match target {
            Target::Row(index) => self
                .rows
                .get_mut(index)
                .and_then(Option::as_mut)
                .map(|(_, h)| h),
            Target::Item(id) => self
                .rows
                .iter_mut()
                .flatten()
                .find(|(row_id, _)| *row_id == id)
                .map(|(_, h)| h),
            Target::AddIcon => self.icon.as_mut(),
        }
    }
}

impl<H: StyleHandle> RenderSurface for HandleTable<H> {
    fn style(&self, target: Target) -> Option<VisualStyle> {
        self.resolve(target).map(StyleHandle::style)
    }

    fn apply_style(&mut self, target: Target, style: VisualStyle) -> bool {
        match self.resolve_mut(target) {
            Some(handle) => {
                handle.set_style(style);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[i64]) -> Vec<Item> {
        ids.iter().map(|&id| Item::new(ItemId(id), format!("item-{id}"))).collect()
    }

    #[test]
    fn sync_moves_handles_with_their_items() {
        let mut table: HandleTable<RowHandle> = HandleTable::default();
        table.sync(&items(&[1, 2, 3]), |_| RowHandle::default());

        let marked = VisualStyle {
            scale: 1.15,
            ..VisualStyle::default()
        };
        assert!(table.apply_style(Target::Row(0), marked));

        table.sync(&items(&[2, 3, 1]), |_| RowHandle::default());

        assert_eq!(table.style(Target::Row(2)).map(|s| s.scale), Some(1.15));
        assert_eq!(table.style(Target::Item(ItemId(1))).map(|s| s.scale), Some(1.15));
        assert_eq!(table.style(Target::Row(0)).map(|s| s.scale), Some(1.0));
    }

    #[test]
    fn sync_drops_removed_rows() {
        let mut table: HandleTable<RowHandle> = HandleTable::default();
        table.sync(&items(&[1, 2]), |_| RowHandle::default());
        table.sync(&items(&[2]), |_| RowHandle::default());

        assert_eq!(table.len(), 1);
        assert!(table.style(Target::Item(ItemId(1))).is_none());
    }

    #[test]
    fn unbound_targets_are_reported_not_fatal() {
        let mut table: HandleTable<RowHandle> = HandleTable::default();
        table.bind_row(2, ItemId(9), RowHandle::default());

        assert!(table.style(Target::Row(0)).is_none());
        assert!(!table.apply_style(Target::Row(5), VisualStyle::default()));
        assert!(!table.apply_style(Target::AddIcon, VisualStyle::default()));

        assert!(table.unbind_row(2).is_some());
        assert!(table.style(Target::Row(2)).is_none());
    }
}

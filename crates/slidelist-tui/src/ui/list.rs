//! Reorderable list widget.
//!
//! Items are fixed-height cards of `rows_per_item` terminal rows. Drag
//! offsets and slide translations are in virtual pixels; [`RowGeometry`]
//! maps between pixels and rows.

use std::collections::HashMap;

use compact_str::CompactString;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use slidelist_core::SlideState;

use crate::theme::Theme;

/// Mapping between terminal rows and virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    pub item_height: u32,
    pub rows_per_item: u16,
}

impl RowGeometry {
    pub fn new(item_height: u32, rows_per_item: u16) -> Self {
        Self {
            item_height,
            rows_per_item: rows_per_item.max(1),
        }
    }

    /// Virtual pixels covered by one terminal row.
    pub fn px_per_row(&self) -> f32 {
        self.item_height as f32 / f32::from(self.rows_per_item)
    }

    /// Pixel position of a terminal row.
    pub fn row_to_px(&self, row: u16) -> f32 {
        f32::from(row) * self.px_per_row()
    }

    /// Nearest whole number of rows for a pixel offset.
    pub fn px_to_rows(&self, px: f32) -> i32 {
        (px / self.px_per_row()).round() as i32
    }

    /// Number of items that fit (fully or partly) in `height` rows.
    pub fn visible_items(&self, height: u16) -> usize {
        usize::from(height.div_ceil(self.rows_per_item))
    }

    /// Index of the item under a terminal cell, if any.
    pub fn hit_test(
        &self,
        area: Rect,
        scroll: usize,
        len: usize,
        column: u16,
        row: u16,
    ) -> Option<usize> {
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }
        let index = scroll + usize::from((row - area.y) / self.rows_per_item);
        (index < len).then_some(index)
    }
}

/// Renders the list with slide translations and live drag offsets.
pub struct ListView<'a> {
    items: &'a [CompactString],
    slides: &'a HashMap<CompactString, SlideState>,
    dragged: &'a [(usize, f32)],
    geometry: RowGeometry,
    scroll: usize,
    theme: &'a Theme,
}

impl<'a> ListView<'a> {
    pub fn new(
        items: &'a [CompactString],
        slides: &'a HashMap<CompactString, SlideState>,
        geometry: RowGeometry,
        theme: &'a Theme,
    ) -> Self {
        Self {
            items,
            slides,
            dragged: &[],
            geometry,
            scroll: 0,
            theme,
        }
    }

    /// Items being dragged or settling, with their offsets in pixels.
    pub fn dragged(mut self, dragged: &'a [(usize, f32)]) -> Self {
        self.dragged = dragged;
        self
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn base_row(&self, index: usize) -> i64 {
        (index as i64 - self.scroll as i64) * i64::from(self.geometry.rows_per_item)
    }

    fn render_card(&self, top: i64, label: &str, style: Style, area: Rect, buf: &mut Buffer) {
        let rows = i64::from(self.geometry.rows_per_item);
        // The last row of a multi-row card is left blank as a gap.
        let filled = if rows > 1 { rows - 1 } else { rows };
        let label_row = (filled - 1) / 2;

        for offset in 0..filled {
            let y = i64::from(area.y) + top + offset;
            if y < i64::from(area.y) || y >= i64::from(area.y + area.height) {
                continue;
            }
            let Ok(y) = u16::try_from(y) else {
                continue;
            };

            buf.set_style(Rect::new(area.x, y, area.width, 1), style);
            if offset == label_row {
                let line = Line::from(vec![
                    Span::styled(" ≡ ", style.patch(self.theme.item_handle)),
                    Span::styled(label.to_string(), style),
                ]);
                buf.set_line(area.x, y, &line, area.width);
            }
        }
    }
}

impl Widget for ListView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = self.geometry.item_height;

        for (index, item) in self.items.iter().enumerate() {
            if self.dragged.iter().any(|(dragged, _)| *dragged == index) {
                continue;
            }
            let state = self.slides.get(item).copied().unwrap_or_default();
            let shift = self.geometry.px_to_rows(state.translation(height) as f32);
            let style = if state.is_displaced() {
                self.theme.item_displaced
            } else {
                self.theme.item
            };
            self.render_card(self.base_row(index) + i64::from(shift), item, style, area, buf);
        }

        // Dragged items float above their neighbors.
        for &(index, offset) in self.dragged {
            let Some(item) = self.items.get(index) else {
                continue;
            };
            let shift = self.geometry.px_to_rows(offset);
            self.render_card(
                self.base_row(index) + i64::from(shift),
                item,
                self.theme.item_dragged,
                area,
                buf,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn items(count: usize) -> Vec<CompactString> {
        (0..count)
            .map(|i| compact_str::format_compact!("Item {i}"))
            .collect()
    }

    #[test]
    fn test_geometry_conversions() {
        let geometry = RowGeometry::new(50, 2);
        assert_eq!(geometry.px_per_row(), 25.0);
        assert_eq!(geometry.row_to_px(4), 100.0);
        assert_eq!(geometry.px_to_rows(-50.0), -2);
        assert_eq!(geometry.px_to_rows(37.0), 1);
        assert_eq!(geometry.visible_items(5), 3);
    }

    #[test]
    fn test_zero_rows_per_item_is_clamped() {
        let geometry = RowGeometry::new(50, 0);
        assert_eq!(geometry.rows_per_item, 1);
        assert_eq!(geometry.px_per_row(), 50.0);
    }

    #[test]
    fn test_hit_test() {
        let geometry = RowGeometry::new(50, 2);
        let area = Rect::new(0, 1, 20, 10);

        assert_eq!(geometry.hit_test(area, 0, 5, 3, 1), Some(0));
        assert_eq!(geometry.hit_test(area, 0, 5, 3, 4), Some(1));
        assert_eq!(geometry.hit_test(area, 2, 5, 3, 4), Some(3));
        assert_eq!(geometry.hit_test(area, 0, 5, 3, 0), None);
        assert_eq!(geometry.hit_test(area, 0, 2, 3, 9), None);
        assert_eq!(geometry.hit_test(area, 0, 5, 25, 3), None);
    }

    #[test]
    fn test_render_at_rest() {
        let theme = Theme::dark();
        let list = items(3);
        let slides = HashMap::new();
        let area = Rect::new(0, 0, 16, 6);
        let mut buf = Buffer::empty(area);

        ListView::new(&list, &slides, RowGeometry::new(50, 2), &theme).render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), " ≡ Item 0");
        assert_eq!(row_text(&buf, 1), "");
        assert_eq!(row_text(&buf, 2), " ≡ Item 1");
        assert_eq!(row_text(&buf, 4), " ≡ Item 2");
    }

    #[test]
    fn test_render_displacement_and_drag() {
        let theme = Theme::dark();
        let list = items(3);
        let slides = HashMap::from([(CompactString::from("Item 1"), SlideState::Up)]);
        let dragged = [(0, 50.0)];
        let area = Rect::new(0, 0, 16, 6);
        let mut buf = Buffer::empty(area);

        ListView::new(&list, &slides, RowGeometry::new(50, 2), &theme)
            .dragged(&dragged)
            .render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), " ≡ Item 1");
        assert_eq!(row_text(&buf, 2), " ≡ Item 0");
        assert_eq!(buf[(4, 2)].style().bg, theme.item_dragged.bg);
        assert_eq!(row_text(&buf, 4), " ≡ Item 2");
    }

    #[test]
    fn test_render_respects_scroll() {
        let theme = Theme::light();
        let list = items(10);
        let slides = HashMap::new();
        let area = Rect::new(0, 0, 16, 4);
        let mut buf = Buffer::empty(area);

        ListView::new(&list, &slides, RowGeometry::new(50, 2), &theme)
            .scroll(7)
            .render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), " ≡ Item 7");
        assert_eq!(row_text(&buf, 2), " ≡ Item 8");
    }
}

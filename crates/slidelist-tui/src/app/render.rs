//! Application rendering.

use std::collections::HashMap;

use compact_str::CompactString;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use slidelist_core::{CommitMode, SlideState};

use crate::theme::Theme;
use crate::ui::{AppLayout, HelpOverlay, ListView, RowGeometry};

use super::state::AppMode;

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub mode: AppMode,
    pub theme: &'a Theme,
    pub items: &'a [CompactString],
    pub slides: &'a HashMap<CompactString, SlideState>,
    pub dragged: &'a [(usize, f32)],
    pub geometry: RowGeometry,
    pub scroll: usize,
    pub commit_mode: CommitMode,
    pub status: Option<(bool, &'a str)>,
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    // Fill entire area with theme background color
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    let layout = AppLayout::new(area);

    render_header(ctx, layout.header, buf);

    ListView::new(ctx.items, ctx.slides, ctx.geometry, ctx.theme)
        .dragged(ctx.dragged)
        .scroll(ctx.scroll)
        .render(layout.main, buf);

    render_footer(ctx, layout.footer, buf);

    if ctx.mode == AppMode::Help {
        HelpOverlay::new(ctx.theme).render(area, buf);
    }
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let title = Span::styled(" slidelist ", ctx.theme.title.add_modifier(Modifier::BOLD));

    let stats = Span::styled(
        format!(" {} items, {} on drop ", ctx.items.len(), ctx.commit_mode),
        ctx.theme.header,
    );

    let status = match ctx.status {
        Some((success, msg)) => {
            let color = if success {
                ctx.theme.success
            } else {
                ctx.theme.warning
            };
            Span::styled(format!(" {} ", msg), Style::default().fg(color))
        }
        None if !ctx.dragged.is_empty() => Span::styled(
            " dragging ",
            Style::default()
                .fg(ctx.theme.background)
                .bg(ctx.theme.info),
        ),
        None => Span::raw(""),
    };

    let line = Line::from(vec![title, Span::raw(" "), stats, status]);

    Paragraph::new(line)
        .style(ctx.theme.header)
        .render(area, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let mut keys: Vec<(&str, &str)> = vec![("hold", "Drag"), ("j/k", "Scroll")];
    if ctx.dragged.is_empty() {
        keys.push(("r", "Reset"));
    } else {
        keys.push(("Esc", "Cancel"));
    }
    let mode_hint = match ctx.commit_mode {
        CommitMode::Swap => "Move",
        CommitMode::Move => "Swap",
    };
    keys.extend([("m", mode_hint), ("?", "Help"), ("q", "Quit")]);

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {} ", key), ctx.theme.help_key),
                Span::styled(format!("{} ", desc), ctx.theme.help_desc),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans))
        .style(ctx.theme.footer)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    fn render(ctx: &RenderContext, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        render_app(ctx, area, &mut buf);
        buf
    }

    #[test]
    fn test_header_footer_and_list() {
        let theme = Theme::dark();
        let items: Vec<CompactString> = ["Alpha", "Beta"].map(CompactString::from).into();
        let slides = HashMap::new();
        let ctx = RenderContext {
            mode: AppMode::Normal,
            theme: &theme,
            items: &items,
            slides: &slides,
            dragged: &[],
            geometry: RowGeometry::new(50, 2),
            scroll: 0,
            commit_mode: CommitMode::Swap,
            status: Some((true, "Order reset")),
        };
        let buf = render(&ctx, Rect::new(0, 0, 70, 8));

        let header = line_text(&buf, 0);
        assert!(header.contains("slidelist"));
        assert!(header.contains("2 items, swap on drop"));
        assert!(header.contains("Order reset"));

        assert!(line_text(&buf, 1).contains("Alpha"));
        assert!(line_text(&buf, 3).contains("Beta"));

        let footer = line_text(&buf, 7);
        assert!(footer.contains("Reset"));
        assert!(footer.contains("m Move"));
    }

    #[test]
    fn test_dragging_footer_offers_cancel() {
        let theme = Theme::light();
        let items: Vec<CompactString> = ["Alpha", "Beta"].map(CompactString::from).into();
        let slides = HashMap::new();
        let dragged = [(0, 10.0)];
        let ctx = RenderContext {
            mode: AppMode::Normal,
            theme: &theme,
            items: &items,
            slides: &slides,
            dragged: &dragged,
            geometry: RowGeometry::new(50, 2),
            scroll: 0,
            commit_mode: CommitMode::Move,
            status: None,
        };
        let buf = render(&ctx, Rect::new(0, 0, 70, 8));

        assert!(line_text(&buf, 0).contains("dragging"));
        let footer = line_text(&buf, 7);
        assert!(footer.contains("Esc Cancel"));
        assert!(footer.contains("m Swap"));
    }

    #[test]
    fn test_help_overlay() {
        let theme = Theme::dark();
        let items: Vec<CompactString> = Vec::new();
        let slides = HashMap::new();
        let ctx = RenderContext {
            mode: AppMode::Help,
            theme: &theme,
            items: &items,
            slides: &slides,
            dragged: &[],
            geometry: RowGeometry::new(50, 2),
            scroll: 0,
            commit_mode: CommitMode::Swap,
            status: None,
        };
        let buf = render(&ctx, Rect::new(0, 0, 60, 24));

        let text: String = (0..24).map(|y| line_text(&buf, y)).collect();
        assert!(text.contains("Help"));
        assert!(text.contains("Toggle swap/move commit"));
    }
}

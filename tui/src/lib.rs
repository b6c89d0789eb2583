//! TUI rendering for the wallet using ratatui.

mod effects;
mod input;
mod theme;

pub use effects::{apply_card_effect, lerp_color};
pub use input::{InputPump, apply_event, handle_events};
pub use theme::{CardBorder, Glyphs, Palette, card_color, glyphs, palette, styles};

use std::borrow::Cow;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use wallet_engine::{App, Card, CardPose, Face, StackViewport};

use self::theme::ASCII_BORDER;

/// Physical card proportions (width : height).
const CARD_ASPECT: f32 = 8.5 / 5.5;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let area = frame.area();

    draw_background(frame.buffer_mut(), area, &palette);

    let [stack_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    draw_stack(frame, app, stack_area, &palette, &glyphs);
    draw_status_bar(frame, app, status_area, &palette, &glyphs);
}

fn draw_background(buf: &mut Buffer, area: Rect, palette: &Palette) {
    let span = f32::from(area.height.saturating_sub(1).max(1));
    for row in 0..area.height {
        let color = lerp_color(palette.bg_top, palette.bg_bottom, f32::from(row) / span);
        buf.set_style(
            Rect::new(area.x, area.y + row, area.width, 1),
            Style::default().bg(color),
        );
    }
}

/// Width of a face-on card with the given height, clamped to `available` columns.
#[must_use]
pub fn card_width(card_height: u16, available: u16) -> u16 {
    let width = (f32::from(card_height) * CARD_ASPECT * CELL_ASPECT).round() as u16;
    width.min(available)
}

fn draw_stack(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let inner = area.inner(Margin::new(2, 1));
    let width = card_width(app.stack().metrics().card_height, inner.width);
    let viewport = StackViewport {
        y: inner.y,
        height: inner.height,
        card_x: inner.x + inner.width.saturating_sub(width) / 2,
        card_width: width,
    };
    app.set_viewport(viewport);

    if width == 0 || inner.height == 0 {
        return;
    }

    let scroll = i32::from(app.scroll_offset());
    let stack = app.stack();
    for pose in stack.poses() {
        let Some(card) = stack.cards().get(pose.index) else {
            continue;
        };
        let top = i32::from(pose.offset) - scroll;
        let bottom = top + i32::from(pose.height);
        if bottom <= 0 || top >= i32::from(inner.height) {
            continue;
        }

        let base = Rect::new(viewport.card_x, 0, width, pose.height);
        let rect = apply_card_effect(&pose, base);
        let mut scratch = Buffer::empty(Rect::new(0, 0, rect.width, rect.height));
        render_card(&mut scratch, card, &pose, palette, glyphs);
        blit_rows(frame.buffer_mut(), &scratch, rect.x, inner, top);
    }
}

/// Copy `scratch` onto `buf` with its first row at `top` rows below `clip.y`, dropping
/// rows outside `clip`.
fn blit_rows(buf: &mut Buffer, scratch: &Buffer, x: u16, clip: Rect, top: i32) {
    let area = scratch.area;
    for row in 0..area.height {
        let y = top + i32::from(row);
        if y < 0 || y >= i32::from(clip.height) {
            continue;
        }
        let Ok(y) = u16::try_from(y) else {
            continue;
        };
        for column in 0..area.width {
            let target_x = x + column;
            if target_x >= clip.right() {
                break;
            }
            buf[(target_x, clip.y + y)] = scratch[(column, row)].clone();
        }
    }
}

fn render_card(buf: &mut Buffer, card: &Card, pose: &CardPose, palette: &Palette, glyphs: &Glyphs) {
    let area = buf.area;
    let style = Style::default()
        .fg(card_color(card.foreground_color))
        .bg(card_color(card.background_color));
    let border_style = if pose.state.is_selected() {
        Style::default()
            .fg(palette.selection_border(card.background_color))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(card_color(card.foreground_color))
    };

    let block = Block::bordered().style(style).border_style(border_style);
    let block = match glyphs.border {
        CardBorder::Rounded => block.border_type(BorderType::Rounded),
        CardBorder::Ascii => block.border_set(ASCII_BORDER),
    };

    let body_height = usize::from(area.height.saturating_sub(2));
    let middle = body_height / 2;
    let mut lines = vec![Line::default(); body_height];
    match pose.face {
        Face::Front => {
            let room = usize::from(area.width.saturating_sub(3));
            let title = truncate_to_width(&card.title, room, glyphs.ellipsis);
            if let Some(first) = lines.first_mut() {
                *first = Line::from(Span::styled(
                    format!(" {title}"),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            if middle > 0
                && let Some(line) = lines.get_mut(middle)
            {
                *line = Line::from(card.number.as_str()).alignment(Alignment::Center);
            }
        }
        Face::Back => {
            if let Some(line) = lines.get_mut(middle) {
                *line = Line::from(glyphs.back_label).alignment(Alignment::Center);
            }
        }
    }

    Paragraph::new(lines).block(block).render(area, buf);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let bar_style = styles::status_bar(palette);
    let key = styles::key_highlight(palette);
    let hint = styles::key_hint(palette);

    let hints = Line::from(vec![
        Span::styled(format!(" {} ", glyphs.arrows), key),
        Span::styled("select ", hint),
        Span::styled(format!("{} ", glyphs.enter), key),
        Span::styled("flip ", hint),
        Span::styled("esc ", key),
        Span::styled("deselect ", hint),
        Span::styled("q ", key),
        Span::styled("quit", hint),
    ]);

    let stack = app.stack();
    let summary = match stack.selected_card() {
        Some(card) => Line::from(vec![
            Span::styled(format!("{} ", glyphs.selected), styles::selected_card(palette)),
            Span::styled(card.title.clone(), styles::selected_card(palette)),
            Span::styled(
                format!(
                    " {} {}/{} ",
                    glyphs.separator,
                    stack.selected_index().map_or(0, |i| i + 1),
                    stack.len()
                ),
                hint,
            ),
        ]),
        None if stack.is_empty() => Line::from(Span::styled("No cards ", hint)),
        None => Line::from(Span::styled(
            format!("No card selected {} {} cards ", glyphs.separator, stack.len()),
            hint,
        )),
    };

    frame.render_widget(Paragraph::new("").style(bar_style), area);
    // Key hints give way to the summary on narrow terminals.
    if hints.width() + summary.width() < usize::from(area.width) {
        frame.render_widget(Paragraph::new(hints), area);
    }
    frame.render_widget(Paragraph::new(summary).alignment(Alignment::Right), area);
}

/// Cut `text` to at most `max` display columns, marking the cut with `ellipsis`.
fn truncate_to_width<'a>(text: &'a str, max: usize, ellipsis: &str) -> Cow<'a, str> {
    if text.width() <= max {
        return Cow::Borrowed(text);
    }
    let budget = max.saturating_sub(ellipsis.width());
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    if ellipsis.width() <= max {
        out.push_str(ellipsis);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_width_follows_card_aspect() {
        assert_eq!(card_width(9, 200), 28);
        assert_eq!(card_width(9, 20), 20);
        assert_eq!(card_width(0, 20), 0);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("IKEA", 10, "…"), "IKEA");
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate_to_width("Canadian Tire", 8, "…"), "Canadia…");
        assert_eq!(truncate_to_width("Canadian Tire", 8, "..."), "Canad...");
    }

    #[test]
    fn truncate_counts_wide_chars() {
        assert_eq!(truncate_to_width("卡片卡片", 5, "…"), "卡片…");
    }

    #[test]
    fn truncate_to_nothing() {
        assert_eq!(truncate_to_width("Air Miles", 0, "…"), "");
    }
}

use crate::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use wishlist_api::WishlistItem;
use wishlist_core::ViewState;

pub const EMPTY_MESSAGE: &str = "🎯 No items in your wishlist. Add some!";

/// Which of the three list renderings applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView<'a> {
    /// A request is in flight; stale items are not shown
    Loading,
    /// Nothing loaded, nothing pending, nothing failed
    Empty,
    Populated(&'a [WishlistItem]),
}

impl<'a> ListView<'a> {
    pub fn from_state(state: &'a ViewState) -> Self {
        if state.loading {
            ListView::Loading
        } else if state.items.is_empty() && state.error.is_none() {
            ListView::Empty
        } else {
            ListView::Populated(&state.items)
        }
    }
}

/// Render item list
pub fn render_item_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let spinner = app.spinner();
    let state = app.controller.state();

    match ListView::from_state(state) {
        ListView::Loading => {
            let loading_text = vec![
                Line::from(""),
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} Loading...", spinner),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
            ];

            let paragraph = Paragraph::new(loading_text)
                .block(Block::default().borders(Borders::ALL).title(" Items (Loading...) "))
                .alignment(Alignment::Center);

            frame.render_widget(paragraph, area);
        }
        ListView::Empty => {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(EMPTY_MESSAGE, Style::default().fg(Color::Gray))),
                Line::from(""),
                Line::from(Span::styled(
                    "Press 'a' to add your first item",
                    Style::default().fg(Color::Yellow),
                )),
            ])
            .block(Block::default().borders(Borders::ALL).title(" Items "))
            .alignment(Alignment::Center);

            frame.render_widget(paragraph, area);
        }
        ListView::Populated(items) => {
            let list_items: Vec<ListItem> = items.iter().map(item_lines).collect();
            let title = format!(" Items ({}) ", items.len());

            let list = List::new(list_items)
                .block(Block::default().borders(Borders::ALL).title(title))
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol(">> ");

            frame.render_stateful_widget(list, area, &mut app.list_state);
        }
    }
}

fn item_lines(item: &WishlistItem) -> ListItem<'_> {
    let mut title = vec![Span::styled(
        item.name.as_str(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    if let Some(category) = item.category_label() {
        title.push(Span::raw(" "));
        title.push(Span::styled(
            format!(" {} ", category),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ));
    }

    title.push(Span::raw(" "));
    title.push(if item.downloaded {
        Span::styled(
            " Downloaded ",
            Style::default().fg(Color::Black).bg(Color::Green),
        )
    } else {
        Span::styled(
            " Not Downloaded ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )
    });

    let mut lines = vec![Line::from(title)];

    if let Some(description) = item.description_text() {
        lines.push(Line::from(Span::styled(
            format!("   {}", description),
            Style::default().fg(Color::Gray),
        )));
    }

    if let Some(url) = item.url_text() {
        lines.push(Line::from(Span::styled(
            format!("   🔗 {}", url),
            Style::default().fg(Color::Blue),
        )));
    }

    ListItem::new(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishlist_api::ItemId;
    use wishlist_core::ViewError;

    fn state(items: Vec<WishlistItem>, loading: bool, error: Option<ViewError>) -> ViewState {
        ViewState {
            items,
            loading,
            error,
        }
    }

    fn lamp() -> WishlistItem {
        WishlistItem {
            id: ItemId(1),
            name: "Desk lamp".to_string(),
            description: None,
            url: None,
            category: None,
            downloaded: false,
        }
    }

    #[test]
    fn test_loading_hides_items() {
        let s = state(vec![lamp()], true, None);
        assert_eq!(ListView::from_state(&s), ListView::Loading);
    }

    #[test]
    fn test_empty_only_without_error() {
        assert_eq!(ListView::from_state(&state(vec![], false, None)), ListView::Empty);

        let failed = state(vec![], false, Some(ViewError::Fetch));
        assert_eq!(ListView::from_state(&failed), ListView::Populated(&[]));
    }

    #[test]
    fn test_populated() {
        let s = state(vec![lamp()], false, None);
        assert!(matches!(ListView::from_state(&s), ListView::Populated(items) if items.len() == 1));
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Thumbnail grid shared by the Home, Albums and Favorites screens.
//!
//! The grid is stateless: the app resolves each item's thumbnail and favorite
//! flag into a [`Tile`] and the grid reports clicks by index into the slice it
//! was given.

use crate::domain::media::MediaItem;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::image::Handle;
use iced::widget::{button, container, image, stack, Column, Container, Row, Space, Text};
use iced::{alignment, ContentFit, Element, Length};
use std::ops::Range;

/// One grid cell, resolved by the caller.
#[derive(Debug, Clone)]
pub struct Tile<'a> {
    pub item: &'a MediaItem,
    /// Decoded thumbnail, if it has arrived.
    pub thumbnail: Option<Handle>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Open the viewer on the tile at this index.
    Open(usize),
    ToggleFavorite(String),
}

pub fn view<'a>(tiles: Vec<Tile<'a>>, columns: usize, i18n: &'a I18n) -> Element<'a, Message> {
    let columns = columns.max(1);
    let mut grid = Column::new().spacing(spacing::MD);

    let mut cells = tiles.into_iter().enumerate().peekable();
    while cells.peek().is_some() {
        let mut row = Row::new().spacing(spacing::MD);
        let mut filled = 0;
        for (index, tile) in cells.by_ref().take(columns) {
            row = row.push(view_tile(index, tile, i18n));
            filled += 1;
        }
        // Pad the last row so tiles keep the same width.
        for _ in filled..columns {
            row = row.push(Space::new().width(Length::FillPortion(1)));
        }
        grid = grid.push(row);
    }

    grid.into()
}

fn view_tile<'a>(index: usize, tile: Tile<'a>, i18n: &'a I18n) -> Element<'a, Message> {
    let picture = thumbnail_or_placeholder(
        tile.thumbnail,
        sizing::TILE_IMAGE_HEIGHT,
        placeholder_label(tile.item, i18n),
    );

    let caption = if tile.item.is_video() {
        format!("▶ {}", tile.item.name)
    } else {
        tile.item.name.clone()
    };

    let body = Column::new()
        .spacing(spacing::XXS)
        .push(picture)
        .push(Text::new(caption).size(typography::CAPTION));

    let card = button(body)
        .on_press(Message::Open(index))
        .padding(spacing::XXS)
        .width(Length::Fill)
        .style(styles::button::tile);

    let star = favorite_toggle(
        tile.is_favorite,
        Message::ToggleFavorite(tile.item.id.clone()),
    );

    let star_layer = Container::new(star)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .padding(spacing::XS);

    container(stack![card, star_layer])
        .width(Length::FillPortion(1))
        .into()
}

/// Tiles whose thumbnails should be loaded when the grid is scrolled to
/// `offset` (0.0 at the top, 1.0 at the bottom).
///
/// The range covers at most `window` tiles centered on the offset, shifted to
/// stay inside `0..len`. A non-finite offset counts as the top.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn thumbnail_window(len: usize, offset: f32, window: usize) -> Range<usize> {
    let offset = if offset.is_finite() {
        offset.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let center = (len as f32 * offset) as usize;
    let end = (center + window / 2).max(window).min(len);
    end.saturating_sub(window)..end
}

/// Videos have no server-side thumbnail.
#[must_use]
pub fn placeholder_label(item: &MediaItem, i18n: &I18n) -> String {
    if item.is_video() {
        "▶".to_string()
    } else {
        i18n.tr("status-loading")
    }
}

/// Star button toggling an item's favorite flag.
pub fn favorite_toggle<'a, M: Clone + 'a>(is_favorite: bool, on_press: M) -> Element<'a, M> {
    let glyph = if is_favorite { "★" } else { "☆" };
    button(Text::new(glyph).size(typography::BODY_LG))
        .on_press(on_press)
        .padding([spacing::XXS, spacing::XS])
        .style(styles::button::favorite(is_favorite))
        .into()
}

/// Image sized to `height`, or a neutral box labelled `placeholder`.
pub fn thumbnail_or_placeholder<'a, M: 'a>(
    handle: Option<Handle>,
    height: f32,
    placeholder: String,
) -> Element<'a, M> {
    match handle {
        Some(handle) => image(handle)
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .content_fit(ContentFit::Cover)
            .into(),
        None => Container::new(Text::new(placeholder).size(typography::CAPTION))
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(styles::container::placeholder)
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_of_a_long_grid_loads_the_first_window() {
        assert_eq!(thumbnail_window(1000, 0.0, 256), 0..256);
    }

    #[test]
    fn bottom_of_a_long_grid_loads_the_last_window() {
        assert_eq!(thumbnail_window(1000, 1.0, 256), 744..1000);
    }

    #[test]
    fn window_follows_the_scroll_position() {
        assert_eq!(thumbnail_window(1000, 0.5, 256), 372..628);
    }

    #[test]
    fn short_grid_loads_everything() {
        assert_eq!(thumbnail_window(10, 0.0, 256), 0..10);
        assert_eq!(thumbnail_window(10, 1.0, 256), 0..10);
        assert_eq!(thumbnail_window(0, 0.3, 256), 0..0);
    }

    #[test]
    fn unusable_offsets_are_clamped() {
        assert_eq!(thumbnail_window(1000, f32::NAN, 256), 0..256);
        assert_eq!(thumbnail_window(1000, -2.0, 256), 0..256);
        assert_eq!(thumbnail_window(1000, 7.0, 256), 744..1000);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Home screen: the root listing with the first photo as a hero image.

use crate::application::query::FolderNavigator;
use crate::domain::media::MediaItem;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::gallery::{self, Tile};
use crate::ui::{notice, styles};
use iced::widget::{button, scrollable, stack, Column, Container, Text};
use iced::{alignment, Element, Length};

#[derive(Debug, Default)]
pub struct State {
    pub navigator: FolderNavigator,
}

impl State {
    /// Items in display order; the hero is index 0.
    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        self.navigator.current_items()
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenHero,
    Gallery(gallery::Message),
    /// Relative vertical scroll offset of the screen.
    Scrolled(f32),
    Retry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Open the viewer over the whole root listing at this index.
    OpenViewer(usize),
    ToggleFavorite(String),
    Scrolled(f32),
    Retry,
}

pub fn update(message: Message) -> Event {
    match message {
        Message::OpenHero => Event::OpenViewer(0),
        // The grid starts after the hero.
        Message::Gallery(gallery::Message::Open(index)) => Event::OpenViewer(index + 1),
        Message::Gallery(gallery::Message::ToggleFavorite(id)) => Event::ToggleFavorite(id),
        Message::Scrolled(offset) => Event::Scrolled(offset),
        Message::Retry => Event::Retry,
    }
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: &'a State,
    /// First item, with its large thumbnail.
    pub hero: Option<Tile<'a>>,
    /// Remaining items.
    pub tiles: Vec<Tile<'a>>,
    pub columns: usize,
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let navigator = &ctx.state.navigator;

    let Some(hero) = ctx.hero else {
        return if navigator.is_loading() {
            notice::loading(ctx.i18n)
        } else if let Some(error) = navigator.last_error() {
            notice::error(ctx.i18n, error, Message::Retry)
        } else {
            notice::empty(ctx.i18n, "home-empty")
        };
    };

    let mut content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(Text::new(ctx.i18n.tr("home-title")).size(typography::TITLE_LG));

    if let Some(error) = navigator.last_error() {
        content = content.push(notice::banner(ctx.i18n, error, Message::Retry));
    }

    content = content.push(view_hero(hero, ctx.i18n));

    if !ctx.tiles.is_empty() {
        content = content.push(
            gallery::view(ctx.tiles, ctx.columns, ctx.i18n).map(Message::Gallery),
        );
    }

    scrollable(content)
        .height(Length::Fill)
        .on_scroll(|viewport| Message::Scrolled(viewport.relative_offset().y))
        .into()
}

fn view_hero<'a>(hero: Tile<'a>, i18n: &'a I18n) -> Element<'a, Message> {
    let picture = gallery::thumbnail_or_placeholder(
        hero.thumbnail,
        sizing::HERO_HEIGHT,
        gallery::placeholder_label(hero.item, i18n),
    );

    let body = Column::new()
        .spacing(spacing::XS)
        .push(picture)
        .push(Text::new(hero.item.name.clone()).size(typography::BODY_LG));

    let card = button(body)
        .on_press(Message::OpenHero)
        .padding(spacing::XS)
        .width(Length::Fill)
        .style(styles::button::tile);

    let star = Container::new(gallery::favorite_toggle(
        hero.is_favorite,
        Message::Gallery(gallery::Message::ToggleFavorite(hero.item.id.clone())),
    ))
    .width(Length::Fill)
    .align_x(alignment::Horizontal::Right)
    .padding(spacing::SM);

    stack![card, star].into()
}

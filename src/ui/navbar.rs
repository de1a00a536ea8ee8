// SPDX-License-Identifier: MPL-2.0
//! Top navigation bar: screen tabs and a refresh action.

use crate::app::Screen;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::{
    alignment::Vertical,
    widget::{button, container, Row, Space, Text},
    Element, Length,
};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub active: Screen,
    /// A listing request is in flight for the active screen.
    pub loading: bool,
    /// Number of favorited items, shown next to the Favorites tab.
    pub favorite_count: usize,
}

#[derive(Debug, Clone)]
pub enum Message {
    Select(Screen),
    Refresh,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    SwitchTo(Screen),
    Refresh,
}

/// Selecting the already active tab is ignored.
pub fn update(message: Message, active: Screen) -> Event {
    match message {
        Message::Select(screen) if screen == active => Event::None,
        Message::Select(screen) => Event::SwitchTo(screen),
        Message::Refresh => Event::Refresh,
    }
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let title = Text::new(ctx.i18n.tr("window-title")).size(typography::TITLE_MD);

    let favorites_label = if ctx.favorite_count > 0 {
        ctx.i18n.tr_with_args(
            "nav-favorites-count",
            &[("count", &ctx.favorite_count.to_string())],
        )
    } else {
        ctx.i18n.tr("nav-favorites")
    };

    let tabs = [
        (Screen::Home, ctx.i18n.tr("nav-home")),
        (Screen::Albums, ctx.i18n.tr("nav-albums")),
        (Screen::Favorites, favorites_label),
    ]
    .into_iter()
    .fold(Row::new().spacing(spacing::XS), |row, (screen, label)| {
        let tab = button(Text::new(label)).on_press(Message::Select(screen));
        row.push(if screen == ctx.active {
            tab.style(styles::button::selected)
        } else {
            tab.style(styles::button::unselected)
        })
    });

    let refresh_label = if ctx.loading {
        ctx.i18n.tr("status-loading")
    } else {
        ctx.i18n.tr("action-refresh")
    };
    let refresh = button(Text::new(refresh_label)).style(styles::button::unselected);
    let refresh = if ctx.loading {
        refresh
    } else {
        refresh.on_press(Message::Refresh)
    };

    let row = Row::new()
        .spacing(spacing::MD)
        .padding(spacing::SM)
        .align_y(Vertical::Center)
        .push(title)
        .push(Space::new().width(Length::Fixed(spacing::LG)))
        .push(tabs)
        .push(Space::new().width(Length::Fill))
        .push(refresh);

    container(row)
        .width(Length::Fill)
        .style(styles::container::bar)
        .into()
}

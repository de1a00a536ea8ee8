// SPDX-License-Identifier: MPL-2.0
//! Full-window viewer for the cursor's focused item.
//!
//! The lightbox only tracks which preview it is waiting for; the cursor lives
//! in the app and the decoded previews live in the rendition cache.

use crate::application::query::Position;
use crate::domain::media::MediaItem;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{opacity, palette, radius, spacing, typography};
use crate::ui::gallery;
use crate::ui::styles;
use chrono::{DateTime, FixedOffset};
use iced::widget::image::Handle;
use iced::widget::{button, image, Column, Container, Row, Space, Text};
use iced::{alignment, ContentFit, Element, Length};

/// Preview state of the focused item.
#[derive(Debug, Clone, Default)]
pub struct State {
    focused_url: Option<String>,
    image: Option<Handle>,
    failed: bool,
}

impl State {
    /// Starts waiting for the preview at `url`.
    pub fn focus(&mut self, url: String) {
        if self.focused_url.as_deref() == Some(url.as_str()) {
            return;
        }
        self.focused_url = Some(url);
        self.image = None;
        self.failed = false;
    }

    /// Whether `url` is the preview currently on screen.
    #[must_use]
    pub fn wants(&self, url: &str) -> bool {
        self.focused_url.as_deref() == Some(url)
    }

    pub fn show(&mut self, handle: Handle) {
        self.image = Some(handle);
        self.failed = false;
    }

    pub fn fail(&mut self) {
        self.image = None;
        self.failed = true;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.failed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Next,
    Previous,
    Close,
    ToggleFavorite(String),
    OpenOriginal,
    Download,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub item: &'a MediaItem,
    pub position: Position,
    pub state: &'a State,
    pub is_favorite: bool,
    pub downloading: bool,
}

/// Parses the provider's RFC 3339 creation time for the caption.
#[must_use]
pub fn created_at(item: &MediaItem) -> Option<DateTime<FixedOffset>> {
    item.created_time
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
}

pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;
    let navigable = ctx.position.total > 1;

    let counter = Container::new(
        Text::new(i18n.tr_with_args(
            "lightbox-position",
            &[
                ("current", &ctx.position.ordinal.to_string()),
                ("total", &ctx.position.total.to_string()),
            ],
        ))
        .size(typography::BODY_SM),
    )
    .padding([spacing::XXS, spacing::SM])
    .style(styles::overlay::indicator(radius::FULL));

    let favorite = gallery::favorite_toggle(
        ctx.is_favorite,
        Message::ToggleFavorite(ctx.item.id.clone()),
    );

    let download_label = if ctx.downloading {
        i18n.tr("lightbox-downloading")
    } else {
        i18n.tr("lightbox-download")
    };
    let download = button(Text::new(download_label)).style(styles::button::overlay(
        palette::WHITE,
        opacity::OVERLAY_MEDIUM,
        opacity::OVERLAY_HOVER,
    ));
    let download = if ctx.downloading {
        download
    } else {
        download.on_press(Message::Download)
    };

    let top_bar = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(counter)
        .push(Space::new().width(Length::Fill))
        .push(favorite)
        .push(download)
        .push(overlay_button(i18n.tr("lightbox-open-original"), Message::OpenOriginal))
        .push(overlay_button("✕".to_string(), Message::Close));

    let picture: Element<'a, Message> = match (&ctx.state.image, ctx.state.failed) {
        (Some(handle), _) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        (None, true) => Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .push(
                Text::new(if ctx.item.is_video() {
                    i18n.tr("lightbox-video-external")
                } else {
                    i18n.tr("lightbox-preview-unavailable")
                })
                .size(typography::BODY_LG),
            )
            .push(
                button(Text::new(i18n.tr("lightbox-open-original")))
                    .on_press(Message::OpenOriginal)
                    .style(styles::button::primary),
            )
            .into(),
        (None, false) => Text::new(i18n.tr("status-loading"))
            .size(typography::BODY_LG)
            .into(),
    };

    let stage = Container::new(picture)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center);

    let mut middle = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .height(Length::Fill);
    if navigable {
        middle = middle.push(overlay_button("‹".to_string(), Message::Previous));
    }
    middle = middle.push(stage);
    if navigable {
        middle = middle.push(overlay_button("›".to_string(), Message::Next));
    }

    let mut caption = ctx.item.name.clone();
    if ctx.item.is_video() {
        caption = format!("▶ {caption}");
    }
    if let Some(created) = created_at(ctx.item) {
        caption = format!("{caption} · {}", created.format("%Y-%m-%d %H:%M"));
    }
    let caption = Container::new(Text::new(caption).size(typography::BODY))
        .padding([spacing::XXS, spacing::SM])
        .style(styles::overlay::indicator(radius::MD));

    let content = Column::new()
        .spacing(spacing::SM)
        .padding(spacing::MD)
        .push(top_bar)
        .push(middle)
        .push(
            Container::new(caption)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        );

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::backdrop)
        .into()
}

fn overlay_button<'a>(label: String, message: Message) -> Element<'a, Message> {
    button(Text::new(label).size(typography::TITLE_SM))
        .on_press(message)
        .padding([spacing::XS, spacing::SM])
        .style(styles::button::overlay(
            palette::WHITE,
            opacity::OVERLAY_MEDIUM,
            opacity::OVERLAY_HOVER,
        ))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_resets_previous_image() {
        let mut state = State::default();
        state.focus("a".into());
        state.show(Handle::from_bytes(vec![1, 2, 3]));
        assert!(state.has_image());

        state.focus("b".into());
        assert!(!state.has_image());
        assert!(state.wants("b"));
        assert!(!state.wants("a"));
    }

    #[test]
    fn refocusing_same_url_keeps_image() {
        let mut state = State::default();
        state.focus("a".into());
        state.show(Handle::from_bytes(vec![1]));
        state.focus("a".into());
        assert!(state.has_image());
    }

    #[test]
    fn failure_is_cleared_by_new_focus() {
        let mut state = State::default();
        state.focus("a".into());
        state.fail();
        assert!(state.has_failed());
        state.focus("b".into());
        assert!(!state.has_failed());
    }

    #[test]
    fn created_at_parses_rfc3339() {
        let mut item = MediaItem::new("x", "x.jpg", "image/jpeg").unwrap();
        assert!(created_at(&item).is_none());

        item.created_time = Some("2023-07-14T09:30:00.000Z".into());
        let parsed = created_at(&item).unwrap();
        assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2023-07-14");

        item.created_time = Some("yesterday".into());
        assert!(created_at(&item).is_none());
    }
}

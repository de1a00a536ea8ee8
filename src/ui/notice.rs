// SPDX-License-Identifier: MPL-2.0
//! Full-area notices that replace a screen's content: loading, empty,
//! listing failure and the sign-in prompt.

use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

fn centered<'a, M: 'a>(content: impl Into<Element<'a, M>>) -> Element<'a, M> {
    let card = Container::new(content)
        .padding(spacing::LG)
        .style(styles::container::panel);

    Container::new(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

pub fn loading<'a, M: 'a>(i18n: &I18n) -> Element<'a, M> {
    centered(Text::new(i18n.tr("status-loading")).size(typography::BODY_LG))
}

pub fn empty<'a, M: 'a>(i18n: &I18n, key: &str) -> Element<'a, M> {
    centered(Text::new(i18n.tr(key)).size(typography::BODY_LG))
}

/// Localized one-line description of `error`.
#[must_use]
pub fn describe(i18n: &I18n, error: &Error) -> String {
    match error {
        Error::Http { status } => {
            i18n.tr_with_args(error.i18n_key(), &[("status", &status.to_string())])
        }
        other => i18n.tr(other.i18n_key()),
    }
}

/// The retry message for `error`, or `None` when trying again cannot help.
pub fn retry_for<M>(error: &Error, retry: M) -> Option<M> {
    error.is_transient().then_some(retry)
}

/// Listing failure, with a retry action when retrying can help.
pub fn error<'a, M: Clone + 'a>(i18n: &I18n, error: &Error, retry: M) -> Element<'a, M> {
    let detail = describe(i18n, error);

    let mut content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(i18n.tr("error-load-title")).size(typography::TITLE_SM))
        .push(Text::new(detail).size(typography::BODY));
    if let Some(retry) = retry_for(error, retry) {
        content = content.push(
            button(Text::new(i18n.tr("action-retry")))
                .on_press(retry)
                .style(styles::button::primary),
        );
    }
    centered(content)
}

/// The service wants the user to sign in before listing anything.
pub fn sign_in<'a, M: Clone + 'a>(i18n: &I18n, open_sign_in: M, retry: M) -> Element<'a, M> {
    let actions = Row::new()
        .spacing(spacing::SM)
        .push(
            button(Text::new(i18n.tr("action-sign-in")))
                .on_press(open_sign_in)
                .style(styles::button::primary),
        )
        .push(
            button(Text::new(i18n.tr("action-retry")))
                .on_press(retry)
                .style(styles::button::unselected),
        );

    let content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(i18n.tr("auth-required-title")).size(typography::TITLE_SM))
        .push(Text::new(i18n.tr("auth-required-body")).size(typography::BODY))
        .push(actions);
    centered(content)
}

/// Inline failure shown above content that is still displayed, with a retry
/// action when retrying can help.
pub fn banner<'a, M: Clone + 'a>(i18n: &I18n, error: &Error, retry: M) -> Element<'a, M> {
    let mut row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(
            Text::new(format!(
                "{}: {}",
                i18n.tr("error-load-title"),
                describe(i18n, error)
            ))
            .size(typography::BODY_SM)
            .width(Length::Fill),
        );
    if let Some(retry) = retry_for(error, retry) {
        row = row.push(
            button(Text::new(i18n.tr("action-retry")))
                .on_press(retry)
                .style(styles::button::unselected),
        );
    }

    Container::new(row)
        .padding(spacing::SM)
        .width(Length::Fill)
        .style(styles::container::panel)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_is_offered_for_transient_failures() {
        assert_eq!(retry_for(&Error::Network("refused".into()), "retry"), Some("retry"));
        assert_eq!(retry_for(&Error::Http { status: 503 }, "retry"), Some("retry"));
        assert_eq!(retry_for(&Error::Http { status: 429 }, "retry"), Some("retry"));
    }

    #[test]
    fn retry_is_withheld_when_it_cannot_help() {
        assert_eq!(retry_for(&Error::Http { status: 404 }, "retry"), None);
        assert_eq!(retry_for(&Error::Decode("eof".into()), "retry"), None);
        assert_eq!(retry_for(&Error::InvalidUrl("nope".into()), "retry"), None);
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Overlay styles for lightbox captions and position counters.

use crate::ui::design_tokens::{
    opacity,
    palette::{BLACK, WHITE},
};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

fn container_background() -> Color {
    Color {
        a: opacity::OVERLAY_STRONG,
        ..BLACK
    }
}

fn container_border() -> Color {
    Color {
        a: opacity::OVERLAY_SUBTLE,
        ..WHITE
    }
}

/// Rounded indicator for the position counter and caption.
pub fn indicator(rad: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(container_background())),
        text_color: Some(WHITE),
        border: Border {
            color: container_border(),
            width: 1.0,
            radius: rad.into(),
        },
        ..Default::default()
    }
}

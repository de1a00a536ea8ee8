// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use crate::ui::lightbox;
use iced::keyboard::{self, key::Named, Key};
use iced::{event, time, Event, Subscription};
use std::time::Duration;

/// Arrow keys and Escape drive the lightbox while it is open.
///
/// Key presses already captured by a widget are ignored.
pub fn create_keyboard_subscription(lightbox_open: bool) -> Subscription<Message> {
    if !lightbox_open {
        return Subscription::none();
    }

    event::listen_with(|event, status, _window| {
        if status == event::Status::Captured {
            return None;
        }
        let Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event else {
            return None;
        };
        lightbox_key(&key).map(Message::Lightbox)
    })
}

/// Maps a key to its lightbox action.
pub(super) fn lightbox_key(key: &Key) -> Option<lightbox::Message> {
    match key {
        Key::Named(Named::ArrowRight) => Some(lightbox::Message::Next),
        Key::Named(Named::ArrowLeft) => Some(lightbox::Message::Previous),
        Key::Named(Named::Escape) => Some(lightbox::Message::Close),
        _ => None,
    }
}

/// Periodic tick for toast auto-dismiss.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(250)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

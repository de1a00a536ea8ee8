// SPDX-License-Identifier: MPL-2.0
//! View composition for the application root.

use super::update::HERO_WIDTH;
use super::{App, Message, Screen};
use crate::domain::media::MediaItem;
use crate::media::RenditionCache;
use crate::ui::gallery::Tile;
use crate::ui::notifications::Toast;
use crate::ui::{albums, favorites, home, lightbox, navbar, notice};
use iced::widget::{opaque, stack, Column, Container};
use iced::{Element, Length};

pub fn view(app: &App) -> Element<'_, Message> {
    let navbar = navbar::view(navbar::ViewContext {
        i18n: &app.i18n,
        active: app.screen,
        loading: is_loading(app),
        favorite_count: app.favorites.len(),
    })
    .map(Message::Navbar);

    let body = match &app.auth_url {
        Some(_) => notice::sign_in(&app.i18n, Message::OpenSignIn, Message::RetryAfterAuth),
        None => screen_view(app),
    };

    let base = Column::new()
        .push(navbar)
        .push(Container::new(body).width(Length::Fill).height(Length::Fill));

    let mut layers = stack![base].width(Length::Fill).height(Length::Fill);

    if let Some(viewer) = lightbox_view(app) {
        layers = layers.push(opaque(viewer));
    }

    layers
        .push(Toast::view_overlay(&app.notifications, &app.i18n).map(Message::Notification))
        .into()
}

fn is_loading(app: &App) -> bool {
    match app.screen {
        Screen::Home => app.home.navigator.is_loading(),
        Screen::Albums => app.albums.navigator.is_loading() || app.albums.covers_loading(),
        Screen::Favorites => app.favorites_view.is_loading(),
    }
}

fn screen_view(app: &App) -> Element<'_, Message> {
    let columns = app.display.grid_columns();
    let width = app.display.thumbnail_width();

    match app.screen {
        Screen::Home => {
            let items = app.home.items();
            let hero = items.first().map(|item| tile(app, item, HERO_WIDTH));
            let tiles = items.iter().skip(1).map(|item| tile(app, item, width)).collect();
            home::view(home::ViewContext {
                i18n: &app.i18n,
                state: &app.home,
                hero,
                tiles,
                columns,
            })
            .map(Message::Home)
        }
        Screen::Albums => {
            let albums = if app.albums.navigator.is_at_root() {
                app.albums
                    .navigator
                    .current_folders()
                    .iter()
                    .map(|folder| {
                        let known = app.albums.cover(&folder.id);
                        albums::AlbumCard {
                            folder,
                            cover: known
                                .flatten()
                                .and_then(|item| cached(&app.thumbnails, app.thumbnail_url(item, width))),
                            // Unresolved, or resolved with a thumbnail still on its way.
                            pending: match known {
                                None => app.albums.covers_loading(),
                                Some(cover) => cover.is_some(),
                            },
                        }
                    })
                    .collect()
            } else {
                Vec::new()
            };
            let tiles = app.albums.items().iter().map(|item| tile(app, item, width)).collect();
            albums::view(albums::ViewContext {
                i18n: &app.i18n,
                state: &app.albums,
                albums,
                tiles,
                columns,
            })
            .map(Message::Albums)
        }
        Screen::Favorites => {
            // Items unstarred since the last gather drop out immediately.
            let tiles = app
                .favorites_view
                .items()
                .iter()
                .filter(|item| app.favorites.is_favorite(&item.id))
                .map(|item| tile(app, item, width))
                .collect();
            favorites::view(favorites::ViewContext {
                i18n: &app.i18n,
                state: &app.favorites_view,
                tiles,
                columns,
            })
            .map(Message::Favorites)
        }
    }
}

fn tile<'a>(app: &'a App, item: &'a MediaItem, width: u32) -> Tile<'a> {
    Tile {
        item,
        thumbnail: cached(&app.thumbnails, app.thumbnail_url(item, width)),
        is_favorite: app.favorites.is_favorite(&item.id),
    }
}

fn cached(cache: &RenditionCache, url: Option<String>) -> Option<iced::widget::image::Handle> {
    url.and_then(|url| cache.peek(&url).map(|rendition| rendition.handle.clone()))
}

fn lightbox_view(app: &App) -> Option<Element<'_, Message>> {
    let item = app.cursor.current()?;
    let position = app.cursor.position()?;
    Some(
        lightbox::view(lightbox::ViewContext {
            i18n: &app.i18n,
            item,
            position,
            state: &app.lightbox,
            is_favorite: app.favorites.is_favorite(&item.id),
            downloading: app.downloading,
        })
        .map(Message::Lightbox),
    )
}

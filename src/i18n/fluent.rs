// SPDX-License-Identifier: MPL-2.0
//! Fluent-backed translation bundles.
//!
//! Translations are embedded from `assets/i18n/*.ftl` at build time. The
//! active locale is chosen from the CLI flag, then the config file, then the
//! operating system, falling back to `en-US`.

use crate::app::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const DEFAULT_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

fn load_bundle(
    filename: &str,
    locale: &LanguageIdentifier,
) -> Option<FluentBundle<FluentResource>> {
    let content = Asset::get(filename)?;
    let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
    let resource = match FluentResource::try_new(source) {
        Ok(resource) => resource,
        Err((_, errors)) => {
            tracing::warn!(file = filename, errors = errors.len(), "skipping invalid translation file");
            return None;
        }
    };
    let mut bundle = FluentBundle::new(vec![locale.clone()]);
    // Keep rendered strings free of Unicode isolation marks.
    bundle.set_use_isolating(false);
    if bundle.add_resource(resource).is_err() {
        tracing::warn!(file = filename, "duplicate messages in translation file");
        return None;
    }
    Some(bundle)
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(locale_str) = filename.strip_suffix(".ftl") else {
                continue;
            };
            let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
                continue;
            };
            if let Some(bundle) = load_bundle(filename, &locale) {
                bundles.insert(locale.clone(), bundle);
                available_locales.push(locale);
            }
        }
        available_locales.sort_by_key(ToString::to_string);

        let current_locale = resolve_locale(
            cli_lang,
            config,
            sys_locale::get_locale(),
            &available_locales,
        )
        .unwrap_or_else(|| DEFAULT_LOCALE.parse().unwrap_or_default());

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Translates `key`, substituting `{ $name }` placeables from `args`.
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) {
                let mut errors = vec![];
                let value = bundle.format_pattern(pattern, args, &mut errors);
                if errors.is_empty() {
                    return value.to_string();
                }
            }
        }
        format!("MISSING: {}", key)
    }
}

fn parse_available(raw: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let lang = raw.parse::<LanguageIdentifier>().ok()?;
    if available.contains(&lang) {
        return Some(lang);
    }
    // "fr-FR" falls back to "fr".
    available
        .iter()
        .find(|candidate| candidate.language == lang.language && candidate.region.is_none())
        .cloned()
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    os_locale: Option<String>,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    cli_lang
        .as_deref()
        .and_then(|lang| parse_available(lang, available))
        .or_else(|| {
            config
                .general
                .language
                .as_deref()
                .and_then(|lang| parse_available(lang, available))
        })
        .or_else(|| {
            os_locale
                .as_deref()
                .and_then(|lang| parse_available(lang, available))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en-US".parse().unwrap(), "fr".parse().unwrap()]
    }

    #[test]
    fn cli_wins_over_config() {
        let mut config = Config::default();
        config.general.language = Some("en-US".to_string());
        let lang = resolve_locale(Some("fr".to_string()), &config, None, &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn config_used_without_cli() {
        let mut config = Config::default();
        config.general.language = Some("fr".to_string());
        let lang = resolve_locale(None, &config, Some("en-US".into()), &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn os_locale_with_region_falls_back_to_language() {
        let lang = resolve_locale(None, &Config::default(), Some("fr-CA".into()), &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn unknown_locale_resolves_to_none() {
        let lang = resolve_locale(
            Some("de".into()),
            &Config::default(),
            Some("ja-JP".into()),
            &available(),
        );
        assert_eq!(lang, None);
    }

    #[test]
    fn embedded_bundles_translate_keys() {
        let i18n = I18n::new(Some("en-US".into()), &Config::default());
        assert_eq!(i18n.tr("window-title"), "DriveLens");
        assert_eq!(
            i18n.tr_with_args("lightbox-position", &[("current", "2"), ("total", "5")]),
            "2 / 5"
        );
        assert!(i18n.tr("no-such-key").starts_with("MISSING:"));
    }

    #[test]
    fn french_bundle_is_available() {
        let mut i18n = I18n::new(Some("en-US".into()), &Config::default());
        i18n.set_locale("fr".parse().unwrap());
        assert_eq!(i18n.current_locale().to_string(), "fr");
        assert_eq!(i18n.tr("nav-favorites"), "Favoris");
    }

    #[test]
    fn every_english_key_exists_in_french() {
        let english = Asset::get("en-US.ftl").expect("en-US.ftl embedded");
        let french = Asset::get("fr.ftl").expect("fr.ftl embedded");
        let keys = |data: &[u8]| -> Vec<String> {
            String::from_utf8_lossy(data)
                .lines()
                .filter_map(|line| line.split_once(" ="))
                .map(|(key, _)| key.trim().to_string())
                .filter(|key| !key.is_empty() && !key.starts_with('#'))
                .collect()
        };
        let fr_keys = keys(french.data.as_ref());
        for key in keys(english.data.as_ref()) {
            assert!(fr_keys.contains(&key), "missing French key: {key}");
        }
    }
}

use crate::models::site_models::{MockupRecord, SiteConfig};

/// Harmless target used when no store link is configured anywhere.
pub const NO_OP_LINK: &str = "#";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    Other,
}

/// Best-effort client inspection, same heuristics the site always used:
/// iPad/iPhone/iPod means iOS, "android" means Android, everything else
/// (desktop, bots, unknown) is Other.
pub fn detect_platform(user_agent: &str) -> Platform {
    if user_agent.contains("iPad") || user_agent.contains("iPhone") || user_agent.contains("iPod") {
        return Platform::Ios;
    }
    if user_agent.to_ascii_lowercase().contains("android") {
        return Platform::Android;
    }
    Platform::Other
}

fn first_non_empty<'a>(candidates: [&'a str; 4]) -> Option<&'a str> {
    candidates.into_iter().find(|c| !c.is_empty())
}

/// Resolves the outbound store link for one gallery record.
///
/// Precedence: record override for the detected platform, then the global
/// URL for that platform, then any other available URL. Desktop/unknown
/// clients take any available link, record overrides first.
pub fn resolve_store_url(record: &MockupRecord, config: &SiteConfig, platform: Platform) -> String {
    let resolved = match platform {
        Platform::Ios => first_non_empty([
            &record.app_store_url,
            &config.global_app_store_url,
            &record.play_store_url,
            &config.global_play_store_url,
        ]),
        Platform::Android => first_non_empty([
            &record.play_store_url,
            &config.global_play_store_url,
            &record.app_store_url,
            &config.global_app_store_url,
        ]),
        Platform::Other => first_non_empty([
            &record.play_store_url,
            &record.app_store_url,
            &config.global_play_store_url,
            &config.global_app_store_url,
        ]),
    };
    resolved.unwrap_or(NO_OP_LINK).to_string()
}

/// Whether the gallery should show the "published" badge at all.
pub fn has_any_link(record: &MockupRecord, config: &SiteConfig) -> bool {
    !record.play_store_url.is_empty()
        || !record.app_store_url.is_empty()
        || !config.global_play_store_url.is_empty()
        || !config.global_app_store_url.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(play: &str, app: &str) -> MockupRecord {
        MockupRecord {
            id: "r".to_string(),
            name: "App".to_string(),
            category: "Test".to_string(),
            description: String::new(),
            image_url: String::new(),
            play_store_url: play.to_string(),
            app_store_url: app.to_string(),
        }
    }

    fn config(play: &str, app: &str) -> SiteConfig {
        SiteConfig {
            global_play_store_url: play.to_string(),
            global_app_store_url: app.to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn android_prefers_record_override_over_global() {
        let record = record("A", "");
        let config = config("B", "C");
        assert_eq!(resolve_store_url(&record, &config, Platform::Android), "A");
    }

    #[test]
    fn ios_without_override_falls_back_to_global_app_store() {
        let record = record("A", "");
        let config = config("B", "C");
        assert_eq!(resolve_store_url(&record, &config, Platform::Ios), "C");
    }

    #[test]
    fn cross_platform_fallback_when_preferred_side_is_empty() {
        // Android client, but only App Store links exist anywhere.
        let record = record("", "https://apps.apple.com/x");
        let config = config("", "");
        assert_eq!(
            resolve_store_url(&record, &config, Platform::Android),
            "https://apps.apple.com/x"
        );
    }

    #[test]
    fn desktop_takes_any_available_link_overrides_first() {
        let config = config("B", "C");
        assert_eq!(resolve_store_url(&record("A", "D"), &config, Platform::Other), "A");
        assert_eq!(resolve_store_url(&record("", "D"), &config, Platform::Other), "D");
        assert_eq!(resolve_store_url(&record("", ""), &config, Platform::Other), "B");
    }

    #[test]
    fn no_links_anywhere_resolves_to_noop() {
        let record = record("", "");
        let config = config("", "");
        assert_eq!(resolve_store_url(&record, &config, Platform::Ios), NO_OP_LINK);
        assert!(!has_any_link(&record, &config));
    }

    #[test]
    fn user_agent_detection() {
        assert_eq!(
            detect_platform("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"),
            Platform::Ios
        );
        assert_eq!(
            detect_platform("Mozilla/5.0 (Linux; Android 14; Pixel 8)"),
            Platform::Android
        );
        assert_eq!(
            detect_platform("Mozilla/5.0 (Windows NT 10.0; Win64; x64)"),
            Platform::Other
        );
    }
}

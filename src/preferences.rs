//! Preference manager that merges config.toml defaults with DB overrides.
//!
//! Config values serve as defaults; DB values (user_preferences table) override them.
//! Writes always go to the DB, never to the config file.
use std::collections::HashMap;

use anyhow::Result;

use crate::config::Config;
use crate::storage::Database;

/// Preference key for the selected theme.
pub const THEME_KEY: &str = "ui.theme";

// ============================================================================
// PreferenceManager
// ============================================================================

/// Merged preference store: config.toml defaults + DB overrides.
///
/// On load, config values are flattened into a `HashMap<String, String>`, then
/// `ui.*` and `keybind.*` DB rows are layered on top. Reads are in-memory.
pub struct PreferenceManager {
    prefs: HashMap<String, String>,
}

impl PreferenceManager {
    /// Load preferences by merging config defaults with DB overrides.
    pub async fn load(config: &Config, db: &Database) -> Result<Self> {
        let mut prefs = Self::flatten_config(config);

        // DB wins over config
        for prefix in ["ui.", "keybind."] {
            for (key, value) in db.get_preferences_by_prefix(prefix).await? {
                prefs.insert(key, value);
            }
        }

        Ok(Self { prefs })
    }

    /// Create from config only (no DB). Fallback for when DB load fails.
    pub fn from_config(config: &Config) -> Self {
        Self {
            prefs: Self::flatten_config(config),
        }
    }

    /// Get a preference value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.prefs.get(key).map(String::as_str)
    }

    /// Set a preference: writes to DB and updates in-memory map.
    pub async fn set(&mut self, db: &Database, key: &str, value: &str) -> Result<()> {
        db.set_preference(key, value).await?;
        self.prefs.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Current theme variant name (e.g., "dark", "light").
    pub fn theme_variant(&self) -> &str {
        self.get(THEME_KEY).unwrap_or("dark")
    }

    /// Keybinding overrides as action name → key string.
    pub fn keybindings(&self) -> HashMap<String, String> {
        self.prefs
            .iter()
            .filter_map(|(k, v)| k.strip_prefix("keybind.").map(|a| (a.to_string(), v.clone())))
            .collect()
    }

    fn flatten_config(config: &Config) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert(THEME_KEY.to_string(), config.theme.clone());

        for (action, key_str) in &config.keybindings {
            map.insert(format!("keybind.{}", action), key_str.clone());
        }

        map
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        Database::open(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_load_defaults_from_config() {
        let db = test_db().await;
        let pm = PreferenceManager::load(&Config::default(), &db)
            .await
            .unwrap();
        assert_eq!(pm.theme_variant(), "dark");
        assert!(pm.keybindings().is_empty());
    }

    #[tokio::test]
    async fn test_db_overrides_config() {
        let db = test_db().await;
        db.set_preference(THEME_KEY, "light").await.unwrap();

        let pm = PreferenceManager::load(&Config::default(), &db)
            .await
            .unwrap();
        assert_eq!(pm.theme_variant(), "light");
    }

    #[tokio::test]
    async fn test_watched_list_is_not_a_preference() {
        let db = test_db().await;
        db.set_preference("watched-videos", r#"["1"]"#).await.unwrap();

        let pm = PreferenceManager::load(&Config::default(), &db)
            .await
            .unwrap();
        assert_eq!(pm.get("watched-videos"), None);
    }

    #[tokio::test]
    async fn test_set_persists_and_updates_memory() {
        let db = test_db().await;
        let mut pm = PreferenceManager::load(&Config::default(), &db)
            .await
            .unwrap();

        pm.set(&db, THEME_KEY, "light").await.unwrap();
        assert_eq!(pm.theme_variant(), "light");

        let stored = db.get_preference(THEME_KEY).await.unwrap();
        assert_eq!(stored, Some("light".to_string()));

        let reloaded = PreferenceManager::load(&Config::default(), &db)
            .await
            .unwrap();
        assert_eq!(reloaded.theme_variant(), "light");
    }

    #[tokio::test]
    async fn test_keybindings_merge_config_and_db() {
        let db = test_db().await;
        let mut config = Config::default();
        config
            .keybindings
            .insert("quit".to_string(), "Ctrl+q".to_string());
        config
            .keybindings
            .insert("toggle_watched".to_string(), "w".to_string());
        db.set_preference("keybind.quit", "Q").await.unwrap();

        let pm = PreferenceManager::load(&config, &db).await.unwrap();
        let bindings = pm.keybindings();
        assert_eq!(bindings.get("quit").map(String::as_str), Some("Q"));
        assert_eq!(bindings.get("toggle_watched").map(String::as_str), Some("w"));
    }

    #[test]
    fn test_from_config_fallback() {
        let mut config = Config::default();
        config.theme = "light".to_string();

        let pm = PreferenceManager::from_config(&config);
        assert_eq!(pm.theme_variant(), "light");
    }
}

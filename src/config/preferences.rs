//! Persisted display preferences

use crate::Result;
use crate::storage::KeyValueStore;

/// Storage key for the dark-mode flag
pub const DARK_MODE_KEY: &str = "darkMode";

/// The dark-mode preference, stored as `"true"` / `"false"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DarkMode(pub bool);

impl DarkMode {
    /// Read the stored flag; only the exact text `"true"` enables dark mode
    pub fn stored<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Self>> {
        Ok(store.get_item(DARK_MODE_KEY)?.map(|raw| DarkMode(raw == "true")))
    }

    /// Read the stored flag, falling back to `default` when nothing is stored
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, default: bool) -> Result<Self> {
        Ok(Self::stored(store)?.unwrap_or(DarkMode(default)))
    }

    pub fn save<S: KeyValueStore + ?Sized>(self, store: &mut S) -> Result<()> {
        store.set_item(DARK_MODE_KEY, if self.0 { "true" } else { "false" })?;
        Ok(())
    }

    pub fn is_enabled(self) -> bool {
        self.0
    }

    /// Notification text announcing this mode
    pub fn announcement(self) -> &'static str {
        if self.0 { "Dark mode enabled" } else { "Light mode enabled" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn missing_flag_uses_default() {
        let store = MemoryStore::new();
        assert_eq!(DarkMode::load(&store, false).unwrap(), DarkMode(false));
        assert_eq!(DarkMode::load(&store, true).unwrap(), DarkMode(true));
    }

    #[test]
    fn flag_is_stored_as_text() {
        let mut store = MemoryStore::new();
        DarkMode(true).save(&mut store).unwrap();
        assert_eq!(store.get_item(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));

        DarkMode(false).save(&mut store).unwrap();
        assert_eq!(store.get_item(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn unexpected_text_means_light() {
        let mut store = MemoryStore::new();
        store.set_item(DARK_MODE_KEY, "yes").unwrap();
        assert_eq!(DarkMode::load(&store, true).unwrap(), DarkMode(false));
    }

    #[test]
    fn announcements() {
        assert_eq!(DarkMode(true).announcement(), "Dark mode enabled");
        assert_eq!(DarkMode(false).announcement(), "Light mode enabled");
    }
}

//! UI layer for desktop GUI: app shell, search box, and result cards.

pub mod app;

pub use app::{FreytApp, PersistedDesktopSettings, StartupConfig, SETTINGS_STORAGE_KEY};

// Library surface for the preferences accessor and its collaborators.
// Keep this lean: the crate is consumed purely as an in-process API.
pub mod app_dirs;
pub mod i18n;
pub mod prefs;
pub mod store;
pub mod util;

pub use i18n::{MessageCatalog, NullCatalog, StaticCatalog};
pub use prefs::{PrefValue, Prefs, PrefsError, DEFAULT_SEPARATOR};
pub use store::{FileStore, MemoryStore, PrefStore};

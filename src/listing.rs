use crate::statics;
use crate::store::ConfigStore;

/// One row of the key listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

/// Either the rows to show or the message explaining why there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    Entries(Vec<Entry>),
    Error(String),
}

/// Snapshot of the store for display. Refreshed explicitly after opening a
/// store and after every successful save, never implicitly.
pub struct Listing {
    state: ListingState,
}

impl Listing {
    pub fn empty() -> Listing {
        Listing {
            state: ListingState::Entries(Vec::new()),
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    /// Re-read all entries, keeping the store's file order.
    pub fn refresh(&mut self, store: &ConfigStore) {
        let entries = store
            .keys()
            .map(|key| Entry {
                key: key.to_owned(),
                value: store.get(key),
            })
            .collect();
        self.state = ListingState::Entries(entries);
    }

    /// Replace the rows with an error message (store missing or unreadable).
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = ListingState::Error(message.into());
    }

    /// Rows passing the current filters. By default only keys of the app
    /// compatibility subsystem (`eac_` prefix) are shown; `show_all` lifts
    /// that. A non-empty query additionally requires a case-insensitive
    /// substring match on the key. Values are never searched.
    pub fn filter(&self, query: &str, show_all: bool) -> Vec<&Entry> {
        let ListingState::Entries(entries) = &self.state else {
            return Vec::new();
        };
        let needle = query.to_lowercase();
        entries
            .iter()
            .filter(|e| {
                show_all
                    || e.key
                        .to_lowercase()
                        .starts_with(statics::EAC_KEY_PREFIX)
            })
            .filter(|e| needle.is_empty() || e.key.to_lowercase().contains(&needle))
            .collect()
    }
}

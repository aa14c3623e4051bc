use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Identifier of the worker that first inserted an address. Workers are
/// numbered per crawl by the coordinator.
pub type WorkerId = usize;

type NewLinkHook = Box<dyn Fn(&str, WorkerId) + Send + Sync>;

/// Shared set of visited absolute addresses.
///
/// Addresses are compared case-insensitively; insertion is atomic per key,
/// so exactly one of any number of racing callers observes `true` from
/// [`LinkStore::try_add`] for a given address.
pub struct LinkStore {
    links: DashMap<String, WorkerId>,
    on_new_link: Option<NewLinkHook>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            on_new_link: None,
        }
    }

    /// A store that invokes `hook` synchronously on every first-time
    /// insertion, with the original-case address and the inserting worker.
    pub fn with_hook(hook: NewLinkHook) -> Self {
        Self {
            links: DashMap::new(),
            on_new_link: Some(hook),
        }
    }

    /// Attempt to record `address` as visited by `worker`. Returns true iff
    /// the address was not already present.
    pub fn try_add(&self, address: &str, worker: WorkerId) -> bool {
        match self.links.entry(address.to_lowercase()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(worker);
                if let Some(hook) = &self.on_new_link {
                    hook(address, worker);
                }
                true
            }
        }
    }

    /// Empty the store. Callers must ensure no traversal is in flight.
    pub fn clear(&self) {
        self.links.clear();
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Snapshot of all recorded addresses and the worker that found each.
    pub fn links(&self) -> Vec<(String, WorkerId)> {
        self.links
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.links.contains_key(&address.to_lowercase())
    }
}

impl Default for LinkStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Per-provider stop state with subscribe/notify publication.

use ecoroute_stops::identifiers::ProviderIdentifier;
use ecoroute_stops::models::types::{RawStop, Stop};
use tokio::sync::watch;

/// Holds the latest known stops per provider and publishes the merged list.
///
/// Providers are merged in first-seen order and within one provider the
/// fetched order is preserved. Updating one provider never disturbs another,
/// and every update re-publishes the full merged list, identical or not;
/// subscribers re-render rather than diff.
///
/// Stops are not deduplicated across providers: a transit stop and a bike
/// dock at the same location are both shown.
pub struct StopStore {
    providers: Vec<(ProviderIdentifier, Vec<Stop>)>,
    tx: watch::Sender<Vec<Stop>>,
}

impl StopStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            providers: Vec::new(),
            tx,
        }
    }

    /// Subscribe to merged-list publications.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Stop>> {
        self.tx.subscribe()
    }

    /// Replace one provider's stops and publish the new merged list.
    ///
    /// Records missing either coordinate are dropped here, silently; the
    /// remainder replaces that provider's previous list wholesale.
    pub fn update(&mut self, provider: ProviderIdentifier, stops: Vec<RawStop>) -> Vec<Stop> {
        let valid: Vec<Stop> = stops.into_iter().filter_map(RawStop::validate).collect();

        match self.providers.iter_mut().find(|(id, _)| *id == provider) {
            Some((_, slot)) => *slot = valid,
            None => self.providers.push((provider, valid)),
        }

        let merged = self.merged();
        self.tx.send_replace(merged.clone());
        merged
    }

    /// Concatenation of every provider's list, in first-seen provider order.
    pub fn merged(&self) -> Vec<Stop> {
        self.providers
            .iter()
            .flat_map(|(_, stops)| stops.iter().cloned())
            .collect()
    }
}

impl Default for StopStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoroute_stops::models::types::StopCategory;

    fn raw(name: &str, latitude: Option<f64>, longitude: Option<f64>) -> RawStop {
        RawStop {
            id: None,
            name: name.to_string(),
            latitude,
            longitude,
            category: StopCategory::Bus,
        }
    }

    fn transit() -> ProviderIdentifier {
        ProviderIdentifier::new("transit")
    }

    fn bike() -> ProviderIdentifier {
        ProviderIdentifier::new("bike")
    }

    #[test]
    fn test_update_drops_records_missing_coordinates() {
        // Three stations, one missing a coordinate: two survive
        let mut store = StopStore::new();
        let merged = store.update(
            transit(),
            vec![
                raw("Bel-Air", Some(46.5218), Some(6.6287)),
                raw("St-François", Some(46.5197), None),
                raw("Riponne", Some(46.5238), Some(6.6344)),
            ],
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(&*merged[0].name, "Bel-Air");
        assert_eq!(&*merged[1].name, "Riponne");
    }

    #[test]
    fn test_update_preserves_order() {
        let mut store = StopStore::new();
        let merged = store.update(
            transit(),
            vec![
                raw("Bel-Air", Some(46.5218), Some(6.6287)),
                raw("Riponne", Some(46.5238), Some(6.6344)),
                raw("Ours", Some(46.5231), Some(6.6404)),
            ],
        );

        let names: Vec<&str> = merged.iter().map(|s| &*s.name).collect();
        assert_eq!(names, vec!["Bel-Air", "Riponne", "Ours"]);
    }

    #[test]
    fn test_providers_do_not_disturb_each_other() {
        let mut store = StopStore::new();
        store.update(transit(), vec![raw("Bel-Air", Some(46.5218), Some(6.6287))]);
        store.update(bike(), vec![raw("Europe", Some(46.5213), Some(6.6298))]);

        // Replacing the transit list leaves the bike list in place
        let merged = store.update(transit(), vec![raw("Ours", Some(46.5231), Some(6.6404))]);
        let names: Vec<&str> = merged.iter().map(|s| &*s.name).collect();
        assert_eq!(names, vec!["Ours", "Europe"]);
    }

    #[test]
    fn test_identical_update_is_idempotent() {
        let mut store = StopStore::new();
        let stops = vec![raw("Bel-Air", Some(46.5218), Some(6.6287))];

        let first = store.update(transit(), stops.clone());
        let second = store.update(transit(), stops);
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_update_still_publishes() {
        let mut store = StopStore::new();
        let mut rx = store.subscribe();
        let stops = vec![raw("Bel-Air", Some(46.5218), Some(6.6287))];

        store.update(transit(), stops.clone());
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        // Same content again: subscribers are still notified
        store.update(transit(), stops);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_empty_update_clears_only_that_provider() {
        let mut store = StopStore::new();
        store.update(transit(), vec![raw("Bel-Air", Some(46.5218), Some(6.6287))]);
        store.update(bike(), vec![raw("Europe", Some(46.5213), Some(6.6298))]);

        let merged = store.update(transit(), vec![]);
        assert_eq!(merged.len(), 1);
        assert_eq!(&*merged[0].name, "Europe");
    }
}

//! Registry - the immutable kind -> reducer map backing one store.
//!
//! Built once from the composed providers. For every entry a constructor is
//! derived from the declared payload arity; the whole constructor map is
//! computed at build time and cached for the registry's lifetime, so a
//! registry swap can never hand out stale constructors.

use std::collections::HashMap;
use std::sync::Arc;

use strata_model::{ActionCreator, Reducer};

use crate::error::ComposeError;
use crate::provider::Provider;

struct RegistryEntry<S> {
    reducer: Reducer<S>,
    creator: ActionCreator,
}

/// Immutable mapping from action kind to reducer plus derived constructor.
pub struct Registry<S> {
    entries: HashMap<String, RegistryEntry<S>>,
    // Memoized constructor map, one per registry instance.
    creators: Arc<HashMap<String, ActionCreator>>,
}

impl<S> Registry<S> {
    /// Build a registry from composed providers.
    ///
    /// All providers' entries are folded together with the same uniqueness
    /// check as [`Provider::merge`]; any duplicate kind fails construction
    /// before a store can come into existence.
    pub fn from_providers(
        providers: impl IntoIterator<Item = Provider<S>>,
    ) -> Result<Self, ComposeError> {
        let mut entries: HashMap<String, RegistryEntry<S>> = HashMap::new();
        let mut sources: HashMap<String, String> = HashMap::new();

        for provider in providers {
            for (source, entry) in provider.into_entries() {
                let (kind, arity, reducer) = entry.into_parts();
                if let Some(first) = sources.get(&kind) {
                    return Err(ComposeError::DuplicateActionKind {
                        kind,
                        first: first.clone(),
                        second: source,
                    });
                }
                sources.insert(kind.clone(), source);
                let creator = ActionCreator::new(kind.clone(), arity.expects_payload());
                entries.insert(kind, RegistryEntry { reducer, creator });
            }
        }

        let creators = Arc::new(
            entries
                .iter()
                .map(|(kind, entry)| (kind.clone(), entry.creator.clone()))
                .collect::<HashMap<_, _>>(),
        );

        Ok(Self { entries, creators })
    }

    /// Whether `kind` has a registered reducer.
    pub fn contains(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// The reducer registered for `kind`.
    pub fn reducer(&self, kind: &str) -> Option<Reducer<S>> {
        self.entries.get(kind).map(|entry| entry.reducer.clone())
    }

    /// The cached constructor map: every registered kind mapped to its
    /// derived [`ActionCreator`]. The same `Arc` is returned until the
    /// registry itself is replaced.
    pub fn creators(&self) -> Arc<HashMap<String, ActionCreator>> {
        self.creators.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S> std::fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("Registry").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_model::ReducerEntry;

    type State = Vec<u32>;

    fn provider(name: &str, kinds: &[(&str, bool)]) -> Provider<State> {
        kinds.iter().fold(Provider::new(name), |p, (kind, payload)| {
            if *payload {
                p.register(ReducerEntry::with_payload(
                    *kind,
                    |mut draft: State, value: u32| async move {
                        draft.push(value);
                        Ok(draft)
                    },
                ))
            } else {
                p.register(ReducerEntry::without_payload(*kind, |draft: State| async move {
                    Ok(draft)
                }))
            }
        })
    }

    #[test]
    fn derives_a_creator_per_entry() {
        let registry =
            Registry::from_providers([provider("p", &[("add", true), ("clear", false)])]).unwrap();

        let creators = registry.creators();
        assert_eq!(creators.len(), 2);
        assert!(creators["add"].expects_payload());
        assert!(!creators["clear"].expects_payload());
    }

    #[test]
    fn creator_map_is_cached() {
        let registry = Registry::from_providers([provider("p", &[("add", true)])]).unwrap();
        assert!(Arc::ptr_eq(&registry.creators(), &registry.creators()));
    }

    #[test]
    fn duplicate_kind_across_providers_fails_construction() {
        let err = Registry::from_providers([
            provider("a", &[("add", true)]),
            provider("b", &[("add", false)]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ComposeError::DuplicateActionKind {
                kind: "add".into(),
                first: "a".into(),
                second: "b".into(),
            }
        );
    }

    #[test]
    fn duplicate_kind_within_one_provider_fails_construction() {
        let err = Registry::from_providers([provider("a", &[("add", true), ("add", true)])])
            .unwrap_err();
        assert!(matches!(err, ComposeError::DuplicateActionKind { kind, .. } if kind == "add"));
    }
}

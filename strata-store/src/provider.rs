//! Provider - a feature module's contribution to the registry.
//!
//! Each feature area declares its reducer entries as an explicit list and
//! wraps them in a named provider. Providers merge into one combined set
//! before store construction; a kind claimed by two providers fails the
//! merge immediately rather than silently overriding.

use strata_model::ReducerEntry;

use crate::error::ComposeError;

/// A named set of reducer entries contributed by one feature module.
///
/// Entries are explicit, statically-declared values - there is no
/// reflection over a module's members, only what was registered.
pub struct Provider<S> {
    name: String,
    // Each entry keeps the name of the provider that contributed it, so a
    // collision found after several merges can still name both sides.
    entries: Vec<(String, ReducerEntry<S>)>,
}

impl<S> Provider<S> {
    /// Create an empty provider for one feature area.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Add a reducer entry to this provider.
    ///
    /// Uniqueness is not checked here; it is enforced at [`merge`] time and
    /// again when the registry is built.
    ///
    /// [`merge`]: Provider::merge
    pub fn register(mut self, entry: ReducerEntry<S>) -> Self {
        self.entries.push((self.name.clone(), entry));
        self
    }

    /// Combine two providers' entries into one.
    ///
    /// Fails immediately if any action kind appears in both - before any
    /// store exists. This is a fail-fast integrity check, not an override.
    pub fn merge(mut self, other: Provider<S>) -> Result<Provider<S>, ComposeError> {
        for (source, entry) in &other.entries {
            if let Some((first, _)) = self
                .entries
                .iter()
                .find(|(_, existing)| existing.kind() == entry.kind())
            {
                return Err(ComposeError::DuplicateActionKind {
                    kind: entry.kind().to_string(),
                    first: first.clone(),
                    second: source.clone(),
                });
            }
        }
        self.entries.extend(other.entries);
        self.name = format!("{}+{}", self.name, other.name);
        Ok(self)
    }

    /// The provider's (possibly merged) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Action kinds declared so far, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, entry)| entry.kind())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decompose into `(contributing provider, entry)` pairs.
    pub(crate) fn into_entries(self) -> Vec<(String, ReducerEntry<S>)> {
        self.entries
    }
}

impl<S> std::fmt::Debug for Provider<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("kinds", &self.kinds().collect::<Vec<_>>())
            .finish()
    }
}

//! Repository trust resolution.
//!
//! Trust is resolved per skill load from the originating repository
//! identifier ("owner/name" form): a static allow-list yields
//! [`TrustLevel::Trusted`], membership in the operator-mutable
//! [`VerifiedRepositorySet`] yields [`TrustLevel::Verified`], and
//! everything else -- including an empty identifier -- falls through to
//! [`TrustLevel::Untrusted`]. Resolution is total over all string inputs
//! and has no side effects.
//!
//! # Concurrency
//!
//! The verified set is the one piece of mutable shared state in the
//! engine. It is guarded for many-reader / rare-writer access: resolution
//! takes a read lock, promotion and demotion take the write lock. In-flight
//! reads always observe a consistent snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use skillgate_types::TrustLevel;

/// Repositories that are officially trusted out of the box.
pub const DEFAULT_TRUSTED_REPOSITORIES: &[&str] = &[
    "anthropics/skills",
    "anthropics/skill-library",
    "modelcontextprotocol/skills",
];

/// Operator-mutable set of repositories promoted to verified trust.
///
/// Created empty (or seeded from persisted configuration by the caller)
/// at process start. Add and remove are idempotent.
#[derive(Debug, Default)]
pub struct VerifiedRepositorySet {
    inner: RwLock<HashSet<String>>,
}

impl VerifiedRepositorySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a set from previously persisted identifiers.
    pub fn from_iter<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: RwLock::new(ids.into_iter().map(Into::into).collect()),
        }
    }

    /// Promote a repository. Returns `true` if it was newly added.
    pub fn add(&self, repository_id: &str) -> bool {
        self.inner.write().insert(repository_id.to_string())
    }

    /// Demote a repository. Returns `true` if it was present.
    pub fn remove(&self, repository_id: &str) -> bool {
        self.inner.write().remove(repository_id)
    }

    /// Whether a repository is currently verified.
    pub fn contains(&self, repository_id: &str) -> bool {
        self.inner.read().contains(repository_id)
    }

    /// Number of verified repositories.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// Maps a repository identifier to a [`TrustLevel`].
#[derive(Debug)]
pub struct TrustResolver {
    trusted: HashSet<String>,
    verified: Arc<VerifiedRepositorySet>,
}

impl TrustResolver {
    /// Create a resolver with the default trusted list and the given
    /// verified set.
    pub fn new(verified: Arc<VerifiedRepositorySet>) -> Self {
        Self::with_trusted(
            DEFAULT_TRUSTED_REPOSITORIES.iter().map(|s| (*s).to_string()),
            verified,
        )
    }

    /// Create a resolver with an explicit trusted list (for testing or
    /// alternative deployments).
    pub fn with_trusted<I>(trusted: I, verified: Arc<VerifiedRepositorySet>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            trusted: trusted.into_iter().collect(),
            verified,
        }
    }

    /// Resolve a repository identifier to its trust level.
    ///
    /// Fail-closed: an empty identifier is untrusted.
    pub fn resolve(&self, repository_id: &str) -> TrustLevel {
        if repository_id.is_empty() {
            return TrustLevel::Untrusted;
        }
        if self.trusted.contains(repository_id) {
            TrustLevel::Trusted
        } else if self.verified.contains(repository_id) {
            TrustLevel::Verified
        } else {
            TrustLevel::Untrusted
        }
    }

    /// The verified set this resolver reads from.
    pub fn verified_set(&self) -> &Arc<VerifiedRepositorySet> {
        &self.verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> TrustResolver {
        TrustResolver::new(Arc::new(VerifiedRepositorySet::new()))
    }

    // ── Resolution ─────────────────────────────────────────────────

    #[test]
    fn official_repository_is_trusted() {
        let r = resolver();
        assert_eq!(r.resolve("anthropics/skills"), TrustLevel::Trusted);
    }

    #[test]
    fn unknown_repository_is_untrusted() {
        let r = resolver();
        assert_eq!(r.resolve("somebody/random-skills"), TrustLevel::Untrusted);
    }

    #[test]
    fn empty_identifier_is_untrusted() {
        let r = resolver();
        assert_eq!(r.resolve(""), TrustLevel::Untrusted);
    }

    #[test]
    fn verified_membership_yields_verified() {
        let verified = Arc::new(VerifiedRepositorySet::new());
        let r = TrustResolver::new(verified.clone());
        assert_eq!(r.resolve("community/repo"), TrustLevel::Untrusted);

        verified.add("community/repo");
        assert_eq!(r.resolve("community/repo"), TrustLevel::Verified);

        verified.remove("community/repo");
        assert_eq!(r.resolve("community/repo"), TrustLevel::Untrusted);
    }

    #[test]
    fn trusted_wins_over_verified() {
        let verified = Arc::new(VerifiedRepositorySet::new());
        verified.add("anthropics/skills");
        let r = TrustResolver::new(verified);
        assert_eq!(r.resolve("anthropics/skills"), TrustLevel::Trusted);
    }

    #[test]
    fn custom_trusted_list() {
        let r = TrustResolver::with_trusted(
            ["corp/internal-skills".to_string()],
            Arc::new(VerifiedRepositorySet::new()),
        );
        assert_eq!(r.resolve("corp/internal-skills"), TrustLevel::Trusted);
        assert_eq!(r.resolve("anthropics/skills"), TrustLevel::Untrusted);
    }

    // ── Verified set semantics ─────────────────────────────────────

    #[test]
    fn add_and_remove_are_idempotent() {
        let set = VerifiedRepositorySet::new();
        assert!(set.add("a/b"));
        assert!(!set.add("a/b"));
        assert_eq!(set.len(), 1);

        assert!(set.remove("a/b"));
        assert!(!set.remove("a/b"));
        assert!(set.is_empty());
    }

    #[test]
    fn seeded_from_persisted_config() {
        let set = VerifiedRepositorySet::from_iter(["a/b", "c/d"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("a/b"));
        assert!(set.contains("c/d"));
    }

    #[test]
    fn concurrent_readers_and_writer() {
        let set = Arc::new(VerifiedRepositorySet::new());
        set.add("seed/repo");

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let set = set.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        let _ = set.contains("seed/repo");
                    }
                })
            })
            .collect();

        let writer = {
            let set = set.clone();
            std::thread::spawn(move || {
                for i in 0..100 {
                    set.add(&format!("repo/{i}"));
                }
            })
        };

        for handle in readers {
            handle.join().unwrap();
        }
        writer.join().unwrap();
        assert!(set.contains("seed/repo"));
        assert_eq!(set.len(), 101);
    }
}

//! Decides which content entries and variants survive for a version.
//!
//! Pure functions only. A missing target never raises: absent variants resolve to the
//! empty value of their type and absent priorities default to 1.

use crate::models::VariantMap;
use crate::versions::VersionProfile;

/// Version tag that includes an entry in every version.
pub const ALL_TAG: &str = "all";

/// Separator inside composite variant keys such as `"ai,consulting"`.
pub const VARIANT_KEY_DELIMITER: char = ',';

/// Priority assumed for entries that do not declare one.
pub const DEFAULT_PRIORITY: u32 = 1;

// ────────────────────────────────────────────────────────────────────────────
// Content entry seam
// ────────────────────────────────────────────────────────────────────────────

/// Any unit of content carrying version membership and priority metadata.
pub trait ContentEntry {
    fn versions(&self) -> &[String];

    /// Declared priority, `None` when absent from the source.
    fn declared_priority(&self) -> Option<u32>;

    fn priority(&self) -> u32 {
        self.declared_priority().unwrap_or(DEFAULT_PRIORITY)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Selection rules
// ────────────────────────────────────────────────────────────────────────────

/// True iff `entry_versions` is empty, contains `"all"`, or contains `target`.
pub fn includes(entry_versions: &[String], target: &str) -> bool {
    entry_versions.is_empty() || entry_versions.iter().any(|v| v == ALL_TAG || v == target)
}

/// Returns the value of the first key (in source order) whose tag set contains `target`.
///
/// Keys are split on the delimiter at every lookup; a single-version key degenerates to
/// an exact match. `"all"` is not special inside variant keys.
pub fn find_variant<'a, T>(map: &'a VariantMap<T>, target: &str) -> Option<&'a T> {
    map.iter()
        .find(|(key, _)| {
            key.split(VARIANT_KEY_DELIMITER)
                .map(str::trim)
                .any(|tag| tag == target)
        })
        .map(|(_, value)| value)
}

/// Like `find_variant`, but yields the type's empty value when nothing matches.
pub fn select_variant<T: Clone + Default>(map: &VariantMap<T>, target: &str) -> T {
    find_variant(map, target).cloned().unwrap_or_default()
}

/// Keeps entries whose priority is within the profile's ceiling.
pub fn filter_by_priority<'a, E: ContentEntry>(
    entries: &'a [E],
    profile: &VersionProfile,
) -> Vec<&'a E> {
    entries
        .iter()
        .filter(|e| within_ceiling(*e, profile))
        .collect()
}

pub fn within_ceiling<E: ContentEntry>(entry: &E, profile: &VersionProfile) -> bool {
    entry.priority() <= profile.max_priority
}

/// Version membership and priority ceiling combined.
pub fn is_selected<E: ContentEntry>(entry: &E, profile: &VersionProfile) -> bool {
    includes(entry.versions(), &profile.name) && within_ceiling(entry, profile)
}

/// Entries surviving both checks, in source order.
pub fn select_entries<'a, E: ContentEntry>(
    entries: &'a [E],
    profile: &VersionProfile,
) -> Vec<&'a E> {
    entries.iter().filter(|e| is_selected(*e, profile)).collect()
}

/// Legacy toggle check: true if any of `toggles` is active for the profile.
pub fn toggles_active(toggles: &[String], profile: &VersionProfile) -> bool {
    toggles.iter().any(|t| profile.has_toggle(t))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

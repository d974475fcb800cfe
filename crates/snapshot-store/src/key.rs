use crate::errors::{StoreErrKind, StoreError};

/// Placeholder written in place of every character outside `[A-Za-z0-9]`.
pub const KEY_PLACEHOLDER: char = '_';

/// Derives the storage key for a selector.
///
/// Each character outside `[A-Za-z0-9]` becomes [`KEY_PLACEHOLDER`], so the
/// result is safe as a file name and one selector always maps to one key.
pub fn snapshot_key(selector: &str) -> String {
    selector
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch
            } else {
                KEY_PLACEHOLDER
            }
        })
        .collect()
}

/// Rejects keys that were not produced by [`snapshot_key`].
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreErrKind::InvalidKey("empty key".into()).into());
    }
    if let Some(ch) = key
        .chars()
        .find(|ch| !ch.is_ascii_alphanumeric() && *ch != KEY_PLACEHOLDER)
    {
        return Err(StoreErrKind::InvalidKey(format!("unexpected character {ch:?} in {key}")).into());
    }
    Ok(())
}

use nutype::nutype;

pub const MAX_STORAGE_KEY_LENGTH: usize = 128;

/// Namespaced key under which a collection is stored in the local key-value store.
#[nutype(
    new_unchecked,
    sanitize(trim),
    validate(not_empty, len_char_max = MAX_STORAGE_KEY_LENGTH),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        AsRef,
        Deref,
        TryFrom,
        Into,
        Hash,
        Display,
        Serialize,
        Deserialize,
    )
)]
pub struct StorageKey(String);

impl StorageKey {
    /// Key of the contact message collection.
    pub const MESSAGES: &'static str = "portfolio_messages";

    /// Sentinel key written and removed by the availability probe.
    pub const PROBE: &'static str = "__storage_probe__";

    pub fn messages() -> Self {
        // SAFETY: constant is non-empty, trimmed and shorter than the maximum.
        unsafe { Self::new_unchecked(Self::MESSAGES.to_string()) }
    }

    pub(crate) fn probe() -> Self {
        // SAFETY: constant is non-empty, trimmed and shorter than the maximum.
        unsafe { Self::new_unchecked(Self::PROBE.to_string()) }
    }
}

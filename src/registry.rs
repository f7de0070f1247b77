//! Type registry (C10, §4.10): operator-facing bookkeeping for extension tags.
//!
//! This does **not** participate in decode dispatch — `Condition::unmarshal_payload` and
//! `Fulfillment::unmarshal_payload` are closed matches over the fixed tag set from §3 and stay
//! that way regardless of what is registered here. The registry exists so an operator can record
//! which non-standard tags a deployment has chosen to acknowledge (for diagnostics or allow-list
//! bookkeeping), with a one-way seal that freezes the table once startup configuration is done.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("type registry is sealed; no further registration is permitted")]
    Sealed,
}

struct Registry {
    sealed: AtomicBool,
    conditions: Mutex<HashMap<u8, String>>,
    fulfillments: Mutex<HashMap<u8, String>>,
}

impl Registry {
    fn new() -> Self {
        Registry { sealed: AtomicBool::new(false), conditions: Mutex::new(HashMap::new()), fulfillments: Mutex::new(HashMap::new()) }
    }
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::new)
}

fn set_or_clear(table: &Mutex<HashMap<u8, String>>, tag: u8, label: Option<&str>) -> Result<(), RegistryError> {
    if registry().sealed.load(Ordering::Acquire) {
        return Err(RegistryError::Sealed);
    }
    let mut table = table.lock().expect("registry mutex poisoned");
    match label {
        Some(label) => {
            table.insert(tag, label.to_string());
        }
        None => {
            table.remove(&tag);
        }
    }
    Ok(())
}

/// Registers (or, with `label: None`, unregisters) a condition tag label. Hard errors once the
/// registry has been [`seal`]ed.
pub fn register_condition(tag: u8, label: Option<&str>) -> Result<(), RegistryError> {
    set_or_clear(&registry().conditions, tag, label)
}

/// Registers (or, with `label: None`, unregisters) a fulfillment tag label. Hard errors once the
/// registry has been [`seal`]ed.
pub fn register_fulfillment(tag: u8, label: Option<&str>) -> Result<(), RegistryError> {
    set_or_clear(&registry().fulfillments, tag, label)
}

pub fn condition_label(tag: u8) -> Option<String> {
    registry().conditions.lock().expect("registry mutex poisoned").get(&tag).cloned()
}

pub fn fulfillment_label(tag: u8) -> Option<String> {
    registry().fulfillments.lock().expect("registry mutex poisoned").get(&tag).cloned()
}

pub fn is_sealed() -> bool { registry().sealed.load(Ordering::Acquire) }

/// One-way; sealing twice is a no-op rather than an error.
pub fn seal() {
    if !registry().sealed.swap(true, Ordering::AcqRel) {
        log::debug!("type registry sealed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The registry is process-global; cargo runs tests in the same binary concurrently, so every
    // scenario that touches `seal()` lives in one test function to keep the sequence deterministic.
    #[test]
    fn registry_lifecycle() {
        register_condition(250, Some("test-tag")).unwrap();
        assert_eq!(condition_label(250), Some("test-tag".to_string()));
        register_condition(250, None).unwrap();
        assert_eq!(condition_label(250), None);

        register_fulfillment(251, Some("test-fulfillment-tag")).unwrap();
        assert_eq!(fulfillment_label(251), Some("test-fulfillment-tag".to_string()));
        register_fulfillment(251, None).unwrap();
        assert_eq!(fulfillment_label(251), None);

        seal();
        seal();
        assert!(is_sealed());
        assert!(matches!(register_condition(252, Some("too-late")), Err(RegistryError::Sealed)));
        assert!(matches!(register_fulfillment(253, Some("too-late")), Err(RegistryError::Sealed)));
    }
}

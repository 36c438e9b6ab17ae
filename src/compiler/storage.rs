//! Storage-layout policy check: a strategy may not declare persistent
//! storage outside the slot range reserved by the base contract.
//!
//! The base contract's own fields occupy slots `0..RESERVED_SLOTS`; anything
//! a submitted `Strategy` declares must land at or above that boundary, as
//! reported by `solc`'s `storage-layout` output.

use serde_json::Value;

/// Slots `0..RESERVED_SLOTS` belong to `AMMStrategyBase`'s own fields.
pub const RESERVED_SLOTS: u64 = 4;

/// Check a `solc` `storageLayout` object for declarations outside the
/// reserved range. Returns one diagnostic per offending entry.
pub fn check_storage_layout(storage_layout: &Value) -> Vec<String> {
    let Some(entries) = storage_layout.get("storage").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let slot: u64 = entry.get("slot")?.as_str()?.parse().ok()?;
            if slot < RESERVED_SLOTS {
                return None;
            }
            let label = entry.get("label").and_then(Value::as_str).unwrap_or("<unknown>");
            Some(format!(
                "storage outside reserved slot range: `{label}` declared at slot {slot} (reserved: 0..{RESERVED_SLOTS})"
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flags_declaration_past_reserved_slots() {
        let layout = json!({
            "storage": [
                { "label": "hacked", "slot": "4", "offset": 0, "type": "t_uint256" }
            ]
        });
        let errors = check_storage_layout(&layout);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("storage outside"));
    }

    #[test]
    fn allows_declarations_within_reserved_slots() {
        let layout = json!({
            "storage": [
                { "label": "owner", "slot": "0", "offset": 0, "type": "t_address" },
                { "label": "initialized", "slot": "3", "offset": 0, "type": "t_bool" }
            ]
        });
        assert!(check_storage_layout(&layout).is_empty());
    }

    #[test]
    fn missing_storage_key_is_treated_as_empty() {
        assert!(check_storage_layout(&json!({})).is_empty());
    }
}

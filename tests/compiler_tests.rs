//! Integration tests for the artifact-level policy checks (`compiler`'s
//! second defense layer). These exercise `opcodes`/`storage` directly
//! since invoking `run_solc` needs a real `solc` binary on PATH, which
//! this test suite doesn't assume is available.

use amm_fee_arena::compiler::opcodes::scan_forbidden;
use amm_fee_arena::compiler::storage::check_storage_layout;
use serde_json::json;

#[test]
fn call_opcode_after_push_immediates_is_still_flagged() {
    // PUSH2 0xf1f1, CALL — the real CALL opcode must survive the scan even
    // when the two preceding bytes happen to collide with its own value.
    let bytecode = [0x61, 0xf1, 0xf1, 0xf1];
    let hits = scan_forbidden(&bytecode);
    assert_eq!(hits, vec![0xf1]);
}

#[test]
fn clean_bytecode_has_no_hits() {
    // PUSH1 0x00, PUSH1 0x00, RETURN — no forbidden opcodes anywhere.
    let bytecode = [0x60, 0x00, 0x60, 0x00, 0xf3];
    assert!(scan_forbidden(&bytecode).is_empty());
}

#[test]
fn log_and_timestamp_opcodes_are_both_forbidden() {
    let bytecode = [0x42, 0xa0]; // TIMESTAMP, LOG0
    let hits = scan_forbidden(&bytecode);
    assert_eq!(hits, vec![0x42, 0xa0]);
}

#[test]
fn storage_layout_within_reserved_slots_is_accepted() {
    let layout = json!({
        "storage": [
            { "label": "owner", "slot": "0", "offset": 0, "type": "t_address" },
            { "label": "initialized", "slot": "3", "offset": 0, "type": "t_bool" },
        ]
    });
    assert!(check_storage_layout(&layout).is_empty());
}

#[test]
fn storage_layout_at_the_reserved_boundary_is_flagged() {
    // RESERVED_SLOTS is 4, so slot 4 itself belongs to the submission, not
    // the base contract, and must be rejected.
    let layout = json!({
        "storage": [{ "label": "myState", "slot": "4", "offset": 0, "type": "t_uint256" }]
    });
    let errors = check_storage_layout(&layout);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_lowercase().contains("storage outside"));
}

#[test]
fn multiple_offending_declarations_are_all_reported() {
    let layout = json!({
        "storage": [
            { "label": "a", "slot": "5", "offset": 0, "type": "t_uint256" },
            { "label": "b", "slot": "6", "offset": 0, "type": "t_uint256" },
        ]
    });
    assert_eq!(check_storage_layout(&layout).len(), 2);
}

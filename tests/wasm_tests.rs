//! WASM tests using wasm_bindgen_test
//!
//! Run with: wasm-pack test --headless --chrome --features wasm
//! Native runs of the same bindings live in src/wasm.rs (cargo test --features wasm)

#![cfg(all(target_arch = "wasm32", feature = "wasm"))]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use csef::wasm::{decode_csef, encode_csef, mirror_csef, render_csef_rgba, validate_csef};

/// Guard climbing frame from the game, 30x30
const GUARD_RUP0: &str = "~9.2.8A9.2.^9.2.8A1.4{6.9.2.8U2.3{6.9.2.8U2.3D6.9.2.8U2.3A6.9.2.1{6U1{2.3A6.9.3.6{3.3A6.9.3.6A2.4A6.9.9A5A7.8.9A6A7.7.9A6A8.7.3A1.8A9.2.^8.2D1.8A9.2.8.3{1B2}5B9.2.8.2{1.1B2}5B2A9.9.2.9A2A8.^9.2.6A2.3A8.9.1.4A5.3A8.9.1.3A6.3A8.9.1.3A6.3B8.9.1.3A6.4B7.9.1.3A9.8.9.1.3B9.8.9.4B9.8.~~";

// ============================================================================
// decode_csef
// ============================================================================

#[wasm_bindgen_test]
fn test_decode_game_frame() {
    let result = decode_csef(GUARD_RUP0, 30, true);
    assert!(result.error().is_none());
    assert_eq!(result.width(), 30);
    assert_eq!(result.height(), 30);
    assert!(result.rows().iter().all(|row| row.chars().count() == 30));
}

#[wasm_bindgen_test]
fn test_decode_lenient_warnings() {
    let result = decode_csef("2A0", 2, false);
    assert_eq!(result.rows(), vec!["AA"]);
    assert_eq!(result.warnings().len(), 1);
}

// ============================================================================
// encode_csef / mirror_csef
// ============================================================================

#[wasm_bindgen_test]
fn test_encode_round_trip() {
    let decoded = decode_csef(GUARD_RUP0, 30, false);
    let encoded = encode_csef(&decoded.rows().join("\n"), 30, false);
    assert!(encoded.error().is_none());

    let again = decode_csef(&encoded.encoded(), 30, true);
    assert_eq!(again.rows(), decoded.rows());
}

#[wasm_bindgen_test]
fn test_mirror_twice_restores_frame() {
    let once = mirror_csef(GUARD_RUP0, 30);
    let twice = mirror_csef(&once.encoded(), 30);
    assert_eq!(
        decode_csef(&twice.encoded(), 30, true).rows(),
        decode_csef(GUARD_RUP0, 30, true).rows()
    );
}

// ============================================================================
// render_csef_rgba / validate_csef
// ============================================================================

#[wasm_bindgen_test]
fn test_render_game_frame() {
    let result = render_csef_rgba(GUARD_RUP0, 30, "pc66");
    assert_eq!(result.width(), 30);
    assert_eq!(result.height(), 30);
    assert_eq!(result.pixels().len(), 30 * 30 * 4);
    assert!(result.warnings().is_empty());
}

#[wasm_bindgen_test]
fn test_validate_game_frame() {
    assert!(validate_csef(GUARD_RUP0, 30).is_empty());
    assert!(!validate_csef("1A>", 3).is_empty());
}

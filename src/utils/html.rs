//! HTML embedding utilities.

use serde::Serialize;

/// Serialize `value` as JSON that is safe to place inside a `<script>` block.
///
/// `<`, `>` and `&` are emitted as unicode escapes so a string value can
/// never close the surrounding script element.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}

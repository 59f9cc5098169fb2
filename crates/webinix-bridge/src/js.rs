//! Helpers for building JavaScript snippets passed to `Window::run` and
//! `Window::run_script`.

use serde::Serialize;

/// Quote `text` as a JavaScript string literal.
pub fn js_string(text: &str) -> String {
    // JSON string escaping is valid JavaScript, except for the line and
    // paragraph separators in older engines.
    serde_json::to_string(text)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Serialize `value` as a JavaScript expression. Falls back to `null`.
pub fn js_value<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

/// Generate a call of the global `function` with JSON arguments.
pub fn js_call(function: &str, args: &[serde_json::Value]) -> String {
    let args: Vec<String> = args.iter().map(js_value).collect();
    format!("{}({});", function, args.join(", "))
}

/// Generate a script that returns `expression` from a `run_script` call.
pub fn js_return(expression: &str) -> String {
    format!("return {expression};")
}

/// Generate a script that sets the text of the element with `id`.
pub fn js_set_text(id: &str, text: &str) -> String {
    format!(
        "document.getElementById({}).textContent = {};",
        js_string(id),
        js_string(text)
    )
}

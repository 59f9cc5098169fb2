//! Built-in demo page and its handlers.

use tracing::{debug, info};
use webinix_bridge::{js, BridgeError, Event, EventType, Window, WILDCARD};

pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16"><rect width="16" height="16" rx="3" fill="#2f6fdb"/></svg>"##;

pub const DEMO_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="UTF-8">
    <title>webinix demo</title>
    <script src="webinix.js"></script>
  </head>
  <body>
    <h2>webinix</h2>
    <input id="name" placeholder="Your name">
    <button onclick="greet()">Greet</button>
    <button onclick="add()">1 + 2</button>
    <button id="Ping">Ping</button>
    <button id="Exit">Exit</button>
    <p id="status"></p>
    <script>
      async function greet() {
        const name = document.getElementById('name').value;
        document.getElementById('status').textContent = await webinix.call('Greet', name);
      }
      async function add() {
        document.getElementById('status').textContent = await webinix.call('Add', '[1, 2]');
      }
    </script>
  </body>
</html>"#;

/// Reply for the `Greet` call.
pub fn greeting(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        "Hello, stranger!".to_string()
    } else {
        format!("Hello, {name}!")
    }
}

/// Sum of a JSON array of numbers, for the `Add` call.
pub fn add(data: &str) -> Result<f64, String> {
    let numbers: Vec<f64> =
        serde_json::from_str(data).map_err(|e| format!("expected a JSON array of numbers: {e}"))?;
    Ok(numbers.iter().sum())
}

fn log_event(event: &Event) {
    match event.event_type {
        EventType::Connected => info!(window_id = %event.window.id(), "browser connected"),
        EventType::Disconnected => info!(window_id = %event.window.id(), "browser disconnected"),
        EventType::Navigation => info!(url = %event.data, "navigation"),
        other => debug!(element = %event.element, event_type = ?other, "unhandled event"),
    }
}

/// Bind the demo page's elements on `window`.
pub fn bind_handlers(window: &Window) -> Result<(), BridgeError> {
    window.bind(WILDCARD, log_event)?;
    window.bind("Greet", |e| greeting(&e.data))?;
    window.bind("Add", |e| add(&e.data))?;
    window.bind("Ping", |e| {
        let script = js::js_set_text("status", &format!("pong #{}", e.event_number));
        e.window.run(&script).map(|_| ())
    })?;
    window.bind("Exit", |e| {
        info!("exit clicked");
        e.window.close();
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_uses_trimmed_name() {
        assert_eq!(greeting("  Ada "), "Hello, Ada!");
        assert_eq!(greeting(""), "Hello, stranger!");
    }

    #[test]
    fn add_sums_numbers() {
        assert_eq!(add("[1, 2]").unwrap(), 3.0);
        assert_eq!(add("[]").unwrap(), 0.0);
        assert_eq!(add("[0.5, 0.25]").unwrap(), 0.75);
    }

    #[test]
    fn add_rejects_non_arrays() {
        assert!(add("three").is_err());
        assert!(add("{\"a\": 1}").is_err());
    }

    #[test]
    fn demo_page_loads_bridge_script() {
        assert!(DEMO_PAGE.contains("webinix.js"));
        assert!(DEMO_PAGE.contains("id=\"Exit\""));
    }
}

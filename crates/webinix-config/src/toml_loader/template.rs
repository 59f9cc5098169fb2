//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Webinix Configuration
# Only override what you want to change -- missing fields use defaults.

[library]
# Fallback directory searched after the current working directory.
# search_dir = "/opt/webinix"
# file_name = "webinix-2-x64.so"

[startup]
# timeout_secs = 30      # 1-3600, time allowed for the browser to connect

[script]
# timeout_secs = 0       # 0 waits indefinitely
# max_response_bytes = 8192

[window]
# browser = "any"        # any, chrome, firefox, edge, safari, chromium, custom
# runtime = "none"       # none, deno, nodejs
# multi_access = false
# kiosk = false

[cache]
# dir = "__intcache__"
# cleanup_on_wait = true

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}

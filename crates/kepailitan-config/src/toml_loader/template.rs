//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Prosedur Kepailitan configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[search]
# min_query_chars = 2            # 1-32
# searchable_tags = ["p", "li", "h2", "h3", "h4", "h5", "td", "th"]
# highlight_tag = "mark"
# highlight_class = "search-highlight"
# active_class = "search-highlight-active"
# reveal_delay_ms = 300          # 0-5000
# header_fallback_height = 70.0  # 0-400
# scroll_margin = 20.0           # 0-200
# summary_excerpts = 3           # 1-10

[bindings]
# inputs = ["search-input-desktop", "search-input-mobile"]
# buttons = ["search-button-desktop", "search-button-mobile"]   # buttons[i] submits inputs[i]
# results = "search-results-container"
# previous = "search-prev"
# next = "search-next"
# position = "search-position"

[progress]
# storage_key = "pailitProgress"
# quiz_storage_key = "pailkitQuizScore"
# total_sections = 8             # 1-100

[offline]
# cache_name = "prosedur-kepailitan-v1"
# network_first_hosts = ["cdn.tailwindcss.com", "fonts.googleapis.com", "fonts.gstatic.com"]
# offline_fallback = "/index.html"

[logging]
# level = "info"                 # trace, debug, info, warn, error
"##
    .to_string()
}

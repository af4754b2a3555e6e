use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-app/1.0";

/// Accept header value requested from the NWS API
pub const ACCEPT_GEO_JSON: &str = "application/geo+json";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Upper bound on a single upstream request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Placed between consecutive formatted alerts
pub const ALERT_SEPARATOR: &str = "\n---\n";

// Field fallbacks used when an alert omits a property
pub const UNKNOWN: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_INSTRUCTIONS: &str = "No specific instructions available";

// Tool replies
pub const UNABLE_TO_FETCH: &str = "Unable to fetch alerts or no alerts found.";
pub const NO_ACTIVE_ALERTS: &str = "No active alerts for this state.";

/// Body of the `config://app` resource
pub const APP_CONFIG: &str = "App config here";

/// Prefix applied by the `echo://{message}` resource
pub const ECHO_PREFIX: &str = "Echo: ";

/// Name advertised to MCP clients
pub const SERVER_NAME: &str = "weather";

/// Static configuration resource
pub const CONFIG_URI: &str = "config://app";

/// Echo resource, parameterised by the message to return
pub const ECHO_URI_TEMPLATE: &str = "echo://{message}";

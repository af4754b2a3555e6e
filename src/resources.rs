use crate::constants::{APP_CONFIG, CONFIG_URI, ECHO_PREFIX, ECHO_URI_TEMPLATE};
use crate::error::RegistryError;
use crate::registry::{ResourceEntry, ResourceParams, ResourceRegistry};

/// Static configuration for the weather app
pub fn get_config(_params: &ResourceParams) -> String {
    APP_CONFIG.to_string()
}

/// Echoes the `message` segment of the URI back to the client
pub fn echo(params: &ResourceParams) -> String {
    let message = params.get("message").map(String::as_str).unwrap_or_default();
    format!("{}{}", ECHO_PREFIX, message)
}

pub fn entries() -> Vec<ResourceEntry> {
    vec![
        ResourceEntry {
            template: CONFIG_URI,
            name: "config",
            description: "Static configuration for the weather app",
            handler: get_config,
        },
        ResourceEntry {
            template: ECHO_URI_TEMPLATE,
            name: "echo",
            description: "Echo a message back to the client",
            handler: echo,
        },
    ]
}

/// Registry holding every resource this server publishes
pub fn registry() -> Result<ResourceRegistry, RegistryError> {
    ResourceRegistry::new(entries())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo() {
        let registry = registry().unwrap();
        assert_eq!(registry.resolve("echo://hello").as_deref(), Some("Echo: hello"));
    }

    #[test]
    fn test_echo_keeps_message_verbatim() {
        let registry = registry().unwrap();
        assert_eq!(
            registry.resolve("echo://Hello%20World!").as_deref(),
            Some("Echo: Hello%20World!")
        );
    }

    #[test]
    fn test_config_is_constant() {
        let registry = registry().unwrap();
        let first = registry.resolve("config://app");

        assert_eq!(first.as_deref(), Some("App config here"));
        assert_eq!(registry.resolve("config://app"), first);
        assert_eq!(get_config(&ResourceParams::new()), APP_CONFIG);
    }

    #[test]
    fn test_unknown_uri() {
        let registry = registry().unwrap();
        assert_eq!(registry.resolve("config://other"), None);
        assert_eq!(registry.resolve("weather://alerts"), None);
    }
}

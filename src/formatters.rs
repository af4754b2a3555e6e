use crate::constants::{ALERT_SEPARATOR, NO_ACTIVE_ALERTS, UNABLE_TO_FETCH};
use crate::models::{AlertFeature, AlertsResponse};

/// Formats a single alert feature into a fixed-field text block
pub fn format_alert(feature: &AlertFeature) -> String {
    let alert = feature.alert();
    format!(
        "Event: {}\nArea: {}\nSeverity: {}\nDescription: {}\nInstructions: {}",
        alert.event, alert.area, alert.severity, alert.description, alert.instruction
    )
}

/// Formats every feature, keeping upstream order, separated by `---` lines
pub fn join_alerts(features: &[AlertFeature]) -> String {
    features
        .iter()
        .map(format_alert)
        .collect::<Vec<_>>()
        .join(ALERT_SEPARATOR)
}

/// Builds the `get_alerts` reply from whatever the upstream call produced
pub fn format_alerts_reply(response: Option<AlertsResponse>) -> String {
    match response.and_then(|r| r.features) {
        None => UNABLE_TO_FETCH.to_string(),
        Some(features) if features.is_empty() => NO_ACTIVE_ALERTS.to_string(),
        Some(features) => join_alerts(&features),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NO_DESCRIPTION, NO_INSTRUCTIONS, UNKNOWN};
    use crate::models::AlertProperties;

    fn feature(props: AlertProperties) -> AlertFeature {
        AlertFeature {
            properties: Some(props),
        }
    }

    fn full_props(event: &str) -> AlertProperties {
        AlertProperties {
            event: Some(event.to_string()),
            area_desc: Some("Coastal Los Angeles County".to_string()),
            severity: Some("Severe".to_string()),
            description: Some("Winds 40 to 50 mph.".to_string()),
            instruction: Some("Secure outdoor objects.".to_string()),
        }
    }

    #[test]
    fn test_format_alert_all_fields() {
        let text = format_alert(&feature(full_props("Wind Advisory")));

        assert_eq!(
            text,
            "Event: Wind Advisory\n\
             Area: Coastal Los Angeles County\n\
             Severity: Severe\n\
             Description: Winds 40 to 50 mph.\n\
             Instructions: Secure outdoor objects."
        );
    }

    #[test]
    fn test_format_alert_defaults_are_independent() {
        let props = AlertProperties {
            severity: None,
            instruction: None,
            ..full_props("Heat Advisory")
        };
        let lines: Vec<String> = format_alert(&feature(props))
            .lines()
            .map(str::to_string)
            .collect();

        assert_eq!(lines[0], "Event: Heat Advisory");
        assert_eq!(lines[1], "Area: Coastal Los Angeles County");
        assert_eq!(lines[2], format!("Severity: {}", UNKNOWN));
        assert_eq!(lines[3], "Description: Winds 40 to 50 mph.");
        assert_eq!(lines[4], format!("Instructions: {}", NO_INSTRUCTIONS));
    }

    #[test]
    fn test_format_alert_without_properties() {
        let text = format_alert(&AlertFeature::default());

        assert_eq!(
            text,
            format!(
                "Event: {u}\nArea: {u}\nSeverity: {u}\nDescription: {}\nInstructions: {}",
                NO_DESCRIPTION,
                NO_INSTRUCTIONS,
                u = UNKNOWN
            )
        );
    }

    #[test]
    fn test_join_alerts_separator_count_and_order() {
        let features: Vec<AlertFeature> = ["First", "Second", "Third"]
            .iter()
            .map(|e| feature(full_props(e)))
            .collect();

        let joined = join_alerts(&features);

        assert_eq!(joined.matches(ALERT_SEPARATOR).count(), 2);
        let segments: Vec<&str> = joined.split(ALERT_SEPARATOR).collect();
        assert_eq!(segments.len(), 3);
        for (segment, feature) in segments.iter().zip(&features) {
            assert_eq!(*segment, format_alert(feature));
        }
    }

    #[test]
    fn test_join_single_alert_has_no_separator() {
        let joined = join_alerts(&[feature(full_props("Only"))]);
        assert!(!joined.contains(ALERT_SEPARATOR));
    }

    #[test]
    fn test_reply_for_missing_data() {
        assert_eq!(format_alerts_reply(None), UNABLE_TO_FETCH);
        assert_eq!(
            format_alerts_reply(Some(AlertsResponse { features: None })),
            UNABLE_TO_FETCH
        );
    }

    #[test]
    fn test_reply_for_empty_features() {
        let reply = format_alerts_reply(Some(AlertsResponse {
            features: Some(Vec::new()),
        }));
        assert_eq!(reply, NO_ACTIVE_ALERTS);
    }

    #[test]
    fn test_reply_formats_every_feature() {
        let reply = format_alerts_reply(Some(AlertsResponse {
            features: Some(vec![feature(full_props("A")), AlertFeature::default()]),
        }));

        assert!(reply.starts_with("Event: A\n"));
        assert!(reply.ends_with(&format!("Instructions: {}", NO_INSTRUCTIONS)));
        assert_eq!(reply.matches(ALERT_SEPARATOR).count(), 1);
    }
}

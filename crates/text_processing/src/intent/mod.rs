//! Intent classification and component selection
//!
//! The classifier is a fixed decision list over the keyword set:
//!
//! 1. any of `serial`, `pump`, `tank`, `body`, `chassis` → component serial lookup
//! 2. both `delivery` and `date` → delivery date lookup
//! 3. `dealer` → dealer lookup
//! 4. otherwise → unclear
//!
//! Which component was asked for is decided separately, by scanning the raw
//! question text (see [`Component::select`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use order_desk_config::constants::{columns, vocabulary};

use crate::keywords::KeywordSet;

/// What the user wants to know about an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ComponentSerialLookup,
    DeliveryDateLookup,
    DealerLookup,
    Unclear,
}

impl Intent {
    /// Label used in logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ComponentSerialLookup => "component_serial_lookup",
            Intent::DeliveryDateLookup => "delivery_date_lookup",
            Intent::DealerLookup => "dealer_lookup",
            Intent::Unclear => "unclear",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracked sub-assemblies of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Pump,
    Tank,
    Body,
    Chassis,
}

impl Component {
    /// Scan order for [`Component::select`]
    pub const ALL: [Component; 4] = [
        Component::Pump,
        Component::Tank,
        Component::Body,
        Component::Chassis,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Component::Pump => "pump",
            Component::Tank => "tank",
            Component::Body => "body",
            Component::Chassis => "chassis",
        }
    }

    /// Name with an upper-case first letter, for answers
    pub fn title(&self) -> &'static str {
        match self {
            Component::Pump => "Pump",
            Component::Tank => "Tank",
            Component::Body => "Body",
            Component::Chassis => "Chassis",
        }
    }

    /// Dataset column holding this component's serial numbers
    pub fn column(&self) -> &'static str {
        match self {
            Component::Pump => columns::PUMP_SERIAL,
            Component::Tank => columns::TANK_SERIAL,
            Component::Body => columns::BODY_SERIAL,
            Component::Chassis => columns::CHASSIS_SERIAL,
        }
    }

    /// First component whose name occurs anywhere in the lower-cased question.
    ///
    /// This is a plain substring scan: "pumps" selects the pump.
    pub fn select(question: &str) -> Option<Component> {
        let lowered = question.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|component| lowered.contains(component.name()))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decision-list intent classifier
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Map a keyword set to exactly one intent
    pub fn classify(&self, keywords: &KeywordSet) -> Intent {
        let intent = if keywords.contains_any(&vocabulary::SERIAL_TERMS) {
            Intent::ComponentSerialLookup
        } else if keywords.contains(vocabulary::DELIVERY) && keywords.contains(vocabulary::DATE) {
            Intent::DeliveryDateLookup
        } else if keywords.contains(vocabulary::DEALER) {
            Intent::DealerLookup
        } else {
            Intent::Unclear
        };

        tracing::debug!(intent = %intent, keyword_count = keywords.len(), "Classified intent");
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(tokens: &[&str]) -> Intent {
        let keywords: KeywordSet = tokens.iter().copied().collect();
        IntentClassifier::new().classify(&keywords)
    }

    #[test]
    fn test_decision_list() {
        assert_eq!(classify(&["pump", "123456"]), Intent::ComponentSerialLookup);
        assert_eq!(classify(&["serial", "number"]), Intent::ComponentSerialLookup);
        assert_eq!(classify(&["delivery", "date"]), Intent::DeliveryDateLookup);
        assert_eq!(classify(&["dealer", "name"]), Intent::DealerLookup);
        assert_eq!(classify(&["123456"]), Intent::Unclear);
        assert_eq!(classify(&[]), Intent::Unclear);
    }

    #[test]
    fn test_delivery_needs_both_words() {
        assert_eq!(classify(&["delivery"]), Intent::Unclear);
        assert_eq!(classify(&["date"]), Intent::Unclear);
        assert_eq!(classify(&["delivery", "dealer"]), Intent::DealerLookup);
    }

    #[test]
    fn test_serial_terms_take_precedence() {
        assert_eq!(
            classify(&["chassis", "delivery", "date", "dealer"]),
            Intent::ComponentSerialLookup
        );
        assert_eq!(
            classify(&["delivery", "date", "dealer"]),
            Intent::DeliveryDateLookup
        );
    }

    #[test]
    fn test_component_columns() {
        assert_eq!(Component::Pump.column(), "Pump SN_AX");
        assert_eq!(Component::Tank.column(), "Tank SN_AX");
        assert_eq!(Component::Body.column(), "Body SN_AX");
        assert_eq!(Component::Chassis.column(), "Chassis_ST");
    }

    #[test]
    fn test_component_selection() {
        assert_eq!(Component::select("Pump serial for 123456"), Some(Component::Pump));
        assert_eq!(Component::select("CHASSIS number"), Some(Component::Chassis));
        assert_eq!(Component::select("how many pumps"), Some(Component::Pump));
        assert_eq!(Component::select("serial number please"), None);
    }

    #[test]
    fn test_component_selection_follows_scan_order() {
        // tank is scanned before chassis regardless of position in the text
        assert_eq!(
            Component::select("chassis and tank serials"),
            Some(Component::Tank)
        );
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&Intent::DeliveryDateLookup).unwrap(),
            "\"delivery_date_lookup\""
        );
        assert_eq!(serde_json::to_string(&Component::Chassis).unwrap(), "\"chassis\"");
        assert_eq!(Component::Body.title(), "Body");
    }
}

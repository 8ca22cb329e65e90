//! Fixed schema and defaults
//!
//! Column names are those produced by the master-schedule export. They are not
//! configurable: a renamed column shows up as a "column not found" answer.

/// Dataset column names
pub mod columns {
    /// Sales-order identifier
    pub const SO_NUMBER: &str = "soNumber";

    pub const DELIVERY_DATE: &str = "deliveryDate";

    pub const DEALER_NAME: &str = "dealerName";

    pub const PUMP_SERIAL: &str = "Pump SN_AX";
    pub const TANK_SERIAL: &str = "Tank SN_AX";
    pub const BODY_SERIAL: &str = "Body SN_AX";
    pub const CHASSIS_SERIAL: &str = "Chassis_ST";
}

/// Question vocabulary
pub mod vocabulary {
    /// Tokens kept as keywords whatever their tagged part of speech.
    /// Any of them in a question asks for a component serial number.
    pub const SERIAL_TERMS: [&str; 5] = ["serial", "pump", "tank", "body", "chassis"];

    pub const DELIVERY: &str = "delivery";
    pub const DATE: &str = "date";
    pub const DEALER: &str = "dealer";
}

/// Sales-order identifier pattern: optional `SO` prefix (optionally followed by
/// `-` or a space), then at least six digits. Group 1 is the digit run.
pub const SO_NUMBER_PATTERN: &str = r"(?i)\b(?:SO[-\s]?)?(\d{6,})\b";

/// Rows shown by the dataset preview
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

pub const MAX_PREVIEW_ROWS: usize = 1000;

pub const DEFAULT_SPEECH_LANGUAGE: &str = "en";

pub mod endpoints {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8080;
}

//! Constants used throughout the Kogito core crate.

/// Analytics event emitted when the vicious-circle screen gains focus.
pub const EVENT_VICIOUS_CYCLE_OPENED: &str = "Vicious Cycle Opened";

/// Analytics event emitted after a vicious-circle entry was saved.
pub const EVENT_VICIOUS_CYCLE_EDITED: &str = "Vicious Cycle Edited";

/// Analytics event emitted when a diary entry is opened.
pub const EVENT_JOURNAL_ENTRY_OPENED: &str = "Journal Entry Opened";

/// Analytics event emitted when a diary entry is saved for the first time.
pub const EVENT_JOURNAL_ENTRY_ADDED: &str = "Journal Entry Added";

/// App-wide event asking diary lists to reload.
pub const REFETCH_USER_DIARY: &str = "refetch-user-diary";

/// Czech month names in the genitive case ("5. března"), January first.
pub const CZECH_MONTHS_GENITIVE: [&str; 12] = [
    "ledna", "února", "března", "dubna", "května", "června", "července", "srpna", "září",
    "října", "listopadu", "prosince",
];

/// Default analytics project name when none is configured.
pub const DEFAULT_TRACKING_PROJECT: &str = "kogito";

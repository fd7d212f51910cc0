//! Action ids for dashboard click targets.

// ── Tabs ─────────────────────────────────────────────────────
pub const TAB_DASHBOARD: u16 = 1;
pub const TAB_TEAM: u16 = 2;
pub const TAB_PROJECTS: u16 = 3;

// ── Dashboard rows ───────────────────────────────────────────
pub const NEXT_PERIOD: u16 = 10;
pub const OPEN_HIRE: u16 = 11;
pub const TAKE_CLIENT: u16 = 12;
pub const RUN_MARKETING: u16 = 13;
pub const RUN_TRAINING: u16 = 14;
pub const CLOSE_HIRE: u16 = 15;
pub const RESTART: u16 = 16;

// ── Catalog rows ─────────────────────────────────────────────
pub const HIRE_BASE: u16 = 20; // + offer id
pub const START_PROJECT_BASE: u16 = 40; // + project id

//! # Dashboard Shell
//!
//! Tab selection. Exactly one tab is active; selecting a tab only changes
//! which screen is mounted, the screen does its own fetching.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Home,
    Expert,
    Exercise,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Expert, Tab::Exercise];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Expert => "Expert",
            Tab::Exercise => "Exercise",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(Tab::Home),
            "expert" | "experts" => Ok(Tab::Expert),
            "exercise" | "exercises" => Ok(Tab::Exercise),
            _ => Err(anyhow::anyhow!("unknown tab '{s}'")),
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardShell {
    active: Tab,
}

impl DashboardShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    /// Switch tabs; returns true if a different screen must be mounted
    pub fn select(&mut self, tab: Tab) -> bool {
        if self.active == tab {
            return false;
        }
        tracing::debug!("Switching tab from {} to {}", self.active, tab);
        self.active = tab;
        true
    }
}

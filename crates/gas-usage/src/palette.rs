// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use colored::Colorize;

/// Terminal decoration for report text. Plain palettes return text as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    pub const fn colored() -> Self {
        Self { enabled: true }
    }

    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn info(&self, s: &str) -> String {
        self.paint(s, |s| s.bright_blue().to_string())
    }

    pub fn attention(&self, s: &str) -> String {
        self.paint(s, |s| s.cyan().to_string())
    }

    pub fn notice(&self, s: &str) -> String {
        self.paint(s, |s| s.magenta().to_string())
    }

    pub fn debug(&self, s: &str) -> String {
        self.paint(s, |s| s.bright_black().to_string())
    }

    fn paint(&self, s: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.enabled {
            style(s)
        } else {
            s.to_string()
        }
    }
}

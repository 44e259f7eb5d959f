// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, str::FromStr};

use serde::{de, Deserialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Ordered verbosity levels. A message at some level is shown when the
/// ambient verbosity is at or above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Verbosity {
    Silent = 0,
    Fatal = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Attention = 5,
    #[default]
    Information = 6,
    Notice = 7,
    Debug = 8,
    Trace = 9,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerbosityParseError {
    #[error("unknown verbosity level `{0}`")]
    Unknown(String),
    #[error("verbosity level {0} is out of range 0..=9")]
    OutOfRange(u64),
}

impl Verbosity {
    pub const ALL: [Verbosity; 10] = [
        Self::Silent,
        Self::Fatal,
        Self::Critical,
        Self::Error,
        Self::Warning,
        Self::Attention,
        Self::Information,
        Self::Notice,
        Self::Debug,
        Self::Trace,
    ];

    pub fn from_level(level: u64) -> Result<Self, VerbosityParseError> {
        usize::try_from(level)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(VerbosityParseError::OutOfRange(level))
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Silent => "silent",
            Self::Fatal => "fatal",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Attention => "attention",
            Self::Information => "information",
            Self::Notice => "notice",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Forgiving parse used for command line flags.
    ///
    /// Digits select the level directly, anything else is matched on its
    /// first letter against the level names in order. Input that matches
    /// nothing falls back to [`Verbosity::Attention`].
    pub fn parse_lenient(s: &str) -> Self {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<u64>()
                .ok()
                .and_then(|n| Self::from_level(n).ok())
                .unwrap_or(Self::Attention);
        }
        let Some(first) = s.chars().next().map(|c| c.to_ascii_lowercase()) else {
            return Self::Attention;
        };
        Self::ALL
            .into_iter()
            .find(|v| v.name().starts_with(first))
            .unwrap_or(Self::Attention)
    }

    /// Maps the level onto the closest `tracing` filter.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Silent => LevelFilter::OFF,
            Self::Fatal | Self::Critical | Self::Error => LevelFilter::ERROR,
            Self::Warning | Self::Attention => LevelFilter::WARN,
            Self::Information | Self::Notice => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Verbosity {
    type Err = VerbosityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if let Ok(n) = lowered.parse::<u64>() {
            return Self::from_level(n);
        }
        let verbosity = match lowered.as_str() {
            "silent" | "empty" | "none" => Self::Silent,
            "fatal" | "stop" => Self::Fatal,
            "critical" | "bad" => Self::Critical,
            "error" | "err" => Self::Error,
            "warning" | "warn" => Self::Warning,
            "attention" | "attn" => Self::Attention,
            "information" | "info" => Self::Information,
            "notice" | "note" => Self::Notice,
            "debug" | "dbg" => Self::Debug,
            "trace" | "crazy" | "detailed" => Self::Trace,
            _ => return Err(VerbosityParseError::Unknown(s.to_string())),
        };
        Ok(verbosity)
    }
}

impl<'de> Deserialize<'de> for Verbosity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct VerbosityVisitor;

        impl de::Visitor<'_> for VerbosityVisitor {
            type Value = Verbosity;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a verbosity name or a level between 0 and 9")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Verbosity::from_level(v).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                let level = u64::try_from(v)
                    .map_err(|_| E::custom(format!("verbosity level {v} cannot be negative")))?;
                self.visit_u64(level)
            }
        }

        deserializer.deserialize_any(VerbosityVisitor)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_test::{assert_de_tokens, assert_de_tokens_error, Token};

    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        for pair in Verbosity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].level() + 1, pair[1].level());
        }
        assert!(Verbosity::Debug >= Verbosity::Notice);
        assert!(Verbosity::Information < Verbosity::Notice);
    }

    #[rstest]
    #[case("silent", Verbosity::Silent)]
    #[case("none", Verbosity::Silent)]
    #[case("empty", Verbosity::Silent)]
    #[case("stop", Verbosity::Fatal)]
    #[case("bad", Verbosity::Critical)]
    #[case("err", Verbosity::Error)]
    #[case("warn", Verbosity::Warning)]
    #[case("attn", Verbosity::Attention)]
    #[case("info", Verbosity::Information)]
    #[case("Notice", Verbosity::Notice)]
    #[case("note", Verbosity::Notice)]
    #[case("dbg", Verbosity::Debug)]
    #[case("crazy", Verbosity::Trace)]
    #[case("detailed", Verbosity::Trace)]
    #[case("7", Verbosity::Notice)]
    fn test_from_str(#[case] input: &str, #[case] expected: Verbosity) {
        assert_eq!(input.parse::<Verbosity>(), Ok(expected));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!(
            "loud".parse::<Verbosity>(),
            Err(VerbosityParseError::Unknown("loud".to_string()))
        );
        assert_eq!(
            "10".parse::<Verbosity>(),
            Err(VerbosityParseError::OutOfRange(10))
        );
    }

    #[rstest]
    #[case("8", Verbosity::Debug)]
    #[case("n", Verbosity::Notice)]
    #[case("Trace", Verbosity::Trace)]
    #[case("e", Verbosity::Error)]
    #[case("i", Verbosity::Information)]
    #[case("99", Verbosity::Attention)]
    #[case("", Verbosity::Attention)]
    #[case("?", Verbosity::Attention)]
    fn test_parse_lenient(#[case] input: &str, #[case] expected: Verbosity) {
        assert_eq!(Verbosity::parse_lenient(input), expected);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for v in Verbosity::ALL {
            assert_eq!(v.to_string().parse::<Verbosity>(), Ok(v));
        }
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(Verbosity::Silent.level_filter(), LevelFilter::OFF);
        assert_eq!(Verbosity::Critical.level_filter(), LevelFilter::ERROR);
        assert_eq!(Verbosity::Attention.level_filter(), LevelFilter::WARN);
        assert_eq!(Verbosity::Notice.level_filter(), LevelFilter::INFO);
        assert_eq!(Verbosity::Trace.level_filter(), LevelFilter::TRACE);
    }

    #[test]
    fn test_deserialize() {
        assert_de_tokens(&Verbosity::Notice, &[Token::Str("notice")]);
        assert_de_tokens(&Verbosity::Debug, &[Token::Str("dbg")]);
        assert_de_tokens(&Verbosity::Notice, &[Token::U8(7)]);
        assert_de_tokens(&Verbosity::Silent, &[Token::I64(0)]);
        assert_de_tokens_error::<Verbosity>(
            &[Token::Str("loud")],
            "unknown verbosity level `loud`",
        );
        assert_de_tokens_error::<Verbosity>(
            &[Token::U64(12)],
            "verbosity level 12 is out of range 0..=9",
        );
        assert_de_tokens_error::<Verbosity>(
            &[Token::I64(-1)],
            "verbosity level -1 cannot be negative",
        );
    }
}

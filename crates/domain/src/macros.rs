//! Display/FromStr generation for string-backed enums
//!
//! Configuration values such as the credential backend or the log format are
//! read from environment variables and config files as plain strings. This
//! macro maps each variant to one canonical lowercase string and parses
//! case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use t3tracker_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shade {
//!     Light,
//!     Dark,
//! }
//!
//! impl_domain_enum_conversions!(Shade {
//!     Light => "light",
//!     Dark => "dark",
//! });
//!
//! assert_eq!("DARK".parse::<Shade>().unwrap(), Shade::Dark);
//! ```

/// Implements `Display` and `FromStr` for a fieldless enum.
///
/// Parsing ignores case and trims surrounding whitespace; the error names
/// the enum and the rejected input.
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::{CredentialBackend, LogFormat, SessionPhase};

    #[test]
    fn display_uses_canonical_strings() {
        assert_eq!(CredentialBackend::File.to_string(), "file");
        assert_eq!(CredentialBackend::Keychain.to_string(), "keychain");
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(SessionPhase::Running.to_string(), "running");
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(CredentialBackend::from_str(" KeyChain ").unwrap(), CredentialBackend::Keychain);
        assert_eq!(LogFormat::from_str("TEXT").unwrap(), LogFormat::Text);
        assert_eq!(SessionPhase::from_str("Stopped").unwrap(), SessionPhase::Stopped);
    }

    mod with_result_alias {
        use crate::Result;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Shade {
            Light,
            Dark,
        }

        impl_domain_enum_conversions!(Shade {
            Light => "light",
            Dark => "dark",
        });

        fn parse(value: &str) -> Result<Shade> {
            value.parse().map_err(crate::TrackerError::InvalidInput)
        }

        #[test]
        fn expands_next_to_single_argument_result_alias() {
            assert_eq!(parse("Dark").unwrap(), Shade::Dark);
            assert_eq!(Shade::Light.to_string(), "light");
            assert!(parse("dim").is_err());
        }
    }

    #[test]
    fn parsing_rejects_unknown_values() {
        let err = CredentialBackend::from_str("vault").unwrap_err();
        assert!(err.contains("Invalid CredentialBackend: vault"));
        assert!(LogFormat::from_str("").is_err());
    }
}

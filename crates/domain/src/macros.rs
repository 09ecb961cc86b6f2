//! Display/FromStr generation for string-tagged domain enums
//!
//! Match strategies, outcome statuses and log formats all travel as short
//! lowercase tags (in logs, in the persisted report, in config files). This
//! macro keeps the tag table in one place per enum.
//!
//! # Example
//!
//! ```rust
//! use attrsync_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum RunMode {
//!     Apply,
//!     DryRun,
//! }
//!
//! impl_domain_status_conversions!(RunMode {
//!     Apply => "apply",
//!     DryRun => "dry_run",
//! });
//!
//! assert_eq!(RunMode::DryRun.to_string(), "dry_run");
//! assert_eq!("APPLY".parse::<RunMode>(), Ok(RunMode::Apply));
//! ```

/// Implements `Display` and `FromStr` for a fieldless enum from a
/// variant → tag table.
///
/// Parsing is case-insensitive; rendering always yields the tag as written.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

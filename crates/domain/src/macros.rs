//! Macro for implementing Display and FromStr for status enums
//!
//! Report statuses, target kinds and alert categories all travel as
//! lowercase snake_case strings. This macro gives each enum one mapping
//! table that drives both directions.
//!
//! # Example
//!
//! ```rust
//! use fieldpulse_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum VisitOutcome {
//!     Positive,
//!     FollowUp,
//!     Lost,
//! }
//!
//! impl_domain_status_conversions!(VisitOutcome {
//!     Positive => "positive",
//!     FollowUp => "follow_up",
//!     Lost => "lost",
//! });
//!
//! assert_eq!(VisitOutcome::FollowUp.to_string(), "follow_up");
//! ```

/// Implements Display and FromStr traits for status enums
///
/// This macro generates:
/// - Display trait: writes the mapped string
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations (must be lowercase)
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
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

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::types::{ReportStatus, TargetKind};

    #[test]
    fn test_display_uses_snake_case() {
        assert_eq!(ReportStatus::Draft.to_string(), "draft");
        assert_eq!(TargetKind::SalesAmount.to_string(), "sales_amount");
        assert_eq!(TargetKind::NewCustomer.to_string(), "new_customer");
    }

    #[test]
    fn test_fromstr_mixed_case() {
        assert_eq!(TargetKind::from_str("Sales_Amount").unwrap(), TargetKind::SalesAmount);
        assert_eq!(ReportStatus::from_str("DrAfT").unwrap(), ReportStatus::Draft);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TargetKind::from_str("revenue");
        assert!(result.unwrap_err().contains("Invalid TargetKind: revenue"));
        assert!(ReportStatus::from_str("").is_err());
    }

    #[test]
    fn test_roundtrip_every_kind() {
        for kind in TargetKind::ALL {
            assert_eq!(TargetKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }
}

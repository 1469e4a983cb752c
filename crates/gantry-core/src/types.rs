//! Core types for Gantry

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Native platform a project file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android (Gradle project)
    Android,
    /// iOS (CocoaPods / Xcode project)
    Ios,
}

impl Platform {
    /// Returns the lowercase identifier used in config files and flags
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }

    /// Human-readable platform name, used to tag warnings
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
        }
    }

    /// All platforms, in pass order
    pub fn all() -> &'static [Platform] {
        &[Self::Android, Self::Ios]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

static PACKAGE_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("invalid package segment regex"));

/// Check that an application identifier is a reverse-domain name
/// such as `com.example.app`
pub fn is_valid_package_id(package: &str) -> bool {
    let segments: Vec<&str> = package.split('.').collect();
    segments.len() >= 2 && segments.iter().all(|s| PACKAGE_SEGMENT.is_match(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse() {
        assert_eq!("android".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert!("web".parse::<Platform>().is_err());
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::Android.to_string(), "Android");
        assert_eq!(Platform::Ios.to_string(), "iOS");
        assert_eq!(Platform::Ios.as_str(), "ios");
    }

    #[test]
    fn test_package_id_validation() {
        assert!(is_valid_package_id("com.example.app"));
        assert!(is_valid_package_id("dev.expo_test.App2"));
        assert!(!is_valid_package_id("app"));
        assert!(!is_valid_package_id("com..app"));
        assert!(!is_valid_package_id("com.1example.app"));
        assert!(!is_valid_package_id("com.example-app"));
    }
}

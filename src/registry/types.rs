//! Common types for key/value stores

use std::fmt;

/// Top-level hive a subkey path is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryHive {
    ClassesRoot,
    CurrentUser,
    LocalMachine,
    Users,
    PerformanceData,
    CurrentConfig,
    /// Legacy hive, served by `PerformanceData`
    DynData,
}

impl RegistryHive {
    /// Returns the hive that actually stores data for this one
    pub fn root(self) -> RegistryHive {
        match self {
            RegistryHive::DynData | RegistryHive::PerformanceData => RegistryHive::PerformanceData,
            other => other,
        }
    }

    /// Returns the string representation of the hive
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryHive::ClassesRoot => "HKEY_CLASSES_ROOT",
            RegistryHive::CurrentUser => "HKEY_CURRENT_USER",
            RegistryHive::LocalMachine => "HKEY_LOCAL_MACHINE",
            RegistryHive::Users => "HKEY_USERS",
            RegistryHive::PerformanceData => "HKEY_PERFORMANCE_DATA",
            RegistryHive::CurrentConfig => "HKEY_CURRENT_CONFIG",
            RegistryHive::DynData => "HKEY_DYN_DATA",
        }
    }
}

impl std::str::FromStr for RegistryHive {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HKEY_CLASSES_ROOT" | "HKCR" => Ok(RegistryHive::ClassesRoot),
            "HKEY_CURRENT_USER" | "HKCU" => Ok(RegistryHive::CurrentUser),
            "HKEY_LOCAL_MACHINE" | "HKLM" => Ok(RegistryHive::LocalMachine),
            "HKEY_USERS" | "HKU" => Ok(RegistryHive::Users),
            "HKEY_PERFORMANCE_DATA" => Ok(RegistryHive::PerformanceData),
            "HKEY_CURRENT_CONFIG" | "HKCC" => Ok(RegistryHive::CurrentConfig),
            "HKEY_DYN_DATA" => Ok(RegistryHive::DynData),
            _ => Err(()),
        }
    }
}

/// Value stored under a key; only strings and 32-bit integers are supported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryValue {
    String(String),
    Int(i32),
}

impl From<&str> for RegistryValue {
    fn from(value: &str) -> Self {
        RegistryValue::String(value.to_string())
    }
}

impl From<String> for RegistryValue {
    fn from(value: String) -> Self {
        RegistryValue::String(value)
    }
}

impl From<i32> for RegistryValue {
    fn from(value: i32) -> Self {
        RegistryValue::Int(value)
    }
}

impl fmt::Display for RegistryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryValue::String(value) => f.write_str(value),
            RegistryValue::Int(value) => write!(f, "{}", value),
        }
    }
}

/// Split a subkey path into its segments.
///
/// Both `\` and `/` separate segments; empty segments are dropped, so
/// `"Software\\\\App\\"` and `"Software/App"` name the same subkey.
pub(crate) fn path_segments(path: &str) -> Vec<&str> {
    path.split(['\\', '/'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Canonical `\`-joined form of a subkey path; the hive root is `""`
pub(crate) fn normalize_path(path: &str) -> String {
    path_segments(path).join("\\")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RegistryHive::DynData, RegistryHive::PerformanceData)]
    #[case(RegistryHive::PerformanceData, RegistryHive::PerformanceData)]
    #[case(RegistryHive::ClassesRoot, RegistryHive::ClassesRoot)]
    #[case(RegistryHive::CurrentConfig, RegistryHive::CurrentConfig)]
    #[case(RegistryHive::CurrentUser, RegistryHive::CurrentUser)]
    #[case(RegistryHive::LocalMachine, RegistryHive::LocalMachine)]
    #[case(RegistryHive::Users, RegistryHive::Users)]
    fn root_maps_hive_to_backing_hive(#[case] hive: RegistryHive, #[case] expected: RegistryHive) {
        assert_eq!(hive.root(), expected);
    }

    #[rstest]
    #[case("HKCU", Ok(RegistryHive::CurrentUser))]
    #[case("hkey_local_machine", Ok(RegistryHive::LocalMachine))]
    #[case("HKEY_DYN_DATA", Ok(RegistryHive::DynData))]
    #[case("HKEY_NOWHERE", Err(()))]
    fn hive_from_str_accepts_long_and_short_names(
        #[case] input: &str,
        #[case] expected: Result<RegistryHive, ()>,
    ) {
        assert_eq!(input.parse::<RegistryHive>(), expected);
    }

    #[rstest]
    #[case("Software\\App", "Software\\App")]
    #[case("\\Software\\\\App\\", "Software\\App")]
    #[case("Software/App/Sub", "Software\\App\\Sub")]
    #[case("", "")]
    fn normalize_path_collapses_separators(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(input), expected);
    }
}

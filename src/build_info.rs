//! Build information module
//!
//! Compile-time build number and timestamp, embedded by `build.rs`.

use serde::Serialize;

/// Build number, incremented on each recompilation
pub const BUILD_NUMBER: u64 = match option_env!("PRESCRIPTION_BUILD_NUMBER") {
    Some(s) => match parse_u64(s) {
        Some(n) => n,
        None => 0,
    },
    None => 0,
};

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("PRESCRIPTION_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

const fn parse_u64(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut result: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b < b'0' || b > b'9' {
            return None;
        }
        result = result * 10 + (b - b'0') as u64;
        i += 1;
    }
    Some(result)
}

/// Build information reported by the status tool
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: BUILD_NUMBER,
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  Prescription - Health Risk Analysis");
    eprintln!("  Version: {} | Build: {}", info.version, info.build_number);
    eprintln!("  Compiled: {}", info.build_timestamp);
    eprintln!("===============================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("0"), Some(0));
        assert_eq!(parse_u64("1234"), Some(1234));
        assert_eq!(parse_u64("12a"), None);
        assert_eq!(parse_u64(""), None);
    }

    #[test]
    fn test_current_uses_package_metadata() {
        let info = BuildInfo::current();
        assert_eq!(info.name, "prescription");
        assert_eq!(info.version, VERSION);
    }
}

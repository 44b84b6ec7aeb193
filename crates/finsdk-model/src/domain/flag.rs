use serde::{Deserialize, Serialize};

/// Boolean option with explicit enable/disable semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flag(bool);

impl Flag {
    /// Create an enabled flag.
    pub const fn enabled() -> Self {
        Self(true)
    }

    /// Create a disabled flag.
    pub const fn disabled() -> Self {
        Self(false)
    }

    /// Check if the flag is enabled.
    pub const fn is_enabled(&self) -> bool {
        self.0
    }

    /// Check if the flag is disabled.
    pub const fn is_disabled(&self) -> bool {
        !self.0
    }

    /// Get the raw boolean value.
    pub const fn value(&self) -> bool {
        self.0
    }
}

impl Default for Flag {
    fn default() -> Self {
        Self::enabled()
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

impl From<Flag> for bool {
    fn from(f: Flag) -> Self {
        f.0
    }
}

#[cfg(test)]
mod tests {
    use super::Flag;

    #[test]
    fn default_is_enabled() {
        assert!(Flag::default().is_enabled());
    }

    #[test]
    fn constructors_match_predicates() {
        assert!(Flag::enabled().is_enabled());
        assert!(Flag::disabled().is_disabled());
        assert!(!Flag::disabled().value());
    }

    #[test]
    fn bool_conversions_roundtrip() {
        let f: Flag = false.into();
        assert!(f.is_disabled());
        let b: bool = Flag::enabled().into();
        assert!(b);
    }

    #[test]
    fn serde_transparent_roundtrip() {
        let json = serde_json::to_string(&Flag::disabled()).unwrap();
        assert_eq!(json, "false");
        let back: Flag = serde_json::from_str(&json).unwrap();
        assert!(back.is_disabled());
    }
}

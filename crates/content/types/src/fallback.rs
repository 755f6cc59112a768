use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// One strategy for producing a value when a property has none.
///
/// The numeric codes are stable and used when policies are exchanged as
/// integers; unknown codes never make it into a [`Fallback`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// Do nothing, move on to the next mode
    None,
    /// Use the caller-supplied default value
    DefaultValue,
    /// Follow the language fallback chain
    Language,
    /// Walk up the content tree (content level only)
    Ancestors,
    /// Try the default language once
    DefaultLanguage,
}

impl FallbackMode {
    pub const fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::DefaultValue => 1,
            Self::Language => 2,
            Self::Ancestors => 3,
            Self::DefaultLanguage => 4,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, TypesError> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::DefaultValue),
            2 => Ok(Self::Language),
            3 => Ok(Self::Ancestors),
            4 => Ok(Self::DefaultLanguage),
            other => Err(TypesError::UnknownFallbackCode(other)),
        }
    }
}

impl TryFrom<i32> for FallbackMode {
    type Error = TypesError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl std::fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::DefaultValue => "default_value",
            Self::Language => "language",
            Self::Ancestors => "ancestors",
            Self::DefaultLanguage => "default_language",
        };
        f.write_str(name)
    }
}

/// An ordered fallback policy.
///
/// Modes are tried in the order given by the caller until one yields a value.
/// The order is the caller's policy; the resolver imposes no precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fallback(Vec<FallbackMode>);

impl Fallback {
    /// No fallback at all.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn to(modes: impl IntoIterator<Item = FallbackMode>) -> Self {
        Self(modes.into_iter().collect())
    }

    pub fn to_default_value() -> Self {
        Self(vec![FallbackMode::DefaultValue])
    }

    pub fn to_language() -> Self {
        Self(vec![FallbackMode::Language])
    }

    pub fn to_default_language() -> Self {
        Self(vec![FallbackMode::DefaultLanguage])
    }

    pub fn to_ancestors() -> Self {
        Self(vec![FallbackMode::Ancestors])
    }

    /// Build a policy from integer codes, rejecting unknown codes.
    pub fn from_codes(codes: &[i32]) -> Result<Self, TypesError> {
        codes
            .iter()
            .map(|&code| FallbackMode::from_code(code))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Append a mode to the end of the policy.
    pub fn then(mut self, mode: FallbackMode) -> Self {
        self.0.push(mode);
        self
    }

    pub fn modes(&self) -> &[FallbackMode] {
        &self.0
    }

    pub fn codes(&self) -> Vec<i32> {
        self.0.iter().map(|mode| mode.code()).collect()
    }

    pub fn contains(&self, mode: FallbackMode) -> bool {
        self.0.contains(&mode)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FallbackMode> {
        self.0.iter()
    }
}

impl FromIterator<FallbackMode> for Fallback {
    fn from_iter<I: IntoIterator<Item = FallbackMode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Fallback {
    type Item = &'a FallbackMode;
    type IntoIter = std::slice::Iter<'a, FallbackMode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shortcuts() {
        assert!(Fallback::none().is_empty());
        assert_eq!(Fallback::to_language().modes(), &[FallbackMode::Language]);
        let chained = Fallback::to_language().then(FallbackMode::DefaultValue);
        assert_eq!(chained.codes(), vec![2, 1]);
        assert!(chained.contains(FallbackMode::DefaultValue));
        assert!(!chained.contains(FallbackMode::Ancestors));
    }

    #[test]
    fn unknown_code_rejected() {
        assert!(matches!(
            Fallback::from_codes(&[2, 7]),
            Err(TypesError::UnknownFallbackCode(7))
        ));
        assert!(FallbackMode::try_from(-1).is_err());
    }

    #[test]
    fn serializes_as_mode_names() {
        let fallback = Fallback::to([FallbackMode::Ancestors, FallbackMode::DefaultLanguage]);
        let json = serde_json::to_string(&fallback).unwrap();
        assert_eq!(json, r#"["ancestors","default_language"]"#);
        let restored: Fallback = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, fallback);
    }

    proptest! {
        #[test]
        fn known_codes_survive_from_codes(codes in prop::collection::vec(0i32..5, 0..8)) {
            let fallback = Fallback::from_codes(&codes).unwrap();
            prop_assert_eq!(fallback.codes(), codes);
        }

        #[test]
        fn any_unknown_code_fails(
            prefix in prop::collection::vec(0i32..5, 0..4),
            bad in prop_oneof![i32::MIN..0, 5..i32::MAX],
        ) {
            let mut codes = prefix;
            codes.push(bad);
            prop_assert!(Fallback::from_codes(&codes).is_err());
        }
    }
}

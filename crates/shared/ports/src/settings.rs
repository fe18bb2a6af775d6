use std::sync::Arc;

/// A runtime-typed configuration value owned by the hosting node.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// Declared but carrying no value.
    NotSet,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

/// A named setting, as reported to change listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub name: String,
    pub value: SettingValue,
}

impl Setting {
    pub fn new(name: impl Into<String>, value: SettingValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Outcome of a settings-change listener.
///
/// A rejected change leaves the setting untouched on the node side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingChangeResult {
    pub successful: bool,
    pub reason: String,
}

impl SettingChangeResult {
    pub fn accepted() -> Self {
        Self {
            successful: true,
            reason: String::new(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            successful: false,
            reason: reason.into(),
        }
    }
}

/// Listener invoked by the node whenever settings change.
pub type SettingsCallback = Arc<dyn Fn(&[Setting]) -> SettingChangeResult + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_bool() {
        assert_eq!(SettingValue::Bool(true).as_bool(), Some(true));
        assert_eq!(SettingValue::NotSet.as_bool(), None);
        assert_eq!(SettingValue::Integer(1).as_bool(), None);
        assert_eq!(SettingValue::Text("true".to_string()).as_bool(), None);
    }

    #[test]
    fn test_change_results() {
        let accepted = SettingChangeResult::accepted();
        assert!(accepted.successful);
        assert!(accepted.reason.is_empty());

        let rejected = SettingChangeResult::rejected("must be a boolean");
        assert!(!rejected.successful);
        assert_eq!(rejected.reason, "must be a boolean");
    }
}

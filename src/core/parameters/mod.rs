//! Persisted-settings value model
//!
//! A bounded name/value document the host hands to a node's
//! `save_settings`/`load_settings` hooks. The document only defines the value
//! model and storage bound; what gets written into it (and where the host
//! persists it) is the node's and the host's business respectively.

/// Setting value type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamType {
    /// 32-bit floating point value
    Float,
    /// 32-bit unsigned integer value
    Uint32,
}

/// Setting value (union of supported types)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamValue {
    /// Float value
    Float(f32),
    /// Unsigned integer value
    Uint32(u32),
}

impl ParamValue {
    /// Convert value to its u32 bit representation (for raw storage backends)
    pub fn to_u32(self) -> u32 {
        match self {
            ParamValue::Float(f) => f.to_bits(),
            ParamValue::Uint32(u) => u,
        }
    }

    /// Create value from u32 bits and type
    pub fn from_u32(value: u32, param_type: ParamType) -> Self {
        match param_type {
            ParamType::Float => ParamValue::Float(f32::from_bits(value)),
            ParamType::Uint32 => ParamValue::Uint32(value),
        }
    }

    /// Get value type
    pub fn param_type(&self) -> ParamType {
        match self {
            ParamValue::Float(_) => ParamType::Float,
            ParamValue::Uint32(_) => ParamType::Uint32,
        }
    }
}

/// Maximum number of entries a document can carry
pub const MAX_SETTINGS: usize = 32;

/// Maximum setting name length in bytes
pub const MAX_SETTING_NAME: usize = 16;

/// Settings document error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DocumentError {
    /// Document entry table full
    Full,
    /// Setting name exceeds [`MAX_SETTING_NAME`]
    NameTooLong,
}

impl core::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DocumentError::Full => write!(f, "settings document full"),
            DocumentError::NameTooLong => write!(f, "setting name too long"),
        }
    }
}

/// One named entry in a settings document
#[derive(Debug, Clone)]
pub struct SettingEntry {
    /// Setting name (max 16 characters)
    pub name: heapless::String<MAX_SETTING_NAME>,
    /// Stored value
    pub value: ParamValue,
}

/// Bounded name/value document passed through the node persistence hooks
#[derive(Debug, Default)]
pub struct SettingsDocument {
    entries: heapless::Vec<SettingEntry, MAX_SETTINGS>,
}

impl SettingsDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
        }
    }

    /// Store a value under `name`, overwriting any existing entry
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), DocumentError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.name.as_str() == name) {
            entry.value = value;
            return Ok(());
        }

        let mut owned = heapless::String::new();
        owned
            .push_str(name)
            .map_err(|_| DocumentError::NameTooLong)?;

        self.entries
            .push(SettingEntry { name: owned, value })
            .map_err(|_| DocumentError::Full)
    }

    /// Look up a value by name
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.entries
            .iter()
            .find(|e| e.name.as_str() == name)
            .map(|e| e.value)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the document carries no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SettingEntry> {
        self.entries.iter()
    }

    /// Drop all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_value_conversion() {
        let float_val = ParamValue::Float(core::f32::consts::PI);
        let u32_val = float_val.to_u32();
        let recovered = ParamValue::from_u32(u32_val, ParamType::Float);
        assert_eq!(float_val, recovered);

        let uint_val = ParamValue::Uint32(42);
        let u32_val = uint_val.to_u32();
        let recovered = ParamValue::from_u32(u32_val, ParamType::Uint32);
        assert_eq!(uint_val, recovered);
    }

    #[test]
    fn test_document_set_and_get() {
        let mut doc = SettingsDocument::new();
        assert!(doc.is_empty());

        doc.set("GYRO_RANGE", ParamValue::Uint32(3)).unwrap();
        doc.set("MAG_DECL", ParamValue::Float(1.5)).unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("GYRO_RANGE"), Some(ParamValue::Uint32(3)));
        assert_eq!(doc.get("MAG_DECL"), Some(ParamValue::Float(1.5)));
        assert_eq!(doc.get("MISSING"), None);
    }

    #[test]
    fn test_document_set_overwrites() {
        let mut doc = SettingsDocument::new();
        doc.set("MAG_DECL", ParamValue::Float(1.5)).unwrap();
        doc.set("MAG_DECL", ParamValue::Float(-0.25)).unwrap();

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get("MAG_DECL"), Some(ParamValue::Float(-0.25)));
    }

    #[test]
    fn test_document_rejects_long_names() {
        let mut doc = SettingsDocument::new();
        assert_eq!(
            doc.set("A_NAME_WELL_PAST_SIXTEEN", ParamValue::Uint32(0)),
            Err(DocumentError::NameTooLong)
        );
        assert!(doc.is_empty());
    }

    #[test]
    fn test_document_full() {
        let mut doc = SettingsDocument::new();
        for i in 0..MAX_SETTINGS {
            let mut name = heapless::String::<MAX_SETTING_NAME>::new();
            core::fmt::write(&mut name, format_args!("P{}", i)).unwrap();
            doc.set(&name, ParamValue::Uint32(i as u32)).unwrap();
        }

        assert_eq!(
            doc.set("ONE_MORE", ParamValue::Uint32(0)),
            Err(DocumentError::Full)
        );
        assert_eq!(doc.len(), MAX_SETTINGS);
    }

    #[test]
    fn test_document_clear() {
        let mut doc = SettingsDocument::new();
        doc.set("P1", ParamValue::Uint32(1)).unwrap();
        doc.clear();
        assert!(doc.is_empty());
        assert_eq!(doc.get("P1"), None);
    }
}

use crate::document::DocumentFile;
use crate::error::ValidationError;
use crate::slot::UploadSlot;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
pub const DEFAULT_ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// Size and type constraints applied to a file before it may fill a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub max_size_bytes: u64,
    pub allowed_types: Vec<String>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_FILE_SIZE,
            allowed_types: DEFAULT_ALLOWED_TYPES
                .iter()
                .map(|t| (*t).to_owned())
                .collect(),
        }
    }
}

impl ValidationPolicy {
    /// Check size first, then type. The reported MIME type is trusted as-is;
    /// the extraction service is the authority on actual content.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::TooLarge` or `ValidationError::UnsupportedType`.
    pub fn check(&self, file: &DocumentFile) -> Result<(), ValidationError> {
        if file.size_bytes > self.max_size_bytes {
            return Err(ValidationError::TooLarge {
                size: file.size_bytes,
                max: self.max_size_bytes,
            });
        }
        if !self.allowed_types.iter().any(|t| *t == file.mime_type) {
            return Err(ValidationError::UnsupportedType {
                mime: file.mime_type.clone(),
                allowed: self.allowed_types.clone(),
            });
        }
        Ok(())
    }
}

/// Validation policy per slot. Slots share one policy unless an override was
/// configured explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    policies: [ValidationPolicy; 3],
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::uniform(ValidationPolicy::default())
    }
}

impl PolicyTable {
    #[must_use]
    pub fn uniform(policy: ValidationPolicy) -> Self {
        Self {
            policies: [policy.clone(), policy.clone(), policy],
        }
    }

    #[must_use]
    pub fn with_override(mut self, slot: UploadSlot, policy: ValidationPolicy) -> Self {
        self.policies[slot.index()] = policy;
        self
    }

    #[must_use]
    pub fn policy(&self, slot: UploadSlot) -> &ValidationPolicy {
        &self.policies[slot.index()]
    }

    /// # Errors
    ///
    /// Returns the first constraint the file violates under `slot`'s policy.
    pub fn validate(&self, file: &DocumentFile, slot: UploadSlot) -> Result<(), ValidationError> {
        self.policy(slot).check(file)
    }
}

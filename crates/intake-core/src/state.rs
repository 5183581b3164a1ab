use crate::document::DocumentFile;
use crate::error::ValidationError;
use crate::slot::UploadSlot;
use crate::validator::PolicyTable;

/// The three required document slots. A slot only ever holds a file that
/// passed its validation policy.
#[derive(Debug, Clone, Default)]
pub struct UploadSlotState {
    policies: PolicyTable,
    files: [Option<DocumentFile>; 3],
}

impl UploadSlotState {
    #[must_use]
    pub fn new(policies: PolicyTable) -> Self {
        Self {
            policies,
            files: [None, None, None],
        }
    }

    #[must_use]
    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    /// Validate `file` and place it in `slot`, replacing any previous file.
    /// A rejected file leaves the slot untouched.
    ///
    /// # Errors
    ///
    /// Returns the validation failure for `slot`'s policy.
    pub fn assign(&mut self, slot: UploadSlot, file: DocumentFile) -> Result<(), ValidationError> {
        self.policies.validate(&file, slot)?;
        self.files[slot.index()] = Some(file);
        Ok(())
    }

    pub fn clear(&mut self, slot: UploadSlot) {
        self.files[slot.index()] = None;
    }

    pub fn clear_all(&mut self) {
        self.files = [None, None, None];
    }

    #[must_use]
    pub fn get(&self, slot: UploadSlot) -> Option<&DocumentFile> {
        self.files[slot.index()].as_ref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.files.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn missing(&self) -> Vec<UploadSlot> {
        UploadSlot::ALL
            .into_iter()
            .filter(|slot| self.get(*slot).is_none())
            .collect()
    }

    /// Filled slots in display order.
    pub fn iter(&self) -> impl Iterator<Item = (UploadSlot, &DocumentFile)> {
        UploadSlot::ALL
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|file| (slot, file)))
    }
}

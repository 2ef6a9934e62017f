use serde::Serialize;

use crate::classify::TransferStrategy;
use crate::hierarchy::TypeInfo;
use crate::model::TypeRef;

/// One marked field after validation and classification
///
/// Invalid fields are kept with best-effort data so their enclosing type still gets an
/// artifact, but [`Self::transfer`] withholds their strategy and no generated statement
/// references them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedField {
    /// Simple field name, also the field's container key within its artifact
    pub name:            String,
    /// Declared type
    #[serde(skip)]
    pub ty:              TypeRef,
    /// Classified strategy, `None` for unrecognized types
    pub strategy:        Option<TransferStrategy>,
    /// The declaring type
    #[serde(skip)]
    pub owner:           TypeInfo,
    /// Modifiers satisfied the transfer contract
    pub modifiers_valid: bool,
}

impl CollectedField {
    /// The strategy to generate statements with, only for fully valid fields
    pub fn transfer(&self) -> Option<TransferStrategy> {
        self.strategy.filter(|_| self.modifiers_valid)
    }

    /// Whether generated statements reference this field
    pub fn is_valid(&self) -> bool {
        self.transfer().is_some()
    }
}

//! Patient record synthesis with controlled duplication.
//!
//! Base records come from a fake attribute provider; a share of them is then
//! re-entered as near-duplicate variants (nicknames, reformatted birthdates,
//! expanded state names, reassigned identifiers) for exercising record
//! de-duplication tooling.

pub mod dates;
pub mod duplicate;
pub mod email;
pub mod engine;
pub mod errors;
pub mod factory;
pub mod identity;
pub mod lookup;
pub mod model;
pub mod output;
pub mod provider;

pub use duplicate::{
    DuplicateVariant, DuplicationContext, DuplicationDecisions, DuplicationEngine, NicknameQueue,
};
pub use engine::{DatasetAssembler, GenerationResult};
pub use errors::GenerationError;
pub use identity::IdentityAllocator;
pub use lookup::{NicknameLookup, StateNameLookup};
pub use model::GenerationReport;
pub use provider::{AttributeProvider, FakerProvider};

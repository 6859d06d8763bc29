//! Clean architecture rules for `cleanarch`.
//!
//! Each module implements one rule family over the dependency graph
//! defined in [`cleanarch_core`]. The [`presets`] module assembles the
//! full clean architecture rule set from an
//! [`ArchConfig`](cleanarch_core::ArchConfig).
//!
//! # Rule codes
//!
//! | Code  | Rule                                         |
//! |-------|----------------------------------------------|
//! | CA001 | layered-architecture                         |
//! | CA002 | entity-purity                                |
//! | CA003 | private-entity-constructor                   |
//! | CA004 | use-case-isolation                           |
//! | CA005 | request/response-contract-ownership          |
//! | CA006 | communication-through-interface              |
//! | CA007 | request/response-naming                      |
//! | CA008 | contracts-are-records                        |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod communication_interface;
pub mod contract_ownership;
pub mod contract_shape;
pub mod entity_purity;
pub mod layers;
pub mod naming_convention;
pub mod presets;
pub mod private_constructor;
pub mod use_case_isolation;

pub use communication_interface::CommunicationThroughInterface;
pub use contract_ownership::{ContractKind, ContractOwnership};
pub use contract_shape::ContractsAreRecords;
pub use entity_purity::EntityPurity;
pub use layers::{AccessDirective, LayerError, LayeredArchitecture, LayeredArchitectureBuilder};
pub use naming_convention::ContractNaming;
pub use presets::{clean_architecture_layers, clean_architecture_rules, PresetError};
pub use private_constructor::PrivateEntityConstructor;
pub use use_case_isolation::UseCaseIsolation;

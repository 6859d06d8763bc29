//! Ready-made clean architecture rule sets.
//!
//! Wires the individual rules to an [`ArchConfig`] so a project gets the
//! full clean architecture check from one call.

use cleanarch_core::{ArchConfig, PatternError, RuleBox};

use crate::communication_interface::CommunicationThroughInterface;
use crate::contract_ownership::ContractOwnership;
use crate::contract_shape::ContractsAreRecords;
use crate::entity_purity::EntityPurity;
use crate::layers::{LayerError, LayeredArchitecture};
use crate::naming_convention::ContractNaming;
use crate::private_constructor::PrivateEntityConstructor;
use crate::use_case_isolation::UseCaseIsolation;

/// Layer name for the enterprise business layer.
pub const ENTERPRISE: &str = "enterprise";

/// Layer name for the application business layer.
pub const APPLICATION: &str = "application";

/// Layer name for the interface adapters layer.
pub const ADAPTERS: &str = "adapters";

/// Errors raised while assembling a preset.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    /// A configured package pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// The layer definitions were inconsistent.
    #[error(transparent)]
    Layer(#[from] LayerError),
}

/// Builds the layered architecture check for the classic three rings.
///
/// The enterprise layer holds entities, the application layer holds use
/// cases and their contracts, and the adapters layer holds controllers,
/// presenters and infrastructure. Dependencies must point inward:
/// adapters may reach the application layer, the application layer may
/// reach the enterprise layer, and nothing reaches outward.
///
/// # Errors
///
/// Returns an error if any configured pattern is invalid or the layer
/// definitions collapse into each other.
pub fn clean_architecture_layers(config: &ArchConfig) -> Result<LayeredArchitecture, LayerError> {
    LayeredArchitecture::builder()
        .layer(ENTERPRISE, &[&config.enterprise_business])
        .layer(APPLICATION, &[&config.application_business])
        .layer(
            ADAPTERS,
            &[
                &config.adapters_controller,
                &config.adapters_presenter,
                &config.adapters_infra,
            ],
        )
        .may_not_be_accessed_by_any_layer(ADAPTERS)
        .may_only_access(ADAPTERS, &[APPLICATION])
        .may_only_be_accessed_by(APPLICATION, &[ADAPTERS])
        .may_only_access(APPLICATION, &[ENTERPRISE])
        .may_only_be_accessed_by(ENTERPRISE, &[APPLICATION])
        .may_not_access_any_layer(ENTERPRISE)
        .build()
}

/// Builds the full clean architecture rule set in a fixed order.
///
/// # Errors
///
/// Returns an error if any configured pattern is invalid or the layer
/// definitions are inconsistent.
pub fn clean_architecture_rules(config: &ArchConfig) -> Result<Vec<RuleBox>, PresetError> {
    let accepted: Vec<&str> = config
        .accepted_entity_dependencies
        .iter()
        .map(String::as_str)
        .collect();
    Ok(vec![
        Box::new(clean_architecture_layers(config)?),
        Box::new(EntityPurity::new(&config.enterprise_business, &accepted)?),
        Box::new(PrivateEntityConstructor::new(&config.enterprise_business)?),
        Box::new(UseCaseIsolation::new(&config.application_business)?),
        Box::new(ContractOwnership::request(&config.application_business)?),
        Box::new(ContractOwnership::response(&config.application_business)?),
        Box::new(CommunicationThroughInterface::new(&config.communication)?),
        Box::new(ContractNaming::request()?),
        Box::new(ContractNaming::response()?),
        Box::new(ContractsAreRecords::new()?),
    ])
}

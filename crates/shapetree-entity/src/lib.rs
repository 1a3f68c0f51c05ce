//! Entity identity for shapetree ASTs.
//!
//! - [`stamp`] promotes a struct AST into an identifiable entity
//! - [`field_signatures`] / [`fingerprint`] compile a stamped AST into field
//!   signatures and an order-independent structural hash

pub mod identity;
pub use identity::{
    ENTITY_FIELD_PREFIX, EntityFieldId, EntityId, entity_id_of, is_entity, stamp,
};

pub mod signature;
pub use signature::{
    EntityFingerprint, PROPERTY_SIGNATURE_TAG, field_signatures, fingerprint,
    fingerprint_signatures, signature_set,
};

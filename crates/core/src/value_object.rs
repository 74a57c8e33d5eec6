//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attributes. The
/// resolved unit filter and the capability set are value objects: they are
/// recomputed from the session on every call, and two results with the same
/// fields are interchangeable.
///
/// The trait requires:
/// - **Clone**: values are copied freely between call sites
/// - **PartialEq**: comparison by attribute
/// - **Debug**: values show up in logs and assertions
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

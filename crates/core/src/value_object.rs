//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values
/// (a price of `12.50` equals any other price of `12.50`). To "modify" one,
/// construct a new value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

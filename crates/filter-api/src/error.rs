use thiserror::Error;

/// Errors that can occur when mutating the [`FilterRegistry`](crate::FilterRegistry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterRegistryError {
	/// A filter attempted to register an identifier that already exists in the registry.
	#[error("filter id '{id}' is already registered")]
	DuplicateId { id: &'static str },

	/// An operation referenced a filter id that is not registered.
	#[error("no filter registered with id '{id}'")]
	UnknownFilter { id: String },
}

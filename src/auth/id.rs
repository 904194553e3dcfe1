//! Validated identifiers for backend API clients and buyer organizations.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

const IDENTIFIER_MAX_LEN: usize = 128;

macro_rules! validated_id {
	($name:ident, $kind:literal, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Hash)]
		pub struct $name(String);
		impl $name {
			/// Validates `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				check($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}({})", $kind, self.0)
			}
		}
	};
}

validated_id!(ClientId, "Client", "API client registered with the commerce backend.");
validated_id!(BuyerId, "Buyer", "Buyer organization that owns shopper accounts.");

/// Why an identifier was rejected.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdentifierError {
	/// Nothing was supplied.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// `Client` or `Buyer`.
		kind: &'static str,
	},
	/// Identifiers travel in form fields and URL paths, so whitespace is refused.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// `Client` or `Buyer`.
		kind: &'static str,
	},
	/// Longer than the backend accepts.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// `Client` or `Buyer`.
		kind: &'static str,
		/// Character limit.
		max: usize,
	},
}

fn check(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	if value.is_empty() {
		Err(IdentifierError::Empty { kind })
	} else if value.chars().any(char::is_whitespace) {
		Err(IdentifierError::ContainsWhitespace { kind })
	} else if value.chars().count() > IDENTIFIER_MAX_LEN {
		Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN })
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn client_ids_keep_their_value() {
		let client = ClientId::new("0A1B2C3D-storefront").expect("Client id should be valid.");

		assert_eq!(client.as_ref(), "0A1B2C3D-storefront");
		assert_eq!(format!("{client:?}"), "Client(0A1B2C3D-storefront)");
		assert_eq!(format!("/buyers/{}/users", BuyerId::new("B1").expect("Buyer id should be valid.")), "/buyers/B1/users");
	}

	#[test]
	fn blank_or_padded_ids_are_rejected() {
		assert_eq!(BuyerId::new(""), Err(IdentifierError::Empty { kind: "Buyer" }));
		assert_eq!(
			ClientId::new(" storefront"),
			Err(IdentifierError::ContainsWhitespace { kind: "Client" })
		);
	}

	#[test]
	fn length_limit_is_inclusive() {
		assert!(ClientId::new("a".repeat(IDENTIFIER_MAX_LEN)).is_ok());
		assert!(matches!(
			ClientId::new("a".repeat(IDENTIFIER_MAX_LEN + 1)),
			Err(IdentifierError::TooLong { .. })
		));
	}
}

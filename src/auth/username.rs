//! Login-name derivation for shopper accounts.

/// Derives the backend username from an e-mail address.
///
/// Takes the local part (everything before the first `@`) and drops every character that is
/// neither a word character (`[A-Za-z0-9_]`) nor whitespace. An address without `@` yields an
/// empty username.
pub fn username_from_email(email: &str) -> String {
	let Some(at) = email.find('@') else {
		return String::new();
	};

	email[..at]
		.chars()
		.filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
		.collect()
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn strips_domain_and_punctuation() {
		assert_eq!(username_from_email("j@doe.com"), "j");
		assert_eq!(username_from_email("john.doe+shop@example.com"), "johndoeshop");
		assert_eq!(username_from_email("first_last-99@example.com"), "first_last99");
	}

	#[test]
	fn missing_at_sign_yields_empty_username() {
		assert_eq!(username_from_email("not-an-email"), "");
		assert_eq!(username_from_email("@example.com"), "");
	}
}

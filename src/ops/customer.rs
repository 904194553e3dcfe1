//! Loading the signed-in shopper.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	fetch::{FetchOptions, Fetcher},
};

/// Signed-in shopper as returned by `GET /me`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Customer {
	/// User id.
	#[serde(rename = "ID")]
	pub id: String,
	/// Login name.
	pub username: String,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Contact e-mail.
	pub email: String,
	/// Contact phone, when recorded.
	pub phone: Option<String>,
	/// Whether the account may sign in.
	pub active: bool,
	/// Backend extension properties.
	#[serde(rename = "xp", skip_serializing_if = "Option::is_none")]
	pub xp: Option<serde_json::Value>,
}

/// Failures while loading the signed-in shopper.
#[derive(Debug, ThisError)]
pub enum CustomerError {
	/// The backend answered without a customer.
	#[error("Customer not found.")]
	NotFound,
	/// Any other broker failure.
	#[error(transparent)]
	Broker(#[from] Error),
}
impl CustomerError {
	/// Stable code for shopper-facing error payloads.
	pub fn code(&self) -> Option<&'static str> {
		match self {
			Self::NotFound => Some("not_found"),
			Self::Broker(_) => None,
		}
	}
}

/// Loads the shopper that owns `token` through the user fetcher.
///
/// Pass the token found in the session cookie; without one the fetcher fails before any
/// request.
pub async fn logged_in_customer(
	user: &Fetcher,
	token: Option<TokenSecret>,
) -> Result<Customer, CustomerError> {
	let options = FetchOptions { token, ..Default::default() };

	user.fetch_without_body::<Customer>(Method::GET, "/me", options)
		.await?
		.into_data()
		.ok_or(CustomerError::NotFound)
}

//! Shopper sign-up against the buyer users endpoint.

// self
use crate::{
	_prelude::*,
	auth::{TokenSecret, username_from_email},
	error::ConfigError,
	fetch::{FetchOptions, Fetcher},
	ops::{LoginOutcome, login},
};

/// Backend code reported when a username is already taken.
pub const DUPLICATE_USERNAME_CODE: &str = "User.UsernameMustBeUnique";

/// Buyer user resource as the backend names its fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BuyerUser {
	/// User id; sign-up derives it from the e-mail.
	#[serde(rename = "ID")]
	pub id: String,
	/// Login name.
	pub username: String,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Contact and login e-mail.
	pub email: String,
	/// Only sent on creation; the backend never echoes it.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<TokenSecret>,
	/// Whether the account may sign in.
	pub active: bool,
}
impl BuyerUser {
	/// Builds the creation payload for `form`.
	pub fn from_form(form: &SignupForm) -> Self {
		let username = username_from_email(&form.email);

		Self {
			id: username.clone(),
			username,
			first_name: form.first_name.clone(),
			last_name: form.last_name.clone(),
			email: form.email.clone(),
			password: Some(TokenSecret::new(form.password.clone())),
			active: true,
		}
	}
}

/// Sign-up form submitted by a shopper.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupForm {
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// Login e-mail.
	pub email: String,
	/// Desired password.
	pub password: String,
}
impl SignupForm {
	/// Every field must be non-empty.
	pub fn is_complete(&self) -> bool {
		[&self.first_name, &self.last_name, &self.email, &self.password]
			.iter()
			.all(|field| !field.is_empty())
	}
}
impl Debug for SignupForm {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignupForm")
			.field("first_name", &self.first_name)
			.field("last_name", &self.last_name)
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Sign-up failures a storefront reports back to the shopper.
#[derive(Debug, ThisError)]
pub enum SignupError {
	/// A required field is missing.
	#[error("Invalid request.")]
	InvalidRequest,
	/// The backend already holds a user derived from this e-mail.
	#[error("The email is already in use.")]
	DuplicateEmail,
	/// Any other broker failure.
	#[error(transparent)]
	Broker(#[from] Error),
}
impl SignupError {
	/// Stable code for shopper-facing error payloads.
	pub fn code(&self) -> Option<&'static str> {
		match self {
			Self::DuplicateEmail => Some("duplicated_email"),
			_ => None,
		}
	}
}

/// Creates a buyer user and logs it in.
///
/// `middleware` must be the service fetcher; creating users needs elevated credentials. The
/// user is posted to `/buyers/{buyer_id}/users`, where `buyer_id` comes from the resolved
/// configuration.
pub async fn signup(middleware: &Fetcher, form: &SignupForm) -> Result<LoginOutcome, SignupError> {
	if !form.is_complete() {
		return Err(SignupError::InvalidRequest);
	}

	let buyer_id =
		middleware.config().buyer_id.ok_or_else(|| Error::from(ConfigError::MissingBuyerId))?;
	let path = format!("/buyers/{buyer_id}/users");
	let user = BuyerUser::from_form(form);

	if let Err(e) = middleware
		.fetch::<BuyerUser, _>(Method::POST, &path, Some(&user), FetchOptions::default())
		.await
	{
		return Err(classify_create_failure(e));
	}

	Ok(login(middleware, &form.email, &form.password).await?)
}

fn classify_create_failure(e: Error) -> SignupError {
	let duplicate = e
		.as_request()
		.is_some_and(|request| request.status == 409 && request.mentions(DUPLICATE_USERNAME_CODE));

	if duplicate { SignupError::DuplicateEmail } else { SignupError::Broker(e) }
}

// self
use crate::_prelude::*;

const CLIENT_ID: &str = "client_id";
const REDIRECT_URI: &str = "redirect_uri";
const SCOPE: &str = "scope";

/// Errors raised while parsing an authorization URL template.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum TemplateError {
	/// A `{` was never closed.
	#[error("Template has an unterminated placeholder at byte {offset}.")]
	UnterminatedPlaceholder {
		/// Byte offset of the opening brace.
		offset: usize,
	},
	/// The template names a placeholder this crate cannot fill.
	#[error("Template uses unknown placeholder `{{{name}}}`.")]
	UnknownPlaceholder {
		/// Placeholder name.
		name: String,
	},
	/// A required placeholder is absent.
	#[error("Template is missing the `{{{name}}}` placeholder.")]
	MissingPlaceholder {
		/// Placeholder name.
		name: &'static str,
	},
	/// The fixed `response_type=code` parameter is absent.
	#[error("Template must request `response_type=code`.")]
	MissingResponseType,
	/// Rendering the template with sample values does not yield an absolute URL.
	#[error("Template does not render to a valid absolute URL: {reason}.")]
	InvalidUrl {
		/// Parser message.
		reason: String,
	},
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
	Literal(String),
	ClientId,
	RedirectUri,
	Scope,
}

/// Authorization endpoint template with `{client_id}`, `{redirect_uri}`, and `{scope}` slots.
///
/// The template carries the fixed `response_type=code` parameter itself, e.g.
/// `https://idp.example/authorize?response_type=code&client_id={client_id}&redirect_uri={redirect_uri}&scope={scope}`.
/// Substitution is single-pass, so values that happen to contain brace sequences are never
/// re-expanded.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthorizationTemplate {
	raw: String,
	segments: Vec<Segment>,
}
impl AuthorizationTemplate {
	/// Parses and validates a template string.
	pub fn new(raw: impl Into<String>) -> Result<Self, TemplateError> {
		let raw = raw.into();
		let segments = parse(&raw)?;

		for (name, segment) in
			[(CLIENT_ID, Segment::ClientId), (REDIRECT_URI, Segment::RedirectUri), (SCOPE, Segment::Scope)]
		{
			if !segments.contains(&segment) {
				return Err(TemplateError::MissingPlaceholder { name });
			}
		}
		if !requests_code(&raw) {
			return Err(TemplateError::MissingResponseType);
		}

		let template = Self { raw, segments };

		template.sample_url()?;

		Ok(template)
	}

	/// The template as originally written.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Substitutes already-encoded values into the template.
	pub fn render(&self, client_id: &str, redirect_uri: &str, scope: &str) -> String {
		let mut out = String::with_capacity(self.raw.len() + client_id.len() + redirect_uri.len() + scope.len());

		for segment in &self.segments {
			match segment {
				Segment::Literal(text) => out.push_str(text),
				Segment::ClientId => out.push_str(client_id),
				Segment::RedirectUri => out.push_str(redirect_uri),
				Segment::Scope => out.push_str(scope),
			}
		}

		out
	}

	/// Renders the template with placeholder-safe sample values and parses the result.
	pub fn sample_url(&self) -> Result<Url, TemplateError> {
		let rendered = self.render("client", "https%3A%2F%2Fclient.invalid%2Fcb", "openid");

		Url::parse(&rendered).map_err(|e| TemplateError::InvalidUrl { reason: e.to_string() })
	}
}
impl TryFrom<String> for AuthorizationTemplate {
	type Error = TemplateError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<AuthorizationTemplate> for String {
	fn from(value: AuthorizationTemplate) -> Self {
		value.raw
	}
}
impl FromStr for AuthorizationTemplate {
	type Err = TemplateError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for AuthorizationTemplate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AuthorizationTemplate").field(&self.raw).finish()
	}
}
impl Display for AuthorizationTemplate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.raw)
	}
}

fn requests_code(raw: &str) -> bool {
	raw.split_once('?')
		.is_some_and(|(_, query)| query.split(['&', '#']).any(|pair| pair == "response_type=code"))
}

fn parse(raw: &str) -> Result<Vec<Segment>, TemplateError> {
	let mut segments = Vec::new();
	let mut literal = String::new();
	let mut rest = raw;
	let mut offset = 0;

	while let Some(open) = rest.find('{') {
		literal.push_str(&rest[..open]);

		let after = &rest[open + 1..];
		let close =
			after.find('}').ok_or(TemplateError::UnterminatedPlaceholder { offset: offset + open })?;
		let segment = match &after[..close] {
			CLIENT_ID => Segment::ClientId,
			REDIRECT_URI => Segment::RedirectUri,
			SCOPE => Segment::Scope,
			other => return Err(TemplateError::UnknownPlaceholder { name: other.to_owned() }),
		};

		if !literal.is_empty() {
			segments.push(Segment::Literal(std::mem::take(&mut literal)));
		}

		segments.push(segment);

		let consumed = open + close + 2;

		offset += consumed;
		rest = &rest[consumed..];
	}

	literal.push_str(rest);

	if !literal.is_empty() {
		segments.push(Segment::Literal(literal));
	}

	Ok(segments)
}

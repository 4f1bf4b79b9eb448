//! Contact form fields and their validation.

use std::collections::HashMap;

/// Raw, untrusted fields decoded from a form-encoded body. Only the first
/// value of a repeated field is kept.
#[derive(Clone, Debug, Default)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// Decodes an `application/x-www-form-urlencoded` body.
    pub fn parse(body: &[u8]) -> Self {
        let mut fields = HashMap::new();
        for (name, value) in form_urlencoded::parse(body) {
            fields.entry(name.into_owned()).or_insert_with(|| value.into_owned());
        }
        Self(fields)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn trimmed(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = HashMap::new();
        for (k, v) in iter {
            fields.entry(k.into()).or_insert_with(|| v.into());
        }
        Self(fields)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingRequired(&'static str),
}

/// A validated submission. Every field is trimmed; optional fields are
/// `None` rather than empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    pub subject: Option<String>,
    /// Honeypot field, passed through to the relay untouched.
    pub company: Option<String>,
}

/// Trims the known fields and checks that `name`, `email` and `message` are
/// present. The first missing one is reported.
pub fn validate(fields: &FormFields) -> Result<FormSubmission, ValidationError> {
    let required = |name: &'static str| {
        fields.trimmed(name).ok_or(ValidationError::MissingRequired(name))
    };
    Ok(FormSubmission {
        name: required("name")?,
        email: required("email")?,
        message: required("message")?,
        subject: fields.trimmed("subject"),
        company: fields.trimmed("company"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Vec<(&'static str, &'static str)> {
        vec![("name", " Ada "), ("email", "ada@example.com\n"), ("message", "  Hello  ")]
    }

    #[test]
    fn trims_required_fields() {
        let sub = validate(&complete().into_iter().collect()).unwrap();
        assert_eq!(sub.name, "Ada");
        assert_eq!(sub.email, "ada@example.com");
        assert_eq!(sub.message, "Hello");
        assert_eq!(sub.subject, None);
        assert_eq!(sub.company, None);
    }

    #[test]
    fn blank_optional_fields_are_absent() {
        let mut fields = complete();
        fields.push(("subject", "   "));
        fields.push(("company", " Acme "));
        let sub = validate(&fields.into_iter().collect()).unwrap();
        assert_eq!(sub.subject, None);
        assert_eq!(sub.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn blank_or_missing_required_fails() {
        let blank: FormFields = [("name", "Ada"), ("email", "  "), ("message", "hi")]
            .into_iter()
            .collect();
        assert_eq!(validate(&blank), Err(ValidationError::MissingRequired("email")));

        let missing: FormFields = [("email", "a@b.c")].into_iter().collect();
        assert_eq!(validate(&missing), Err(ValidationError::MissingRequired("name")));
    }

    #[test]
    fn parse_keeps_first_repeated_value() {
        let fields = FormFields::parse(b"name=first&name=second&message=a+b%21&empty=");
        assert_eq!(fields.get("name"), Some("first"));
        assert_eq!(fields.get("message"), Some("a b!"));
        assert_eq!(fields.get("empty"), Some(""));
        assert_eq!(fields.get("email"), None);
    }
}

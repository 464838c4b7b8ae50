//! Form input validation, done before any store call.

use crate::error::AppError;

pub const MSG_ENTER_USERNAME: &str = "Enter username.";
pub const MSG_AGE_NOT_NUMBER: &str = "Age must be a number.";
pub const MSG_AGE_NEGATIVE: &str = "Age must not be negative.";
pub const MSG_FILL_ALL_FIELDS: &str = "Fill all fields.";

/// Raw text of the user form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub age: String,
    pub contact: String,
}

/// Validated user form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub contact: Option<String>,
}

impl UserForm {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.age.is_empty() && self.contact.is_empty()
    }

    pub fn validate(&self) -> Result<UserFields, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(MSG_ENTER_USERNAME.into()));
        }
        Ok(UserFields {
            name: name.to_string(),
            email: non_blank(&self.email),
            age: parse_age(&self.age)?,
            contact: non_blank(&self.contact),
        })
    }
}

/// Empty input means "no age"; anything else must be a non-negative integer.
pub fn parse_age(raw: &str) -> Result<Option<i64>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let age: i64 = raw
        .parse()
        .map_err(|_| AppError::Validation(MSG_AGE_NOT_NUMBER.into()))?;
    if age < 0 {
        return Err(AppError::Validation(MSG_AGE_NEGATIVE.into()));
    }
    Ok(Some(age))
}

/// Raw text of the news form. `author` is a display name from the author selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub author: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub author: String,
    pub body: String,
}

impl PostForm {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.author.is_empty() && self.body.is_empty()
    }

    pub fn validate(&self) -> Result<PostFields, AppError> {
        let title = self.title.trim();
        let author = self.author.trim();
        let body = self.body.trim();
        if title.is_empty() || author.is_empty() || body.is_empty() {
            return Err(AppError::Validation(MSG_FILL_ALL_FIELDS.into()));
        }
        Ok(PostFields {
            title: title.to_string(),
            author: author.to_string(),
            body: body.to_string(),
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn user_form_requires_name() {
        let form = UserForm {
            name: "   ".into(),
            ..Default::default()
        };
        assert_eq!(message(form.validate().unwrap_err()), MSG_ENTER_USERNAME);
    }

    #[test]
    fn user_form_trims_and_drops_blank_optionals() {
        let form = UserForm {
            name: "  Zoe ".into(),
            email: " ".into(),
            age: "".into(),
            contact: " 555 ".into(),
        };
        let fields = form.validate().unwrap();
        assert_eq!(fields.name, "Zoe");
        assert_eq!(fields.email, None);
        assert_eq!(fields.age, None);
        assert_eq!(fields.contact.as_deref(), Some("555"));
    }

    #[test]
    fn age_must_be_numeric() {
        assert_eq!(parse_age(" 42 ").unwrap(), Some(42));
        assert_eq!(message(parse_age("forty").unwrap_err()), MSG_AGE_NOT_NUMBER);
        assert_eq!(message(parse_age("4.5").unwrap_err()), MSG_AGE_NOT_NUMBER);
        assert_eq!(message(parse_age("-1").unwrap_err()), MSG_AGE_NEGATIVE);
    }

    #[test]
    fn post_form_requires_every_field() {
        let mut form = PostForm {
            title: "T".into(),
            author: "Alice".into(),
            body: "B".into(),
        };
        assert!(form.validate().is_ok());
        form.body = "\n  \n".into();
        assert_eq!(message(form.validate().unwrap_err()), MSG_FILL_ALL_FIELDS);
    }
}

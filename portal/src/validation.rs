//! Form validation for login, signup and customer edit forms.
//!
//! Validators take raw input strings and either produce the typed request
//! or a per-field error map. Any error blocks submission.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;

use crate::customer::{AuthenticationRequest, CustomerRegistrationRequest, CustomerUpdateRequest, Gender};

pub const LOGIN_PASSWORD_MAX: usize = 20;
pub const NAME_MAX: usize = 15;
pub const AGE_MIN: u32 = 16;
pub const AGE_MAX: u32 = 100;
pub const PASSWORD_MIN: usize = 4;
pub const PASSWORD_MAX: usize = 15;

/// Form fields that can carry an inline error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Username,
    Password,
    Name,
    Email,
    Age,
    Gender,
}

/// Inline error message per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    fn check(&mut self, field: Field, result: Result<(), &'static str>) {
        if let Err(message) = result {
            self.0.entry(field).or_insert(message);
        }
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

/// Raw values of the customer form, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub age: String,
    pub gender: String,
    pub password: String,
}

/// Validate the login form.
///
/// # Errors
///
/// Returns the per-field errors when any field is invalid.
pub fn validate_login(username: &str, password: &str) -> Result<AuthenticationRequest, FieldErrors> {
    let username = username.trim();
    let mut errors = FieldErrors::default();
    errors.check(Field::Username, required(username, "Email is required"));
    errors.check(Field::Username, email(username, "Must be valid email"));
    errors.check(Field::Password, required(password, "Password is required"));
    errors.check(
        Field::Password,
        max_chars(password, LOGIN_PASSWORD_MAX, "Password cannot be more than 20 characters"),
    );
    errors.into_result(|| AuthenticationRequest {
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

/// Validate the signup / create-customer form.
///
/// # Errors
///
/// Returns the per-field errors when any field is invalid.
pub fn validate_registration(form: &CustomerForm) -> Result<CustomerRegistrationRequest, FieldErrors> {
    let mut errors = FieldErrors::default();
    let (name, email, age, gender) = check_profile(form, &mut errors);
    errors.check(Field::Password, required(&form.password, "Required"));
    errors.check(
        Field::Password,
        min_chars(&form.password, PASSWORD_MIN, "Must be 4 characters or more"),
    );
    errors.check(
        Field::Password,
        max_chars(&form.password, PASSWORD_MAX, "Must be 15 characters or less"),
    );
    match (age, gender) {
        (Some(age), Some(gender)) => errors.into_result(|| CustomerRegistrationRequest {
            name,
            email,
            password: form.password.clone(),
            age,
            gender,
        }),
        _ => Err(errors),
    }
}

/// Validate the update form. The password field is ignored.
///
/// # Errors
///
/// Returns the per-field errors when any field is invalid.
pub fn validate_update(form: &CustomerForm) -> Result<CustomerUpdateRequest, FieldErrors> {
    let mut errors = FieldErrors::default();
    let (name, email, age, gender) = check_profile(form, &mut errors);
    errors.into_result(|| CustomerUpdateRequest {
        name: Some(name),
        email: Some(email),
        age,
        gender,
    })
}

/// Shared name/email/age/gender rules. Returns the trimmed values.
fn check_profile(form: &CustomerForm, errors: &mut FieldErrors) -> (String, String, Option<u32>, Option<Gender>) {
    let name = form.name.trim();
    errors.check(Field::Name, required(name, "Required"));
    errors.check(Field::Name, max_chars(name, NAME_MAX, "Must be 15 characters or less"));

    let email_value = form.email.trim();
    errors.check(Field::Email, required(email_value, "Required"));
    errors.check(Field::Email, email(email_value, "Invalid email address"));

    let age = parse_age(&form.age);
    errors.check(Field::Age, age.map(|_| ()));

    let gender_value = form.gender.trim();
    errors.check(Field::Gender, required(gender_value, "Required"));
    let gender = Gender::parse(gender_value);
    if gender.is_none() {
        errors.check(Field::Gender, Err("Invalid gender"));
    }

    (name.to_owned(), email_value.to_owned(), age.ok(), gender)
}

fn parse_age(raw: &str) -> Result<u32, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Required");
    }
    let age: u32 = raw.parse().map_err(|_| "Must be a number")?;
    if age < AGE_MIN {
        return Err("Must be at least 16 years of age");
    }
    if age > AGE_MAX {
        return Err("Must be less than 100 years of age");
    }
    Ok(age)
}

fn required(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.is_empty() { Err(message) } else { Ok(()) }
}

fn max_chars(value: &str, max: usize, message: &'static str) -> Result<(), &'static str> {
    if value.chars().count() > max { Err(message) } else { Ok(()) }
}

fn min_chars(value: &str, min: usize, message: &'static str) -> Result<(), &'static str> {
    if value.chars().count() < min { Err(message) } else { Ok(()) }
}

/// Empty values pass; pair with [`required`].
fn email(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.is_empty() || is_valid_email(value) { Ok(()) } else { Err(message) }
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

//! Field rules for the sign-up form.
//!
//! The rules reproduce what a browser evaluates for the page's patterns, so whitespace,
//! trimming and `.` follow ECMAScript definitions rather than Rust's Unicode ones.

use std::fmt;

use crate::Result;
use crate::pattern::Pattern;

/// ECMAScript `WhiteSpace` and `LineTerminator` code points, as matched by `\s` and removed by
/// `String.prototype.trim`.
const BROWSER_WHITESPACE_CLASS: &str = "\t\n\u{0B}\u{0C}\r \u{A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}";

/// Code points a non-dotall ECMAScript `.` refuses to match.
const LINE_TERMINATOR_CLASS: &str = "\n\r\u{2028}\u{2029}";

const NAME_MIN_LENGTH: usize = 2;
const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    /// Validation order on submit.
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm-password",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Password => 2,
            Field::ConfirmPassword => 3,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStatus {
    #[default]
    Untouched,
    Invalid,
    Valid,
}

/// Per-field form state: the last verdict and whether the inline error is on screen.
///
/// The two are tracked apart because an input event can only ever hide the error, so a field
/// may be `Invalid` with its error still hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldState {
    pub status: FieldStatus,
    pub error_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    NameTooShort,
    MalformedEmail,
    WeakPassword,
    PasswordMismatch,
}

impl ValidationFailure {
    pub fn field(self) -> Field {
        match self {
            ValidationFailure::NameTooShort => Field::Name,
            ValidationFailure::MalformedEmail => Field::Email,
            ValidationFailure::WeakPassword => Field::Password,
            ValidationFailure::PasswordMismatch => Field::ConfirmPassword,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::NameTooShort => {
                write!(f, "name must be at least {NAME_MIN_LENGTH} characters")
            }
            ValidationFailure::MalformedEmail => f.write_str("email is not a valid address"),
            ValidationFailure::WeakPassword => f.write_str(
                "password needs at least 8 characters with a letter and a digit",
            ),
            ValidationFailure::PasswordMismatch => f.write_str("passwords do not match"),
        }
    }
}

/// Snapshot of the four inputs, read from the page at the moment a rule runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Password => self.password = value,
            Field::ConfirmPassword => self.confirm_password = value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormRules {
    email: Pattern,
    password: Pattern,
}

impl FormRules {
    pub fn new() -> Result<Self> {
        let non_space_or_at = format!("[^{BROWSER_WHITESPACE_CLASS}@]+");
        let email = format!(r"^{non_space_or_at}@{non_space_or_at}\.{non_space_or_at}$");
        let any = format!("[^{LINE_TERMINATOR_CLASS}]");
        // the `{8,}` length bound is checked separately, in UTF-16 units
        let password = format!("^(?={any}*[A-Za-z])(?={any}*[0-9]){any}*$");
        Ok(Self {
            email: Pattern::new(&email)?,
            password: Pattern::new(&password)?,
        })
    }

    /// Runs the rule for `field` against the current values. `Ok(None)` means the field passes.
    pub fn check(&self, field: Field, values: &FormValues) -> Result<Option<ValidationFailure>> {
        let passes = match field {
            Field::Name => name_is_valid(&values.name),
            Field::Email => self.email.is_match(&values.email)?,
            Field::Password => {
                values.password.encode_utf16().count() >= PASSWORD_MIN_LENGTH
                    && self.password.is_match(&values.password)?
            }
            Field::ConfirmPassword => values.confirm_password == values.password,
        };
        Ok(if passes {
            None
        } else {
            Some(match field {
                Field::Name => ValidationFailure::NameTooShort,
                Field::Email => ValidationFailure::MalformedEmail,
                Field::Password => ValidationFailure::WeakPassword,
                Field::ConfirmPassword => ValidationFailure::PasswordMismatch,
            })
        })
    }

    pub fn is_valid(&self, field: Field, values: &FormValues) -> Result<bool> {
        Ok(self.check(field, values)?.is_none())
    }
}

/// Trimmed length is counted in UTF-16 code units, which is what a browser reports.
fn name_is_valid(value: &str) -> bool {
    trim_browser_whitespace(value).encode_utf16().count() >= NAME_MIN_LENGTH
}

fn trim_browser_whitespace(value: &str) -> &str {
    value.trim_matches(is_browser_whitespace)
}

fn is_browser_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(name: &str, email: &str, password: &str, confirm: &str) -> FormValues {
        FormValues {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    fn email_ok(rules: &FormRules, email: &str) -> bool {
        rules
            .is_valid(Field::Email, &values("", email, "", ""))
            .unwrap_or(false)
    }

    fn password_ok(rules: &FormRules, password: &str) -> bool {
        rules
            .is_valid(Field::Password, &values("", "", password, ""))
            .unwrap_or(false)
    }

    #[test]
    fn email_rule_requires_local_domain_and_tld() -> Result<()> {
        let rules = FormRules::new()?;
        assert!(email_ok(&rules, "a@b.co"));
        assert!(email_ok(&rules, "first.last@mail.example.org"));
        assert!(!email_ok(&rules, "a@@b.co"));
        assert!(!email_ok(&rules, "a@b"));
        assert!(!email_ok(&rules, "bad"));
        assert!(!email_ok(&rules, "a b@c.d"));
        assert!(!email_ok(&rules, "@b.co"));
        assert!(!email_ok(&rules, "a@b."));
        Ok(())
    }

    #[test]
    fn email_rule_uses_ecmascript_whitespace() -> Result<()> {
        let rules = FormRules::new()?;
        // U+FEFF is whitespace to a browser, U+0085 is not
        assert!(!email_ok(&rules, "a\u{FEFF}@b.co"));
        assert!(email_ok(&rules, "a\u{0085}@b.co"));
        Ok(())
    }

    #[test]
    fn password_rule_needs_length_letter_and_digit() -> Result<()> {
        let rules = FormRules::new()?;
        assert!(password_ok(&rules, "abcd1234"));
        assert!(password_ok(&rules, "1234567a"));
        assert!(password_ok(&rules, "p@ss w0rd!"));
        assert!(!password_ok(&rules, "short1"));
        assert!(!password_ok(&rules, "abcdefgh"));
        assert!(!password_ok(&rules, "12345678"));
        assert!(!password_ok(&rules, "abcd\n1234"));
        // only ASCII digits count
        assert!(!password_ok(&rules, "abcdefg\u{0663}"));
        Ok(())
    }

    #[test]
    fn password_length_counts_utf16_units() -> Result<()> {
        let rules = FormRules::new()?;
        // each emoji is a surrogate pair
        assert!(password_ok(&rules, "abc1\u{1F600}\u{1F600}"));
        assert!(!password_ok(&rules, "abc1\u{1F600}a"));
        assert!(!password_ok(&rules, "\u{1F600}\u{1F600}\u{1F600}\u{1F600}"));
        Ok(())
    }

    #[test]
    fn name_rule_trims_before_counting() -> Result<()> {
        let rules = FormRules::new()?;
        let check = |name: &str| rules.is_valid(Field::Name, &values(name, "", "", ""));
        assert!(!check("A")?);
        assert!(!check("  A  ")?);
        assert!(!check("\u{3000}A\u{FEFF}")?);
        assert!(check("Ann")?);
        assert!(check(" Al ")?);
        // one astral character is two UTF-16 units
        assert!(check("\u{1F600}")?);
        Ok(())
    }

    #[test]
    fn confirm_rule_compares_against_current_password() -> Result<()> {
        let rules = FormRules::new()?;
        assert!(rules.is_valid(Field::ConfirmPassword, &values("", "", "", ""))?);
        assert!(rules.is_valid(
            Field::ConfirmPassword,
            &values("", "", "abcd1234", "abcd1234")
        )?);
        assert_eq!(
            rules.check(Field::ConfirmPassword, &values("", "", "abcd1234", "abcd123"))?,
            Some(ValidationFailure::PasswordMismatch)
        );
        Ok(())
    }

    #[test]
    fn failures_point_back_at_their_field() {
        for field in Field::ALL {
            let failure = match field {
                Field::Name => ValidationFailure::NameTooShort,
                Field::Email => ValidationFailure::MalformedEmail,
                Field::Password => ValidationFailure::WeakPassword,
                Field::ConfirmPassword => ValidationFailure::PasswordMismatch,
            };
            assert_eq!(failure.field(), field);
            assert_eq!(Field::ALL[field.index()], field);
        }
    }
}

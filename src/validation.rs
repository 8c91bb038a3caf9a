use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Provide between {min} and {max} options (found {found})")]
    OptionCount { min: usize, max: usize, found: usize },
    #[error("Option \"{0}\" appears more than once")]
    DuplicateOption(String),
    #[error("Correct answer \"{0}\" is not one of the options")]
    CorrectAnswerNotAnOption(String),
    #[error("The rewritten sentence must differ from the original")]
    RewriteUnchanged,
    #[error("Text must contain at least one blank (___)")]
    NoBlanks,
    #[error("Text has {blanks} blank(s) but {answers} answer(s)")]
    BlankCountMismatch { blanks: usize, answers: usize },
    #[error("Audio URL must start with http:// or https:// (got \"{0}\")")]
    InvalidAudioUrl(String),
    #[error("Provide at least {min} items (found {found})")]
    TooFewItems { min: usize, found: usize },
    #[error("Item \"{0}\" appears more than once")]
    DuplicateItem(String),
}

pub fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

/// Loose shape check: something before `@`, and a dot somewhere after it.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

/// Runs every check and keeps all failures, so a form can show them at once.
pub fn collect(checks: impl IntoIterator<Item = Result<(), ValidationError>>) -> Vec<ValidationError> {
    checks.into_iter().filter_map(Result::err).collect()
}

pub fn validate_sign_in(email: &str, password: &str) -> Vec<ValidationError> {
    collect([
        check_email(email),
        require(password, "Password"),
    ])
}

pub fn validate_sign_up(
    full_name: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Vec<ValidationError> {
    collect([
        require(full_name, "Full name"),
        check_email(email),
        if password.chars().count() < MIN_PASSWORD_LEN {
            Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN))
        } else {
            Ok(())
        },
        if password != confirmation {
            Err(ValidationError::PasswordMismatch)
        } else {
            Ok(())
        },
    ])
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    require(email, "Email")?;
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_form() {
        assert!(validate_sign_in("ana@example.com", "x").is_empty());
        assert_eq!(
            validate_sign_in("", ""),
            vec![
                ValidationError::Required("Email"),
                ValidationError::Required("Password")
            ]
        );
        assert_eq!(
            validate_sign_in("ana.example.com", "secret1"),
            vec![ValidationError::InvalidEmail]
        );
    }

    #[test]
    fn test_sign_up_form() {
        assert!(validate_sign_up("Ana", "ana@example.com", "secret1", "secret1").is_empty());
        assert_eq!(
            validate_sign_up("Ana", "ana@example.com", "abc", "abd"),
            vec![
                ValidationError::PasswordTooShort(MIN_PASSWORD_LEN),
                ValidationError::PasswordMismatch
            ]
        );
        assert_eq!(
            validate_sign_up(" ", "ana@example.com", "secret1", "secret1"),
            vec![ValidationError::Required("Full name")]
        );
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("  ana.silva@mail.co.uk "));
        assert!(!is_valid_email("ana.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana@.com"));
        assert!(!is_valid_email("ana@ex@ample.com"));
    }

    #[test]
    fn test_require() {
        assert_eq!(require("  ", "Word"), Err(ValidationError::Required("Word")));
        assert!(require("x", "Word").is_ok());
    }

    #[test]
    fn test_collect_keeps_all_errors() {
        let errors = collect([
            require("", "Email"),
            Ok(()),
            Err(ValidationError::PasswordMismatch),
        ]);
        assert_eq!(
            errors,
            vec![
                ValidationError::Required("Email"),
                ValidationError::PasswordMismatch
            ]
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::BlankCountMismatch { blanks: 2, answers: 1 }.to_string(),
            "Text has 2 blank(s) but 1 answer(s)"
        );
        assert_eq!(
            ValidationError::PasswordTooShort(MIN_PASSWORD_LEN).to_string(),
            "Password must be at least 6 characters"
        );
    }
}

use ihub_derive::ihub_error;
use std::borrow::Cow;

#[ihub_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn io_err() -> Result<(), std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
}

#[test]
fn from_source_via_question_mark() {
    fn inner() -> Result<(), DemoError> {
        io_err()?;
        Ok(())
    }

    let err = inner().unwrap_err();
    assert!(matches!(err, DemoError::Io { context: None, .. }));
}

#[test]
fn context_is_attached_to_source_results() {
    let err: DemoError = io_err().context("Reading manifest").unwrap_err();
    assert_eq!(err.to_string(), "IO error (Reading manifest): missing");
}

#[test]
fn context_is_attached_to_own_results() {
    let result: Result<(), DemoError> = Err("boom".into());
    let err = result.context("During startup").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (During startup): boom");
}

#[test]
fn internal_from_string_types() {
    let err: DemoError = "static fault".into();
    assert!(matches!(err, DemoError::Internal { .. }));

    let err: DemoError = String::from("owned fault").into();
    assert_eq!(err.to_string(), "Internal error: owned fault");
}

#[test]
fn ihub_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/ihub_error_pass.rs");
}

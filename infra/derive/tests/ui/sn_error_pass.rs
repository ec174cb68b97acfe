use sn_derive::sn_error;
use std::borrow::Cow;

#[sn_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Parse error{}: {message}", format_context(.context))]
    Parse { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read(path: &str) -> Result<String, DemoError> {
    let text = std::fs::read_to_string(path).context("Reading demo file")?;
    if text.is_empty() {
        return Err("empty file".into());
    }
    Ok(text)
}

fn main() {
    let err = read("/definitely/not/here").context("outer").unwrap_err();
    assert!(err.to_string().contains("outer"));

    let internal: DemoError = String::from("boom").into();
    assert!(matches!(internal, DemoError::Internal { .. }));

    let parse = DemoError::Parse { message: "bad".into(), context: None };
    assert_eq!(parse.to_string(), "Parse error: bad");
}

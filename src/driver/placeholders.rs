use std::sync::OnceLock;

use log::debug;
use regex::{Captures, Regex};

/// The target database settings, which also fill `${DB_NAME}`, `${DB_USER}` and `${DB_PASS}`
/// placeholders in statements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    pub name: String,
    pub user: String,
    pub password: String,
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{(DB_NAME|DB_USER|DB_PASS)\}").expect("placeholder pattern is valid")
    })
}

impl Params {
    pub fn new(name: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self { name: name.into(), user: user.into(), password: password.into() }
    }

    /// Replaces every placeholder in the given text. Substituted values are inserted literally
    /// and never rescanned.
    pub fn substitute(&self, text: &str) -> String {
        let text = placeholder()
            .replace_all(text, |caps: &Captures| match &caps[1] {
                "DB_NAME" => self.name.clone(),
                "DB_USER" => self.user.clone(),
                _ => self.password.clone(),
            })
            .into_owned();
        debug!("{}", text);
        text
    }
}

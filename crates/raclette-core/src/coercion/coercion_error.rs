use thiserror::Error;

/// One step into a nested input value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputPathSegment {
    Field(String),
    Index(usize),
}

/// Renders a path relative to the coerced value, e.g. `value.steps[2].name`.
pub(crate) fn render_input_path(path: &[InputPathSegment]) -> String {
    let mut rendered = String::from("value");
    for segment in path {
        match segment {
            InputPathSegment::Field(name) => {
                rendered.push('.');
                rendered.push_str(name);
            }
            InputPathSegment::Index(idx) => rendered.push_str(&format!("[{idx}]")),
        }
    }
    rendered
}

/// A value could not be converted to or from the type it was checked
/// against.
#[derive(Clone, Debug, Error, PartialEq)]
#[error(
    "{message}{}{}",
    if path.is_empty() { String::new() } else { format!(" at {}", render_input_path(path)) },
    reason.as_ref().map(|r| format!("; {r}")).unwrap_or_default(),
)]
pub struct CoercionError {
    pub(crate) message: String,
    pub(crate) path: Vec<InputPathSegment>,
    pub(crate) reason: Option<String>,
}
impl CoercionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: vec![],
            reason: None,
        }
    }

    pub(crate) fn at(mut self, path: &[InputPathSegment]) -> Self {
        self.path = path.to_vec();
        self
    }

    pub(crate) fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// The message without the path and reason.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &[InputPathSegment] {
        &self.path
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

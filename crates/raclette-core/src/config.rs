use serde::Deserialize;

/// Runtime settings of an [`Engine`](crate::Engine).
///
/// Deserializable, with every missing key taking its default:
///
/// ```
/// use raclette_core::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str(r#"{"max_errors": 10}"#).unwrap();
/// assert!(config.introspection);
/// assert_eq!(config.max_errors, Some(10));
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether `__schema` and `__type` may be queried. `__typename` is
    /// always available.
    pub introspection: bool,

    /// Upper bound on the number of field errors in one response. Errors
    /// past the bound are dropped after ordering.
    pub max_errors: Option<usize>,

    /// Whether the root fields of a mutation resolve one after another.
    pub serial_mutations: bool,
}
impl std::default::Default for EngineConfig {
    fn default() -> Self {
        Self {
            introspection: true,
            max_errors: None,
            serial_mutations: true,
        }
    }
}

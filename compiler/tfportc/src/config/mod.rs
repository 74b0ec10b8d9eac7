//! Front-end configuration.

/// Options for [`bind_graph`](crate::bind_graph).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Bind resources, modules and locals on a rayon pool.
    pub parallel: bool,
    /// Run debug validation over every bound tree.
    pub validate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            parallel: false,
            validate: cfg!(debug_assertions),
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Defaults, overridden by `TFPORT_PARALLEL` and `TFPORT_VALIDATE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each variable.
    ///
    /// Values that are not a recognized flag keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();
        if let Some(parallel) = lookup("TFPORT_PARALLEL").as_deref().and_then(parse_flag) {
            config.parallel = parallel;
        }
        if let Some(validate) = lookup("TFPORT_VALIDATE").as_deref().and_then(parse_flag) {
            config.validate = validate;
        }
        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

//! Engine configuration.

/// Tunables for an [`Engine`](crate::Engine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the deterministic random number generator.
    pub seed: u64,
    /// Prompt shown when reading player input.
    pub prompt: String,
    /// Deepest allowed nesting of `{name}` and `[...]` expansions.
    pub max_text_depth: usize,
    /// Deepest allowed nesting of proc, handler, and action calls.
    pub max_call_depth: usize,
    /// Stop `run_forever` after this many passes.
    pub pass_limit: Option<u64>,
    /// Print runtime faults to the console as well as the log.
    pub echo_faults: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            prompt: "? ".to_string(),
            max_text_depth: 32,
            max_call_depth: 256,
            pass_limit: None,
            echo_faults: true,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the input prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets the text expansion nesting limit.
    #[must_use]
    pub fn with_max_text_depth(mut self, depth: usize) -> Self {
        self.max_text_depth = depth;
        self
    }

    /// Sets the call nesting limit.
    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Limits the number of passes `run_forever` makes.
    #[must_use]
    pub fn with_pass_limit(mut self, passes: u64) -> Self {
        self.pass_limit = Some(passes);
        self
    }

    /// Controls whether faults are printed to the console.
    #[must_use]
    pub fn with_echo_faults(mut self, echo: bool) -> Self {
        self.echo_faults = echo;
        self
    }
}

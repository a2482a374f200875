/// Context passed throughout the application containing global configuration
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Log every archive entry as it is written
    pub verbose: bool,
}

impl Context {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

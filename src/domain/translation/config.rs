/// What to do with an element whose variant has no translation routine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnhandledPolicy {
    /// Log a warning, emit nothing and stop following that path.
    #[default]
    Skip,
    /// Fail the translation with `Error::UnresolvedVariant`.
    Abort,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub unhandled: UnhandledPolicy,
}

impl TranslatorConfig {
    pub fn strict() -> Self {
        TranslatorConfig { unhandled: UnhandledPolicy::Abort }
    }
}

use crate::Grammar;

/// Fallback grammar writing ANSI SQL (closest to PostgreSQL conventions).
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericGrammar;

impl GenericGrammar {
    pub fn new() -> Self {
        Self {}
    }
}

impl Grammar for GenericGrammar {
    fn as_dyn(&self) -> &dyn Grammar {
        self
    }
}

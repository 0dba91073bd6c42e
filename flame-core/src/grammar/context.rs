use crate::Parameters;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    #[default]
    None,
    SqlInsertInto,
    SqlInsertIntoValues,
    SqlJoin,
    SqlSelect,
    SqlSelectFrom,
    SqlSelectGroupBy,
    SqlSelectHaving,
    SqlSelectOrderBy,
    SqlSelectWhere,
    SqlUpdate,
    SqlUpdateSet,
    SqlUpdateWhere,
}

/// State threaded through a render: the clause being written and the
/// parameters collected so far.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Context {
    pub counter: u32,
    pub fragment: Fragment,
    pub parameters: Parameters,
}

impl Context {
    pub fn new(fragment: Fragment) -> Self {
        Self {
            counter: 0,
            fragment,
            parameters: Parameters::new(),
        }
    }

    /// Start from values bound explicitly, generated names will not collide with them.
    pub fn with_parameters(fragment: Fragment, parameters: Parameters) -> Self {
        Self {
            counter: 0,
            fragment,
            parameters,
        }
    }

    /// Next generated parameter name not used yet.
    pub fn next_parameter_name(&mut self) -> String {
        loop {
            self.counter += 1;
            let name = format!("p{}", self.counter);
            if !self.parameters.contains(&name) {
                return name;
            }
        }
    }

    pub fn switch_fragment<'s>(&'s mut self, fragment: Fragment) -> ContextUpdater<'s> {
        let previous = self.fragment;
        self.fragment = fragment;
        ContextUpdater {
            current: self,
            previous,
        }
    }
}

/// Restores the previous fragment when dropped.
pub struct ContextUpdater<'a> {
    pub current: &'a mut Context,
    previous: Fragment,
}

impl<'a> Drop for ContextUpdater<'a> {
    fn drop(&mut self) {
        self.current.fragment = self.previous;
    }
}

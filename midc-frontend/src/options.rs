/// Selects which pipeline stages `compile` runs and which dumps it prints.
#[derive(Clone, Debug)]
pub struct Options {
    pub ssa: bool,
    pub validate: bool,
    pub analyses: bool,
    pub emit_ir: Option<String>,
    pub emit_ssa: Option<String>,
}

impl Options {
    pub fn new() -> Options {
        Options {
            ssa: true,
            validate: true,
            analyses: false,
            emit_ir: None,
            emit_ssa: None,
        }
    }

    pub fn set_ssa(mut self, ssa: bool) -> Options {
        self.ssa = ssa;
        self
    }

    pub fn set_validate(mut self, validate: bool) -> Options {
        self.validate = validate;
        self
    }

    pub fn set_analyses(mut self, analyses: bool) -> Options {
        self.analyses = analyses;
        self
    }

    pub fn set_emit_ir(mut self, filter: &str) -> Options {
        self.emit_ir = Some(filter.into());
        self
    }

    pub fn set_emit_ssa(mut self, filter: &str) -> Options {
        self.emit_ssa = Some(filter.into());
        self
    }
}

impl Default for Options {
    fn default() -> Options {
        Options::new()
    }
}

use crate::case::TestCase;
use crate::error::{ConformanceError, ConformanceResult};

/// An ordered set of test cases with unique ids.
///
/// Cases run in registration order.
#[derive(Debug, Clone, Default)]
pub struct Suite {
    cases: Vec<TestCase>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a case, rejecting ids that are already registered.
    pub fn register(&mut self, case: TestCase) -> ConformanceResult<()> {
        if self.get(case.id()).is_some() {
            return Err(ConformanceError::DuplicateCase(case.id().to_string()));
        }
        log::debug!("Registered test case {}", case.id());
        self.cases.push(case);
        Ok(())
    }

    /// Builder form of [`Suite::register`].
    pub fn with(mut self, case: TestCase) -> ConformanceResult<Self> {
        self.register(case)?;
        Ok(self)
    }

    /// Append every case of `other`.
    pub fn extend(&mut self, other: Suite) -> ConformanceResult<()> {
        for case in other.cases {
            self.register(case)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&TestCase> {
        self.cases.iter().find(|case| case.id() == id)
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn ids(&self) -> Vec<&str> {
        self.cases.iter().map(TestCase::id).collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

use crate::{
    case::{BenchmarkCase, Routine},
    error::{HarnessError, Result},
    result::{self, RunResult},
    sweep::{ArgumentSweep, ArgumentValue},
};

/// Append-only collection of cases, owned by the driver.
///
/// Cases keep their registration order for listing and running.
#[derive(Debug, Default)]
pub struct BenchmarkRegistry {
    cases: Vec<BenchmarkCase>,
}

/// One case/argument pair to execute.
#[derive(Debug, Clone, Copy)]
pub struct RunSpec<'a> {
    pub case: &'a BenchmarkCase,
    pub argument: Option<ArgumentValue>,
}

impl RunSpec<'_> {
    pub fn label(&self) -> String {
        result::label(self.case.name(), self.argument)
    }

    pub fn run(&self, iterations: u64) -> Result<RunResult> {
        self.case.run(self.argument, iterations)
    }
}

impl BenchmarkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        routine: Routine,
        sweep: Option<ArgumentSweep>,
    ) -> Result<()> {
        self.add(BenchmarkCase::new(name, routine, sweep)?)
    }

    /// Add a case. Fails if the name is taken.
    pub fn add(&mut self, case: BenchmarkCase) -> Result<()> {
        if self.get(case.name()).is_some() {
            return Err(HarnessError::DuplicateName(case.name().to_owned()));
        }
        log::debug!("registered {}", case.name());
        self.cases.push(case);
        Ok(())
    }

    /// Add a case that deliberately replaces any prior case of the same name,
    /// keeping the prior position. Returns the replaced case.
    pub fn shadow(&mut self, case: BenchmarkCase) -> Option<BenchmarkCase> {
        match self.cases.iter().position(|c| c.name() == case.name()) {
            Some(i) => {
                log::warn!("{} shadows an earlier registration", case.name());
                Some(std::mem::replace(&mut self.cases[i], case))
            }
            None => {
                self.cases.push(case);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&BenchmarkCase> {
        self.cases.iter().find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Registered cases, in registration order.
    pub fn cases(&self) -> impl Iterator<Item = &BenchmarkCase> + '_ {
        self.cases.iter()
    }

    /// Every case/argument pair, in registration then sweep order.
    pub fn runs(&self) -> impl Iterator<Item = RunSpec<'_>> + '_ {
        self.cases.iter().flat_map(|case| {
            case.arguments()
                .map(move |argument| RunSpec { case, argument })
        })
    }

    /// Look up a run by its `name` or `name/arg` label.
    pub fn find(&self, label: &str) -> Result<RunSpec<'_>> {
        self.runs()
            .find(|run| run.label() == label)
            .ok_or_else(|| HarnessError::UnknownCase(label.to_owned()))
    }

    pub fn run(&self, label: &str, iterations: u64) -> Result<RunResult> {
        self.find(label)?.run(iterations)
    }
}

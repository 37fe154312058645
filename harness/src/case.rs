use std::fmt;

use crate::{
    bencher::State,
    error::{HarnessError, Result},
    result::{self, RunResult},
    sweep::{Argument, ArgumentKind, ArgumentSweep, ArgumentValue},
};

type PlainFn = dyn Fn(&mut State) -> Result<()>;
type WithArgFn = dyn Fn(&mut State, ArgumentValue) -> Result<()>;

/// The run routine of a case: `(iterations[, argument])`, iterations read from
/// the [`State`].
pub enum Routine {
    Plain(Box<PlainFn>),
    WithArg(ArgumentKind, Box<WithArgFn>),
}

impl Routine {
    pub fn plain(f: impl Fn(&mut State) -> Result<()> + 'static) -> Self {
        Self::Plain(Box::new(f))
    }

    pub fn with_arg<A: Argument + 'static>(
        f: impl Fn(&mut State, A) -> Result<()> + 'static,
    ) -> Self {
        Self::WithArg(
            A::KIND,
            Box::new(move |state: &mut State, value: ArgumentValue| {
                f(state, A::from_value(value)?)
            }),
        )
    }
}

impl fmt::Debug for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(_) => write!(f, "Routine::Plain"),
            Self::WithArg(kind, _) => write!(f, "Routine::WithArg({})", kind.name()),
        }
    }
}

/// A named unit of timed work.
#[derive(Debug)]
pub struct BenchmarkCase {
    name: String,
    routine: Routine,
    sweep: Option<ArgumentSweep>,
}

impl BenchmarkCase {
    /// Pair a routine with its sweep. A plain routine takes no sweep; a routine
    /// with an argument needs one of the matching kind.
    pub fn new(
        name: impl Into<String>,
        routine: Routine,
        sweep: Option<ArgumentSweep>,
    ) -> Result<Self> {
        let name = name.into();
        match (&routine, &sweep) {
            (Routine::Plain(_), Some(_)) => {
                return Err(HarnessError::precondition(format!(
                    "`{name}` takes no argument but was given a sweep"
                )))
            }
            (Routine::WithArg(..), None) => {
                return Err(HarnessError::precondition(format!(
                    "`{name}` takes an argument but has no sweep"
                )))
            }
            (Routine::WithArg(kind, _), Some(sweep)) if *kind != sweep.kind() => {
                return Err(HarnessError::MixedArgumentKinds {
                    expected: kind.name(),
                    found: sweep.kind().name(),
                })
            }
            _ => {}
        }
        Ok(Self {
            name,
            routine,
            sweep,
        })
    }

    pub fn no_arg(
        name: impl Into<String>,
        f: impl Fn(&mut State) -> Result<()> + 'static,
    ) -> Result<Self> {
        Self::new(name, Routine::plain(f), None)
    }

    pub fn with_arg<A: Argument + 'static>(
        name: impl Into<String>,
        sweep: ArgumentSweep,
        f: impl Fn(&mut State, A) -> Result<()> + 'static,
    ) -> Result<Self> {
        Self::new(name, Routine::with_arg(f), Some(sweep))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sweep(&self) -> Option<&ArgumentSweep> {
        self.sweep.as_ref()
    }

    /// The arguments this case runs with, in declaration order. A case without
    /// a sweep runs once with `None`.
    pub fn arguments(&self) -> impl Iterator<Item = Option<ArgumentValue>> + '_ {
        let plain = self.sweep.is_none().then_some(None);
        plain.into_iter().chain(
            self.sweep
                .iter()
                .flat_map(|sweep| sweep.iter().map(Some)),
        )
    }

    /// Invoke the routine once for `iterations` iterations.
    pub fn run(&self, argument: Option<ArgumentValue>, iterations: u64) -> Result<RunResult> {
        if iterations == 0 {
            return Err(HarnessError::InvalidIterations(iterations));
        }
        let label = result::label(&self.name, argument);
        log::debug!("running {label} for {iterations} iterations");
        let mut state = State::new(iterations);
        match (&self.routine, argument) {
            (Routine::Plain(f), None) => f(&mut state)?,
            (Routine::WithArg(_, f), Some(arg)) => f(&mut state, arg)?,
            (Routine::Plain(_), Some(_)) => {
                return Err(HarnessError::precondition(format!(
                    "`{}` takes no argument",
                    self.name
                )))
            }
            (Routine::WithArg(..), None) => {
                return Err(HarnessError::precondition(format!(
                    "`{}` requires an argument",
                    self.name
                )))
            }
        }
        let result = state.finish(&self.name, argument)?;
        log::debug!(
            "finished {label}: mean {:.1} ns over {} samples",
            result.mean_ns(),
            result.count()
        );
        Ok(result)
    }
}

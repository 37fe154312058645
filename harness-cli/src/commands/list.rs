use clap::Parser;
use libcbench::BenchmarkRegistry;

/// List the registered benchmark labels
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only list labels containing this. May be repeated
    #[arg(long)]
    pub filter: Vec<String>,
}

impl ListArgs {
    /// Labels of every case/argument, in registration order.
    pub fn labels(&self, registry: &BenchmarkRegistry) -> Vec<String> {
        registry
            .runs()
            .map(|spec| spec.label())
            .filter(|label| {
                self.filter.is_empty() || self.filter.iter().any(|f| label.contains(f.as_str()))
            })
            .collect()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let registry = libcbench_suites::registry()?;
        for label in self.labels(&registry) {
            println!("{}", label);
        }
        Ok(())
    }
}

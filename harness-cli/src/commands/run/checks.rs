use colored::Colorize;

use crate::meta::SystemInfo;

/// Host conditions that make measurements noisy. Reported, never fatal.
pub fn warnings(system: &SystemInfo) -> Vec<String> {
    #[allow(unused_mut)]
    let mut warnings = Vec::new();
    #[cfg(target_os = "linux")]
    {
        if system.users.len() > 1 {
            warnings.push(format!(
                "More than one user logged in: {}",
                system.users.join(", ")
            ));
        }
        if !system.scaling_governor.iter().all(|g| g == "performance") {
            let mut governors = system.scaling_governor.clone();
            governors.sort();
            governors.dedup();
            warnings.push(format!(
                "Not all scaling governors are set to `performance`: [{}]",
                governors.join(", ")
            ));
        }
    }
    #[cfg(not(target_os = "linux"))]
    let _ = system;
    warnings
}

pub fn dump_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    eprintln!("{}\n", "WARNING".bold().black().on_red());
    for msg in warnings {
        eprintln!("{} {}", "•".bright_red(), msg.red());
    }
    eprintln!();
}

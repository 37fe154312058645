use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use sysinfo::{CpuExt, System, SystemExt};

#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub host: String,
    pub os: String,
    pub arch: String,
    pub kernel: String,
    pub cpu_model: String,
    pub cpus: usize,
    /// Bytes.
    pub memory_size: usize,
    /// Bytes.
    pub swap_size: usize,
    #[cfg(target_os = "linux")]
    pub users: Vec<String>,
    #[cfg(target_os = "linux")]
    pub scaling_governor: Vec<String>,
}

#[cfg(target_os = "linux")]
fn get_logged_in_users() -> anyhow::Result<Vec<String>> {
    use std::process::Command;

    Command::new("users")
        .output()
        .map(|o| {
            let mut users = String::from_utf8_lossy(&o.stdout)
                .split_whitespace()
                .map(|s| s.to_owned())
                .collect::<Vec<_>>();
            users.sort();
            users.dedup();
            users
        })
        .map_err(|e| e.into())
}

#[cfg(target_os = "linux")]
fn get_scaling_governor() -> anyhow::Result<Vec<String>> {
    let mut governors = Vec::new();
    for path in (std::fs::read_dir("/sys/devices/system/cpu/")?).flatten() {
        let path = path.path().join("cpufreq/scaling_governor");
        if let Ok(governor) = std::fs::read_to_string(path) {
            governors.push(governor.trim().to_owned());
        }
    }
    Ok(governors)
}

pub static SYSTEM_INFO: Lazy<SystemInfo> = Lazy::new(|| {
    let mut sys = System::new_all();
    sys.refresh_all();
    const UNKNOWN: &str = "<unknown>";
    SystemInfo {
        host: sys.host_name().unwrap_or(UNKNOWN.to_string()),
        os: sys.long_os_version().unwrap_or(UNKNOWN.to_string()),
        arch: std::env::consts::ARCH.to_string(),
        kernel: sys.kernel_version().unwrap_or(UNKNOWN.to_string()),
        cpu_model: sys.global_cpu_info().brand().to_owned(),
        cpus: sys.cpus().len(),
        memory_size: sys.total_memory() as usize,
        swap_size: sys.total_swap() as usize,
        #[cfg(target_os = "linux")]
        users: get_logged_in_users().unwrap_or_default(),
        #[cfg(target_os = "linux")]
        scaling_governor: get_scaling_governor().unwrap_or_default(),
    }
});

/// Identity of one `libcbench run` invocation.
#[derive(Debug)]
pub struct RunInfo {
    pub runid: String,
    pub profile: String,
    pub start_time: DateTime<Local>,
    pub system: SystemInfo,
}

impl RunInfo {
    pub fn new(profile: &str) -> Self {
        let start_time = Local::now();
        Self {
            runid: Self::runid(profile, &SYSTEM_INFO.host, start_time),
            profile: profile.to_owned(),
            start_time,
            system: SYSTEM_INFO.clone(),
        }
    }

    fn runid(profile: &str, host: &str, t: DateTime<Local>) -> String {
        let time = t.format("%Y-%m-%d-%a-%H%M%S").to_string();
        format!("{}-{}-{}", profile, host, time)
    }

    fn header(&self) -> String {
        let to_gb = |x: usize| format!("{:.1}GB", x as f64 / 1024.0 / 1024.0 / 1024.0);
        let sys = &self.system;
        format!(
            "# {}\n\n* profile: `{}`\n* start: {}\n* host: `{}`\n* os: `{}` ({}, kernel `{}`)\n* cpu: `{}` x {}\n* memory: {} (swap {})\n\n",
            self.runid,
            self.profile,
            self.start_time.format("%Y-%m-%d %H:%M:%S"),
            sys.host,
            sys.os,
            sys.arch,
            sys.kernel,
            sys.cpu_model,
            sys.cpus,
            to_gb(sys.memory_size),
            to_gb(sys.swap_size),
        )
    }

    pub fn print_header(&self) {
        print_md!("{}", self.header());
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn runid_joins_profile_host_and_time() {
        let t = Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(
            RunInfo::runid("quick", "box", t),
            "quick-box-2024-03-01-Fri-090507"
        );
    }

    #[test]
    fn header_lists_the_host() {
        let run = RunInfo {
            runid: "quick-box-t".to_owned(),
            profile: "quick".to_owned(),
            start_time: Local.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap(),
            system: SystemInfo {
                host: "box".to_owned(),
                os: "Linux 6.1".to_owned(),
                arch: "x86_64".to_owned(),
                kernel: "6.1.0-18".to_owned(),
                cpu_model: "Xeon".to_owned(),
                cpus: 8,
                memory_size: 16 << 30,
                swap_size: 2 << 30,
                #[cfg(target_os = "linux")]
                users: vec![],
                #[cfg(target_os = "linux")]
                scaling_governor: vec![],
            },
        };
        let header = run.header();
        assert!(header.starts_with("# quick-box-t\n"));
        assert!(header.contains("* os: `Linux 6.1` (x86_64, kernel `6.1.0-18`)"));
        assert!(header.contains("* cpu: `Xeon` x 8"));
        assert!(header.contains("* memory: 16.0GB (swap 2.0GB)"));
    }
}

//! Host identity and UTC offset
//!
//! Every field is sampled on demand; anything the platform cannot report
//! is left as `None`.

use chrono::{Local, Offset};
use sysinfo::{MacAddr, Networks, System};
use t3tracker_core::SystemInfoProvider;
use t3tracker_domain::SystemSnapshot;
use tracing::debug;

const HOSTS_FILE: &str = "/etc/hosts";
const RESOLV_CONF: &str = "/etc/resolv.conf";

/// [`SystemInfoProvider`] for the machine the process runs on
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSystemInfo;

impl HostSystemInfo {
    pub fn new() -> Self {
        Self
    }
}

impl SystemInfoProvider for HostSystemInfo {
    fn snapshot(&self) -> SystemSnapshot {
        let computer = System::host_name();
        let domain = domain_name(computer.as_deref());

        let snapshot = SystemSnapshot {
            user: login_name(),
            domain,
            os: os_family().map(str::to_string),
            os_version: System::kernel_version(),
            hwid: hardware_id(),
            computer,
        };
        debug!(?snapshot, "Sampled host identity");
        snapshot
    }

    fn timezone_offset_millis(&self) -> i64 {
        offset_millis_west(Local::now().offset().fix().local_minus_utc())
    }
}

/// Convert a local-minus-UTC offset in seconds to milliseconds, positive
/// west of UTC.
fn offset_millis_west(local_minus_utc_secs: i32) -> i64 {
    -i64::from(local_minus_utc_secs) * 1_000
}

fn login_name() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
}

fn domain_name(host_name: Option<&str>) -> Option<String> {
    if cfg!(windows) {
        return std::env::var("USERDOMAIN").ok().filter(|v| !v.is_empty());
    }
    host_name.and_then(fully_qualified).and_then(|fqdn| domain_suffix(&fqdn))
}

/// Resolve a short host name from the resolver's local files.
///
/// A name that already has a dot is returned as is. Otherwise the first
/// `/etc/hosts` alias of the form `<host>.<domain>` wins, then the
/// `domain` (or first `search`) entry of `/etc/resolv.conf`.
fn fully_qualified(host_name: &str) -> Option<String> {
    if host_name.contains('.') {
        return Some(host_name.to_string());
    }

    let from_hosts = std::fs::read_to_string(HOSTS_FILE)
        .ok()
        .and_then(|hosts| fqdn_from_hosts(&hosts, host_name));

    from_hosts.or_else(|| {
        std::fs::read_to_string(RESOLV_CONF)
            .ok()
            .and_then(|conf| resolver_domain(&conf))
            .map(|domain| format!("{host_name}.{domain}"))
    })
}

fn fqdn_from_hosts(hosts: &str, host_name: &str) -> Option<String> {
    let prefix = format!("{}.", host_name.to_lowercase());

    hosts.lines().find_map(|line| {
        let entry = line.split('#').next().unwrap_or_default();
        let names: Vec<&str> = entry.split_whitespace().skip(1).collect();

        let lists_host = names.iter().any(|name| name.eq_ignore_ascii_case(host_name));
        if !lists_host {
            return None;
        }
        names
            .iter()
            .find(|name| name.to_lowercase().starts_with(&prefix))
            .map(|name| name.trim_end_matches('.').to_string())
    })
}

fn resolver_domain(conf: &str) -> Option<String> {
    let mut search = None;

    for line in conf.lines() {
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("domain"), Some(domain)) => return Some(domain.trim_end_matches('.').to_string()),
            (Some("search"), Some(first)) if search.is_none() => {
                search = Some(first.trim_end_matches('.').to_string());
            }
            _ => {}
        }
    }
    search
}

/// Everything after the first label of a fully qualified host name.
fn domain_suffix(host_name: &str) -> Option<String> {
    host_name
        .trim_end_matches('.')
        .split_once('.')
        .map(|(_, domain)| domain.to_string())
        .filter(|domain| !domain.is_empty())
}

fn os_family() -> Option<&'static str> {
    match std::env::consts::OS {
        "linux" => Some("Linux"),
        "macos" => Some("Darwin"),
        "windows" => Some("Windows"),
        "freebsd" => Some("FreeBSD"),
        "" => None,
        other => Some(other),
    }
}

/// Hex-encoded MAC of the first interface (by name) with a real address.
fn hardware_id() -> Option<String> {
    let networks = Networks::new_with_refreshed_list();

    let mut candidates: Vec<(&String, MacAddr)> = networks
        .list()
        .iter()
        .map(|(name, data)| (name, data.mac_address()))
        .filter(|(_, mac)| !mac.is_unspecified())
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(b.0));

    candidates.first().map(|(_, mac)| format_hwid(mac.0))
}

fn format_hwid(mac: [u8; 6]) -> String {
    let value = mac.iter().fold(0_u64, |acc, byte| (acc << 8) | u64::from(*byte));
    format!("{value:#x}")
}

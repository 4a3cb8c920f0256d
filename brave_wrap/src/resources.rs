use anyhow::{Context, Result};
use log::warn;
use serde::Serialize;
use std::path::Path;

const MEMINFO: &str = "/proc/meminfo";

/// CPU and memory of the host, handed to the engine as resource limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HostResources {
    pub cores: usize,
    pub mem_gb: usize,
}

impl HostResources {
    /// Read the logical CPU count and the available memory of this host.
    /// Memory that cannot be read falls back to the default in parameters.toml.
    pub fn probe() -> Result<HostResources> {
        HostResources::probe_with(Path::new(MEMINFO))
    }

    fn probe_with(meminfo: &Path) -> Result<HostResources> {
        let cores = num_cpus::get();
        let mem_gb = match read_mem_available_gb(meminfo) {
            Ok(mem_gb) => mem_gb,
            Err(err) => {
                let mem_gb = *parameters_toml::default_mem_gb()?;
                warn!("unable to read available memory ({err:#}), assuming {mem_gb} GB");
                mem_gb
            }
        };
        Ok(HostResources { cores, mem_gb })
    }
}

/// `MemAvailable` of a meminfo file in whole GB, at least 1.
fn read_mem_available_gb(meminfo: &Path) -> Result<usize> {
    let contents = std::fs::read_to_string(meminfo)
        .with_context(|| meminfo.display().to_string())?;
    parse_mem_available_gb(&contents)
        .with_context(|| format!("no MemAvailable entry in {}", meminfo.display()))
}

fn parse_mem_available_gb(meminfo: &str) -> Option<usize> {
    let kb: usize = meminfo
        .lines()
        .find_map(|line| line.strip_prefix("MemAvailable:"))?
        .trim()
        .strip_suffix("kB")?
        .trim()
        .parse()
        .ok()?;
    Some((kb / (1024 * 1024)).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MEMINFO_SAMPLE: &str = "\
MemTotal:       32594908 kB
MemFree:         1203716 kB
MemAvailable:   16304256 kB
Buffers:          405232 kB
";

    #[test]
    fn test_parse_mem_available() {
        assert_eq!(parse_mem_available_gb(MEMINFO_SAMPLE), Some(15));
        assert_eq!(parse_mem_available_gb("MemAvailable:  1024 kB\n"), Some(1));
        assert_eq!(parse_mem_available_gb("MemTotal: 1024 kB\n"), None);
        assert_eq!(parse_mem_available_gb("MemAvailable: lots kB\n"), None);
    }

    #[test]
    fn test_read_mem_available() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("meminfo");
        std::fs::write(&path, MEMINFO_SAMPLE)?;
        assert_eq!(read_mem_available_gb(&path)?, 15);
        assert!(read_mem_available_gb(&dir.path().join("absent")).is_err());
        Ok(())
    }

    #[test]
    fn test_probe() -> Result<()> {
        let host = HostResources::probe()?;
        assert!(host.cores >= 1);
        assert!(host.mem_gb >= 1);
        Ok(())
    }

    #[test]
    fn test_probe_memory_fallback() -> Result<()> {
        let dir = tempdir()?;
        let host = HostResources::probe_with(&dir.path().join("absent"))?;
        assert_eq!(host.mem_gb, *parameters_toml::default_mem_gb()?);
        assert_eq!(host.cores, num_cpus::get());

        let meminfo = dir.path().join("meminfo");
        std::fs::write(&meminfo, MEMINFO_SAMPLE)?;
        assert_eq!(HostResources::probe_with(&meminfo)?.mem_gb, 15);
        Ok(())
    }
}

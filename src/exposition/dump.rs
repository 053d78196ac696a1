use crate::{collector::Collector, error::MonitorError, lease::Lease};
use std::io::Write;

/// Renders leases as a YAML sequence. No leases render as `[]`.
pub fn render(leases: &[Lease]) -> Result<String, MonitorError> {
    serde_yaml::to_string(leases).map_err(MonitorError::Encode)
}

/// Runs one collection pass and writes the YAML dump to `out`.
pub async fn run<W: Write>(collector: &Collector, mut out: W) -> Result<(), MonitorError> {
    let leases = collector.collect().await;
    let rendered = render(&leases)?;
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}

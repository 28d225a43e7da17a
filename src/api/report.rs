//! One-shot terminal output for the CLI subcommands

use anyhow::Result;

use super::{HttpMetricsClient, Process, SystemMetrics};
use crate::core::history::{Health, Resource};
use crate::ui::format::{
    format_bytes, format_count, format_gb, format_optional_percent, format_percent,
    truncate_to_width,
};

pub async fn print_snapshot(client: &HttpMetricsClient) -> Result<()> {
    let metrics = client.metrics().await?;
    print!("{}", snapshot_summary(&metrics));
    Ok(())
}

pub async fn print_processes(client: &HttpMetricsClient) -> Result<()> {
    let processes = client.processes().await?;
    if processes.is_empty() {
        println!("No processes data available");
        return Ok(());
    }
    print!("{}", process_table(&processes));
    Ok(())
}

pub async fn print_health(client: &HttpMetricsClient) -> Result<()> {
    let health = client.health().await?;
    println!("{}", serde_json::to_string_pretty(&health)?);
    Ok(())
}

pub async fn print_network(client: &HttpMetricsClient) -> Result<()> {
    let stats = client.network_stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn usage_line(label: &str, resource: Resource, usage: f64, detail: String) -> String {
    format!(
        "{:<10} {:>7}  {:<8} {}\n",
        label,
        format_percent(usage),
        Health::classify(resource, usage).label(),
        detail
    )
}

pub fn snapshot_summary(metrics: &SystemMetrics) -> String {
    let sys = &metrics.system;
    let mut out = format!("{} ({}, {})\n", sys.hostname, sys.os, sys.architecture);
    out.push_str(&"-".repeat(60));
    out.push('\n');

    out.push_str(&usage_line(
        "CPU",
        Resource::Cpu,
        metrics.cpu.usage,
        format!("{} cores", metrics.cpu.count),
    ));
    out.push_str(&usage_line(
        "Memory",
        Resource::Memory,
        metrics.memory.usage,
        format!(
            "{} / {}",
            format_gb(metrics.memory.used),
            format_gb(metrics.memory.total)
        ),
    ));
    out.push_str(&usage_line(
        "Disk",
        Resource::Disk,
        metrics.disk.usage,
        format!(
            "{} / {}",
            format_gb(metrics.disk.used),
            format_gb(metrics.disk.total)
        ),
    ));

    out.push_str(&format!(
        "{:<10} ↑ {}  ↓ {}\n",
        "Network",
        format_bytes(metrics.network.bytes_sent),
        format_bytes(metrics.network.bytes_recv)
    ));
    out.push_str(&format!(
        "{:<10} {:.2} {:.2} {:.2}\n",
        "Load", sys.load_average[0], sys.load_average[1], sys.load_average[2]
    ));
    out.push_str(&format!(
        "{:<10} {}   up {}\n",
        "Processes",
        format_count(u64::from(sys.processes)),
        sys.uptime
    ));
    out
}

pub fn process_table(processes: &[Process]) -> String {
    let mut out = format!(
        "{:<8} {:<30} {:>8} {:>8} STATUS\n",
        "PID", "NAME", "CPU", "MEM"
    );
    out.push_str(&"-".repeat(70));
    out.push('\n');

    for process in processes {
        out.push_str(&format!(
            "{:<8} {:<30} {:>8} {:>8} {}\n",
            process.pid,
            truncate_to_width(process.display_name(), 28),
            format_optional_percent(process.cpu_percent),
            format_optional_percent(process.memory_percent),
            process.display_status()
        ));
    }
    out
}

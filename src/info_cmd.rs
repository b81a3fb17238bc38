//! Info command: summarise the contents of a solver output file.

use std::fs::File;

use anyhow::{Context, Result};
use tracing::info_span;

use naiad_output::OutputReader;

use crate::cli::InfoArgs;

/// Print the network shape, reporting range, and leading element IDs.
pub fn run(args: InfoArgs) -> Result<()> {
    let _cmd = info_span!("info").entered();

    let file = File::open(&args.file)
        .with_context(|| format!("failed to open output file: {}", args.file.display()))?;
    let mut reader = OutputReader::open(file)
        .with_context(|| format!("failed to decode output file: {}", args.file.display()))?;

    let counts = reader.counts();
    println!("{}", args.file.display());
    println!("  nodes:             {}", counts.nodes);
    println!("  tanks:             {}", counts.tanks);
    println!("  links:             {}", counts.links);
    println!("  pumps:             {}", counts.pumps);
    println!("  valves:            {}", counts.valves);
    println!("  reporting periods: {}", reader.period_count());
    println!("  report start:      {} s", reader.report_start());
    println!("  report step:       {} s", reader.report_step());

    if args.ids > 0 {
        let node_ids = reader.node_ids().context("failed to read node ID table")?;
        let link_ids = reader.link_ids().context("failed to read link ID table")?;
        print_ids("node IDs", &node_ids, args.ids);
        print_ids("link IDs", &link_ids, args.ids);
    }

    Ok(())
}

fn print_ids(label: &str, ids: &[String], limit: usize) {
    if ids.is_empty() {
        println!("  {label}:          (none)");
        return;
    }
    let shown = ids.len().min(limit);
    println!("  {label}:          {}", ids[..shown].join(", "));
    if ids.len() > shown {
        println!("                     ... and {} more", ids.len() - shown);
    }
}

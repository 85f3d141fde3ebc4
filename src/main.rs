//! PortShield Core - Demo Driver
//!
//! Minimal stand-in for the dashboard frontend: loads the seed catalog,
//! prints the device list with RAG statuses and runs an attack vector
//! analysis. Map rendering and interaction live in the real frontend.

use std::process;

use portshield_core::config::CoreConfig;
use portshield_core::constants;
use portshield_core::logic::attack::AttackVectorAnalyzer;
use portshield_core::logic::device::loader;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting {} Core v{}...",
        constants::APP_NAME,
        constants::APP_VERSION
    );

    let config = CoreConfig::from_env();

    let seed_path = std::env::args()
        .nth(1)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| config.seed_data_path.clone());

    let mut catalog = match loader::load_from_file(&seed_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Failed to load device catalog: {}", e);
            process::exit(1);
        }
    };
    catalog.classify_all();

    println!("\n=== Device List ===");
    for device in &catalog {
        println!(
            "  [{:<5}] {:<24} {:<30} score {:.1}",
            device.status().as_str(),
            device.name,
            device.device_type,
            device.vuln_score
        );
    }

    let stats = catalog.stats();
    println!(
        "\n{} devices - {} RED / {} AMBER / {} GREEN - avg score {:.1}",
        stats.total, stats.red, stats.amber, stats.green, stats.avg_vuln_score
    );

    let analyzer = AttackVectorAnalyzer::from_config(&config);
    let report = analyzer.analyze(&catalog);

    println!("\n=== Attack Vector Analysis ===");
    println!(
        "Overall risk {}/10 - {} high-vulnerability device(s) - rationale: {}",
        report.risk_score, report.high_vuln_count, report.rationale_source
    );

    match &report.suggestion {
        Some(suggestion) => println!("\n{}", suggestion.rationale),
        None => println!("\nNo devices available for attack vector analysis."),
    }

    if let Err(e) = AttackVectorAnalyzer::save_report(&report, &config.analysis_dir) {
        log::warn!("Could not save analysis: {}", e);
    }
}

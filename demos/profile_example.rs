// ==============================================================================
// profile_example.rs - Lipid Profile Walkthrough
// ==============================================================================
// Description: Demonstrates category scoring, phenotype classification and
//              diet ranking for a few hand-built genotype maps
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-19
// Version: 1.0.0
// ==============================================================================

use lipid_profiler::{
    Analyte, DietKey, DisplayUnit, GenotypeMap, Interpreter, LipidProfiler,
};

fn genotypes(calls: &[(&str, &str)]) -> GenotypeMap {
    calls
        .iter()
        .map(|(id, gt)| (id.to_string(), gt.to_string()))
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Lipid Profile Example ===\n");

    let profiler = LipidProfiler::builtin();

    // Example 1: Single variant interpretation
    println!("--- Example 1: Variant Interpretation ---\n");
    let interpreter = Interpreter::new(profiler.registry());
    let calls = vec![
        ("rs429358", Some("CT")),
        ("rs7412", Some("CT")),
        ("rs11591147", Some("GG")),
        ("rs964184", None),
        ("rs0000001", Some("AA")),
    ];

    println!("{:<12} {:<10} {:<12} {:<8} {}", "Variant", "Genotype", "Status", "Weight", "Color");
    println!("{:-<60}", "");
    for (id, genotype) in calls {
        let result = interpreter.interpret(id, genotype);
        println!(
            "{:<12} {:<10} {:<12} {:<8} {}",
            id,
            genotype.unwrap_or("--"),
            result.status.as_str(),
            result.weight,
            result.color.as_str()
        );
    }

    // Example 2: Full profiles
    println!("\n--- Example 2: Diet Ranking Per Profile ---");

    let profiles = vec![
        ("No calls", GenotypeMap::new()),
        (
            "APOE4 carrier, no PCSK9 loss-of-function",
            genotypes(&[("rs429358", "CT"), ("rs11591147", "GG")]),
        ),
        (
            "Triglyceride and insulin risk",
            genotypes(&[("rs964184", "GG"), ("rs662799", "AG"), ("rs7903146", "TT")]),
        ),
        ("PCSK9 D374Y carrier", genotypes(&[("rs137852912", "GT")])),
    ];

    for (name, map) in &profiles {
        let analysis = profiler.analyze(map, DietKey::Ketogenic);
        let phenotype = &analysis.phenotype;

        println!("\n{}", name);
        println!(
            "  Monogenic screen: {}  Polygenic: {}  Hyper-absorber: {}",
            if phenotype.monogenic_screen_positive() { "POSITIVE" } else { "negative" },
            phenotype.polygenic_class(),
            if phenotype.is_hyper_absorber() { "yes" } else { "no" }
        );
        for flag in &phenotype.secondary_flags {
            println!("  Flag: {}", flag.label);
        }

        println!("  {:<4} {:<36} {:<8} {:<14} {:<14} {}", "#", "Diet", "Score", "LDL", "HDL", "TG");
        for (rank, entry) in analysis.ranking.iter().enumerate() {
            println!(
                "  {:<4} {:<36} {:<8.3} {:<14} {:<14} {}",
                rank + 1,
                entry.label,
                entry.score,
                DisplayUnit::MgDl.format(Analyte::Ldl, entry.prediction.ldl),
                DisplayUnit::MgDl.format(Analyte::Hdl, entry.prediction.hdl),
                DisplayUnit::MgDl.format(Analyte::Tg, entry.prediction.tg)
            );
        }

        if let Some(explanation) = analysis.active_explanation() {
            for caution in &explanation.cautions {
                println!("  Ketogenic caution: {}", caution);
            }
        }
    }

    println!("\nNot a clinical diagnostic. Discuss results with a clinician.");
    Ok(())
}

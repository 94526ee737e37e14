//! Invariants checked over generated structure strings
//!
//! Strings come from a seeded RNG so failures reproduce.

mod common;

use common::{random_structure, records};
use ipuseg::structure::{number_markers, strip_numbering, Structure};
use ipuseg::{AnnotationRecord, PipelineConfig, SegmentationPipeline};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

const CASES: usize = 500;

fn generated(seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..CASES)
        .map(|_| {
            let len = rng.gen_range(1..60);
            random_structure(&mut rng, len)
        })
        .collect()
}

#[test]
fn numbering_round_trips() {
    for structure in generated(1) {
        let numbered = number_markers(&structure);
        assert_eq!(strip_numbering(numbered.as_str()), structure);
    }
}

#[test]
fn numbering_suffixes_are_contiguous() {
    for structure in generated(2) {
        let numbered = number_markers(&structure);
        let count = structure.matches('s').count();
        assert_eq!(numbered.segment_count(), count);

        let suffixes: Vec<usize> = numbered
            .as_str()
            .split(|c: char| c == 's' || c == 'p')
            .filter(|piece| !piece.is_empty())
            .map(|piece| piece.parse().unwrap())
            .collect();
        assert_eq!(suffixes, (1..=count).collect::<Vec<_>>(), "for {}", structure);
    }
}

#[test]
fn segment_markers_are_conserved() {
    let pipeline = SegmentationPipeline::default();
    for structure in generated(3) {
        let outcome = pipeline.process_record(&AnnotationRecord::new("subj_sess", structure.as_str()));
        let expected = Structure::parse(&structure)
            .map(|s| s.segment_count())
            .unwrap_or(0);
        assert_eq!(outcome.rows.len(), expected, "for {}", structure);
    }
}

#[test]
fn ipu_indices_cover_one_to_n_per_file() {
    let structures = generated(4);
    let input: Vec<AnnotationRecord> = structures
        .iter()
        .enumerate()
        .map(|(i, s)| AnnotationRecord::new(format!("subj{}_sess1_task", i), s.as_str()))
        .collect();

    let output = SegmentationPipeline::default().run(&input);

    let mut per_file: HashMap<&str, Vec<usize>> = HashMap::new();
    for row in &output.rows {
        per_file.entry(row.file.as_str()).or_default().push(row.ipu_index);
    }
    for (file, indices) in per_file {
        let n = indices.len();
        assert_eq!(indices, (1..=n).collect::<Vec<_>>(), "for {}", file);
    }
}

#[test]
fn identifiers_unique_for_distinct_prefixes() {
    let structures = generated(5);
    let input: Vec<AnnotationRecord> = structures
        .iter()
        .enumerate()
        .map(|(i, s)| AnnotationRecord::new(format!("subj{}_sess{}", i, i % 3), s.as_str()))
        .collect();

    let output = SegmentationPipeline::default().run(&input);

    let ids: HashSet<&str> = output.rows.iter().map(|r| r.id.as_str()).collect();
    let ipu_ids: HashSet<&str> = output.rows.iter().map(|r| r.id_ipu.as_str()).collect();
    assert_eq!(ids.len(), output.rows.len());
    assert_eq!(ipu_ids.len(), output.rows.len());
    assert!(output.diagnostics.iter().all(|d| d.kind != ipuseg::DiagnosticKind::DuplicateIdentifier));
}

#[test]
fn parallel_and_sequential_runs_agree() {
    let structures = generated(6);
    let pairs: Vec<(String, &str)> = structures
        .iter()
        .enumerate()
        .map(|(i, s)| (format!("subj{}_sess1", i), s.as_str()))
        .collect();
    let borrowed: Vec<(&str, &str)> = pairs.iter().map(|(f, s)| (f.as_str(), *s)).collect();
    let input = records(&borrowed);

    let sequential = SegmentationPipeline::default().run(&input);
    let parallel = SegmentationPipeline::new(PipelineConfig::new().with_parallel(true)).run(&input);

    assert_eq!(sequential, parallel);
}

#[test]
fn runs_are_deterministic() {
    let input = records(&[("a_b", "sspsps"), ("c_d", "ppss"), ("e", "s"), ("f_g", "")]);
    let pipeline = SegmentationPipeline::default();
    assert_eq!(pipeline.run(&input), pipeline.run(&input));
}

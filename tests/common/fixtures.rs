//! Test fixtures

use ipuseg::AnnotationRecord;
use rand::rngs::StdRng;
use rand::Rng;
use std::path::{Path, PathBuf};

/// Build records from `(file, structure)` pairs.
pub fn records(pairs: &[(&str, &str)]) -> Vec<AnnotationRecord> {
    pairs
        .iter()
        .map(|(file, structure)| AnnotationRecord::new(*file, *structure))
        .collect()
}

/// A random string over `{s, p}` of the given length.
///
/// Segment markers are drawn more often than boundaries, as in real
/// annotations, but runs of `p` still occur.
pub fn random_structure(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| if rng.gen_bool(0.7) { 's' } else { 'p' })
        .collect()
}

/// Input table exercising every outcome: valid, empty, foreign marker,
/// phrase-only, and malformed file key. Includes an unnamed index column.
pub fn sample_table_csv() -> &'static str {
    ",file,structure\n\
     0,subj1_sess1_task,ssssps\n\
     1,subj2_sess1_task,spspsps\n\
     2,subj3_sess1_task,\n\
     3,subj4_sess1_task,ssxp\n\
     4,subj5_sess1_task,ppp\n\
     5,onlyonepart,sps\n\
     6,subj6_sess2_task,psspps\n"
}

/// Write `contents` to `name` inside `dir`, returning the path.
pub fn write_table(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write fixture table");
    path
}

use crate::pending::PendingFile;

/// File extensions the backend can ingest.
pub const SUPPORTED_FORMATS: [&str; 14] = [
    "pdf", "doc", "docx", "xls", "xlsx", "csv", "txt", "md", "markdown", "html", "htm", "xml",
    "ppt", "pptx",
];

/// Per-file byte ceiling (15 MiB).
pub const MAX_FILE_BYTES: u64 = 15 * 1024 * 1024;

/// Maximum number of accepted files across a whole selection.
pub const MAX_BATCH_FILES: usize = 5;

/// Why a candidate file (or batch) was turned away.
///
/// Each value renders the user-facing notification text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("{file}: unsupported format")]
    UnsupportedFormat { file: String },
    #[error("{file}: file size exceeds the 15 MB limit")]
    OversizedFile { file: String },
    #[error("at most 5 files are allowed per batch")]
    BatchLimit,
}

/// Result of offering a candidate batch to the validator.
#[derive(Debug, Default)]
pub struct AdmissionOutcome {
    pub admitted: Vec<PendingFile>,
    pub rejections: Vec<Rejection>,
}

/// Validate a candidate batch against the running accepted set.
///
/// Pure: callers merge `admitted` into their own state and surface each
/// rejection independently. Rules are checked per file and every violation
/// is reported, not just the first. The batch cap yields a single
/// batch-level rejection; admission stops once `already_accepted` plus the
/// newly admitted files reach [`MAX_BATCH_FILES`], preserving candidate
/// order. Offering zero candidates is a no-op even when the accepted set is
/// already full. Names are not deduplicated.
pub fn admit(already_accepted: usize, candidates: Vec<PendingFile>) -> AdmissionOutcome {
    let mut outcome = AdmissionOutcome::default();
    if candidates.is_empty() {
        return outcome;
    }

    if already_accepted + candidates.len() > MAX_BATCH_FILES {
        outcome.rejections.push(Rejection::BatchLimit);
    }

    let mut total = already_accepted;
    for file in candidates {
        let mut valid = true;

        match file.extension() {
            Some(ext) if SUPPORTED_FORMATS.contains(&ext.as_str()) => {}
            _ => {
                outcome.rejections.push(Rejection::UnsupportedFormat {
                    file: file.name.clone(),
                });
                valid = false;
            }
        }

        if file.size > MAX_FILE_BYTES {
            outcome.rejections.push(Rejection::OversizedFile {
                file: file.name.clone(),
            });
            valid = false;
        }

        if valid && total < MAX_BATCH_FILES {
            total += 1;
            outcome.admitted.push(file);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn file(name: &str, size: u64) -> PendingFile {
        PendingFile {
            name: name.to_string(),
            size,
            path: PathBuf::from(name),
        }
    }

    #[test]
    fn unsupported_format_is_rejected_regardless_of_size() {
        let outcome = admit(0, vec![file("report.exe", 1024 * 1024)]);
        assert!(outcome.admitted.is_empty());
        assert_eq!(
            outcome.rejections,
            vec![Rejection::UnsupportedFormat {
                file: "report.exe".to_string()
            }]
        );
    }

    #[test]
    fn oversized_file_is_rejected_regardless_of_extension() {
        let outcome = admit(0, vec![file("report.pdf", 20 * 1024 * 1024)]);
        assert!(outcome.admitted.is_empty());
        assert_eq!(
            outcome.rejections,
            vec![Rejection::OversizedFile {
                file: "report.pdf".to_string()
            }]
        );
    }

    #[test]
    fn every_violated_rule_is_reported_for_one_file() {
        let outcome = admit(0, vec![file("dump.bin", 20 * 1024 * 1024)]);
        assert_eq!(outcome.rejections.len(), 2);
    }

    #[test]
    fn boundary_size_is_admitted() {
        let outcome = admit(0, vec![file("exact.pdf", MAX_FILE_BYTES)]);
        assert_eq!(outcome.admitted.len(), 1);
        assert!(outcome.rejections.is_empty());
    }

    #[test]
    fn batch_of_six_admits_five_in_order_with_one_batch_rejection() {
        let candidates: Vec<_> = (0..6).map(|i| file(&format!("doc{i}.txt"), 10)).collect();
        let outcome = admit(0, candidates);
        assert_eq!(outcome.admitted.len(), 5);
        let names: Vec<_> = outcome.admitted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["doc0.txt", "doc1.txt", "doc2.txt", "doc3.txt", "doc4.txt"]);
        assert_eq!(outcome.rejections, vec![Rejection::BatchLimit]);
    }

    #[test]
    fn cap_counts_files_accepted_earlier() {
        let outcome = admit(4, vec![file("a.txt", 1), file("b.txt", 1)]);
        assert_eq!(outcome.admitted.len(), 1);
        assert_eq!(outcome.admitted[0].name, "a.txt");
        assert_eq!(outcome.rejections, vec![Rejection::BatchLimit]);
    }

    #[test]
    fn empty_candidate_batch_is_a_noop_even_when_full() {
        let outcome = admit(MAX_BATCH_FILES, Vec::new());
        assert!(outcome.admitted.is_empty());
        assert!(outcome.rejections.is_empty());
    }

    #[test]
    fn duplicate_names_are_both_retained() {
        let outcome = admit(0, vec![file("same.md", 1), file("same.md", 2)]);
        assert_eq!(outcome.admitted.len(), 2);
    }

    #[test]
    fn case_insensitive_extension_match() {
        let outcome = admit(0, vec![file("SLIDES.PPTX", 1)]);
        assert_eq!(outcome.admitted.len(), 1);
    }

    #[test]
    fn invalid_files_do_not_consume_cap_slots() {
        let mut candidates = vec![file("bad.exe", 1)];
        candidates.extend((0..5).map(|i| file(&format!("ok{i}.txt"), 1)));
        let outcome = admit(0, candidates);
        // six offered: the invalid one is rejected, the five valid ones fit
        assert_eq!(outcome.admitted.len(), 5);
        assert!(outcome.rejections.contains(&Rejection::BatchLimit));
        assert!(outcome.rejections.contains(&Rejection::UnsupportedFormat {
            file: "bad.exe".to_string()
        }));
    }
}

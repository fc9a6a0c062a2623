//! Output layout for batch runs.
//!
//! Artifacts land under `<base>/<YYYY-MM-DD>/`, one PDF and one DOCX per
//! patient, named `<sanitized patient name>_<run stamp>.<ext>`. The run stamp
//! is shared by every artifact of one batch so a day's runs stay grouped;
//! records whose names collide after sanitizing get a positional suffix.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Create (if needed) and return today's output directory under `base`.
pub fn dated_output_dir(base: &Path) -> std::io::Result<PathBuf> {
    let dir = base.join(Local::now().format("%Y-%m-%d").to_string());
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Timestamp shared by all artifacts of one batch run.
pub fn run_stamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Reduce a patient name to a safe file stem. Alphanumerics and hyphens are
/// kept, whitespace becomes underscores, everything else is dropped.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_alphanumeric() || c == '-' {
            out.push(c);
        } else if c.is_whitespace() || c == '_' {
            if !out.ends_with('_') {
                out.push('_');
            }
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "patient".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File stem for one patient's artifacts.
pub fn artifact_stem(patient_name: &str, stamp: &str) -> String {
    format!("{}_{stamp}", sanitize_filename(patient_name))
}

/// One stem per name, disambiguated within the run. Two records that
/// sanitize to the same stem would otherwise overwrite each other's
/// artifacts, so repeats get a positional suffix.
pub fn unique_stems(names: &[&str], stamp: &str) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    names
        .iter()
        .map(|name| {
            let stem = artifact_stem(name, stamp);
            let count = seen.entry(stem.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                stem
            } else {
                format!("{stem}_{count}")
            }
        })
        .collect()
}

/// Write one patient's document pair. Returns the artifact file names.
pub fn write_artifacts(
    dir: &Path,
    stem: &str,
    pdf: &[u8],
    docx: &[u8],
) -> std::io::Result<(String, String)> {
    let pdf_name = format!("{stem}.pdf");
    let docx_name = format!("{stem}.docx");
    fs::write(dir.join(&pdf_name), pdf)?;
    fs::write(dir.join(&docx_name), docx)?;
    Ok((pdf_name, docx_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_names_to_safe_stems() {
        assert_eq!(sanitize_filename("Jane Doe"), "Jane_Doe");
        assert_eq!(sanitize_filename("  Jane   Q. Doe  "), "Jane_Q_Doe");
        assert_eq!(sanitize_filename("O'Brien, Seán"), "OBrien_Seán");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_filename("???"), "patient");
    }

    #[test]
    fn dated_dir_is_created_under_base() {
        let base = tempfile::tempdir().unwrap();
        let dir = dated_output_dir(base.path()).unwrap();
        assert!(dir.is_dir());
        assert!(dir.starts_with(base.path()));
        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        assert_eq!(name.len(), 10);
        assert_eq!(&name[4..5], "-");
    }

    #[test]
    fn writes_document_pair() {
        let base = tempfile::tempdir().unwrap();
        let dir = dated_output_dir(base.path()).unwrap();
        let stem = artifact_stem("Jane Doe", "20260823_120000");
        let (pdf_name, docx_name) = write_artifacts(&dir, &stem, b"%PDF", b"PK").unwrap();
        assert_eq!(pdf_name, "Jane_Doe_20260823_120000.pdf");
        assert_eq!(docx_name, "Jane_Doe_20260823_120000.docx");
        assert_eq!(fs::read(dir.join(&pdf_name)).unwrap(), b"%PDF");
        assert_eq!(fs::read(dir.join(&docx_name)).unwrap(), b"PK");
    }

    #[test]
    fn duplicate_names_get_distinct_stems() {
        let stems = unique_stems(&["Jane Doe", "John Roe", "Jane Doe"], "20260823_120000");
        assert_eq!(
            stems,
            vec![
                "Jane_Doe_20260823_120000",
                "John_Roe_20260823_120000",
                "Jane_Doe_20260823_120000_2",
            ]
        );
    }

    #[test]
    fn names_that_sanitize_alike_also_get_distinct_stems() {
        let stems = unique_stems(&["Jane Doe", "Jane_Doe", "Jane  Doe"], "20260823_120000");
        assert_eq!(stems.len(), 3);
        assert_eq!(
            stems.iter().collect::<std::collections::HashSet<_>>().len(),
            3
        );
    }
}

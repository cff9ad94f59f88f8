//! Upload and bulk import handlers.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{Settings, open_app, open_storage, open_store};
use crate::catalog::invalidate_cache;
use crate::cli::{ImportArgs, UploadArgs};
use crate::domain::{PDF_MIME, RawRecord, RecordId, SelectedFile, Semester, UploadForm};
use crate::store::{RemoteStore, StoreError};

/// Guesses the MIME type of a local file from its magic bytes, then its
/// extension.
pub fn detect_mime(path: &Path) -> Result<String> {
    let mut magic = [0u8; 4];
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let read = file
        .read(&mut magic)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_pdf_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if &magic[..read] == b"%PDF" || is_pdf_ext {
        Ok(PDF_MIME.to_string())
    } else {
        Ok("application/octet-stream".to_string())
    }
}

pub fn handle_upload(args: &UploadArgs, settings: &Settings) -> Result<()> {
    let semester = Semester::new(args.semester)
        .with_context(|| format!("invalid semester: {}", args.semester))?;
    let size = std::fs::metadata(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?
        .len();
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let form = UploadForm {
        title: args.title.clone(),
        description: args.description.clone(),
        author: args.author.clone(),
        category: args.category.clone(),
        semester: Some(semester),
        file: Some(SelectedFile {
            name,
            mime_type: detect_mime(&args.file)?,
            size,
        }),
        file_url: args.url.clone(),
        uploaded_by: args.uploaded_by.clone(),
        uploaded_by_name: None,
    };

    let mut app = open_app(settings)?;
    let record = app.upload(form).context("upload rejected")?;
    println!("Uploaded '{}' ({})", record.title(), record.id());
    Ok(())
}

/// Reads records from a YAML or JSON file, chosen by extension.
pub fn read_import(path: &Path) -> Result<Vec<RawRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML in {}", path.display())),
        "json" => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON in {}", path.display())),
        other => bail!("unsupported import format '{}': use .yaml, .yml or .json", other),
    }
}

pub fn handle_import(args: &ImportArgs, settings: &Settings) -> Result<()> {
    let docs = read_import(&args.file)?;
    let mut store = open_store(&settings.data_dir)?;

    let mut imported = 0;
    let mut skipped = 0;
    for raw in docs {
        let id = raw.id.clone().unwrap_or_else(|| RecordId::generate().to_string());
        let record = match raw.normalize(Some(&id)) {
            Ok(record) => record,
            Err(e) => {
                eprintln!("skipped: {}", e);
                skipped += 1;
                continue;
            }
        };
        match store.add_record(&record) {
            Ok(()) => imported += 1,
            Err(StoreError::Duplicate { id }) => {
                eprintln!("skipped: record {} already exists", id);
                skipped += 1;
            }
            Err(e) => return Err(e).context("failed to import records"),
        }
    }

    if imported > 0 {
        let mut storage = open_storage(&settings.data_dir)?;
        invalidate_cache(&mut storage).context("failed to invalidate catalog cache")?;
    }

    println!("Imported {} record(s), skipped {}", imported, skipped);
    Ok(())
}

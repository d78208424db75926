use std::fs;
use std::io;
use std::path::Path;
use uuid::Uuid;

/// Random filename that keeps the original extension so the static server
/// picks the right content type. Two uploads of the same original name never
/// collide.
pub fn unique_filename(original: &str) -> String {
    match Path::new(original).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    }
}

/// Writes the uploaded bytes under `dir` and returns the generated filename.
pub fn save_upload(dir: &str, original_name: &str, bytes: &[u8]) -> io::Result<String> {
    fs::create_dir_all(dir)?;

    let filename = unique_filename(original_name);
    fs::write(Path::new(dir).join(&filename), bytes)?;

    Ok(filename)
}

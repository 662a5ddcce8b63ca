use crate::models::University;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save the university list as CSV with header (`id,name,website,state,country`).
pub fn save_csv<P: AsRef<Path>>(universities: &[University], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record(["id", "name", "website", "state", "country"])?;
    for u in universities {
        wtr.write_record([&u.id, &u.name, &u.website, &u.state, &u.country])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the university list as a pretty JSON array (same shape the endpoint serves).
pub fn save_json<P: AsRef<Path>>(universities: &[University], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(universities)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

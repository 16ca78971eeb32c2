use std::{
    collections::BTreeSet,
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde_json::Value;

use super::ScrapeError;

/// The JSON-lines files a scrape of one activity writes to.
#[derive(Debug, Clone)]
pub struct ScrapeFiles {
    pub scoreboard: PathBuf,
    pub players: PathBuf,
}

impl ScrapeFiles {
    pub fn new(data_dir: impl AsRef<Path>, activity: &str) -> Self {
        let data_dir = data_dir.as_ref();

        Self {
            scoreboard: data_dir.join("activity").join(format!("{}.json", activity)),
            players: data_dir
                .join("player")
                .join(format!("{}-players.json", activity)),
        }
    }
}

/// Every record in a JSON-lines file. A file that does not exist yet has no records.
pub fn read_records(path: &Path) -> Result<Vec<Value>, ScrapeError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }

    Ok(records)
}

pub fn append_records(path: &Path, records: &[Value]) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    Ok(())
}

/// Highest `page` recorded in the scoreboard, 0 when nothing was scraped yet.
pub fn max_page(scoreboard: &Path) -> Result<i64, ScrapeError> {
    Ok(read_records(scoreboard)?
        .iter()
        .filter_map(|record| record.get("page").and_then(Value::as_i64))
        .max()
        .unwrap_or(0))
}

fn names(records: &[Value]) -> BTreeSet<String> {
    records
        .iter()
        .filter_map(|record| record.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// Names on the scoreboard without a player record yet, sorted and without duplicates.
pub fn pending_players(files: &ScrapeFiles) -> Result<Vec<String>, ScrapeError> {
    let done = names(&read_records(&files.players)?);

    Ok(names(&read_records(&files.scoreboard)?)
        .into_iter()
        .filter(|name| !done.contains(name))
        .collect())
}

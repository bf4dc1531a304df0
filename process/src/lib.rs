//! Offline import pipeline.
//!
//! Reads raw fact dumps (one directory per category, `.txt` files of JSON
//! mapping a number key to a list of facts), normalizes each fact into a
//! fragment/statement pair, and inserts the results into the fact store.
//! Date dump keys are day-ordinals produced by the same calendar codec the
//! API reads them back with.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use store::{Category, FactStore};

pub mod models;
pub mod normalize;

use models::RawDump;
use normalize::{normalize, NormalizedFact};

#[derive(Debug, Default, Clone, Copy)]
pub struct ImportStats {
    pub inserted: u64,
    pub skipped: u64,
}

/// Imports every category directory present under `data_dir`.
pub fn import_all(store: &FactStore, data_dir: &Path) -> Result<ImportStats> {
    let mut total = ImportStats::default();

    for category in Category::ALL {
        let dir = data_dir.join(category.dir_name());
        if !dir.is_dir() {
            println!("No {} directory, skipping", category.dir_name());
            continue;
        }

        let stats = import_directory(store, &dir, category)?;
        println!(
            "Imported {} {} facts ({} skipped)",
            stats.inserted,
            category.dir_name(),
            stats.skipped
        );

        total.inserted += stats.inserted;
        total.skipped += stats.skipped;
    }

    Ok(total)
}

/// Imports every `.txt` dump file in one category directory.
pub fn import_directory(store: &FactStore, dir: &Path, category: Category) -> Result<ImportStats> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    let mut stats = ImportStats::default();

    for file in files {
        pb.set_message(format!("Importing {}", file.display()));

        let text = fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        let dump: RawDump = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", file.display()))?;

        import_dump(store, category, &dump, &mut stats)?;
        pb.inc(1);
    }

    pb.finish_with_message("Done");
    Ok(stats)
}

fn import_dump(
    store: &FactStore,
    category: Category,
    dump: &RawDump,
    stats: &mut ImportStats,
) -> Result<()> {
    let current_year = i64::from(Utc::now().year());

    for (key, facts) in dump {
        let Ok(number) = key.parse::<i64>() else {
            stats.skipped += facts.len() as u64;
            continue;
        };

        for fact in facts {
            match normalize(category, number, fact, current_year) {
                Some(normalized) => {
                    insert(store, category, number, &normalized)?;
                    stats.inserted += 1;
                }
                None => stats.skipped += 1,
            }
        }
    }

    Ok(())
}

fn insert(
    store: &FactStore,
    category: Category,
    number: i64,
    fact: &NormalizedFact,
) -> Result<()> {
    match category {
        Category::Math => {
            store.add_math_fact(number as f64, &fact.fragment, &fact.statement, false)?;
        }
        Category::Trivia => {
            store.add_trivia_fact(number, &fact.fragment, &fact.statement, false)?;
        }
        Category::Years => {
            store.add_year_fact(number, &fact.fragment, &fact.statement, false)?;
        }
        Category::Dates => {
            // Normalization only passes date facts with a year and a valid ordinal.
            let year = fact.year.context("date fact missing year")?;
            store.add_date_fact(number as u16, year, &fact.fragment, &fact.statement, false)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_dump(dir: &Path, category: &str, name: &str, contents: &str) {
        let category_dir = dir.join(category);
        fs::create_dir_all(&category_dir).unwrap();
        fs::write(category_dir.join(name), contents).unwrap();
    }

    #[test]
    fn imports_trivia_dump() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(
            dir.path(),
            "trivia",
            "facts.txt",
            r#"{
                "42": [
                    {"text": "The answer.", "self": false, "pos": "N"},
                    {"text": "A self fact.", "self": true, "pos": "N"}
                ]
            }"#,
        );

        let store = FactStore::in_memory().unwrap();
        let stats = import_all(&store, dir.path()).unwrap();

        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.skipped, 1);

        let fact = store.trivia_fact(42).unwrap().unwrap();
        assert_eq!(fact.fact_fragment, "the answer");
        assert_eq!(fact.fact_statement, "42 is the answer.");
        assert!(!fact.was_submitted);
    }

    #[test]
    fn imports_date_dump_with_ordinal_keys() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(
            dir.path(),
            "dates",
            "facts.txt",
            r#"{
                "60": [
                    {"text": "The test case.", "self": false, "pos": "N", "year": 2000}
                ]
            }"#,
        );

        let store = FactStore::in_memory().unwrap();
        let stats = import_all(&store, dir.path()).unwrap();
        assert_eq!(stats.inserted, 1);

        let fact = store.date_fact(60).unwrap().unwrap();
        assert_eq!(fact.day_of_year, 60);
        assert_eq!(fact.year, 2000);
        assert_eq!(
            fact.fact_statement,
            "February 29th is the day in 2000 that the test case."
        );
    }

    #[test]
    fn skips_unparseable_keys() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(
            dir.path(),
            "years",
            "facts.txt",
            r#"{
                "not-a-number": [
                    {"text": "Should be skipped.", "self": false, "pos": "N"}
                ],
                "1969": [
                    {"text": "The year of the moon landing.", "self": false, "pos": "N"}
                ]
            }"#,
        );

        let store = FactStore::in_memory().unwrap();
        let stats = import_all(&store, dir.path()).unwrap();

        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.skipped, 1);
        assert!(store.year_fact(1969).unwrap().is_some());
    }

    #[test]
    fn missing_category_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = FactStore::in_memory().unwrap();

        let stats = import_all(&store, dir.path()).unwrap();
        assert_eq!(stats.inserted, 0);
    }

    #[test]
    fn non_txt_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_dump(dir.path(), "trivia", "notes.md", "not a dump");
        write_dump(
            dir.path(),
            "trivia",
            "facts.txt",
            r#"{"7": [{"text": "A number.", "self": false, "pos": "N"}]}"#,
        );

        let store = FactStore::in_memory().unwrap();
        let stats = import_all(&store, dir.path()).unwrap();
        assert_eq!(stats.inserted, 1);
    }
}

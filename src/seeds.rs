use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;
use url::Url;

use crate::cli::SeedsArgs;
use crate::formats::{FetchTask, SeedRow};

const URL_COLUMN: &str = "title_list_url";

pub fn run(args: SeedsArgs) -> anyhow::Result<()> {
    let tasks = load_seed_tasks(Path::new(&args.seeds))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for task in &tasks {
        writeln!(out, "{}", task.url).context("write seed url")?;
    }
    out.flush().context("flush stdout")?;

    tracing::info!(count = tasks.len(), "seed urls loaded");
    Ok(())
}

/// Reads the category seed CSV and emits one fetch task per `title_list_url`.
pub fn load_seed_tasks(path: &Path) -> anyhow::Result<Vec<FetchTask>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open seed file: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read seed header: {}", path.display()))?;
    if !headers.iter().any(|name| name.trim() == URL_COLUMN) {
        anyhow::bail!(
            "seed file has no {URL_COLUMN} column: {}",
            path.display()
        );
    }

    let mut tasks = Vec::new();
    for (index, row) in reader.deserialize::<SeedRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = row.with_context(|| format!("read seed row at line {line}"))?;
        let url = Url::parse(row.title_list_url.trim())
            .with_context(|| format!("parse title_list_url at line {line}"))?;
        tasks.push(FetchTask::new(url));
    }

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_seed_file(dir: &Path, contents: &str) -> anyhow::Result<std::path::PathBuf> {
        let path = dir.join("category_hierarchy_n_urls.csv");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn loads_one_task_per_url_in_file_order() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = write_seed_file(
            temp.path(),
            "category,subcategory,title_list_url\n\
             Fiction,Fantasy,https://www.audible.com/cat/fantasy\n\
             Fiction,Horror,https://www.audible.com/cat/horror?page=1\n",
        )?;

        let tasks = load_seed_tasks(&path)?;

        let urls = tasks.iter().map(|t| t.url.as_str()).collect::<Vec<_>>();
        assert_eq!(
            urls,
            vec![
                "https://www.audible.com/cat/fantasy",
                "https://www.audible.com/cat/horror?page=1",
            ]
        );
        Ok(())
    }

    #[test]
    fn missing_url_column_is_an_error() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = write_seed_file(temp.path(), "category,url\nFiction,https://x.test/\n")?;

        let err = load_seed_tasks(&path).unwrap_err();
        assert!(err.to_string().contains("no title_list_url column"));
        Ok(())
    }

    #[test]
    fn header_only_file_without_url_column_is_an_error() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = write_seed_file(temp.path(), "category,url\n")?;

        let err = load_seed_tasks(&path).unwrap_err();
        assert!(err.to_string().contains("no title_list_url column"));
        Ok(())
    }

    #[test]
    fn header_only_file_with_url_column_has_no_tasks() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = write_seed_file(temp.path(), "category,title_list_url\n")?;

        assert!(load_seed_tasks(&path)?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_seed_tasks(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(err.to_string().contains("open seed file"));
    }

    #[test]
    fn relative_url_is_rejected() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let path = write_seed_file(temp.path(), "title_list_url\n/cat/fantasy\n")?;

        let err = load_seed_tasks(&path).unwrap_err();
        assert!(err.to_string().contains("parse title_list_url at line 2"));
        Ok(())
    }
}

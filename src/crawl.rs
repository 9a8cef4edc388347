use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use scraper::Html;
use url::Url;

use crate::cli::CrawlArgs;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::formats::FetchTask;
use crate::listing::{PageItem, parse_listing_page};
use crate::sink::RecordSink;

/// The one origin the crawl may fetch from.
#[derive(Debug, Clone)]
pub struct SiteScope {
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl SiteScope {
    pub fn new(base_url: &Url) -> anyhow::Result<Self> {
        let host = base_url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("base url must have host: {base_url}"))?
            .to_owned();

        Ok(Self {
            scheme: base_url.scheme().to_owned(),
            host,
            port: base_url.port(),
        })
    }

    pub fn contains(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url.host_str() == Some(self.host.as_str())
            && url.port() == self.port
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub chains: usize,
    pub failed_chains: usize,
    pub pages: usize,
    pub records: usize,
    pub skipped_cards: usize,
}

enum ChainFailure {
    /// Fetch or page-structure failure; only this chain stops.
    Chain(anyhow::Error),
    /// The output sink failed; the whole run stops.
    Output(anyhow::Error),
}

pub async fn run(args: CrawlArgs) -> anyhow::Result<()> {
    let base_url = Url::parse(&args.base_url).context("parse --base-url")?;
    if base_url.scheme() != "http" && base_url.scheme() != "https" {
        anyhow::bail!("--base-url must be http/https: {base_url}");
    }

    let seeds = crate::seeds::load_seed_tasks(Path::new(&args.seeds)).context("load seeds")?;
    tracing::info!(count = seeds.len(), seeds = %args.seeds, "loaded seed urls");

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs), &args.user_agent)?;
    let mut sink = crate::sink::create_file_sink(Path::new(&args.out), args.format, args.force)?;

    let summary = crawl_seeds(&fetcher, &base_url, seeds, args.max_pages, sink.as_mut()).await?;
    sink.finish().context("finish output")?;

    tracing::info!(
        chains = summary.chains,
        failed_chains = summary.failed_chains,
        pages = summary.pages,
        records = summary.records,
        skipped_cards = summary.skipped_cards,
        out = %args.out,
        "crawl finished"
    );

    if summary.failed_chains > 0 {
        anyhow::bail!(
            "{} of {} seed chains failed",
            summary.failed_chains,
            summary.chains
        );
    }
    Ok(())
}

/// Follows each seed's listing chain to its last page, one chain after another.
///
/// A failed chain is logged and counted; only sink failures abort the crawl.
pub async fn crawl_seeds(
    fetcher: &dyn Fetcher,
    base_url: &Url,
    seeds: Vec<FetchTask>,
    max_pages: Option<usize>,
    sink: &mut dyn RecordSink,
) -> anyhow::Result<CrawlSummary> {
    let scope = SiteScope::new(base_url).context("build site scope")?;
    let mut summary = CrawlSummary::default();

    for seed in seeds {
        summary.chains += 1;
        let seed_url = seed.url.clone();
        match crawl_chain(fetcher, &scope, base_url, seed, max_pages, sink, &mut summary).await {
            Ok(()) => {}
            Err(ChainFailure::Chain(err)) => {
                summary.failed_chains += 1;
                tracing::error!(seed = %seed_url, "listing chain failed: {err:#}");
            }
            Err(ChainFailure::Output(err)) => return Err(err.context("write output")),
        }
    }

    Ok(summary)
}

async fn crawl_chain(
    fetcher: &dyn Fetcher,
    scope: &SiteScope,
    base_url: &Url,
    seed: FetchTask,
    max_pages: Option<usize>,
    sink: &mut dyn RecordSink,
    summary: &mut CrawlSummary,
) -> Result<(), ChainFailure> {
    let mut pages = 0_usize;
    let mut next = Some(seed);

    while let Some(task) = next.take() {
        if !scope.contains(&task.url) {
            tracing::warn!(url = %task.url, "outside site scope; not fetching");
            break;
        }
        if max_pages.is_some_and(|max| pages >= max) {
            tracing::info!(url = %task.url, pages, "page limit reached; stopping chain");
            break;
        }

        let html = fetcher
            .fetch(&task.url)
            .await
            .with_context(|| format!("fetch {}", task.url))
            .map_err(ChainFailure::Chain)?;
        pages += 1;

        next = process_page(&html, &task.url, base_url, sink, summary)?;
    }

    Ok(())
}

/// Parses one fetched page and hands every record to the sink before the
/// follow-up (if any) is returned.
fn process_page(
    html: &str,
    page_url: &Url,
    base_url: &Url,
    sink: &mut dyn RecordSink,
    summary: &mut CrawlSummary,
) -> Result<Option<FetchTask>, ChainFailure> {
    let document = Html::parse_document(html);
    let page = parse_listing_page(&document, base_url)
        .with_context(|| format!("parse listing page {page_url}"))
        .map_err(ChainFailure::Chain)?;
    let category = page.category().to_owned();

    let mut records = 0_usize;
    let mut next = None;
    for item in page {
        match item {
            Ok(PageItem::Record(record)) => {
                sink.write(&record).map_err(ChainFailure::Output)?;
                records += 1;
            }
            Ok(PageItem::FollowUp(task)) => next = Some(task),
            Err(err) => {
                tracing::warn!(url = %page_url, %err, "skipping card");
                summary.skipped_cards += 1;
            }
        }
    }

    summary.pages += 1;
    summary.records += records;
    tracing::info!(
        url = %page_url,
        %category,
        records,
        has_next = next.is_some(),
        "parsed listing page"
    );

    Ok(next)
}

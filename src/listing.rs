use anyhow::Context as _;
use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::cli::ParseArgs;
use crate::formats::{FetchTask, ListingRecord};
use crate::normalize;
use crate::selectors;
use crate::sink::{JsonlSink, RecordSink as _};

/// A title card that could not be turned into a record.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("card {index} has no detail link")]
    MissingLink { index: usize },
    #[error("card {index} has no title text")]
    MissingTitle { index: usize },
    #[error("card {index} has unresolvable detail link {href:?}")]
    InvalidLink {
        index: usize,
        href: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Record(ListingRecord),
    /// Always the last item, and only when the next button is enabled.
    FollowUp(FetchTask),
}

/// Lazily walks one parsed listing page: a result per card in document order,
/// then at most one follow-up for the next page.
pub struct ListingPage<'a> {
    document: &'a Html,
    base_url: &'a Url,
    category: String,
    cards: Select<'a, 'static>,
    card_index: usize,
    pagination_done: bool,
}

impl ListingPage<'_> {
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl Iterator for ListingPage<'_> {
    type Item = Result<PageItem, CardError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(card) = self.cards.next() {
            let index = self.card_index;
            self.card_index += 1;
            return Some(
                extract_card(card, &self.category, self.base_url, index).map(PageItem::Record),
            );
        }

        if self.pagination_done {
            return None;
        }
        self.pagination_done = true;
        next_page(self.document, self.base_url).map(|task| Ok(PageItem::FollowUp(task)))
    }
}

/// Starts parsing a listing page. Fails if the category heading is missing.
pub fn parse_listing_page<'a>(
    document: &'a Html,
    base_url: &'a Url,
) -> anyhow::Result<ListingPage<'a>> {
    let category = document
        .select(&selectors::CATEGORY_HEADING)
        .find_map(own_text)
        .map(|heading| normalize::category_heading(&heading))
        .ok_or_else(|| anyhow::anyhow!("listing page has no category heading"))?;

    Ok(ListingPage {
        document,
        base_url,
        category,
        cards: document.select(&selectors::CARD),
        card_index: 0,
        pagination_done: false,
    })
}

/// Reads the first text under `selector`, or falls back to `default` when the
/// node is absent.
pub fn extract_optional<T>(
    node: ElementRef<'_>,
    selector: &Selector,
    default: T,
    normalize: impl FnOnce(&str) -> T,
) -> T {
    match first_text(node, selector) {
        Some(text) => normalize(&text),
        None => default,
    }
}

pub fn extract_card(
    card: ElementRef<'_>,
    category: &str,
    base_url: &Url,
    index: usize,
) -> Result<ListingRecord, CardError> {
    let href = card
        .select(&selectors::TITLE_LINK)
        .find_map(|link| link.value().attr("href"))
        .ok_or(CardError::MissingLink { index })?;
    let url = base_url
        .join(href)
        .map_err(|source| CardError::InvalidLink {
            index,
            href: href.to_owned(),
            source,
        })?;
    let title = first_text(card, &selectors::TITLE_LINK)
        .map(|title| title.trim().to_owned())
        .ok_or(CardError::MissingTitle { index })?;

    let (star_rating, rating_count) = extract_ratings(card).unwrap_or_default();

    Ok(ListingRecord {
        category: category.to_owned(),
        url: url.to_string(),
        title,
        subtitle: extract_optional(card, &selectors::SUBTITLE, String::new(), |text| {
            text.trim().to_owned()
        }),
        authors: all_texts(card, &selectors::AUTHORS),
        narrators: all_texts(card, &selectors::NARRATORS),
        length_minutes: extract_optional(card, &selectors::RUNTIME, None, normalize::length_minutes),
        release_date: extract_optional(
            card,
            &selectors::RELEASE_DATE,
            String::new(),
            normalize::release_date,
        ),
        language: extract_optional(card, &selectors::LANGUAGE, String::new(), normalize::language),
        star_rating,
        rating_count,
        price: extract_optional(card, &selectors::PRICE, String::new(), normalize::price),
        is_podcast: extract_optional(card, &selectors::EPISODE_COUNT, false, |text| {
            !text.is_empty()
        }),
    })
}

/// Stars and count come from the same ratings block; if either is missing
/// both are left empty.
fn extract_ratings(card: ElementRef<'_>) -> Option<(String, String)> {
    let stars = first_text(card, &selectors::STAR_RATING)?;
    let count = first_text(card, &selectors::RATING_COUNT)?;
    Some((normalize::star_rating(&stars), normalize::digits_only(&count)))
}

/// Follow-up for the next listing page, unless the next button is disabled or
/// missing.
pub fn next_page(document: &Html, base_url: &Url) -> Option<FetchTask> {
    let buttons = document
        .select(&selectors::NEXT_BUTTON)
        .collect::<Vec<_>>();
    if buttons.is_empty() {
        return None;
    }

    let disabled = buttons
        .iter()
        .any(|button| button.select(&selectors::NEXT_DISABLED).next().is_some());
    if disabled {
        return None;
    }

    let Some(href) = buttons.iter().find_map(|button| {
        button
            .select(&selectors::NEXT_LINK)
            .find_map(|link| link.value().attr("href"))
    }) else {
        tracing::warn!("next button is enabled but has no link; treating page as last");
        return None;
    };

    match base_url.join(href) {
        Ok(url) => Some(FetchTask::new(url)),
        Err(err) => {
            tracing::warn!(%href, ?err, "next page link does not resolve; treating page as last");
            None
        }
    }
}

fn own_text(element: ElementRef<'_>) -> Option<String> {
    element
        .children()
        .find_map(|child| child.value().as_text().map(|text| (**text).to_owned()))
}

fn first_text(node: ElementRef<'_>, selector: &Selector) -> Option<String> {
    node.select(selector).find_map(own_text)
}

fn all_texts(node: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    node.select(selector)
        .flat_map(|element| {
            element
                .children()
                .filter_map(|child| child.value().as_text().map(|text| text.trim().to_owned()))
        })
        .filter(|text| !text.is_empty())
        .collect()
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let html = std::fs::read_to_string(&args.html)
        .with_context(|| format!("read listing html: {}", args.html))?;
    let base_url = Url::parse(&args.base_url).context("parse --base-url")?;

    let document = Html::parse_document(&html);
    let page = parse_listing_page(&document, &base_url)
        .with_context(|| format!("parse listing page: {}", args.html))?;
    tracing::info!(category = page.category(), "parsed category heading");

    let stdout = std::io::stdout();
    let mut sink = JsonlSink::new(stdout.lock());
    for item in page {
        match item {
            Ok(PageItem::Record(record)) => sink.write(&record)?,
            Ok(PageItem::FollowUp(task)) => {
                tracing::info!(next = %task.url, "next listing page");
            }
            Err(err) => tracing::warn!(%err, "skipping card"),
        }
    }
    sink.finish()?;

    Ok(())
}

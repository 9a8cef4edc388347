//! CSS selectors for the retailer's category listing markup.
//!
//! Class matches use `[class*=...]` so extra utility classes on the same
//! element do not break extraction.

use std::sync::LazyLock;

use scraper::Selector;

fn selector(css: &str) -> Selector {
    // Only called with the literals below; a failure is a typo caught by the tests.
    Selector::parse(css).unwrap_or_else(|err| panic!("invalid selector {css:?}: {err}"))
}

/// Category heading, e.g. "Showing titles in Science Fiction".
pub static CATEGORY_HEADING: LazyLock<Selector> =
    LazyLock::new(|| selector("div#top-3 h1[class*='bc-heading']"));

/// One title card.
pub static CARD: LazyLock<Selector> =
    LazyLock::new(|| selector("li[class*='productListItem']"));

/// Detail link; carries both the href and the title text.
pub static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| selector("li > h3 > a"));

pub static SUBTITLE: LazyLock<Selector> =
    LazyLock::new(|| selector("li[class*='subtitle'] > span"));

pub static AUTHORS: LazyLock<Selector> =
    LazyLock::new(|| selector("li[class*='authorLabel'] a"));

pub static NARRATORS: LazyLock<Selector> =
    LazyLock::new(|| selector("li[class*='narratorLabel'] a"));

pub static RUNTIME: LazyLock<Selector> =
    LazyLock::new(|| selector("li[class*='runtimeLabel'] > span"));

pub static RELEASE_DATE: LazyLock<Selector> =
    LazyLock::new(|| selector("li[class*='releaseDateLabel'] > span"));

pub static LANGUAGE: LazyLock<Selector> =
    LazyLock::new(|| selector("li[class*='languageLabel'] > span"));

/// Screen-reader star text, e.g. "4.5 out of 5 stars".
pub static STAR_RATING: LazyLock<Selector> =
    LazyLock::new(|| selector("li[class*='ratingsLabel'] > span[class*='bc-pub-offscreen']"));

/// Visible ratings count, e.g. "1,234 ratings".
pub static RATING_COUNT: LazyLock<Selector> =
    LazyLock::new(|| selector("li[class*='ratingsLabel'] > span[class*='bc-size-small']"));

/// Second span of the regular price block holds the amount.
pub static PRICE: LazyLock<Selector> =
    LazyLock::new(|| selector("p[class*='buybox-regular-price'] > span:nth-of-type(2)"));

/// Only podcasts carry an episode count.
pub static EPISODE_COUNT: LazyLock<Selector> =
    LazyLock::new(|| selector("li[class*='episodeCountLabel'] > span"));

pub static NEXT_BUTTON: LazyLock<Selector> =
    LazyLock::new(|| selector("ul[class*='pagingElements'] span[class*='nextButton']"));

pub static NEXT_DISABLED: LazyLock<Selector> =
    LazyLock::new(|| selector("span[class*='nextButton'] > a[aria-disabled='true']"));

pub static NEXT_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_selectors_parse() {
        let all: [&LazyLock<Selector>; 16] = [
            &CATEGORY_HEADING,
            &CARD,
            &TITLE_LINK,
            &SUBTITLE,
            &AUTHORS,
            &NARRATORS,
            &RUNTIME,
            &RELEASE_DATE,
            &LANGUAGE,
            &STAR_RATING,
            &RATING_COUNT,
            &PRICE,
            &EPISODE_COUNT,
            &NEXT_BUTTON,
            &NEXT_DISABLED,
            &NEXT_LINK,
        ];
        for selector in all {
            LazyLock::force(selector);
        }
    }
}

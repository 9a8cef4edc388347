//! Listing page markup builder shared by unit tests.

#[derive(Debug, Clone, Default)]
pub struct Card {
    link: Option<(String, String)>,
    subtitle: Option<String>,
    authors: Vec<String>,
    narrators: Vec<String>,
    length: Option<String>,
    release_date: Option<String>,
    language: Option<String>,
    stars: Option<String>,
    count: Option<String>,
    price: Option<String>,
    episodes: Option<String>,
}

impl Card {
    pub fn new(title: &str, href: &str) -> Self {
        Self {
            link: Some((title.to_owned(), href.to_owned())),
            ..Self::default()
        }
    }

    /// A card with no detail link at all.
    pub fn broken() -> Self {
        Self::default()
    }

    pub fn subtitle(mut self, text: &str) -> Self {
        self.subtitle = Some(text.to_owned());
        self
    }

    pub fn authors(mut self, names: &[&str]) -> Self {
        self.authors = names.iter().map(|n| (*n).to_owned()).collect();
        self
    }

    pub fn narrators(mut self, names: &[&str]) -> Self {
        self.narrators = names.iter().map(|n| (*n).to_owned()).collect();
        self
    }

    pub fn length(mut self, text: &str) -> Self {
        self.length = Some(text.to_owned());
        self
    }

    pub fn release_date(mut self, text: &str) -> Self {
        self.release_date = Some(text.to_owned());
        self
    }

    pub fn language(mut self, text: &str) -> Self {
        self.language = Some(text.to_owned());
        self
    }

    pub fn stars(mut self, text: &str) -> Self {
        self.stars = Some(text.to_owned());
        self
    }

    pub fn count(mut self, text: &str) -> Self {
        self.count = Some(text.to_owned());
        self
    }

    pub fn price(mut self, text: &str) -> Self {
        self.price = Some(text.to_owned());
        self
    }

    pub fn episodes(mut self, text: &str) -> Self {
        self.episodes = Some(text.to_owned());
        self
    }

    fn render(&self) -> String {
        let mut items = String::new();
        if let Some((title, href)) = &self.link {
            items.push_str(&format!(
                r#"<li class="bc-list-item"><h3 class="bc-heading"><a class="bc-link" href="{href}">{title}</a></h3></li>"#
            ));
        }
        if let Some(text) = &self.subtitle {
            items.push_str(&format!(
                r#"<li class="bc-list-item subtitle"><span class="bc-text">{text}</span></li>"#
            ));
        }
        if !self.authors.is_empty() {
            items.push_str(&labelled_links("authorLabel", "By:", &self.authors));
        }
        if !self.narrators.is_empty() {
            items.push_str(&labelled_links("narratorLabel", "Narrated by:", &self.narrators));
        }
        for (class, text) in [
            ("runtimeLabel", &self.length),
            ("releaseDateLabel", &self.release_date),
            ("languageLabel", &self.language),
            ("episodeCountLabel", &self.episodes),
        ] {
            if let Some(text) = text {
                items.push_str(&format!(
                    r#"<li class="bc-list-item {class}"><span class="bc-text">{text}</span></li>"#
                ));
            }
        }
        if self.stars.is_some() || self.count.is_some() {
            items.push_str(r#"<li class="bc-list-item ratingsLabel">"#);
            if let Some(stars) = &self.stars {
                items.push_str(&format!(
                    r#"<span class="bc-text bc-pub-offscreen">{stars}</span>"#
                ));
            }
            if let Some(count) = &self.count {
                items.push_str(&format!(
                    r#"<span class="bc-text bc-size-small bc-color-secondary">{count}</span>"#
                ));
            }
            items.push_str("</li>");
        }

        let price = match &self.price {
            Some(price) => format!(
                r#"<p class="bc-text buybox-regular-price"><span class="bc-text">Regular price:</span><span class="bc-text">{price}</span></p>"#
            ),
            None => String::new(),
        };

        format!(
            r#"<li class="bc-list-item productListItem"><div class="bc-row"><ul class="bc-list">{items}</ul></div><div class="buybox">{price}</div></li>"#
        )
    }
}

fn labelled_links(class: &str, label: &str, names: &[String]) -> String {
    let links = names
        .iter()
        .map(|name| format!(r#"<a class="bc-link" href="/search?searchAuthor={name}">{name}</a>"#))
        .collect::<Vec<_>>()
        .join(", ");
    format!(r#"<li class="bc-list-item {class}"><span class="bc-text">{label} {links}</span></li>"#)
}

#[derive(Debug, Clone, Copy)]
pub enum NextButton {
    Enabled(&'static str),
    Disabled,
    Missing,
}

pub fn listing_html(category: &str, cards: &[Card], next: NextButton) -> String {
    let cards = cards.iter().map(Card::render).collect::<String>();
    let paging = match next {
        NextButton::Enabled(href) => format!(
            r#"<ul class="bc-pagination pagingElements"><li><span class="bc-button nextButton"><a class="bc-button-text" href="{href}">Next</a></span></li></ul>"#
        ),
        NextButton::Disabled => r#"<ul class="bc-pagination pagingElements"><li><span class="bc-button nextButton bc-button-disabled"><a class="bc-button-text" aria-disabled="true" tabindex="-1">Next</a></span></li></ul>"#.to_owned(),
        NextButton::Missing => String::new(),
    };

    format!(
        r#"<!doctype html>
<html>
  <body>
    <div id="top-3"><h1 class="bc-heading bc-text-bold">
Showing titles in {category}</h1></div>
    <div class="adbl-impression-container"><ul class="bc-list">{cards}</ul></div>
    {paging}
  </body>
</html>
"#
    )
}

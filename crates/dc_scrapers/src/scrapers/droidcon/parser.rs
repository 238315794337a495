use chrono::{Local, NaiveDate};
use dc_core::{Article, ArticlePage, Pagination};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use crate::profile::FeedProfile;
use crate::scrapers::utils;

pub const TAG_CLASS_PREFIX: &str = "tag-";

struct Selectors {
    card: Selector,
    title: Selector,
    description: Selector,
    link: Selector,
    avatar: Selector,
    speaker_title: Selector,
    speaker_desc: Selector,
    current_page: Selector,
    page_number: Selector,
    next_page: Selector,
}

lazy_static! {
    static ref SELECTORS: Selectors = Selectors {
        card: selector("article.w-grid-item"),
        title: selector("h2.droidcon_conference_teaser_txt_block"),
        description: selector("div.post_content"),
        link: selector("a.usg_btn_1"),
        avatar: selector("img.attachment-thumbnail"),
        speaker_title: selector("div.video_post_speaker_title"),
        speaker_desc: selector("div.video_post_speaker_desc"),
        current_page: selector("span.page-numbers.current"),
        page_number: selector("a.page-numbers"),
        next_page: selector("a.next.page-numbers"),
    };
    static ref DATE_IN_URL: Regex =
        Regex::new(r"https?://[^/]+/(\d{4})/(\d{2})/(\d{2})/").expect("date pattern compiles");
}

fn selector(css: &str) -> Selector {
    utils::parse_selector(css).expect("static selector parses")
}

/// Parses a grid fragment into a page of articles. Never fails: anything
/// missing from the markup degrades to empty fields or an empty page.
pub fn parse_html(html: &str, profile: &FeedProfile) -> ArticlePage {
    parse_html_on(html, profile, Local::now().date_naive())
}

/// Same as [`parse_html`] with an explicit fallback date for cards whose URL
/// carries none.
pub fn parse_html_on(html: &str, profile: &FeedProfile, today: NaiveDate) -> ArticlePage {
    let document = Html::parse_document(html);

    let articles = document
        .select(&SELECTORS.card)
        .map(|card| parse_article(card, profile, today))
        .filter(|article| match &profile.tag_prefix_filter {
            Some(prefix) => article.has_tag_with_prefix(prefix),
            None => true,
        })
        .collect();

    ArticlePage {
        articles,
        pagination: parse_pagination(&document),
    }
}

fn parse_article(card: ElementRef<'_>, profile: &FeedProfile, today: NaiveDate) -> Article {
    let url = utils::first_attr(card, &SELECTORS.link, "href").filter(|href| !href.is_empty());

    let (avatar_url, speaker_title, speaker_desc) = if profile.rich_fields {
        (
            utils::first_attr(card, &SELECTORS.avatar, "src")
                .filter(|src| !src.is_empty())
                .map(|src| profile.proxied(&src)),
            utils::first_text(card, &SELECTORS.speaker_title),
            utils::first_text(card, &SELECTORS.speaker_desc),
        )
    } else {
        (None, String::new(), String::new())
    };

    Article {
        title: utils::first_text(card, &SELECTORS.title),
        description: utils::first_text(card, &SELECTORS.description),
        date: url.as_deref().and_then(date_from_url).unwrap_or(today),
        url,
        avatar_url,
        speaker_title,
        speaker_desc,
        tags: tags_from_classes(card),
    }
}

fn tags_from_classes(card: ElementRef<'_>) -> Vec<String> {
    utils::class_names(card)
        .into_iter()
        .filter_map(|class| class.strip_prefix(TAG_CLASS_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Reads `/YYYY/MM/DD/` from a post permalink. Impossible dates yield `None`.
pub fn date_from_url(url: &str) -> Option<NaiveDate> {
    let captures = DATE_IN_URL.captures(url)?;
    let year = captures[1].parse().ok()?;
    let month = captures[2].parse().ok()?;
    let day = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_pagination(document: &Html) -> Pagination {
    let root = document.root_element();

    let current_page = utils::first_text(root, &SELECTORS.current_page)
        .parse::<u32>()
        .ok()
        .filter(|page| *page >= 1)
        .unwrap_or(1);

    let total_pages = document
        .select(&SELECTORS.page_number)
        .filter_map(|el| utils::element_text(el).parse::<u32>().ok())
        .max()
        .unwrap_or(current_page)
        .max(current_page);

    Pagination {
        current_page,
        total_pages,
        next_page_url: utils::first_attr(root, &SELECTORS.next_page, "href")
            .filter(|href| !href.is_empty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: &str = r#"
        <div class="w-grid-list">
          <article class="w-grid-item post-1 card tag-droidcon-berlin tag-kotlin tag-droidcon">
            <img class="attachment-thumbnail" src="https://cdn.example/jane.png">
            <h2 class="droidcon_conference_teaser_txt_block">Compose   under the hood</h2>
            <div class="post_content"><p>How <b>recomposition</b> works.</p></div>
            <div class="video_post_speaker_title">Jane Doe</div>
            <div class="video_post_speaker_desc">Android GDE</div>
            <a class="w-btn usg_btn_1" href="https://www.droidcon.com/2024/03/07/compose-under-the-hood/">Watch</a>
          </article>
          <article class="w-grid-item post-2 tag-webinar">
            <h2 class="droidcon_conference_teaser_txt_block">Sponsored webinar</h2>
            <a class="usg_btn_1" href="https://www.droidcon.com/2024/02/01/webinar/">Watch</a>
          </article>
          <article class="w-grid-item post-3 tag-droidcon-london">
            <h2 class="droidcon_conference_teaser_txt_block">Untitled talk</h2>
          </article>
        </div>
        <nav class="pagination">
          <span class="page-numbers current">2</span>
          <a class="page-numbers" href="/page/1">1</a>
          <a class="page-numbers" href="/page/3">3</a>
          <a class="page-numbers" href="/page/7">7</a>
          <a class="next page-numbers" href="https://www.droidcon.com/page/3">Next</a>
        </nav>
    "#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_parse_full_card() {
        let page = parse_html_on(GRID, &FeedProfile::all_droidcons(), today());
        let article = &page.articles[0];
        assert_eq!(article.title, "Compose under the hood");
        assert_eq!(article.description, "How recomposition works.");
        assert_eq!(
            article.url.as_deref(),
            Some("https://www.droidcon.com/2024/03/07/compose-under-the-hood/")
        );
        assert_eq!(article.avatar_url.as_deref(), Some("https://cdn.example/jane.png"));
        assert_eq!(article.speaker_title, "Jane Doe");
        assert_eq!(article.speaker_desc, "Android GDE");
        assert_eq!(article.date, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
    }

    #[test]
    fn test_tags_keep_class_order_without_prefix() {
        let html = r#"<article class="w-grid-item card tag-droidcon-berlin tag-kotlin tag-droidcon"></article>"#;
        let mut profile = FeedProfile::all_droidcons();
        profile.tag_prefix_filter = None;
        let page = parse_html_on(html, &profile, today());
        assert_eq!(page.articles[0].tags, vec!["droidcon-berlin", "kotlin", "droidcon"]);
    }

    #[test]
    fn test_droidcon_filter_drops_unbranded_cards() {
        let page = parse_html_on(GRID, &FeedProfile::all_droidcons(), today());
        let titles: Vec<_> = page.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Compose under the hood", "Untitled talk"]);
    }

    #[test]
    fn test_single_tag_profile_keeps_every_card() {
        let page = parse_html_on(GRID, &FeedProfile::single_tag("droidcon-berlin"), today());
        assert_eq!(page.articles.len(), 3);
        let first = &page.articles[0];
        assert!(first.avatar_url.is_none());
        assert_eq!(first.speaker_title, "");
        assert_eq!(first.speaker_desc, "");
        assert_eq!(first.title, "Compose under the hood");
    }

    #[test]
    fn test_missing_fields_degrade_to_empty() {
        let page = parse_html_on(GRID, &FeedProfile::all_droidcons(), today());
        let untitled = &page.articles[1];
        assert_eq!(untitled.description, "");
        assert!(untitled.url.is_none());
        assert!(untitled.avatar_url.is_none());
        assert_eq!(untitled.date, today());
    }

    #[test]
    fn test_avatar_is_proxied() {
        let profile = FeedProfile::all_droidcons()
            .with_proxy(Some("https://proxy.example/?".to_string()));
        let page = parse_html_on(GRID, &profile, today());
        assert_eq!(
            page.articles[0].avatar_url.as_deref(),
            Some("https://proxy.example/?https://cdn.example/jane.png")
        );
        assert!(page.articles[1].avatar_url.is_none());
    }

    #[test]
    fn test_date_from_url() {
        assert_eq!(
            date_from_url("https://x.com/2024/03/07/talk-abc"),
            NaiveDate::from_ymd_opt(2024, 3, 7)
        );
        assert_eq!(date_from_url("https://x.com/talks/talk-abc"), None);
        assert_eq!(date_from_url("https://x.com/2024/03/07"), None);
        assert_eq!(date_from_url("https://x.com/2024/13/45/impossible"), None);
    }

    #[test]
    fn test_date_falls_back_to_local_today() {
        let html = r#"<article class="w-grid-item tag-droidcon">
            <a class="usg_btn_1" href="https://www.droidcon.com/talks/no-date/">Watch</a>
        </article>"#;
        let before = Local::now().date_naive();
        let page = parse_html(html, &FeedProfile::all_droidcons());
        let after = Local::now().date_naive();
        let date = page.articles[0].date;
        assert!(date == before || date == after);
    }

    #[test]
    fn test_pagination() {
        let page = parse_html_on(GRID, &FeedProfile::all_droidcons(), today());
        assert_eq!(page.pagination.current_page, 2);
        assert_eq!(page.pagination.total_pages, 7);
        assert_eq!(
            page.pagination.next_page_url.as_deref(),
            Some("https://www.droidcon.com/page/3")
        );
    }

    #[test]
    fn test_pagination_defaults() {
        let page = parse_html_on("<div>No results</div>", &FeedProfile::all_droidcons(), today());
        assert!(page.articles.is_empty());
        assert_eq!(page.pagination, Pagination::single());
    }

    #[test]
    fn test_empty_next_link_is_absent() {
        let html = r#"<span class="page-numbers current">1</span>
            <a class="page-numbers" href="/page/2">2</a>
            <a class="next page-numbers" href="">Next</a>"#;
        let page = parse_html_on(html, &FeedProfile::all_droidcons(), today());
        assert_eq!(page.pagination.total_pages, 2);
        assert!(page.pagination.next_page_url.is_none());
    }

    #[test]
    fn test_total_pages_never_below_current() {
        let html = r#"<span class="page-numbers current">4</span><a class="page-numbers">2</a>"#;
        let page = parse_html_on(html, &FeedProfile::all_droidcons(), today());
        assert_eq!(page.pagination.current_page, 4);
        assert_eq!(page.pagination.total_pages, 4);
    }

    #[test]
    fn test_malformed_html_yields_empty_page() {
        let page = parse_html_on("<article class=\"w-grid-item", &FeedProfile::all_droidcons(), today());
        assert!(page.articles.is_empty());
        assert_eq!(page.pagination.current_page, 1);
    }
}

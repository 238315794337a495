use dc_core::Result;
use serde_json::{json, Value};
use crate::profile::FeedProfile;

pub const GRID_ACTION: &str = "us_ajax_grid";
const MAX_NUM_PAGES: &str = "5000";

/// Layout and query parameters the theme's grid widget sends along with its
/// AJAX call. Key order matters to the endpoint.
pub fn template_vars(page: u32, profile: &FeedProfile) -> Value {
    json!({
        "columns": "4",
        "exclude_items": "none",
        "img_size": "default",
        "ignore_items_size": false,
        "items_layout": "1314",
        "load_animation": "none",
        "overriding_link": "none",
        "query_args": {
            "post_type": ["post"],
            "posts_per_page": profile.page_size.to_string(),
            "paged": page
        },
        "orderby_query_args": {
            "orderby": { "date": "DESC" }
        },
        "type": "grid",
        "us_grid_ajax_index": 1,
        "us_grid_filter_params": format!(
            "filter_category=video&filter_post_event_tag={}",
            profile.joined_tags()
        ),
        "us_grid_index": page,
        "_us_grid_post_type": "post"
    })
}

/// Minified form of [`template_vars`] with every whitespace character removed.
pub fn template_vars_string(page: u32, profile: &FeedProfile) -> Result<String> {
    let compact = serde_json::to_string(&template_vars(page, profile))?;
    Ok(compact.chars().filter(|c| !c.is_whitespace()).collect())
}

pub fn form_fields(page: u32, profile: &FeedProfile) -> Result<Vec<(&'static str, String)>> {
    Ok(vec![
        ("action", GRID_ACTION.to_string()),
        ("ajax_url", profile.endpoint.clone()),
        ("infinite_scroll", "0".to_string()),
        ("max_num_pages", MAX_NUM_PAGES.to_string()),
        ("template_vars", template_vars_string(page, profile)?),
    ])
}

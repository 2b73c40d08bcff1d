// File: src/views.rs
// Purpose: Maud markup for every page the demo serves

use chrono::{DateTime, Utc};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use renderlab::{ContentItem, MetricsResult};
use renderlab_cache::RenderStats;

use crate::strategy::Strategy;

const STYLES: &str = r#"
:root { color-scheme: light; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, -apple-system, sans-serif; color: #1f2430; background: #f7f7f5; }
.container { max-width: 860px; margin: 0 auto; padding: 0 1rem; }
nav { background: #1f2430; color: #fff; padding: 0.75rem 0; }
nav a { color: #fff; font-weight: 700; text-decoration: none; margin-right: 0.75rem; }
nav .tagline { color: #aab; font-size: 0.85rem; }
main { padding: 1.5rem 1rem 3rem; }
footer { border-top: 1px solid #ddd; color: #778; font-size: 0.85rem; }
.badge { border: 1px solid #cbd; border-left: 6px solid #4a5bdc; background: #fff; padding: 0.75rem 1rem; margin-bottom: 1.5rem; }
.badge-name { display: inline-block; background: #4a5bdc; color: #fff; font-size: 0.75rem; font-weight: 700; padding: 0.1rem 0.5rem; border-radius: 3px; margin-right: 0.5rem; }
.badge-meta { color: #667; font-size: 0.85rem; }
.post { background: #fff; border: 1px solid #ddd; padding: 1rem 1.25rem; }
.post-missing { border-color: #d9a; }
.post-date { color: #778; font-size: 0.9rem; }
.item-table, .compare-table { border-collapse: collapse; width: 100%; background: #fff; }
.item-table th, .item-table td, .compare-table th, .compare-table td { border: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: left; }
.probe-error { color: #b33; }
.cache-stats { color: #556; font-size: 0.9rem; }
.back { margin-top: 1.5rem; }
code { background: #eef; padding: 0 0.25rem; }
"#;

/// Wrap page content in the shared document shell
pub fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | renderlab" }
                style { (PreEscaped(STYLES)) }
            }
            body {
                nav {
                    div class="container" {
                        a href="/" { "renderlab" }
                        span class="tagline" { "five rendering strategies, one CMS" }
                    }
                }
                main class="container" { (content) }
                footer {
                    div class="container" {
                        p { "renderlab demo" }
                    }
                }
            }
        }
    }
}

/// The strategy badge shown at the top of every strategy page. The
/// timestamp is baked into the markup when the page is generated, so a
/// cached copy keeps showing when it was actually built.
fn strategy_badge(strategy: Strategy, generated_at: DateTime<Utc>) -> Markup {
    html! {
        aside class="badge" {
            p {
                span class="badge-name" { (strategy.name()) }
                strong { (strategy.title()) }
            }
            p { (strategy.summary()) }
            p class="badge-meta" {
                "This copy was generated at "
                time datetime=(generated_at.to_rfc3339()) {
                    (generated_at.format("%Y-%m-%d %H:%M:%S%.6f UTC"))
                }
                ". The " code { "x-render-cache" }
                " response header says whether it came out of the cache."
            }
        }
    }
}

fn post_panel(item: &ContentItem) -> Markup {
    html! {
        article class="post" {
            h1 { (item.title) }
            @if let Some(updated) = item.updated_at {
                p class="post-date" {
                    "Last updated " (updated.format("%Y-%m-%d %H:%M UTC"))
                }
            }
            // Body HTML comes from the CMS, which is trusted content
            div class="post-body" { (PreEscaped(&item.body)) }
        }
    }
}

fn not_found_panel(slug: &str) -> Markup {
    html! {
        article class="post post-missing" {
            h1 { "Content not found" }
            p { "No content item answers to " code { (slug) } "." }
            p {
                "If it was just created, a fresh render will pick it up; "
                "cached strategies need a revalidation first."
            }
        }
    }
}

/// A full strategy page: badge, content (or the not-found panel), links
pub fn strategy_page(
    strategy: Strategy,
    slug: &str,
    item: Option<&ContentItem>,
    generated_at: DateTime<Utc>,
) -> Markup {
    let content = html! {
        (strategy_badge(strategy, generated_at))
        @match item {
            Some(item) => { (post_panel(item)) }
            None => { (not_found_panel(slug)) }
        }
        p class="back" {
            a href="/" { "Back to overview" }
            " | "
            a href=(format!("/compare/{}", slug)) { "Compare strategies for this item" }
        }
    };
    layout(strategy.title(), content)
}

/// The CSR shell: no content in the markup, an inline script fetches it
pub fn csr_shell(slug: &str, generated_at: DateTime<Utc>) -> Markup {
    // JSON-encode the URL so it lands in the script as a quoted literal
    let content_url = serde_json::json!(format!("/api/content/{}", slug)).to_string();
    let script = format!(
        r#"(async () => {{
  const title = document.getElementById('csr-title');
  const body = document.getElementById('csr-body');
  const updated = document.getElementById('csr-updated');
  try {{
    const response = await fetch({content_url});
    if (!response.ok) {{
      title.textContent = 'Content not found';
      body.textContent = 'The browser fetch returned ' + response.status + '.';
      return;
    }}
    const item = await response.json();
    title.textContent = item.title;
    body.innerHTML = item.body;
    if (item.date_updated) {{
      updated.textContent = 'Last updated ' + item.date_updated;
    }}
  }} catch (err) {{
    title.textContent = 'Fetch failed';
    body.textContent = String(err);
  }}
}})();"#
    );

    let content = html! {
        (strategy_badge(Strategy::Csr, generated_at))
        article class="post" id="csr-panel" {
            h1 id="csr-title" { "Loading\u{2026}" }
            p class="post-date" id="csr-updated" {}
            div class="post-body" id="csr-body" {}
        }
        p class="back" {
            a href="/" { "Back to overview" }
            " | "
            a href=(format!("/compare/{}", slug)) { "Compare strategies for this item" }
        }
        script { (PreEscaped(script)) }
    };
    layout(Strategy::Csr.title(), content)
}

/// The landing page: item links per strategy, explanations, cache counters
pub fn index_page(
    slugs: &[String],
    stats: &RenderStats,
    backend: &str,
    entries: usize,
    size_bytes: u64,
) -> Markup {
    let content = html! {
        section {
            h1 { "Rendering strategies" }
            p {
                "Every content item below can be viewed through five rendering "
                "strategies. Open a page twice and compare the "
                code { "x-render-cache" }
                " response header, the baked-in generation timestamp, and the "
                "comparison table."
            }
        }
        @if slugs.is_empty() {
            p class="probe-error" { "No content items found. Is the CMS reachable?" }
        } @else {
            table class="item-table" {
                thead {
                    tr {
                        th { "Item" }
                        @for strategy in Strategy::ALL {
                            th { (strategy.name()) }
                        }
                        th { "Compare" }
                    }
                }
                tbody {
                    @for slug in slugs {
                        tr {
                            td { code { (slug) } }
                            @for strategy in Strategy::ALL {
                                td { a href=(strategy.page_path(slug)) { "view" } }
                            }
                            td { a href=(format!("/compare/{}", slug)) { "compare" } }
                        }
                    }
                }
            }
        }
        section {
            h2 { "What each strategy does" }
            dl {
                @for strategy in Strategy::ALL {
                    dt { (strategy.title()) " (" (strategy.name()) ")" }
                    dd { (strategy.summary()) }
                }
            }
        }
        section class="cache-stats" {
            h2 { "Render cache" }
            p {
                (backend) " backend, " (entries) " cached renders, "
                (size_bytes) " bytes"
            }
            p {
                (stats.hits) " hits, " (stats.misses) " misses, "
                (stats.regenerations) " regenerations"
            }
        }
    };
    layout("Overview", content)
}

/// The side-by-side probe table for one slug
pub fn compare_page(slug: &str, rows: &[(Strategy, MetricsResult)]) -> Markup {
    let content = html! {
        h1 { "Strategy comparison for " code { (slug) } }
        p {
            "Five sequential probes with a fixed pause between them, so one "
            "measurement never contends with the next."
        }
        table class="compare-table" {
            thead {
                tr {
                    th { "Strategy" }
                    th { "Status" }
                    th { "TTFB" }
                    th { "Total" }
                    th { "Size" }
                    th { "Cache" }
                }
            }
            tbody {
                @for (strategy, result) in rows {
                    tr {
                        td { a href=(strategy.page_path(slug)) { (strategy.name()) } }
                        td {
                            @if result.status == 0 {
                                span class="probe-error" { "failed" }
                            } @else {
                                (result.status) " " (result.status_text)
                            }
                        }
                        td { (result.ttfb_ms) " ms" }
                        td { (result.total_ms) " ms" }
                        td { (result.size_kb) }
                        td {
                            code {
                                (result.headers.get("x-render-cache").map(|v| v.as_str()).unwrap_or("-"))
                            }
                        }
                    }
                }
            }
        }
        @for (_, result) in rows {
            @if let Some(error) = &result.error {
                p class="probe-error" { "Probe error for " (result.url) ": " (error) }
            }
        }
        p class="back" { a href="/" { "Back to overview" } }
    };
    layout("Comparison", content)
}

/// Fallback page when rendering itself fails
pub fn error_page(title: &str, message: &str) -> Markup {
    let content = html! {
        article class="post post-missing" {
            h1 { (title) }
            p { (message) }
            p { a href="/" { "Go Home" } }
        }
    };
    layout(title, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ContentItem {
        ContentItem {
            slug: "hello-world".to_string(),
            title: "Hello World".to_string(),
            body: "<p>First <em>post</em></p>".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_strategy_page_includes_badge_and_body() {
        let markup = strategy_page(Strategy::Ssr, "hello-world", Some(&item()), Utc::now());
        let html = markup.into_string();

        assert!(html.contains("Server-Side Rendering"));
        assert!(html.contains("Hello World"));
        // CMS body lands unescaped
        assert!(html.contains("<p>First <em>post</em></p>"));
        assert!(html.contains("x-render-cache"));
    }

    #[test]
    fn test_missing_item_panel() {
        let markup = strategy_page(Strategy::Ssg, "ghost", None, Utc::now());
        let html = markup.into_string();

        assert!(html.contains("Content not found"));
        assert!(html.contains("ghost"));
    }

    #[test]
    fn test_csr_shell_has_fetch_but_no_content() {
        let markup = csr_shell("hello-world", Utc::now());
        let html = markup.into_string();

        assert!(html.contains(r#"fetch("/api/content/hello-world")"#));
        assert!(html.contains("csr-body"));
        assert!(!html.contains("First post"));
    }

    #[test]
    fn test_index_lists_every_strategy_link() {
        let slugs = vec!["hello-world".to_string()];
        let markup = index_page(&slugs, &RenderStats::default(), "memory", 0, 0);
        let html = markup.into_string();

        assert!(html.contains("/ssr/hello-world"));
        assert!(html.contains("/ssg/hello-world"));
        assert!(html.contains("/isr/hello-world"));
        assert!(html.contains("/on-demand/hello-world"));
        assert!(html.contains("/csr/hello-world"));
        assert!(html.contains("/compare/hello-world"));
        assert!(html.contains("memory"));
    }

    #[test]
    fn test_compare_table_shows_cache_header() {
        let mut result = MetricsResult::failed(
            "http://localhost:3000/ssr/a",
            std::time::Duration::from_millis(1),
            std::time::Duration::from_millis(1),
            "refused",
        );
        result.status = 200;
        result.status_text = "OK".to_string();
        result.error = None;
        result
            .headers
            .insert("x-render-cache".to_string(), "HIT".to_string());

        let markup = compare_page("a", &[(Strategy::Ssr, result)]);
        let html = markup.into_string();

        assert!(html.contains("HIT"));
        assert!(html.contains("200 OK"));
    }
}

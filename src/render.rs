// src/render.rs
//! Server-side HTML for the event page. All dynamic text goes through html-escape.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::assemble::SortMode;
use crate::service::EventPage;

const STYLE: &str = "body{font-family:sans-serif;max-width:860px;margin:2rem auto;padding:0 1rem}\
form{display:flex;gap:.5rem;margin-bottom:1rem}input[name=q]{flex:1}\
.err{background:#fee;border:1px solid #c33;padding:.75rem;margin-bottom:1rem}\
.ev{border-bottom:1px solid #ddd;padding:.75rem 0}.meta{color:#666;font-size:.85rem}\
.gu{background:#eef;border-radius:4px;padding:0 .4rem;margin-right:.5rem}";

/// Only http(s) links become anchors.
fn safe_href(link: &str) -> Option<&str> {
    let l = link.trim();
    (l.starts_with("https://") || l.starts_with("http://")).then_some(l)
}

/// `20240105` -> `2024.01.05`; anything else is shown as-is.
fn display_date(raw: &str) -> String {
    match crate::assemble::parse_postdate(raw) {
        Some(d) => d.format("%Y.%m.%d").to_string(),
        None => raw.to_string(),
    }
}

pub fn render_page(page: &EventPage) -> String {
    let mut html = String::with_capacity(4096 + page.events.len() * 512);

    let _ = write!(
        html,
        "<!doctype html><html lang=\"ko\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\
<title>부산 문화행사 - {}</title><style>{STYLE}</style></head><body>\
<h1>부산 전시·공연·축제</h1>",
        text(&page.query)
    );

    // search form
    let _ = write!(
        html,
        "<form method=\"get\" action=\"/\"><input name=\"q\" value=\"{}\" placeholder=\"예: 부산 현대미술관\">",
        attr(&page.query)
    );
    html.push_str("<select name=\"gu\">");
    for gu in &page.districts {
        let selected = if *gu == page.district { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            attr(gu),
            text(gu)
        );
    }
    html.push_str("</select><select name=\"sort\">");
    for (mode, label) in [(SortMode::Sim, "정확도순"), (SortMode::Latest, "최신순")] {
        let selected = if mode == page.sort { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{selected}>{label}</option>",
            mode.as_str()
        );
    }
    html.push_str("</select><button type=\"submit\">검색</button></form>");

    if let Some(err) = &page.error {
        let _ = write!(html, "<div class=\"err\">{}</div>", text(err));
    }

    let _ = write!(
        html,
        "<p class=\"meta\">{}건</p>",
        page.events.len()
    );

    if page.events.is_empty() && page.error.is_none() {
        html.push_str("<p>조건에 맞는 행사가 없습니다.</p>");
    }

    for ev in &page.events {
        html.push_str("<div class=\"ev\">");
        match safe_href(&ev.link) {
            Some(href) => {
                let _ = write!(
                    html,
                    "<h3><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></h3>",
                    attr(href),
                    text(&ev.title)
                );
            }
            None => {
                let _ = write!(html, "<h3>{}</h3>", text(&ev.title));
            }
        }
        let _ = write!(
            html,
            "<div class=\"meta\"><span class=\"gu\">{}</span>",
            text(&ev.district)
        );
        if let Some(d) = ev.postdate.as_deref().filter(|d| !d.is_empty()) {
            let _ = write!(html, "{}", text(&display_date(d)));
        }
        let _ = write!(html, "</div><p>{}</p></div>", text(&ev.description));
    }

    html.push_str("</body></html>");
    html
}

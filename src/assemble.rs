// src/assemble.rs
//! Result assembly: raw hits -> filtered, district-tagged events; then ordering and
//! the district post-filter.

use chrono::NaiveDate;
use serde::Serialize;

use crate::classify::Classifiers;
use crate::devlog::log_hit_decision;
use crate::normalize::clean_text;
use crate::search::{RawHit, UpstreamSort};

pub const SOURCE_TAG: &str = "NAVER_BLOG_API";

/// Shortest user-query token (in chars) that counts for relaxation.
pub const MIN_USER_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedEvent {
    pub title: String,
    pub description: String,
    pub link: String,
    pub district: String,
    pub source: &'static str,
    pub postdate: Option<String>,
}

/// Per-batch counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub seen: usize,
    pub kept: usize,
    pub rejected_locality: usize,
    pub rejected_relevance: usize,
    pub rejected_exclusion: usize,
}

/// Tokens of the original user query that may relax the topical/exclusion checks.
pub fn user_tokens(user_query: &str) -> Vec<&str> {
    user_query
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_USER_TOKEN_CHARS)
        .collect()
}

/// Granted when no usable token exists, or at least one token occurs in `text`.
pub fn user_tokens_match(tokens: &[&str], text: &str) -> bool {
    tokens.is_empty() || tokens.iter().any(|t| text.contains(t))
}

/// Run the per-hit pipeline. Output keeps input order.
///
/// 1) normalize title/description, join with a space
/// 2) drop non-local text
/// 3) user-token relaxation
/// 4) without relaxation: drop off-topic text, then drop deny-listed text
/// 5) tag district
pub fn assemble(
    cls: &Classifiers,
    hits: &[RawHit],
    user_query: &str,
    effective_query: &str,
) -> (Vec<NormalizedEvent>, FilterStats) {
    let tokens = user_tokens(user_query);
    let mode = cls.relevance.mode_for(effective_query);

    let mut stats = FilterStats {
        seen: hits.len(),
        ..FilterStats::default()
    };
    let mut out = Vec::with_capacity(hits.len());

    for hit in hits {
        let title = clean_text(hit.title.as_deref());
        let description = clean_text(hit.description.as_deref());
        let link = hit.link.clone().unwrap_or_default();
        let text = format!("{title} {description}");

        if !cls.locality.is_local(&text) {
            stats.rejected_locality += 1;
            log_hit_decision(&link, "locality", false);
            continue;
        }

        let relaxed = user_tokens_match(&tokens, &text);
        if !relaxed {
            if !cls.relevance.passes(mode, &text) {
                stats.rejected_relevance += 1;
                log_hit_decision(&link, "relevance", false);
                continue;
            }
            if cls.exclusion.is_excluded(&text) {
                stats.rejected_exclusion += 1;
                log_hit_decision(&link, "exclusion", false);
                continue;
            }
        }

        let district = cls.district.tag(&text).to_string();
        log_hit_decision(&link, "kept", relaxed);
        out.push(NormalizedEvent {
            title,
            description,
            link,
            district,
            source: SOURCE_TAG,
            postdate: hit.postdate.clone(),
        });
    }

    stats.kept = out.len();
    (out, stats)
}

/// Secondary ordering of the assembled list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Upstream relevance order, untouched.
    #[default]
    Sim,
    /// Newest postdate first.
    Latest,
}

impl SortMode {
    /// Anything other than `latest` means `sim`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "latest" => SortMode::Latest,
            _ => SortMode::Sim,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Sim => "sim",
            SortMode::Latest => "latest",
        }
    }

    pub fn upstream(self) -> UpstreamSort {
        match self {
            SortMode::Sim => UpstreamSort::Sim,
            SortMode::Latest => UpstreamSort::Date,
        }
    }
}

/// `YYYYMMDD`: exactly eight ASCII digits forming a real calendar date.
pub fn parse_postdate(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y%m%d").ok()
}

/// Stable. With `Latest`, missing/malformed dates rank lowest and end up last.
pub fn sort_events(mut events: Vec<NormalizedEvent>, mode: SortMode) -> Vec<NormalizedEvent> {
    if mode == SortMode::Latest {
        events.sort_by_key(|e| std::cmp::Reverse(e.postdate.as_deref().and_then(parse_postdate)));
    }
    events
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistrictFilter {
    All,
    Only(String),
}

impl DistrictFilter {
    /// Blank, `all` or the configured all-label select everything.
    pub fn parse(raw: &str, all_label: &str) -> Self {
        let t = raw.trim();
        if t.is_empty() || t == all_label || t.eq_ignore_ascii_case("all") {
            DistrictFilter::All
        } else {
            DistrictFilter::Only(t.to_string())
        }
    }

    pub fn label<'a>(&'a self, all_label: &'a str) -> &'a str {
        match self {
            DistrictFilter::All => all_label,
            DistrictFilter::Only(d) => d,
        }
    }
}

/// Keep only the chosen district; an empty selection falls back to the full list.
pub fn filter_district(events: Vec<NormalizedEvent>, filter: &DistrictFilter) -> Vec<NormalizedEvent> {
    let DistrictFilter::Only(district) = filter else {
        return events;
    };
    if !events.iter().any(|e| &e.district == district) {
        return events;
    }
    events.into_iter().filter(|e| &e.district == district).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;

    fn cls() -> Classifiers {
        Classifiers::from_config(&FilterConfig::embedded().unwrap())
    }

    fn hit(title: &str, desc: &str, postdate: Option<&str>) -> RawHit {
        RawHit {
            title: Some(title.into()),
            description: Some(desc.into()),
            link: Some(format!("https://blog.naver.com/t/{}", title.len())),
            postdate: postdate.map(str::to_string),
        }
    }

    fn ev(district: &str, postdate: Option<&str>, title: &str) -> NormalizedEvent {
        NormalizedEvent {
            title: title.into(),
            description: String::new(),
            link: String::new(),
            district: district.into(),
            source: SOURCE_TAG,
            postdate: postdate.map(str::to_string),
        }
    }

    #[test]
    fn user_tokens_drop_single_chars() {
        assert_eq!(user_tokens("  부산  a 전 시 현대미술관 "), vec!["부산", "현대미술관"]);
        assert!(user_tokens("a b").is_empty());
        assert!(user_tokens_match(&[], "anything"));
    }

    #[test]
    fn fireworks_scenario_tags_haeundae() {
        let hits = vec![hit("부산 해운대 불꽃축제 현장", "정말 멋진 불꽃놀이였어요", Some("20230101"))];
        let q = "부산 해운대 불꽃축제";
        let (out, stats) = assemble(&cls(), &hits, q, q);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].district, "해운대구");
        assert_eq!(out[0].source, "NAVER_BLOG_API");
        assert_eq!(out[0].postdate.as_deref(), Some("20230101"));
        assert_eq!(stats.kept, 1);
    }

    #[test]
    fn root_token_self_match_keeps_excluded_hit() {
        // "부산" is a 2-char token present in the text, so relaxation is granted
        // and the exclusion veto is bypassed.
        let hits = vec![hit("부산 맛집 추천 리스트", "", None)];
        let (out, stats) = assemble(&cls(), &hits, "부산", "부산");
        assert_eq!(out.len(), 1);
        assert_eq!(stats.rejected_exclusion, 0);
        assert_eq!(out[0].district, "기타");
    }

    #[test]
    fn without_relaxation_relevance_and_exclusion_apply() {
        let c = cls();
        let hits = vec![
            hit("해운대 맛집 추천", "", None),
            hit("해운대 산책로", "", None),
            hit("해운대 모래축제", "", None),
        ];
        // token "광안리" is in none of the texts
        let (out, stats) = assemble(&c, &hits, "광안리", "광안리");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "해운대 모래축제");
        // the "맛집" hit has no topical term, so relevance rejects it first
        assert_eq!(stats.rejected_relevance, 2);
        assert_eq!(stats.rejected_exclusion, 0);
    }

    #[test]
    fn exclusion_vetoes_topical_hit_without_relaxation() {
        let hits = vec![hit("서면 전시 보고 카페", "", None)];
        let (out, stats) = assemble(&cls(), &hits, "광안리", "광안리");
        assert!(out.is_empty());
        assert_eq!(stats.rejected_exclusion, 1);
    }

    #[test]
    fn locality_is_never_bypassed() {
        let hits = vec![hit("서울 현대미술관 전시", "", None)];
        let (out, stats) = assemble(&cls(), &hits, "현대미술관", "현대미술관");
        assert!(out.is_empty());
        assert_eq!(stats.rejected_locality, 1);
    }

    #[test]
    fn absent_fields_are_empty_strings() {
        let hits = vec![RawHit {
            title: None,
            description: Some("<b>영도</b> 전시".into()),
            link: None,
            postdate: None,
        }];
        let (out, _) = assemble(&cls(), &hits, "", "");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "");
        assert_eq!(out[0].description, "영도 전시");
        assert_eq!(out[0].link, "");
        assert_eq!(out[0].district, "영도구");
    }

    #[test]
    fn postdate_parsing_is_strict() {
        assert_eq!(parse_postdate("20230101"), NaiveDate::from_ymd_opt(2023, 1, 1));
        for bad in ["", "2023011", "2023-01-01", "20231301", "20230230", "２０２３０１０１", "abcdefgh"] {
            assert_eq!(parse_postdate(bad), None, "{bad:?}");
        }
    }

    #[test]
    fn latest_sort_is_stable_and_puts_undated_last() {
        let events = vec![
            ev("중구", None, "a"),
            ev("중구", Some("20230101"), "b"),
            ev("중구", Some("bogus"), "c"),
            ev("중구", Some("20240301"), "d"),
            ev("중구", Some("20230101"), "e"),
        ];
        let out = sort_events(events.clone(), SortMode::Latest);
        let titles: Vec<_> = out.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["d", "b", "e", "a", "c"]);

        let same = sort_events(events.clone(), SortMode::Sim);
        assert_eq!(same, events);
    }

    #[test]
    fn sort_mode_parse_and_upstream_mapping() {
        assert_eq!(SortMode::parse("latest"), SortMode::Latest);
        assert_eq!(SortMode::parse("date"), SortMode::Sim);
        assert_eq!(SortMode::Latest.upstream(), UpstreamSort::Date);
        assert_eq!(SortMode::Sim.upstream(), UpstreamSort::Sim);
    }

    #[test]
    fn district_filter_falls_back_when_empty() {
        let events = vec![ev("중구", None, "a"), ev("기타", None, "b")];
        let f = DistrictFilter::parse("해운대구", "전체");
        assert_eq!(filter_district(events.clone(), &f), events);

        let f = DistrictFilter::parse("중구", "전체");
        let out = filter_district(events.clone(), &f);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "a");

        assert_eq!(DistrictFilter::parse(" 전체 ", "전체"), DistrictFilter::All);
        assert_eq!(DistrictFilter::parse("ALL", "전체"), DistrictFilter::All);
        assert_eq!(filter_district(events.clone(), &DistrictFilter::All), events);
    }
}

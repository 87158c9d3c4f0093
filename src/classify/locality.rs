// src/classify/locality.rs
use super::contains_any;
use crate::config::FilterConfig;

/// Decides whether text is about the root place or one of its districts.
#[derive(Debug, Clone)]
pub struct LocalityClassifier {
    root: String,
    district_names: Vec<String>,
    aliases: Vec<String>,
}

impl LocalityClassifier {
    pub fn new(root: String, district_names: Vec<String>, aliases: Vec<String>) -> Self {
        Self {
            root,
            district_names,
            aliases,
        }
    }

    pub fn from_config(cfg: &FilterConfig) -> Self {
        let aliases = cfg
            .districts
            .iter()
            .flat_map(|d| d.aliases.iter().cloned())
            .collect();
        Self::new(cfg.place.root.clone(), cfg.district_names(), aliases)
    }

    pub fn is_local(&self, text: &str) -> bool {
        (!self.root.is_empty() && text.contains(&self.root))
            || contains_any(text, &self.district_names)
            || contains_any(text, &self.aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busan() -> LocalityClassifier {
        LocalityClassifier::from_config(&FilterConfig::embedded().unwrap())
    }

    #[test]
    fn root_district_and_alias_all_count() {
        let c = busan();
        assert!(c.is_local("부산 불꽃축제"));
        assert!(c.is_local("해운대구 해변 공연"));
        assert!(c.is_local("서면 갤러리 전시"));
        assert!(c.is_local("다대포 노을"));
    }

    #[test]
    fn other_cities_are_rejected() {
        let c = busan();
        assert!(!c.is_local("인천 송월동 동화마을 전시"));
        assert!(!c.is_local("서울 국립현대미술관 관람 후기"));
        assert!(!c.is_local(""));
    }

    #[test]
    fn matching_is_substring_not_token() {
        let c = busan();
        // "부산" inside a longer word still counts
        assert!(c.is_local("부산광역시"));
        // Latin case is not folded
        let latin = LocalityClassifier::new("Busan".into(), vec![], vec![]);
        assert!(latin.is_local("Busan Biennale"));
        assert!(!latin.is_local("busan biennale"));
    }
}

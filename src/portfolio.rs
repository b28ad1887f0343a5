use crate::config::{PORTFOLIO_HIDE_DELAY_MS, PORTFOLIO_STAGGER_MS};

pub const FILTER_ALL: &str = "all";

pub fn item_matches(filter: &str, category: Option<&str>) -> bool {
    filter == FILTER_ALL || category == Some(filter)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemTransition {
    Show { delay_ms: u32 },
    Hide { remove_after_ms: u32 },
}

impl ItemTransition {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Show { .. })
    }
}

pub fn plan_filter(categories: &[Option<&str>], filter: &str) -> Vec<ItemTransition> {
    categories
        .iter()
        .enumerate()
        .map(|(index, category)| {
            if item_matches(filter, *category) {
                ItemTransition::Show {
                    delay_ms: (index as u32).saturating_mul(PORTFOLIO_STAGGER_MS),
                }
            } else {
                ItemTransition::Hide {
                    remove_after_ms: PORTFOLIO_HIDE_DELAY_MS,
                }
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectDetails {
    pub image_src: String,
    pub title: String,
    pub description: String,
}

impl ProjectDetails {
    pub fn new(image_src: Option<String>, title: Option<String>, description: Option<String>) -> Self {
        Self {
            image_src: image_src.unwrap_or_default(),
            title: title.map(|value| value.trim().to_string()).unwrap_or_default(),
            description: description
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: [Option<&str>; 5] = [Some("web"), Some("social"), Some("web"), None, Some("video")];

    fn visible(plan: &[ItemTransition]) -> Vec<usize> {
        plan.iter()
            .enumerate()
            .filter(|(_, transition)| transition.is_visible())
            .map(|(index, _)| index)
            .collect()
    }

    #[test]
    fn all_filter_shows_every_item() {
        let plan = plan_filter(&ITEMS, FILTER_ALL);
        assert_eq!(visible(&plan), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn category_filter_shows_exact_matches_only() {
        let plan = plan_filter(&ITEMS, "web");
        assert_eq!(visible(&plan), vec![0, 2]);
    }

    #[test]
    fn filtering_twice_yields_same_visible_set() {
        let first = plan_filter(&ITEMS, "social");
        let second = plan_filter(&ITEMS, "social");
        assert_eq!(first, second);
    }

    #[test]
    fn shown_items_stagger_by_index() {
        let plan = plan_filter(&ITEMS, "web");
        assert_eq!(plan[0], ItemTransition::Show { delay_ms: 0 });
        assert_eq!(plan[2], ItemTransition::Show { delay_ms: 200 });
        assert_eq!(plan[1], ItemTransition::Hide { remove_after_ms: 300 });
    }

    #[test]
    fn uncategorised_item_only_matches_all() {
        assert!(item_matches("all", None));
        assert!(!item_matches("web", None));
    }

    #[test]
    fn project_details_trim_text_content() {
        let details = ProjectDetails::new(
            Some("/img/a.webp".to_string()),
            Some("  Launch  ".to_string()),
            None,
        );
        assert_eq!(details.title, "Launch");
        assert_eq!(details.description, "");
        assert_eq!(details.image_src, "/img/a.webp");
    }
}
